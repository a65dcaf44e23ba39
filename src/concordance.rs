//! Concordance search: every verse in which a Strong's number occurs.
//!
//! Results are always sorted by (book id, chapter, verse) and hold each verse
//! once; next/previous navigation relies on that order and the source lists
//! are not trusted to be sorted or unique.

use rayon::prelude::*;

use crate::books;
use crate::models::{ConcordanceResult, VerseRef};
use crate::store::BibleStore;
use crate::strongs::{self, Testament};

/// Look up a Strong's number in the precomputed concordance map.
///
/// Unknown numbers, empty input and an unavailable concordance all give an
/// empty list. References outside the number's testament are dropped, and
/// references naming the same verse (`JHN.1.1`, `JOH.1.1`) collapse to one.
pub fn search(store: &BibleStore, strongs_number: &str) -> Vec<ConcordanceResult> {
    let Some(key) = strongs::normalize(strongs_number) else {
        return Vec::new();
    };
    let Some(concordance) = store.load_concordance() else {
        return Vec::new();
    };

    let refs = concordance
        .get(&key)
        .or_else(|| strongs::padded(&key).and_then(|padded| concordance.get(&padded)));
    let Some(refs) = refs else {
        tracing::debug!(strongs = %key, "no concordance entry");
        return Vec::new();
    };

    let testament = testament_for(&key);
    let mut results: Vec<ConcordanceResult> = Vec::with_capacity(refs.len());
    for reference in refs {
        match VerseRef::parse(reference) {
            Some(r) if testament.contains(r.book_id) => results.push(r.into()),
            Some(_) => {
                tracing::warn!(
                    strongs = %key,
                    reference = %reference,
                    "dropping cross-testament reference"
                );
            }
            None => {
                tracing::warn!(
                    strongs = %key,
                    reference = %reference,
                    "unparseable verse reference"
                );
            }
        }
    }

    sort_results(&mut results);
    results.dedup();
    results
}

/// Search by scanning every chapter index of the number's testament.
///
/// Slower than [`search`] and independent of the concordance resource.
/// Chapters whose index is unavailable are skipped.
pub fn search_by_index_scan(store: &BibleStore, strongs_number: &str) -> Vec<ConcordanceResult> {
    let Some(key) = strongs::normalize(strongs_number) else {
        return Vec::new();
    };
    let testament = testament_for(&key);

    let chapters: Vec<(&'static books::Book, u32)> = books::books_in(testament)
        .flat_map(|book| (1..=book.chapters).map(move |c| (book, c)))
        .collect();

    let mut results: Vec<ConcordanceResult> = chapters
        .par_iter()
        .flat_map_iter(|&(book, chapter)| {
            let Some(index) = store.load_index(book.code, chapter) else {
                return Vec::new();
            };
            index
                .iter()
                .filter(|(_, entry)| entry.has_strongs(&key))
                .map(|(&verse, _)| ConcordanceResult {
                    book_code: book.code.to_string(),
                    book_id: book.id,
                    chapter,
                    verse,
                })
                .collect::<Vec<_>>()
        })
        .collect();

    results.retain(|r| books::testament_of(r.book_id) == Some(testament));
    sort_results(&mut results);
    results
}

fn sort_results(results: &mut [ConcordanceResult]) {
    results.sort_by_key(ConcordanceResult::sort_key);
}

/// The first result strictly after the given verse.
pub fn next_occurrence(
    results: &[ConcordanceResult],
    current: VerseRef,
) -> Option<&ConcordanceResult> {
    let key = (current.book_id, current.chapter, current.verse);
    let idx = results.partition_point(|r| r.sort_key() <= key);
    results.get(idx)
}

/// The last result strictly before the given verse.
pub fn previous_occurrence(
    results: &[ConcordanceResult],
    current: VerseRef,
) -> Option<&ConcordanceResult> {
    let key = (current.book_id, current.chapter, current.verse);
    let idx = results.partition_point(|r| r.sort_key() < key);
    idx.checked_sub(1).and_then(|i| results.get(i))
}

/// Which testament a number belongs to.
pub fn testament_for(strongs_number: &str) -> Testament {
    strongs::language(strongs_number).testament()
}
