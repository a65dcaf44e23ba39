//! Interlinear word alignment over Strong's-tagged word arrays.
//!
//! Correspondences are already encoded in the data: an English word and an
//! original-language word belong together when they carry the same Strong's
//! number. The engine only has to pick which tokens take part and in which
//! order they are emitted.
//!
//! The two orders behave differently on purpose:
//!
//! * English order is many-to-one. Every eligible English word looks up the
//!   first original word with its number, and several English words may
//!   share that original text.
//! * Original order is one-to-one. Each original word consumes the first
//!   unconsumed English word with its number, so repeated numbers bind in
//!   left-to-right pairs and an English word is never used twice.

use std::collections::HashMap;

use crate::models::{AlignOrder, AlignedWord, ChapterIndex, Verse, Word};
use crate::text::{is_punctuation, should_skip_word};

/// Align one verse in the requested order.
pub fn align(verse: &Verse, order: AlignOrder) -> Vec<AlignedWord> {
    align_verse(&verse.w, verse.original(), order)
}

/// Align an English word array with its original-language counterpart.
///
/// With no original array (or an empty one) the result is always in English
/// order with empty `original` fields, whatever `order` asks for.
pub fn align_verse(
    english: &[Word],
    original: Option<&[Word]>,
    order: AlignOrder,
) -> Vec<AlignedWord> {
    match (order, original) {
        (AlignOrder::Original, Some(original)) if !original.is_empty() => {
            align_original_order(english, original)
        }
        _ => align_english_order(english, original.unwrap_or(&[])),
    }
}

/// English reading order. No consumption tracking.
pub fn align_english_order(english: &[Word], original: &[Word]) -> Vec<AlignedWord> {
    let first_text = first_original_text(original);

    english
        .iter()
        .filter_map(|word| {
            let strongs = word.strongs()?;
            if is_punctuation(&word.text) || should_skip_word(&word.text, Some(strongs)) {
                return None;
            }
            Some(AlignedWord {
                original: first_text.get(strongs).map(|t| t.to_string()).unwrap_or_default(),
                english: word.text.clone(),
                strongs: strongs.to_string(),
            })
        })
        .collect()
}

/// Hebrew/Greek reading order. Each English occurrence is consumed at most once.
///
/// Placeholder English tokens can still be consumed, so they keep their
/// position in the pairing, but their text is not emitted.
pub fn align_original_order(english: &[Word], original: &[Word]) -> Vec<AlignedWord> {
    let mut consumed = vec![false; english.len()];
    let mut aligned = Vec::with_capacity(original.len());

    for word in original {
        let Some(strongs) = word.strongs() else {
            continue;
        };
        if is_punctuation(&word.text) {
            continue;
        }

        let matched = english
            .iter()
            .enumerate()
            .find(|(i, e)| !consumed[*i] && e.strongs() == Some(strongs));

        let english_text = match matched {
            Some((i, e)) => {
                consumed[i] = true;
                if should_skip_word(&e.text, e.strongs()) {
                    String::new()
                } else {
                    e.text.clone()
                }
            }
            None => String::new(),
        };

        aligned.push(AlignedWord {
            original: word.text.clone(),
            english: english_text,
            strongs: strongs.to_string(),
        });
    }

    aligned
}

/// Strong's number -> text of its first occurrence in the original array.
///
/// Later occurrences never overwrite the first.
fn first_original_text(original: &[Word]) -> HashMap<&str, &str> {
    let mut map = HashMap::with_capacity(original.len());
    for word in original {
        if let Some(strongs) = word.strongs() {
            map.entry(strongs).or_insert(word.text.as_str());
        }
    }
    map
}

/// An aligned word together with the occurrence-specific gloss, if the
/// chapter index records one for this verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterlinearCell {
    pub word: AlignedWord,
    pub sense: Option<String>,
}

/// Align a verse and attach word-sense glosses from the chapter index.
pub fn interlinear_pairs(
    verse: &Verse,
    index: &ChapterIndex,
    order: AlignOrder,
) -> Vec<InterlinearCell> {
    let entry = index.get(&verse.number);
    align(verse, order)
        .into_iter()
        .map(|word| {
            let sense = entry
                .and_then(|e| e.sense_for(&word.strongs))
                .map(str::to_string);
            InterlinearCell { word, sense }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndexEntry;

    fn w(text: &str, strongs: Option<&str>) -> Word {
        Word::new(text, strongs)
    }

    fn triples(aligned: &[AlignedWord]) -> Vec<(&str, &str, &str)> {
        aligned
            .iter()
            .map(|a| (a.original.as_str(), a.english.as_str(), a.strongs.as_str()))
            .collect()
    }

    fn genesis_1_1() -> (Vec<Word>, Vec<Word>) {
        let english = vec![
            w("In", None),
            w("the", None),
            w("beginning", Some("H7225")),
            w("God", Some("H0430")),
            w("created", Some("H1254")),
            w(".", None),
        ];
        let hebrew = vec![
            w("בְּרֵאשִׁית", Some("H7225")),
            w("בָּרָא", Some("H1254")),
            w("אֱלֹהִים", Some("H0430")),
            w("׃", None),
        ];
        (english, hebrew)
    }

    #[test]
    fn test_english_order() {
        let (english, hebrew) = genesis_1_1();
        let aligned = align_verse(&english, Some(hebrew.as_slice()), AlignOrder::English);

        assert_eq!(
            triples(&aligned),
            vec![
                ("בְּרֵאשִׁית", "beginning", "H7225"),
                ("אֱלֹהִים", "God", "H0430"),
                ("בָּרָא", "created", "H1254"),
            ]
        );
    }

    #[test]
    fn test_original_order() {
        let (english, hebrew) = genesis_1_1();
        let aligned = align_verse(&english, Some(hebrew.as_slice()), AlignOrder::Original);

        assert_eq!(
            triples(&aligned),
            vec![
                ("בְּרֵאשִׁית", "beginning", "H7225"),
                ("בָּרָא", "created", "H1254"),
                ("אֱלֹהִים", "God", "H0430"),
            ]
        );
    }

    #[test]
    fn test_english_order_first_occurrence_wins() {
        let english = vec![w("LORD", Some("H3068")), w("and", None), w("LORD", Some("H3068"))];
        let hebrew = vec![w("יְהוָה", Some("H3068")), w("יְהוִה", Some("H3068"))];

        let aligned = align_english_order(&english, &hebrew);
        assert_eq!(aligned.len(), 2);
        assert!(aligned.iter().all(|a| a.original == "יְהוָה"));
    }

    #[test]
    fn test_english_order_many_to_one() {
        let english = vec![
            w("the", Some("G3588")),
            w("Word", Some("G3056")),
            w("the", Some("G3588")),
        ];
        let greek = vec![w("ὁ", Some("G3588")), w("λόγος", Some("G3056"))];

        let aligned = align_english_order(&english, &greek);
        assert_eq!(
            triples(&aligned),
            vec![("ὁ", "the", "G3588"), ("λόγος", "Word", "G3056"), ("ὁ", "the", "G3588")]
        );
    }

    #[test]
    fn test_original_order_consumes_once() {
        let english = vec![
            w("holy", Some("G0040")),
            w("first", None),
            w("holy", Some("G0040")),
            w("second", None),
        ];
        let greek = vec![
            w("ἅγιος-1", Some("G0040")),
            w("ἅγιος-2", Some("G0040")),
            w("ἅγιος-3", Some("G0040")),
        ];

        let aligned = align_original_order(&english, &greek);
        assert_eq!(
            triples(&aligned),
            vec![
                ("ἅγιος-1", "holy", "G0040"),
                ("ἅγιος-2", "holy", "G0040"),
                ("ἅγιος-3", "", "G0040"),
            ]
        );
    }

    #[test]
    fn test_original_order_binds_distinct_occurrences() {
        let english = vec![w("A", Some("H0001")), w("B", Some("H0001"))];
        let hebrew = vec![w("x", Some("H0001")), w("y", Some("H0001"))];

        let aligned = align_original_order(&english, &hebrew);
        assert_eq!(aligned[0].english, "A");
        assert_eq!(aligned[1].english, "B");
    }

    #[test]
    fn test_untranslated_particle() {
        let english = vec![w("God", Some("H0430"))];
        let hebrew = vec![w("אֵת", Some("H0853")), w("אֱלֹהִים", Some("H0430"))];

        let aligned = align_original_order(&english, &hebrew);
        assert_eq!(triples(&aligned), vec![("אֵת", "", "H0853"), ("אֱלֹהִים", "God", "H0430")]);
    }

    #[test]
    fn test_skip_markers_filtered() {
        let english = vec![
            w("- - -", Some("H0853")),
            w("vvv", Some("H0853")),
            w("God", Some("H0430")),
            w(". . .", Some("H9999")),
        ];
        let hebrew = vec![w("אֵת", Some("H0853")), w("אֱלֹהִים", Some("H0430"))];

        let aligned = align_english_order(&english, &hebrew);
        assert_eq!(triples(&aligned), vec![("אֱלֹהִים", "God", "H0430")]);

        // In original order the placeholder is consumed but renders empty.
        let aligned = align_original_order(&english, &hebrew);
        assert_eq!(triples(&aligned), vec![("אֵת", "", "H0853"), ("אֱלֹהִים", "God", "H0430")]);
    }

    #[test]
    fn test_punctuation_with_strongs_filtered() {
        let english = vec![w("and", Some("G2532")), w("—", Some("G9999")), w(".", None)];
        let greek = vec![w("καί", Some("G2532")), w("—", Some("G9999")), w("·", None)];

        let expected = vec![("καί", "and", "G2532")];
        assert_eq!(triples(&align_english_order(&english, &greek)), expected);
        assert_eq!(triples(&align_original_order(&english, &greek)), expected);
    }

    #[test]
    fn test_missing_original_falls_back() {
        let english = vec![w("In", None), w("beginning", Some("H7225")), w("God", Some("H0430"))];

        let empty: &[Word] = &[];
        for order in [AlignOrder::English, AlignOrder::Original] {
            let aligned = align_verse(&english, None, order);
            assert_eq!(triples(&aligned), vec![("", "beginning", "H7225"), ("", "God", "H0430")]);

            let aligned = align_verse(&english, Some(empty), order);
            assert_eq!(aligned.len(), 2);
            assert!(aligned.iter().all(|a| a.original.is_empty()));
        }
    }

    #[test]
    fn test_strongs_absent_from_original() {
        let english = vec![w("light", Some("H0216")), w("day", Some("H3117"))];
        let hebrew = vec![w("אוֹר", Some("H0216"))];

        let aligned = align_english_order(&english, &hebrew);
        assert_eq!(aligned[1].original, "");
        assert_eq!(aligned[1].english, "day");
    }

    #[test]
    fn test_no_eligible_words() {
        let english = vec![w("Selah", None), w(".", None)];
        let hebrew = vec![w("סֶלָה", None)];

        assert!(align_verse(&english, Some(hebrew.as_slice()), AlignOrder::English).is_empty());
        assert!(align_verse(&english, Some(hebrew.as_slice()), AlignOrder::Original).is_empty());
        assert!(align_verse(&[], None, AlignOrder::English).is_empty());
    }

    #[test]
    fn test_interlinear_pairs_attach_senses() {
        let (english, hebrew) = genesis_1_1();
        let verse = Verse {
            number: 1,
            w: english,
            heb: Some(hebrew),
            grk: None,
        };
        let mut senses = HashMap::new();
        senses.insert("H0430".to_string(), "God (plural of majesty)".to_string());
        let mut index = ChapterIndex::new();
        index.insert(
            1,
            IndexEntry {
                senses: Some(senses),
                ..Default::default()
            },
        );

        let cells = interlinear_pairs(&verse, &index, AlignOrder::English);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].sense, None);
        assert_eq!(cells[1].sense.as_deref(), Some("God (plural of majesty)"));

        let no_index = interlinear_pairs(&verse, &ChapterIndex::new(), AlignOrder::Original);
        assert!(no_index.iter().all(|c| c.sense.is_none()));
    }
}
