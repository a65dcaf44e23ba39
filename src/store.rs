//! Chapter, heading, index and concordance loading with per-key caching.
//!
//! Every cache is append-only until [`BibleStore::clear_all`]. Failed loads
//! are logged and never cached, so a later call retries. Overlapping loads
//! of the same key are not deduplicated; the last one to finish wins, which
//! is harmless because content per key is stable.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::books;
use crate::config::DataLayout;
use crate::models::{
    Chapter, ChapterIndex, Concordance, EnrichedChapter, Heading, IndexEntry, Verse,
};
use crate::source::{fetch_json, lock, ResourceSource, SourceError};

type ChapterKey = (&'static str, u32);

pub struct BibleStore {
    source: Arc<dyn ResourceSource>,
    layout: DataLayout,
    chapters: Mutex<HashMap<ChapterKey, Arc<Chapter>>>,
    indexes: Mutex<HashMap<ChapterKey, Arc<ChapterIndex>>>,
    headings: Mutex<Option<Arc<Vec<Heading>>>>,
    concordance: Mutex<Option<Arc<Concordance>>>,
}

impl BibleStore {
    pub fn new(source: Arc<dyn ResourceSource>, layout: DataLayout) -> Self {
        Self {
            source,
            layout,
            chapters: Mutex::new(HashMap::new()),
            indexes: Mutex::new(HashMap::new()),
            headings: Mutex::new(None),
            concordance: Mutex::new(None),
        }
    }

    /// Load a chapter by canonical book id (1-66).
    ///
    /// `None` if the id is unknown, the resource is missing or unreadable,
    /// or it holds no verses.
    pub fn load_chapter(&self, book_id: u8, chapter: u32) -> Option<Arc<Chapter>> {
        let Some(book) = books::by_id(book_id) else {
            tracing::warn!(book_id, "unknown book id");
            return None;
        };
        self.load_book_chapter(book, chapter)
    }

    /// Load a chapter by book code; aliases fold to the canonical code.
    pub fn load_chapter_by_code(&self, code: &str, chapter: u32) -> Option<Arc<Chapter>> {
        let Some(book) = books::find(code) else {
            tracing::warn!(code, "unresolvable book code");
            return None;
        };
        self.load_book_chapter(book, chapter)
    }

    fn load_book_chapter(&self, book: &'static books::Book, chapter: u32) -> Option<Arc<Chapter>> {
        let key = (book.code, chapter);
        if let Some(cached) = lock(&self.chapters).get(&key) {
            tracing::debug!(book = book.code, chapter, "chapter cache hit");
            return Some(Arc::clone(cached));
        }

        let path = self.layout.chapter_path(book.code, chapter);
        let raw: BTreeMap<String, Verse> = match fetch_json(self.source.as_ref(), &path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(book = book.code, chapter, error = %err, "failed to load chapter");
                return None;
            }
        };

        let loaded = Chapter::from_raw(book, chapter, raw);
        if loaded.verses.is_empty() {
            tracing::warn!(book = book.code, chapter, "chapter resource has no verses");
            return None;
        }

        let loaded = Arc::new(loaded);
        lock(&self.chapters).insert(key, Arc::clone(&loaded));
        Some(loaded)
    }

    /// All section headings. Loaded once; empty (and retried later) on failure.
    pub fn load_headings(&self) -> Arc<Vec<Heading>> {
        if let Some(cached) = lock(&self.headings).as_ref() {
            return Arc::clone(cached);
        }

        match self.fetch_lines::<Heading>(&self.layout.headings) {
            Ok(lines) => {
                let headings: Vec<Heading> = lines.into_iter().flatten().collect();
                tracing::debug!(count = headings.len(), "headings loaded");
                let headings = Arc::new(headings);
                *lock(&self.headings) = Some(Arc::clone(&headings));
                headings
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load headings");
                Arc::new(Vec::new())
            }
        }
    }

    /// Headings for one chapter, from the cached list.
    pub fn headings_for_chapter(&self, code: &str, chapter: u32) -> Vec<Heading> {
        let all = self.load_headings();
        filter_for_chapter(&all, code, chapter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Per-verse enrichment for one chapter.
    ///
    /// `None` means the index is unavailable, which is distinct from a
    /// loaded index with no entries. Callers should substitute an empty map.
    pub fn load_index(&self, code: &str, chapter: u32) -> Option<Arc<ChapterIndex>> {
        let Some(book) = books::find(code) else {
            tracing::warn!(code, "unresolvable book code");
            return None;
        };
        let key = (book.code, chapter);
        if let Some(cached) = lock(&self.indexes).get(&key) {
            return Some(Arc::clone(cached));
        }

        let path = self.layout.index_path(book.code, chapter);
        let lines = match self.fetch_lines::<IndexEntry>(&path) {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(book = book.code, chapter, error = %err, "index unavailable");
                return None;
            }
        };

        // Line position is the verse number; blank lines keep their slot.
        let index: ChapterIndex = lines
            .into_iter()
            .enumerate()
            .map(|(i, entry)| (i as u32 + 1, entry.unwrap_or_default()))
            .collect();

        let index = Arc::new(index);
        lock(&self.indexes).insert(key, Arc::clone(&index));
        Some(index)
    }

    /// The global Strong's number -> verse references map.
    ///
    /// `None` if it could not be loaded; nothing is cached in that case.
    pub fn load_concordance(&self) -> Option<Arc<Concordance>> {
        if let Some(cached) = lock(&self.concordance).as_ref() {
            return Some(Arc::clone(cached));
        }

        match fetch_json::<Concordance>(self.source.as_ref(), &self.layout.concordance) {
            Ok(map) => {
                tracing::debug!(keys = map.len(), "concordance loaded");
                let map = Arc::new(map);
                *lock(&self.concordance) = Some(Arc::clone(&map));
                Some(map)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load concordance");
                None
            }
        }
    }

    /// Chapter plus headings plus index, loaded concurrently.
    ///
    /// `None` only when the chapter itself cannot be loaded. Missing
    /// headings or index degrade to empty collections.
    pub fn load_enriched_chapter(&self, book_id: u8, chapter: u32) -> Option<EnrichedChapter> {
        let code = books::book_code(book_id)?;

        let (loaded, (headings, index)) = rayon::join(
            || self.load_chapter(book_id, chapter),
            || {
                rayon::join(
                    || self.headings_for_chapter(code, chapter),
                    || self.load_index(code, chapter),
                )
            },
        );

        Some(EnrichedChapter {
            chapter: loaded?,
            headings,
            index: index.unwrap_or_default(),
        })
    }

    /// Number of cached chapters.
    pub fn cached_chapters(&self) -> usize {
        lock(&self.chapters).len()
    }

    /// Reset every cache to its unloaded state.
    pub fn clear_all(&self) {
        lock(&self.chapters).clear();
        lock(&self.indexes).clear();
        *lock(&self.headings) = None;
        *lock(&self.concordance) = None;
    }

    /// Fetch a newline-delimited JSON resource.
    ///
    /// Blank lines yield `None` in place. Lines that fail to parse are
    /// logged and also yield `None`, so positions are preserved. A resource
    /// with content lines where none parses is rejected as malformed; one
    /// made only of blank lines is not.
    fn fetch_lines<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Vec<Option<T>>, SourceError> {
        let text = self.source.fetch(path)?;
        let mut parsed = 0usize;
        let mut content = 0usize;
        let mut out = Vec::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                out.push(None);
                continue;
            }
            content += 1;
            match serde_json::from_str::<T>(line) {
                Ok(value) => {
                    parsed += 1;
                    out.push(Some(value));
                }
                Err(err) => {
                    tracing::warn!(
                        path,
                        line = lineno + 1,
                        error = %err,
                        "skipping malformed line"
                    );
                    out.push(None);
                }
            }
        }

        if parsed == 0 && content > 0 {
            return Err(SourceError::Malformed {
                path: path.to_string(),
                reason: "no line could be parsed".to_string(),
            });
        }
        Ok(out)
    }
}

/// Headings belonging to one chapter. Pure; aliases in `code` are folded.
pub fn filter_for_chapter<'a>(
    headings: &'a [Heading],
    code: &str,
    chapter: u32,
) -> Vec<&'a Heading> {
    let Some(canonical) = books::canonical_code(code) else {
        return Vec::new();
    };
    headings
        .iter()
        .filter(|h| h.book == canonical && h.chapter == chapter)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeadingLevel;
    use crate::source::MemorySource;

    const GEN_1: &str = r#"{
        "1": {"w": [["In", null], ["the beginning", "H7225"], ["God", "H0430"], ["created", "H1254"]],
              "heb": [["בְּרֵאשִׁית", "H7225"], ["בָּרָא", "H1254"], ["אֱלֹהִים", "H0430"]]},
        "2": {"w": [["Now", null], ["the earth", "H0776"]]}
    }"#;

    const HEADINGS: &str = concat!(
        r#"{"id": 1, "b": "GEN", "c": 1, "before_v": 1, "level": "s1", "text": "The Creation"}"#,
        "\n",
        r#"{"id": 2, "b": "GEN", "c": 2, "before_v": 4, "level": "s1", "text": "Man and Woman"}"#,
        "\n",
        r#"{"id": 3, "b": "JHN", "c": 1, "before_v": 1, "level": "s1", "text": "The Word"}"#,
        "\n",
    );

    const INDEX: &str = concat!(
        r#"{"strongs": ["H7225", "H0430"], "xrefs": ["JHN.1.1"], "senses": {"H0430": "God"}}"#,
        "\n",
        r#"{"strongs": ["H0776"]}"#,
        "\n",
    );

    fn source() -> Arc<MemorySource> {
        Arc::new(
            MemorySource::new()
                .with("chapters/GEN/1.json", GEN_1)
                .with("headings.jsonl", HEADINGS)
                .with("index/GEN/1.jsonl", INDEX),
        )
    }

    fn store(source: &Arc<MemorySource>) -> BibleStore {
        BibleStore::new(source.clone(), DataLayout::default())
    }

    #[test]
    fn test_load_chapter_memoized() {
        let src = source();
        let store = store(&src);

        let first = store.load_chapter(1, 1).unwrap();
        let second = store.load_chapter(1, 1).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(src.fetch_count("chapters/GEN/1.json"), 1);
        assert_eq!(first.verses.len(), 2);
        assert_eq!(first.book_code, "GEN");
    }

    #[test]
    fn test_chapter_by_alias_shares_cache() {
        let src = Arc::new(MemorySource::new().with("chapters/JHN/1.json", r#"{"1": {"w": []}}"#));
        let store = store(&src);

        let a = store.load_chapter_by_code("JOH", 1).unwrap();
        let b = store.load_chapter(43, 1).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(src.fetch_count("chapters/JHN/1.json"), 1);
    }

    #[test]
    fn test_load_chapter_failures() {
        let src = Arc::new(
            MemorySource::new()
                .with("chapters/GEN/3.json", "{}")
                .with("chapters/GEN/4.json", "not json"),
        );
        let store = store(&src);

        assert!(store.load_chapter(0, 1).is_none());
        assert!(store.load_chapter(67, 1).is_none());
        assert!(store.load_chapter_by_code("XYZ", 1).is_none());
        assert!(store.load_chapter(1, 2).is_none());
        assert!(store.load_chapter(1, 3).is_none());
        assert!(store.load_chapter(1, 4).is_none());
        assert_eq!(store.cached_chapters(), 0);
    }

    #[test]
    fn test_failed_chapter_retries() {
        let src = Arc::new(MemorySource::new());
        let store = store(&src);

        assert!(store.load_chapter(1, 1).is_none());
        src.insert("chapters/GEN/1.json", GEN_1);
        assert!(store.load_chapter(1, 1).is_some());
        assert_eq!(src.fetch_count("chapters/GEN/1.json"), 2);
    }

    #[test]
    fn test_headings_filter() {
        let src = source();
        let store = store(&src);

        let all = store.load_headings();
        assert_eq!(all.len(), 3);

        let gen1 = filter_for_chapter(&all, "GEN", 1);
        assert_eq!(gen1.len(), 1);
        assert_eq!(gen1[0].text, "The Creation");
        assert_eq!(gen1[0].level, HeadingLevel::S1);

        assert_eq!(filter_for_chapter(&all, "joh", 1).len(), 1);
        assert!(filter_for_chapter(&all, "XYZ", 1).is_empty());

        store.headings_for_chapter("GEN", 2);
        assert_eq!(src.fetch_count("headings.jsonl"), 1);
    }

    #[test]
    fn test_headings_skip_malformed_lines() {
        let body = format!("{}\n{{\"broken\": true}}\n\n", HEADINGS.lines().next().unwrap());
        let src = Arc::new(MemorySource::new().with("headings.jsonl", body));
        let store = store(&src);
        assert_eq!(store.load_headings().len(), 1);
    }

    #[test]
    fn test_index_line_positions() {
        let body = concat!(
            r#"{"strongs": ["H7225"]}"#,
            "\n",
            "\n",
            r#"{"topics": ["Creation"]}"#,
            "\n",
        );
        let src = Arc::new(MemorySource::new().with("index/GEN/1.jsonl", body));
        let store = store(&src);

        let index = store.load_index("GEN", 1).unwrap();
        assert_eq!(index.len(), 3);
        assert!(index[&1].has_strongs("H7225"));
        assert_eq!(index[&2], IndexEntry::default());
        assert_eq!(index[&3].topics.as_deref(), Some(&["Creation".to_string()][..]));
    }

    #[test]
    fn test_index_unavailable_is_none() {
        let src = Arc::new(MemorySource::new().with("index/GEN/2.jsonl", ""));
        let store = store(&src);

        assert!(store.load_index("GEN", 1).is_none());
        // An empty resource is a loaded index with no entries.
        assert!(store.load_index("GEN", 2).unwrap().is_empty());
    }

    #[test]
    fn test_blank_index_keeps_slots() {
        let src = Arc::new(
            MemorySource::new()
                .with("index/GEN/1.jsonl", "\n\n")
                .with("index/GEN/2.jsonl", "not json\n\n"),
        );
        let store = store(&src);

        let index = store.load_index("GEN", 1).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.values().all(|e| *e == IndexEntry::default()));

        // Content that never parses is still unavailable.
        assert!(store.load_index("GEN", 2).is_none());
    }

    #[test]
    fn test_concordance_retry_after_failure() {
        let src = Arc::new(MemorySource::new());
        let store = store(&src);

        assert!(store.load_concordance().is_none());
        src.insert("concordance.json", r#"{"H0430": ["GEN.1.1"]}"#);
        let map = store.load_concordance().unwrap();
        assert_eq!(map["H0430"], vec!["GEN.1.1".to_string()]);
        store.load_concordance();
        assert_eq!(src.fetch_count("concordance.json"), 2);
    }

    #[test]
    fn test_enriched_chapter() {
        let src = source();
        let store = store(&src);

        let enriched = store.load_enriched_chapter(1, 1).unwrap();
        assert_eq!(enriched.chapter.number, 1);
        assert_eq!(enriched.headings.len(), 1);
        assert_eq!(enriched.headings_before(1).count(), 1);
        assert_eq!(enriched.entry(1).unwrap().sense_for("H0430"), Some("God"));
    }

    #[test]
    fn test_enriched_chapter_degrades() {
        let src = Arc::new(MemorySource::new().with("chapters/GEN/1.json", GEN_1));
        let store = store(&src);

        let enriched = store.load_enriched_chapter(1, 1).unwrap();
        assert!(enriched.headings.is_empty());
        assert!(enriched.index.is_empty());

        assert!(store.load_enriched_chapter(1, 9).is_none());
        assert!(store.load_enriched_chapter(0, 1).is_none());
    }

    #[test]
    fn test_clear_all() {
        let src = source();
        let store = store(&src);

        store.load_enriched_chapter(1, 1);
        store.clear_all();
        assert_eq!(store.cached_chapters(), 0);

        store.load_enriched_chapter(1, 1);
        assert_eq!(src.fetch_count("chapters/GEN/1.json"), 2);
        assert_eq!(src.fetch_count("headings.jsonl"), 2);
        assert_eq!(src.fetch_count("index/GEN/1.jsonl"), 2);
    }
}
