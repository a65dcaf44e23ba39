//! Hebrew and Greek lexicon lookups by Strong's number.
//!
//! Each language's dictionary is fetched at most once and kept until
//! [`LexiconStore::clear_cache`]. A failed fetch is not cached, so the next
//! lookup retries.

use std::sync::{Arc, Mutex};

use crate::config::DataLayout;
use crate::models::{Lexicon, LexiconEntry};
use crate::source::{fetch_json, lock, ResourceSource};
use crate::strongs::{self, Language};

pub struct LexiconStore {
    source: Arc<dyn ResourceSource>,
    layout: DataLayout,
    hebrew: Mutex<Option<Arc<Lexicon>>>,
    greek: Mutex<Option<Arc<Lexicon>>>,
}

impl LexiconStore {
    pub fn new(source: Arc<dyn ResourceSource>, layout: DataLayout) -> Self {
        Self {
            source,
            layout,
            hebrew: Mutex::new(None),
            greek: Mutex::new(None),
        }
    }

    fn slot(&self, language: Language) -> &Mutex<Option<Arc<Lexicon>>> {
        match language {
            Language::Hebrew => &self.hebrew,
            Language::Greek => &self.greek,
        }
    }

    /// The dictionary for one language. Empty (and uncached) if it could not be loaded.
    pub fn load_lexicon(&self, language: Language) -> Arc<Lexicon> {
        if let Some(cached) = lock(self.slot(language)).as_ref() {
            return Arc::clone(cached);
        }

        let path = self.layout.lexicon_path(language);
        match fetch_json::<Lexicon>(self.source.as_ref(), path) {
            Ok(lexicon) => {
                tracing::debug!(?language, entries = lexicon.len(), "lexicon loaded");
                let lexicon = Arc::new(lexicon);
                *lock(self.slot(language)) = Some(Arc::clone(&lexicon));
                lexicon
            }
            Err(err) => {
                tracing::warn!(?language, path, error = %err, "failed to load lexicon");
                Arc::new(Lexicon::new())
            }
        }
    }

    /// Look up an entry. Input is normalized to uppercase; `None` for empty or unknown numbers.
    pub fn get_entry(&self, strongs: &str) -> Option<LexiconEntry> {
        let key = strongs::normalize(strongs)?;
        let lexicon = self.load_lexicon(get_language(&key));

        lexicon
            .get(&key)
            .or_else(|| strongs::padded(&key).and_then(|padded| lexicon.get(&padded)))
            .cloned()
    }

    /// Whether a language's dictionary is currently cached.
    pub fn is_loaded(&self, language: Language) -> bool {
        lock(self.slot(language)).is_some()
    }

    /// Forget both dictionaries; the next lookup fetches again.
    pub fn clear_cache(&self) {
        *lock(&self.hebrew) = None;
        *lock(&self.greek) = None;
    }
}

/// `H` numbers are Hebrew; everything else falls back to Greek.
pub fn get_language(strongs: &str) -> Language {
    strongs::language(strongs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    const HEBREW: &str = r#"{"H0430": {"word": "אֱלֹהִים", "translit": "elohim", "gloss": "God"}}"#;
    const GREEK: &str = r#"{"G3056": {"word": "λόγος", "translit": "logos", "gloss": "word"}}"#;

    fn store_with(source: &Arc<MemorySource>) -> LexiconStore {
        LexiconStore::new(source.clone(), DataLayout::default())
    }

    #[test]
    fn test_get_entry_dispatches_by_prefix() {
        let source = Arc::new(
            MemorySource::new()
                .with("lexicon/hebrew.json", HEBREW)
                .with("lexicon/greek.json", GREEK),
        );
        let store = store_with(&source);

        assert_eq!(store.get_entry("h0430").unwrap().gloss, "God");
        assert_eq!(store.get_entry("G3056").unwrap().translit, "logos");
        assert!(store.get_entry("H9999").is_none());
        assert!(store.get_entry("").is_none());
    }

    #[test]
    fn test_padded_key_fallback() {
        let source = Arc::new(MemorySource::new().with("lexicon/hebrew.json", HEBREW));
        let store = store_with(&source);
        assert_eq!(store.get_entry("H430").unwrap().word, "אֱלֹהִים");
    }

    #[test]
    fn test_lexicon_fetched_once() {
        let source = Arc::new(MemorySource::new().with("lexicon/greek.json", GREEK));
        let store = store_with(&source);

        store.get_entry("G3056");
        store.get_entry("G3056");
        store.get_entry("G0001");
        assert_eq!(source.fetch_count("lexicon/greek.json"), 1);
        assert!(store.is_loaded(Language::Greek));
        assert!(!store.is_loaded(Language::Hebrew));
    }

    #[test]
    fn test_failed_load_retries() {
        let source = Arc::new(MemorySource::new());
        let store = store_with(&source);

        assert!(store.load_lexicon(Language::Hebrew).is_empty());
        assert!(!store.is_loaded(Language::Hebrew));

        source.insert("lexicon/hebrew.json", HEBREW);
        assert_eq!(store.load_lexicon(Language::Hebrew).len(), 1);
        assert_eq!(source.fetch_count("lexicon/hebrew.json"), 2);
    }

    #[test]
    fn test_clear_cache_forces_refetch() {
        let source = Arc::new(MemorySource::new().with("lexicon/hebrew.json", HEBREW));
        let store = store_with(&source);

        store.get_entry("H0430");
        store.clear_cache();
        assert!(!store.is_loaded(Language::Hebrew));
        store.get_entry("H0430");
        assert_eq!(source.fetch_count("lexicon/hebrew.json"), 2);
    }

    #[test]
    fn test_unprefixed_defaults_to_greek() {
        assert_eq!(get_language("3056"), Language::Greek);
        assert_eq!(get_language("H1"), Language::Hebrew);
    }
}
