//! Berean Interlinear
//!
//! Strong's-tagged interlinear alignment, enrichment lookups and concordance
//! search over the Berean Standard Bible data set.
//!
//! # Example
//!
//! ```no_run
//! use berean_interlinear::prelude::*;
//! use std::sync::Arc;
//!
//! let source = Arc::new(FileSource::new("data"));
//! let store = BibleStore::new(source, DataLayout::default());
//!
//! // Genesis 1 with headings and per-verse enrichment
//! let enriched = store.load_enriched_chapter(1, 1).unwrap();
//! let verse = enriched.chapter.verse(1).unwrap();
//!
//! // Interlinear in Hebrew word order
//! for word in align(verse, AlignOrder::Original) {
//!     println!("{} {} {}", word.strongs, word.original, word.english);
//! }
//!
//! // Every verse containing H0430, canonically ordered
//! let hits = search(&store, "H0430");
//! println!("{} occurrences", hits.len());
//! ```
//!
//! # Lexicon Example
//!
//! ```no_run
//! use berean_interlinear::prelude::*;
//! use std::sync::Arc;
//!
//! let lexicon = LexiconStore::new(Arc::new(FileSource::new("data")), DataLayout::default());
//! if let Some(entry) = lexicon.get_entry("g3056") {
//!     println!("{}: {}", entry.word, entry.gloss);
//! }
//! ```

pub mod align;
pub mod books;
pub mod concordance;
pub mod config;
pub mod lexicon;
pub mod models;
pub mod output;
pub mod source;
pub mod store;
pub mod strongs;
pub mod text;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::align::{
        align, align_english_order, align_original_order, align_verse, interlinear_pairs,
        InterlinearCell,
    };
    pub use crate::books::{book_code, book_id, book_name, canonical_code, chapter_count, Book};
    pub use crate::concordance::{
        next_occurrence, previous_occurrence, search, search_by_index_scan,
    };
    pub use crate::config::DataLayout;
    pub use crate::lexicon::{get_language, LexiconStore};
    pub use crate::models::{
        AlignOrder, AlignedWord, Chapter, ChapterIndex, Concordance, ConcordanceResult,
        EnrichedChapter, Heading, HeadingLevel, IndexEntry, Lexicon, LexiconEntry, MapLocation,
        Verse, VerseRef, Word,
    };
    pub use crate::output::{
        format_interlinear, format_lexicon_entry, format_reference, print_chapter,
        print_concordance, verse_text, write_concordance_csv, write_json, write_json_file,
        OutputError,
    };
    pub use crate::source::{FileSource, MemorySource, ResourceSource, SourceError};
    pub use crate::store::{filter_for_chapter, BibleStore};
    pub use crate::strongs::{Language, Testament};
    pub use crate::text::{clean_text, is_punctuation, should_skip_word};
}

// Re-export commonly used types at the crate root
pub use models::{AlignOrder, AlignedWord, Chapter, ConcordanceResult, Verse, Word};
pub use store::BibleStore;
