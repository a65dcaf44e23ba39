//! Data structures for chapters, enrichment, lexicon entries and alignment results.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::books;

/// A single token: surface text plus optional Strong's number.
///
/// Serialized as the two-element array `[text, strongsOrNull]` used by the
/// chapter resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Option<String>)", into = "(String, Option<String>)")]
pub struct Word {
    pub text: String,
    pub strongs: Option<String>,
}

impl Word {
    pub fn new(text: impl Into<String>, strongs: Option<&str>) -> Self {
        Word {
            text: text.into(),
            strongs: strongs.map(str::to_string),
        }
    }

    pub fn strongs(&self) -> Option<&str> {
        self.strongs.as_deref()
    }
}

impl From<(String, Option<String>)> for Word {
    fn from((text, strongs): (String, Option<String>)) -> Self {
        Word { text, strongs }
    }
}

impl From<Word> for (String, Option<String>) {
    fn from(word: Word) -> Self {
        (word.text, word.strongs)
    }
}

/// One verse: the English words and, where present, the Hebrew or Greek words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub w: Vec<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heb: Option<Vec<Word>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grk: Option<Vec<Word>>,
}

impl Verse {
    /// The original-language words, Hebrew taking precedence.
    pub fn original(&self) -> Option<&[Word]> {
        self.heb.as_deref().or(self.grk.as_deref())
    }
}

/// A loaded chapter with verses in ascending verse-number order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chapter {
    pub book_code: String,
    pub book_id: u8,
    pub number: u32,
    pub verses: Vec<Verse>,
}

impl Chapter {
    /// Build from the resource shape: verse number (as a string) -> verse body.
    ///
    /// Keys that are not positive integers are dropped.
    pub fn from_raw(book: &books::Book, number: u32, raw: BTreeMap<String, Verse>) -> Self {
        let mut ordered: BTreeMap<u32, Verse> = BTreeMap::new();
        for (key, mut verse) in raw {
            match key.trim().parse::<u32>() {
                Ok(n) if n > 0 => {
                    verse.number = n;
                    ordered.insert(n, verse);
                }
                _ => {
                    tracing::warn!(
                        book = book.code,
                        chapter = number,
                        key = %key,
                        "skipping non-numeric verse key"
                    );
                }
            }
        }

        Chapter {
            book_code: book.code.to_string(),
            book_id: book.id,
            number,
            verses: ordered.into_values().collect(),
        }
    }

    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses
            .binary_search_by_key(&number, |v| v.number)
            .ok()
            .map(|i| &self.verses[i])
    }
}

/// Heading level: major section, minor section, or a reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    S1,
    S2,
    R,
}

/// A section heading shown before a given verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "b", deserialize_with = "book_code_field")]
    pub book: String,
    #[serde(rename = "c")]
    pub chapter: u32,
    #[serde(rename = "before_v")]
    pub before_verse: u32,
    pub level: HeadingLevel,
    pub text: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub refs: Vec<String>,
}

/// A named map point attached to a verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// Per-verse enrichment. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexEntry {
    pub strongs: Option<Vec<String>>,
    pub xrefs: Option<Vec<String>>,
    pub morph: Option<Vec<String>>,
    pub topics: Option<Vec<String>>,
    pub parallels: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub map: Option<Vec<MapLocation>>,
    pub domains: Option<Vec<String>>,
    pub senses: Option<HashMap<String, String>>,
}

impl IndexEntry {
    /// Gloss for this particular occurrence of a Strong's number.
    pub fn sense_for(&self, strongs: &str) -> Option<&str> {
        self.senses.as_ref()?.get(strongs).map(String::as_str)
    }

    pub fn has_strongs(&self, strongs: &str) -> bool {
        self.strongs
            .as_ref()
            .is_some_and(|list| list.iter().any(|s| s.eq_ignore_ascii_case(strongs)))
    }

    pub fn xrefs(&self) -> &[String] {
        self.xrefs.as_deref().unwrap_or(&[])
    }
}

/// Verse number -> enrichment for one chapter.
pub type ChapterIndex = BTreeMap<u32, IndexEntry>;

/// Strong's number -> verse reference strings (`"BOOK.CHAPTER.VERSE"`).
pub type Concordance = HashMap<String, Vec<String>>;

/// Normalized Strong's number -> entry, for one language.
pub type Lexicon = HashMap<String, LexiconEntry>;

/// A lexicon entry for one Strong's number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconEntry {
    #[serde(alias = "lemma")]
    pub word: String,
    #[serde(alias = "xlit")]
    pub translit: String,
    #[serde(alias = "pron")]
    pub pronounce: String,
    pub gloss: String,
    #[serde(alias = "def")]
    pub definition: String,
    #[serde(alias = "def_ext")]
    pub extended: String,
    pub kjv: String,
    pub morph: String,
}

/// A parsed `"BOOK.CHAPTER.VERSE"` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseRef {
    pub book_id: u8,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    /// Parse a dotted reference. Alias book codes are accepted.
    pub fn parse(reference: &str) -> Option<Self> {
        let mut parts = reference.trim().split('.');
        let book_id = books::book_id(parts.next()?)?;
        let chapter = parts.next()?.parse().ok()?;
        let verse = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(VerseRef {
            book_id,
            chapter,
            verse,
        })
    }
}

/// One concordance hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcordanceResult {
    pub book_code: String,
    pub book_id: u8,
    pub chapter: u32,
    pub verse: u32,
}

impl ConcordanceResult {
    pub fn sort_key(&self) -> (u8, u32, u32) {
        (self.book_id, self.chapter, self.verse)
    }
}

impl From<VerseRef> for ConcordanceResult {
    fn from(r: VerseRef) -> Self {
        ConcordanceResult {
            book_code: books::book_code(r.book_id).unwrap_or_default().to_string(),
            book_id: r.book_id,
            chapter: r.chapter,
            verse: r.verse,
        }
    }
}

/// Reading order for interlinear output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignOrder {
    /// English word order (default)
    #[default]
    English,
    /// Hebrew/Greek word order
    Original,
}

/// One interlinear cell. Either text may be empty when no counterpart exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedWord {
    pub original: String,
    pub english: String,
    pub strongs: String,
}

/// A chapter with its headings and enrichment index.
#[derive(Debug, Clone)]
pub struct EnrichedChapter {
    pub chapter: Arc<Chapter>,
    pub headings: Vec<Heading>,
    pub index: Arc<ChapterIndex>,
}

impl EnrichedChapter {
    pub fn headings_before(&self, verse: u32) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(move |h| h.before_verse == verse)
    }

    pub fn entry(&self, verse: u32) -> Option<&IndexEntry> {
        self.index.get(&verse)
    }
}

// ============================================================================
// Lenient field decoders for the headings resource
// ============================================================================

fn book_code_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BookField {
        Id(u8),
        Code(String),
    }

    let resolved = match BookField::deserialize(deserializer)? {
        BookField::Id(id) => books::book_code(id),
        BookField::Code(code) => books::canonical_code(&code),
    };
    resolved
        .map(str::to_string)
        .ok_or_else(|| serde::de::Error::custom("unknown book"))
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Refs {
        One(String),
        Many(Vec<String>),
        None(()),
    }

    Ok(match Refs::deserialize(deserializer)? {
        Refs::One(s) if s.trim().is_empty() => Vec::new(),
        Refs::One(s) => vec![s],
        Refs::Many(list) => list,
        Refs::None(()) => Vec::new(),
    })
}
