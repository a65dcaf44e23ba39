//! Resource layout under a data root.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::source::SourceError;
use crate::strongs::Language;

/// Relative paths of every resource the stores read.
///
/// `{code}` and `{chapter}` in the per-chapter templates are replaced with
/// the canonical book code and chapter number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLayout {
    pub chapter_template: String,
    pub index_template: String,
    pub headings: String,
    pub concordance: String,
    pub hebrew_lexicon: String,
    pub greek_lexicon: String,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            chapter_template: "chapters/{code}/{chapter}.json".to_string(),
            index_template: "index/{code}/{chapter}.jsonl".to_string(),
            headings: "headings.jsonl".to_string(),
            concordance: "concordance.json".to_string(),
            hebrew_lexicon: "lexicon/hebrew.json".to_string(),
            greek_lexicon: "lexicon/greek.json".to_string(),
        }
    }
}

impl DataLayout {
    /// Read a layout override from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn chapter_path(&self, code: &str, chapter: u32) -> String {
        expand(&self.chapter_template, code, chapter)
    }

    pub fn index_path(&self, code: &str, chapter: u32) -> String {
        expand(&self.index_template, code, chapter)
    }

    pub fn lexicon_path(&self, language: Language) -> &str {
        match language {
            Language::Hebrew => &self.hebrew_lexicon,
            Language::Greek => &self.greek_lexicon,
        }
    }
}

fn expand(template: &str, code: &str, chapter: u32) -> String {
    template
        .replace("{code}", code)
        .replace("{chapter}", &chapter.to_string())
}
