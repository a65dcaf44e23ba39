//! Strong's number handling: normalization and language/testament dispatch.

use serde::{Deserialize, Serialize};

/// Source language of a Strong's number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Hebrew,
    Greek,
}

impl Language {
    /// The testament whose books this language's numbers tag.
    pub fn testament(self) -> Testament {
        match self {
            Language::Hebrew => Testament::Old,
            Language::Greek => Testament::New,
        }
    }
}

/// Old (books 1-39) or New (books 40-66) Testament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn book_ids(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Testament::Old => 1..=39,
            Testament::New => 40..=66,
        }
    }

    pub fn contains(self, book_id: u8) -> bool {
        self.book_ids().contains(&book_id)
    }
}

/// Trim and uppercase. `None` for empty input.
pub fn normalize(strongs: &str) -> Option<String> {
    let trimmed = strongs.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// `H` prefix is Hebrew; anything else, including malformed input, is Greek.
pub fn language(strongs: &str) -> Language {
    match strongs.trim_start().chars().next() {
        Some('H') | Some('h') => Language::Hebrew,
        _ => Language::Greek,
    }
}

/// Zero-pad the numeric part to four digits (`H430` -> `H0430`).
///
/// Returns `None` when the input is not a letter followed by digits, or is
/// already at least four digits wide.
pub fn padded(strongs: &str) -> Option<String> {
    let mut chars = strongs.chars();
    let prefix = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let digits = chars.as_str();
    if digits.is_empty() || digits.len() >= 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}{:0>4}", prefix, digits))
}
