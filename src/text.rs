//! Token classification for interlinear alignment.
//!
//! Word arrays carry punctuation and placeholder tokens alongside real words.
//! These helpers decide which tokens take part in alignment and strip the
//! bracket notation used for textual-critical annotations.

/// Hebrew marks that stand alone as tokens: sof pasuq, paseq, maqaf, and
/// the open/closed paragraph letters pe and samekh.
const HEBREW_MARKERS: &[char] = &['\u{05C3}', '\u{05C0}', '\u{05BE}', '\u{05E4}', '\u{05E1}'];

const DASHES: &[char] = &['-', '\u{2013}', '\u{2014}'];

const BRACKETS: &[char] = &['[', ']', '{', '}'];

#[inline]
fn is_punctuation_char(c: char) -> bool {
    c.is_whitespace()
        || c.is_ascii_punctuation()
        || HEBREW_MARKERS.contains(&c)
        || DASHES.contains(&c)
        || matches!(c, '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}')
}

/// True if the token is nothing but punctuation (and whitespace).
///
/// An empty or whitespace-only token is not punctuation.
pub fn is_punctuation(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(is_punctuation_char)
}

/// True if a tagged token is an alignment placeholder with no content.
///
/// Placeholders are dash runs, spaced ellipses (`. . .`), and the `vvv`
/// filler. Untagged tokens are never skipped by this rule.
pub fn should_skip_word(text: &str, strongs: Option<&str>) -> bool {
    if strongs.is_none() {
        return false;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    trimmed == "vvv" || trimmed == "\u{2026}" || is_dash_run(trimmed) || is_spaced_ellipsis(trimmed)
}

fn is_dash_run(text: &str) -> bool {
    text.chars().all(|c| DASHES.contains(&c) || c.is_whitespace())
        && text.chars().any(|c| DASHES.contains(&c))
}

fn is_spaced_ellipsis(text: &str) -> bool {
    let mut dots = 0;
    for c in text.chars() {
        match c {
            '.' => dots += 1,
            c if c.is_whitespace() => {}
            _ => return false,
        }
    }
    dots == 3
}

/// Remove square and curly brackets, leaving every other character intact.
pub fn clean_text(text: &str) -> String {
    text.chars().filter(|c| !BRACKETS.contains(c)).collect()
}
