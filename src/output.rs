//! Output formatting for verses, interlinear rows, concordance hits and lexicon entries.

use crate::align::InterlinearCell;
use crate::books;
use crate::models::{ConcordanceResult, EnrichedChapter, HeadingLevel, LexiconEntry, Verse};
use crate::text::{clean_text, is_punctuation};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write any result as pretty JSON.
pub fn write_json<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(value)?;
    writer.write_all(json.as_bytes())?;
    writeln!(writer)?;
    Ok(())
}

/// Write any result as pretty JSON to a file.
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(value, &mut file)
}

/// Write concordance hits as CSV.
pub fn write_concordance_csv<W: Write>(
    results: &[ConcordanceResult],
    writer: &mut W,
) -> Result<(), OutputError> {
    writeln!(writer, "book_code,book_id,chapter,verse")?;
    for r in results {
        writeln!(writer, "{},{},{},{}", r.book_code, r.book_id, r.chapter, r.verse)?;
    }
    Ok(())
}

/// The English text of a verse as a readable line.
///
/// Bracket notation is removed; closing punctuation attaches to the word
/// before it and opening quotes attach to the word after.
pub fn verse_text(verse: &Verse) -> String {
    let mut line = String::new();
    let mut glue_next = true;

    for word in &verse.w {
        let text = clean_text(&word.text);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let closing = is_punctuation(text)
            && text.starts_with(['.', ',', ';', ':', '!', '?', ')', '\u{2019}', '\u{201D}']);
        if !glue_next && !closing {
            line.push(' ');
        }
        line.push_str(text);
        glue_next = text.ends_with(['(', '\u{2018}', '\u{201C}']);
    }

    line
}

/// Human-readable reference, e.g. `Genesis 1:1`.
pub fn format_reference(book_id: u8, chapter: u32, verse: u32) -> String {
    let name = books::book_name(book_id).unwrap_or("?");
    format!("{} {}:{}", name, chapter, verse)
}

/// Interlinear rows as aligned columns: Strong's, original, English, sense.
pub fn format_interlinear(cells: &[InterlinearCell]) -> String {
    let width_strongs = cells.iter().map(|c| c.word.strongs.chars().count()).max().unwrap_or(0);
    let width_original = cells.iter().map(|c| c.word.original.chars().count()).max().unwrap_or(0);
    let width_english = cells.iter().map(|c| c.word.english.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for cell in cells {
        let mut row = format!(
            "{:<ws$}  {:<wo$}  {:<we$}",
            cell.word.strongs,
            clean_text(&cell.word.original),
            clean_text(&cell.word.english),
            ws = width_strongs,
            wo = width_original,
            we = width_english,
        );
        if let Some(sense) = &cell.sense {
            row.push_str("  (");
            row.push_str(sense);
            row.push(')');
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out
}

/// Print a chapter: headings in place, then numbered verse lines.
pub fn print_chapter(enriched: &EnrichedChapter) {
    let chapter = &enriched.chapter;
    let name = books::book_name(chapter.book_id).unwrap_or(chapter.book_code.as_str());
    println!("=== {} {} ===", name, chapter.number);

    for verse in &chapter.verses {
        for heading in enriched.headings_before(verse.number) {
            match heading.level {
                HeadingLevel::S1 => println!("\n## {}", heading.text),
                HeadingLevel::S2 => println!("\n### {}", heading.text),
                HeadingLevel::R => println!("   {}", heading.text),
            }
        }
        println!("{:>3} {}", verse.number, verse_text(verse));
    }
}

/// Print concordance hits, optionally truncated.
pub fn print_concordance(strongs: &str, results: &[ConcordanceResult], limit: Option<usize>) {
    println!("=== {} : {} occurrences ===", strongs, results.len());

    let to_print = match limit {
        Some(n) => &results[..n.min(results.len())],
        None => results,
    };

    for r in to_print {
        println!(
            "  {:<24} {}.{}.{}",
            format_reference(r.book_id, r.chapter, r.verse),
            r.book_code,
            r.chapter,
            r.verse
        );
    }

    if let Some(n) = limit {
        if results.len() > n {
            println!("... and {} more", results.len() - n);
        }
    }
}

/// Format a lexicon entry. Empty fields are omitted.
pub fn format_lexicon_entry(strongs: &str, entry: &LexiconEntry) -> String {
    let mut out = format!("{}  {}", strongs, entry.word);
    if !entry.translit.is_empty() {
        out.push_str(&format!("  ({})", entry.translit));
    }
    out.push('\n');

    let fields = [
        ("Pronunciation", &entry.pronounce),
        ("Gloss", &entry.gloss),
        ("Morphology", &entry.morph),
        ("Definition", &entry.definition),
        ("Extended", &entry.extended),
        ("KJV", &entry.kjv),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            out.push_str(&format!("  {}: {}\n", label, value));
        }
    }
    out
}
