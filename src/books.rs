//! Static book table: USFM codes, canonical ids, names and chapter counts.
//!
//! Ids run 1-66 in canonical order. Alternate abbreviations found in older
//! data sets fold to the canonical code before any lookup.

use crate::strongs::Testament;

/// A canonical book of the 66-book Protestant canon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    pub id: u8,
    pub code: &'static str,
    pub name: &'static str,
    pub chapters: u32,
}

macro_rules! books {
    ($(($id:expr, $code:expr, $name:expr, $chapters:expr)),* $(,)?) => {
        &[$(Book { id: $id, code: $code, name: $name, chapters: $chapters }),*]
    };
}

pub static BOOKS: &[Book] = books![
    (1, "GEN", "Genesis", 50),
    (2, "EXO", "Exodus", 40),
    (3, "LEV", "Leviticus", 27),
    (4, "NUM", "Numbers", 36),
    (5, "DEU", "Deuteronomy", 34),
    (6, "JOS", "Joshua", 24),
    (7, "JDG", "Judges", 21),
    (8, "RUT", "Ruth", 4),
    (9, "1SA", "1 Samuel", 31),
    (10, "2SA", "2 Samuel", 24),
    (11, "1KI", "1 Kings", 22),
    (12, "2KI", "2 Kings", 25),
    (13, "1CH", "1 Chronicles", 29),
    (14, "2CH", "2 Chronicles", 36),
    (15, "EZR", "Ezra", 10),
    (16, "NEH", "Nehemiah", 13),
    (17, "EST", "Esther", 10),
    (18, "JOB", "Job", 42),
    (19, "PSA", "Psalms", 150),
    (20, "PRO", "Proverbs", 31),
    (21, "ECC", "Ecclesiastes", 12),
    (22, "SNG", "Song of Songs", 8),
    (23, "ISA", "Isaiah", 66),
    (24, "JER", "Jeremiah", 52),
    (25, "LAM", "Lamentations", 5),
    (26, "EZK", "Ezekiel", 48),
    (27, "DAN", "Daniel", 12),
    (28, "HOS", "Hosea", 14),
    (29, "JOL", "Joel", 3),
    (30, "AMO", "Amos", 9),
    (31, "OBA", "Obadiah", 1),
    (32, "JON", "Jonah", 4),
    (33, "MIC", "Micah", 7),
    (34, "NAM", "Nahum", 3),
    (35, "HAB", "Habakkuk", 3),
    (36, "ZEP", "Zephaniah", 3),
    (37, "HAG", "Haggai", 2),
    (38, "ZEC", "Zechariah", 14),
    (39, "MAL", "Malachi", 4),
    (40, "MAT", "Matthew", 28),
    (41, "MRK", "Mark", 16),
    (42, "LUK", "Luke", 24),
    (43, "JHN", "John", 21),
    (44, "ACT", "Acts", 28),
    (45, "ROM", "Romans", 16),
    (46, "1CO", "1 Corinthians", 16),
    (47, "2CO", "2 Corinthians", 13),
    (48, "GAL", "Galatians", 6),
    (49, "EPH", "Ephesians", 6),
    (50, "PHP", "Philippians", 4),
    (51, "COL", "Colossians", 4),
    (52, "1TH", "1 Thessalonians", 5),
    (53, "2TH", "2 Thessalonians", 3),
    (54, "1TI", "1 Timothy", 6),
    (55, "2TI", "2 Timothy", 4),
    (56, "TIT", "Titus", 3),
    (57, "PHM", "Philemon", 1),
    (58, "HEB", "Hebrews", 13),
    (59, "JAS", "James", 5),
    (60, "1PE", "1 Peter", 5),
    (61, "2PE", "2 Peter", 3),
    (62, "1JN", "1 John", 5),
    (63, "2JN", "2 John", 1),
    (64, "3JN", "3 John", 1),
    (65, "JUD", "Jude", 1),
    (66, "REV", "Revelation", 22),
];

/// Alternate codes and the canonical code they fold to.
static ALIASES: &[(&str, &str)] = &[
    ("EZE", "EZK"),
    ("JOH", "JHN"),
    ("JOE", "JOL"),
    ("NAH", "NAM"),
    ("SOS", "SNG"),
    ("PHI", "PHP"),
    ("JAM", "JAS"),
    ("MAR", "MRK"),
    ("1JO", "1JN"),
    ("2JO", "2JN"),
    ("3JO", "3JN"),
];

/// Look up a book by code (canonical or alias, any case).
pub fn find(code: &str) -> Option<&'static Book> {
    let upper = code.trim().to_ascii_uppercase();
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(upper.as_str());
    BOOKS.iter().find(|b| b.code == canonical)
}

/// Look up a book by canonical id (1-66).
pub fn by_id(id: u8) -> Option<&'static Book> {
    if id == 0 {
        return None;
    }
    BOOKS.get(id as usize - 1)
}

/// Fold any accepted code to its canonical form.
pub fn canonical_code(code: &str) -> Option<&'static str> {
    find(code).map(|b| b.code)
}

/// Canonical id for a code. `None` means the code is unresolvable; it is
/// never silently treated as book 1.
pub fn book_id(code: &str) -> Option<u8> {
    find(code).map(|b| b.id)
}

pub fn book_code(id: u8) -> Option<&'static str> {
    by_id(id).map(|b| b.code)
}

pub fn book_name(id: u8) -> Option<&'static str> {
    by_id(id).map(|b| b.name)
}

pub fn chapter_count(id: u8) -> Option<u32> {
    by_id(id).map(|b| b.chapters)
}

pub fn testament_of(id: u8) -> Option<Testament> {
    match id {
        1..=39 => Some(Testament::Old),
        40..=66 => Some(Testament::New),
        _ => None,
    }
}

/// All books of one testament, in canonical order.
pub fn books_in(testament: Testament) -> impl Iterator<Item = &'static Book> {
    BOOKS.iter().filter(move |b| testament.contains(b.id))
}
