//! Locale-aware string ordering for suggestion labels.
//!
//! Byte order puts `Zebra` before `apple` and `_x` after `Zebra`; users expect
//! the dictionary order a browser's `localeCompare` gives. Labels are compared
//! in three levels, like a collation table:
//!
//! 1. base letters: transliterated to ASCII and case-folded, with character
//!    classes ordered whitespace < punctuation/symbols < digits < letters
//! 2. accents: `resume` before `résumé`
//! 3. case: `alpha` before `Alpha`

use crate::suggestion::Suggestion;
use std::cmp::Ordering;

/// ASCII punctuation and symbols in root collation order
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn element(c: char) -> (u8, u32) {
    let class = char_class(c);
    let weight = match PUNCTUATION_ORDER.find(c) {
        Some(pos) if class == 1 => pos as u32,
        _ => 0x80 + c as u32,
    };
    (class, weight)
}

/// Transliterate and case-fold into primary collation elements
fn primary_elements(s: &str) -> Vec<(u8, u32)> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        let folded = if c.is_ascii() {
            None
        } else {
            deunicode::deunicode_char(c)
                .map(str::trim)
                .filter(|t| !t.is_empty())
        };
        match folded {
            Some(t) => out.extend(t.chars().flat_map(char::to_lowercase)),
            None => out.extend(c.to_lowercase()),
        }
    }
    out.into_iter().map(element).collect()
}

fn case_rank(c: char) -> (u8, char) {
    (if c.is_lowercase() { 0 } else { 1 }, c)
}

/// Compare two labels in dictionary order
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_elements(a)
        .cmp(&primary_elements(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
}

/// Stable sort by label; equal labels keep their relative order
pub fn sort_by_label(items: &mut [Suggestion]) {
    items.sort_by(|a, b| compare(&a.label, &b.label));
}
