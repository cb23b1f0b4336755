//! Single-line query editor

use crossterm::event::{KeyCode, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// What a key did to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// The text changed
    Changed,
    /// Only the cursor moved
    Moved,
    /// Not an editing key
    Ignored,
}

/// Query text with a byte-offset cursor (always on a char boundary)
#[derive(Debug, Default, Clone)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Terminal columns between the start of the text and the cursor
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].width()
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }

    /// Start of the word before the cursor. Separators common in GitHub
    /// names (`-`, `_`, `/`, `.`) end a word like whitespace does.
    fn word_start(&self) -> usize {
        let before = &self.text[..self.cursor];
        let mut chars = before.char_indices().rev().peekable();
        while chars.next_if(|(_, c)| is_separator(*c)).is_some() {}
        let mut start = 0;
        for (i, c) in chars {
            if is_separator(c) {
                start = i + c.len_utf8();
                break;
            }
        }
        start
    }

    fn word_end(&self) -> usize {
        let after = &self.text[self.cursor..];
        let mut end = self.cursor;
        let mut in_word = false;
        for c in after.chars() {
            if is_separator(c) {
                if in_word {
                    break;
                }
            } else {
                in_word = true;
            }
            end += c.len_utf8();
        }
        end
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace; returns false at the start of the text
    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_boundary();
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Delete; returns false at the end of the text
    pub fn delete_at(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        let next = self.next_boundary();
        self.text.drain(self.cursor..next);
        true
    }

    pub fn delete_word_before(&mut self) -> bool {
        let start = self.word_start();
        if start == self.cursor {
            return false;
        }
        self.text.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.text.is_empty() {
            return false;
        }
        self.text.clear();
        self.cursor = 0;
        true
    }

    fn move_to(&mut self, cursor: usize) -> Edit {
        if cursor == self.cursor {
            return Edit::Ignored;
        }
        self.cursor = cursor;
        Edit::Moved
    }

    /// Apply an editing key. Arrow up/down, Enter and Esc belong to the
    /// suggestion list and are never consumed here.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Edit {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        // macOS Option may report as SUPER
        let word = modifiers.intersects(KeyModifiers::ALT | KeyModifiers::SUPER);

        let changed = match code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('w') if ctrl => self.delete_word_before(),
            KeyCode::Backspace if word => self.delete_word_before(),
            KeyCode::Char('a') if ctrl => return self.move_to(0),
            KeyCode::Char('e') if ctrl => return self.move_to(self.text.len()),
            KeyCode::Home => return self.move_to(0),
            KeyCode::End => return self.move_to(self.text.len()),
            KeyCode::Left if word || ctrl => return self.move_to(self.word_start()),
            KeyCode::Right if word || ctrl => return self.move_to(self.word_end()),
            KeyCode::Left => return self.move_to(self.prev_boundary()),
            KeyCode::Right => return self.move_to(self.next_boundary()),
            KeyCode::Backspace => self.delete_before(),
            KeyCode::Delete => self.delete_at(),
            KeyCode::Char(c) if !ctrl && !word => {
                self.insert(c);
                true
            }
            _ => return Edit::Ignored,
        };

        if changed { Edit::Changed } else { Edit::Ignored }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '-' | '_' | '.')
}
