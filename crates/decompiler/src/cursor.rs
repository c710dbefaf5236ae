// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Positional reader over Workshop text. There is no token stream: every recognizer works
//! directly on the character buffer and backtracks by restoring the position.

/// Characters that may not directly follow a matched literal, so that `-` does not match the
/// front of `-=` and `<` does not match the front of `<=`.
fn is_symbol(c: char) -> bool {
    matches!(
        c,
        '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~' | '¢' | '£' | '¥' | '©' | '®' | '°'
            | '±' | '×' | '÷'
    )
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    position: usize,
}

impl Cursor {
    /// Leading whitespace is skipped so that every recognizer starts on a significant character.
    pub fn new(text: &str) -> Self {
        let mut cursor = Self {
            chars: text.chars().collect(),
            position: 0,
        };
        cursor.skip_whitespace();
        cursor
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Backtrack (or jump forward) to a position previously returned by [`Cursor::position`].
    pub fn restore(&mut self, position: usize) {
        self.position = position.min(self.chars.len());
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    pub fn current(&self) -> Option<char> {
        self.peek(0)
    }

    pub fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.position + offset).copied()
    }

    pub fn advance(&mut self) {
        if !self.at_end() {
            self.position += 1;
        }
    }

    /// Skip blanks and `//` line comments.
    pub fn skip_whitespace(&mut self) {
        loop {
            match self.current() {
                Some('\r' | '\n' | '\t' | ' ') => self.advance(),
                Some('/') if self.peek(1) == Some('/') => {
                    while !matches!(self.current(), None | Some('\n')) {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn literal_matches(&self, literal: &str, case_sensitive: bool) -> Option<usize> {
        let mut length = 0;
        for expected in literal.chars() {
            let found = self.peek(length)?;
            let equal = if case_sensitive {
                found == expected
            } else {
                found.to_lowercase().eq(expected.to_lowercase())
            };
            if !equal {
                return None;
            }
            length += 1;
        }
        if self.peek(length).is_some_and(is_symbol) {
            return None;
        }
        Some(length)
    }

    /// Match `literal` at the cursor. On success the cursor moves past the literal and any
    /// whitespace after it; on failure it does not move.
    pub fn match_literal(&mut self, literal: &str, case_sensitive: bool) -> bool {
        let Some(length) = self.literal_matches(literal, case_sensitive) else {
            return false;
        };
        self.position += length;
        self.skip_whitespace();
        true
    }

    /// Like [`Cursor::match_literal`], but a literal ending in a word character must also end on a
    /// word boundary, so `Up` does not match the front of `Update`.
    pub fn match_word(&mut self, literal: &str, case_sensitive: bool) -> bool {
        let Some(length) = self.literal_matches(literal, case_sensitive) else {
            return false;
        };
        let ends_in_word = literal.chars().last().is_some_and(is_ident_char);
        if ends_in_word && self.peek(length).is_some_and(is_ident_char) {
            return false;
        }
        self.position += length;
        self.skip_whitespace();
        true
    }

    /// Case-sensitive [`Cursor::match_literal`], the common case for punctuation and keywords.
    pub fn matches(&mut self, literal: &str) -> bool {
        self.match_literal(literal, true)
    }

    /// 1-based line and column of `position`.
    pub fn line_col_at(&self, position: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for c in self.chars.iter().take(position) {
            if *c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn line_col(&self) -> (usize, usize) {
        self.line_col_at(self.position)
    }

    /// The text between two positions, used for error messages.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    pub(crate) fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut taken = String::new();
        while let Some(c) = self.current() {
            if !predicate(c) {
                break;
            }
            taken.push(c);
            self.advance();
        }
        taken
    }
}
