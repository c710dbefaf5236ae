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

//! String, identifier and number recognizers. Each returns `Ok(None)` without moving the cursor
//! when the text at the cursor is not of its kind.

use crate::cursor::{Cursor, is_ident_char, is_ident_start};
use crate::errors::ParseError;

impl Cursor {
    /// A double-quoted string. Escapes are kept as written (`\"` stays two characters). An
    /// unterminated string runs to the end of the input.
    pub fn string_literal(&mut self) -> Option<String> {
        if self.current() != Some('"') {
            return None;
        }
        self.advance();

        let mut value = String::new();
        let mut escaped = false;
        while let Some(c) = self.current() {
            if !escaped && c == '"' {
                break;
            }
            escaped = !escaped && c == '\\';
            value.push(c);
            self.advance();
        }
        self.advance();
        self.skip_whitespace();
        Some(value)
    }

    pub fn identifier(&mut self) -> Option<String> {
        if !self.current().is_some_and(is_ident_start) {
            return None;
        }
        let name = self.take_while(is_ident_char);
        self.skip_whitespace();
        Some(name)
    }

    fn sign_and_digits(&mut self) -> Option<(usize, String)> {
        let start = self.position();
        let mut text = String::new();
        if self.matches("-") {
            text.push('-');
        }
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            self.restore(start);
            return None;
        }
        text.push_str(&digits);
        Some((start, text))
    }

    fn invalid_number(&self, start: usize, text: String) -> ParseError {
        let (line, column) = self.line_col_at(start);
        ParseError::InvalidNumber { text, line, column }
    }

    /// An optionally negative integer, as used for variable and subroutine indices.
    pub fn integer(&mut self) -> Result<Option<i32>, ParseError> {
        let Some((start, text)) = self.sign_and_digits() else {
            return Ok(None);
        };
        let value = text
            .parse::<i32>()
            .map_err(|_| self.invalid_number(start, text))?;
        self.skip_whitespace();
        Ok(Some(value))
    }

    /// An optionally negative decimal number with an optional fractional part.
    pub fn double(&mut self) -> Result<Option<f64>, ParseError> {
        let Some((start, mut text)) = self.sign_and_digits() else {
            return Ok(None);
        };
        // A dot followed by a name is a player variable access on the number, not a fraction.
        if self.current() == Some('.') && !self.peek(1).is_some_and(is_ident_start) {
            self.advance();
            text.push('.');
            text.push_str(&self.take_while(|c| c.is_ascii_digit()));
        }
        let value = text
            .parse::<f64>()
            .map_err(|_| self.invalid_number(start, text))?;
        self.skip_whitespace();
        Ok(Some(value))
    }
}
