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

//! Recursive-descent parser for Workshop text, split into the expression engine, the element
//! matcher and the structural (document/rule/action) grammar. All three share the one [`Parser`]
//! state below.

mod elements;
mod expression;
mod rules;

pub use expression::parse_expression;
pub use rules::parse_workshop;

use crate::ast::Expr;
use crate::cursor::Cursor;
use crate::errors::ParseError;
use crate::operators::Operator;
use crate::options::DecompileOptions;
use crate::program::{Subroutine, WorkshopVariable};
use tracing::debug;
use wsdc_elements::{ElementSignature, SignatureRegistry};

/// A position to backtrack to, including any variables registered since.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    position: usize,
    variables: usize,
}

pub struct Parser {
    cursor: Cursor,
    /// Registry actions and values, longest name first so that no name is shadowed by a shorter
    /// one that is its prefix.
    actions: Vec<ElementSignature>,
    values: Vec<ElementSignature>,
    operators: Vec<Operator>,
    operands: Vec<Expr>,
    variables: Vec<WorkshopVariable>,
    subroutines: Vec<Subroutine>,
    strict: bool,
    /// Inside the arguments of a `<"...", ...>` string, where `>` closes the string.
    in_format_args: bool,
}

fn longest_first(mut elements: Vec<ElementSignature>) -> Vec<ElementSignature> {
    elements.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
    elements
}

impl Parser {
    pub fn new<R: SignatureRegistry + ?Sized>(
        text: &str,
        registry: &R,
        options: &DecompileOptions,
    ) -> Self {
        let (values, actions): (Vec<_>, Vec<_>) = registry
            .signatures()
            .iter()
            .copied()
            .partition(|e| e.is_value);
        Self {
            cursor: Cursor::new(text),
            actions: longest_first(actions),
            values: longest_first(values),
            operators: vec![Operator::Sentinel],
            operands: vec![],
            variables: vec![],
            subroutines: vec![],
            strict: options.strict,
            in_format_args: false,
        }
    }

    pub fn variables(&self) -> &[WorkshopVariable] {
        &self.variables
    }

    pub fn subroutines(&self) -> &[Subroutine] {
        &self.subroutines
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.cursor.position(),
            variables: self.variables.len(),
        }
    }

    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.cursor.restore(checkpoint.position);
        self.variables.truncate(checkpoint.variables);
    }

    /// Register `A`..`Z` on first use, at the index of the letter, unless a variable of that
    /// name and scope is already known.
    pub(crate) fn add_if_omitted(&mut self, name: &str, is_global: bool) {
        let mut chars = name.chars();
        let (Some(letter), None) = (chars.next(), chars.next()) else {
            return;
        };
        if !letter.is_ascii_uppercase() {
            return;
        }
        if self
            .variables
            .iter()
            .any(|v| v.is_global == is_global && v.name == name)
        {
            return;
        }
        let index = i32::from(letter as u8 - b'A');
        debug!("Registering implicit {} variable {name} at index {index}", scope(is_global));
        self.variables
            .push(WorkshopVariable::new(is_global, index, name));
    }

    /// Match a required delimiter. When lenient, a missing delimiter is skipped over as though
    /// it were present.
    pub(crate) fn expect(&mut self, literal: &'static str) -> Result<(), ParseError> {
        if self.cursor.matches(literal) || !self.strict {
            return Ok(());
        }
        Err(self.expected(literal))
    }

    /// [`Parser::expect`] for keywords, which must end on a word boundary.
    pub(crate) fn expect_word(&mut self, keyword: &'static str) -> Result<(), ParseError> {
        if self.cursor.match_word(keyword, true) || !self.strict {
            return Ok(());
        }
        Err(self.expected(keyword))
    }

    pub(crate) fn expected(&self, expected: &str) -> ParseError {
        let (line, column) = self.cursor.line_col();
        ParseError::Expected {
            expected: expected.to_string(),
            line,
            column,
        }
    }

    pub(crate) fn missing_identifier(&self, context: &'static str) -> ParseError {
        let (line, column) = self.cursor.line_col();
        ParseError::MissingIdentifier {
            context,
            line,
            column,
        }
    }

    pub(crate) fn missing_operand(&self, operator: &'static str) -> ParseError {
        let (line, column) = self.cursor.line_col();
        ParseError::MissingOperand {
            operator,
            line,
            column,
        }
    }

    pub(crate) fn required_identifier(
        &mut self,
        context: &'static str,
    ) -> Result<String, ParseError> {
        match self.cursor.identifier() {
            Some(name) => Ok(name),
            None => Err(self.missing_identifier(context)),
        }
    }
}

fn scope(is_global: bool) -> &'static str {
    if is_global { "global" } else { "player" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wsdc_elements::ELEMENTS;

    fn parser(text: &str) -> Parser {
        Parser::new(text, &*ELEMENTS, &DecompileOptions::default())
    }

    #[test]
    fn test_elements_sorted_longest_first() {
        let parser = parser("");
        let lengths: Vec<_> = parser.values.iter().map(|e| e.name.len()).collect();
        assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
        assert!(parser.actions.iter().all(|e| !e.is_value));
    }

    #[test]
    fn test_add_if_omitted_registers_letters_once() {
        let mut parser = parser("");
        parser.add_if_omitted("C", true);
        parser.add_if_omitted("C", true);
        parser.add_if_omitted("C", false);
        parser.add_if_omitted("Counter", true);
        parser.add_if_omitted("c", true);
        assert_eq!(
            parser.variables(),
            &[
                WorkshopVariable::new(true, 2, "C"),
                WorkshopVariable::new(false, 2, "C"),
            ]
        );
    }

    #[test]
    fn test_rewind_forgets_registered_variables() {
        let mut parser = parser("A B");
        let checkpoint = parser.checkpoint();
        parser.cursor.identifier();
        parser.add_if_omitted("A", true);
        parser.rewind(checkpoint);
        assert!(parser.variables().is_empty());
        assert_eq!(parser.cursor.position(), 0);
    }

    #[test]
    fn test_expect_is_lenient_by_default() {
        let mut lenient = parser("}");
        assert_eq!(lenient.expect("{"), Ok(()));
        assert_eq!(lenient.cursor.position(), 0);

        let mut strict = Parser::new(
            "}",
            &*ELEMENTS,
            &DecompileOptions {
                strict: true,
                ..Default::default()
            },
        );
        assert_eq!(
            strict.expect("{"),
            Err(ParseError::Expected {
                expected: "{".to_string(),
                line: 1,
                column: 1,
            })
        );
    }
}
