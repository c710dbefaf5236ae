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

use thiserror::Error;

/// Conditions that abort the parse of a whole document. Everything else the grammar does not
/// recognize is treated as absent structure and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Assignment target is not a variable @ {line}/{column}")]
    NotAVariable { line: usize, column: usize },
    #[error("Expected an identifier for {context} @ {line}/{column}")]
    MissingIdentifier {
        context: &'static str,
        line: usize,
        column: usize,
    },
    #[error("Missing operand after `{operator}` @ {line}/{column}")]
    MissingOperand {
        operator: &'static str,
        line: usize,
        column: usize,
    },
    #[error("Malformed ternary expression @ {line}/{column}")]
    MalformedTernary { line: usize, column: usize },
    #[error("Operand stack underflow while reducing `{operator}` @ {line}/{column}")]
    OperandStackUnderflow {
        operator: &'static str,
        line: usize,
        column: usize,
    },
    #[error("Expected `{expected}` @ {line}/{column}")]
    Expected {
        expected: String,
        line: usize,
        column: usize,
    },
    #[error("Unexpected trailing input @ {line}/{column}")]
    TrailingInput { line: usize, column: usize },
    #[error("Invalid number `{text}` @ {line}/{column}")]
    InvalidNumber {
        text: String,
        line: usize,
        column: usize,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Operator `{0}` cannot appear in this position")]
    InvalidOperator(&'static str),
    #[error("Failed to format output: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Failure of the whole text-in, text-out pipeline.
#[derive(Debug, Error)]
pub enum DecompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
