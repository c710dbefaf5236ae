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

//! Operator precedence shared by the expression parser and the renderer.
//! Higher numbers = higher precedence (more tightly binding)

use std::fmt::Display;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Sentinel,
    Unary,
    Binary,
    TernaryOpen,
    TernaryClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Operator {
    /// Bottom of one expression scope on the operator stack. Never reduced.
    Sentinel,
    TernaryOpen,  // ?
    TernaryClose, // :
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    And,
    Or,
    Subtract,
    Add,
    Modulo,
    Divide,
    Multiply,
    Power,
    Not,
}

impl Operator {
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Sentinel => 0,
            Operator::TernaryOpen => 1,
            Operator::TernaryClose => 2,
            Operator::Equal => 3,
            Operator::NotEqual => 4,
            Operator::GreaterThan => 5,
            Operator::LessThan => 6,
            Operator::GreaterThanOrEqual => 7,
            Operator::LessThanOrEqual => 8,
            Operator::And => 9,
            Operator::Or => 10,
            Operator::Subtract => 11,
            Operator::Add => 12,
            Operator::Modulo => 13,
            Operator::Divide => 14,
            Operator::Multiply => 15,
            Operator::Power | Operator::Not => 16,
        }
    }

    pub fn kind(self) -> OperatorKind {
        match self {
            Operator::Sentinel => OperatorKind::Sentinel,
            Operator::Not => OperatorKind::Unary,
            Operator::TernaryOpen => OperatorKind::TernaryOpen,
            Operator::TernaryClose => OperatorKind::TernaryClose,
            _ => OperatorKind::Binary,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Sentinel => "",
            Operator::TernaryOpen => "?",
            Operator::TernaryClose => ":",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Subtract => "-",
            Operator::Add => "+",
            Operator::Modulo => "%",
            Operator::Divide => "/",
            Operator::Multiply => "*",
            Operator::Power => "^",
            Operator::Not => "!",
        }
    }

    pub fn is_ternary(self) -> bool {
        matches!(self, Operator::TernaryOpen | Operator::TernaryClose)
    }

    /// Whether `top`, sitting on the operator stack, must be reduced before `incoming` is pushed.
    ///
    /// The two ternary halves only reduce against each other when both are `:`, which nests
    /// `a ? b : c ? d : e` as `a ? b : (c ? d : e)`. A sentinel on either side never reduces.
    pub fn reduces_before(top: Operator, incoming: Operator) -> bool {
        if top.is_ternary() && incoming.is_ternary() {
            return top == Operator::TernaryClose && incoming == Operator::TernaryClose;
        }
        if top == Operator::Sentinel || incoming == Operator::Sentinel {
            return false;
        }
        top.precedence() > incoming.precedence()
    }

    /// Binary and ternary operators in the order they are tried at the cursor. Multi-character
    /// operators precede their single-character prefixes.
    pub fn infix_match_order() -> &'static [Operator] {
        &[
            Operator::And,
            Operator::Or,
            Operator::Subtract,
            Operator::Add,
            Operator::Modulo,
            Operator::Divide,
            Operator::Multiply,
            Operator::Power,
            Operator::Equal,
            Operator::NotEqual,
            Operator::GreaterThanOrEqual,
            Operator::LessThanOrEqual,
            Operator::GreaterThan,
            Operator::LessThan,
            Operator::TernaryOpen,
            Operator::TernaryClose,
        ]
    }

    pub fn binary_operators() -> impl Iterator<Item = Operator> {
        Operator::iter().filter(|op| op.kind() == OperatorKind::Binary)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Operator::Multiply, Operator::Add, true; "tighter on top reduces")]
    #[test_case(Operator::Add, Operator::Multiply, false; "looser on top waits")]
    #[test_case(Operator::Subtract, Operator::Subtract, false; "equal precedence waits")]
    #[test_case(Operator::Not, Operator::Equal, true; "not reduces before equality")]
    #[test_case(Operator::Sentinel, Operator::Or, false; "sentinel on top")]
    #[test_case(Operator::Add, Operator::Sentinel, false; "sentinel incoming")]
    #[test_case(Operator::TernaryClose, Operator::TernaryClose, true; "close against close")]
    #[test_case(Operator::TernaryClose, Operator::TernaryOpen, false; "close against open")]
    #[test_case(Operator::TernaryOpen, Operator::TernaryClose, false; "open against close")]
    #[test_case(Operator::Equal, Operator::TernaryClose, true; "comparison before colon")]
    #[test_case(Operator::TernaryClose, Operator::Equal, false; "colon before comparison")]
    fn test_reduces_before(top: Operator, incoming: Operator, expected: bool) {
        assert_eq!(Operator::reduces_before(top, incoming), expected);
    }

    #[test]
    fn test_match_order_prefers_longer_symbols() {
        let order = Operator::infix_match_order();
        let position = |op| order.iter().position(|o| *o == op).unwrap();
        assert!(position(Operator::GreaterThanOrEqual) < position(Operator::GreaterThan));
        assert!(position(Operator::LessThanOrEqual) < position(Operator::LessThan));
        assert_eq!(order.len(), Operator::binary_operators().count() + 2);
    }
}
