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

//! Two-stack operator precedence parsing of Workshop expressions.
//!
//! Operands and operators are pushed as they are read. Each nested scope (a parenthesized group,
//! an element argument, an indexer) starts with a [`Operator::Sentinel`] on the operator stack,
//! which no reduction passes.

use crate::ast::{Expr, StringExpr, VariableRef};
use crate::errors::ParseError;
use crate::operators::{Operator, OperatorKind};
use crate::options::DecompileOptions;
use crate::parsers::Parser;
use tracing::{trace, warn};
use wsdc_elements::SignatureRegistry;
use wsdc_elements::enums::TEAM;

/// Parse a single expression, e.g. a condition. `Ok(None)` when the text does not start with one.
/// Anything left over after the expression is an error when strict, and ignored otherwise.
pub fn parse_expression<R: SignatureRegistry + ?Sized>(
    text: &str,
    registry: &R,
    options: &DecompileOptions,
) -> Result<Option<Expr>, ParseError> {
    let mut parser = Parser::new(text, registry, options);
    let expr = parser.scoped_expression(true)?;

    if !parser.cursor.at_end() {
        let (line, column) = parser.cursor.line_col();
        if parser.strict {
            return Err(ParseError::TrailingInput { line, column });
        }
        warn!("Ignoring unparsed input after expression from line {line}, column {column}");
    }

    Ok(expr)
}

impl Parser {
    /// An expression in a fresh scope, isolated from any operators already on the stack.
    pub(crate) fn scoped_expression(
        &mut self,
        allow_index: bool,
    ) -> Result<Option<Expr>, ParseError> {
        self.scoped_with(false, allow_index)
    }

    fn scoped_with(
        &mut self,
        in_format_args: bool,
        allow_index: bool,
    ) -> Result<Option<Expr>, ParseError> {
        let outer = std::mem::replace(&mut self.in_format_args, in_format_args);
        self.operators.push(Operator::Sentinel);
        let parsed = self.operand_expression(allow_index);
        self.operators.pop();
        self.in_format_args = outer;
        if !parsed? {
            return Ok(None);
        }
        self.pop_operand(Operator::Sentinel).map(Some)
    }

    /// Parse an expression and leave it on the operand stack. Returns false, having consumed
    /// nothing, if there is no expression at the cursor.
    fn operand_expression(&mut self, allow_index: bool) -> Result<bool, ParseError> {
        match self.primary()? {
            Some(primary) => {
                let operand = self.postfix(primary, allow_index)?;
                self.operands.push(operand);
            }
            None if self.cursor.matches("!") => {
                // The operand of `!` is parsed in this scope, so the reductions below apply
                // `!` ahead of any looser operator that follows it.
                self.push_operator(Operator::Not)?;
                if !self.operand_expression(allow_index)? {
                    return Err(self.missing_operand(Operator::Not.symbol()));
                }
                return Ok(true);
            }
            None => return Ok(false),
        }

        while let Some(op) = self.infix_operator() {
            self.push_operator(op)?;
            if !self.operand_expression(true)? {
                return Err(self.missing_operand(op.symbol()));
            }
        }
        while self
            .operators
            .last()
            .is_some_and(|op| *op != Operator::Sentinel)
        {
            self.pop_operator()?;
        }
        Ok(true)
    }

    fn infix_operator(&mut self) -> Option<Operator> {
        let closes_format_args = self.in_format_args;
        Operator::infix_match_order()
            .iter()
            .copied()
            .filter(|op| !(closes_format_args && *op == Operator::GreaterThan))
            .find(|op| self.cursor.matches(op.symbol()))
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), ParseError> {
        while let Some(top) = self.operators.last().copied()
            && Operator::reduces_before(top, op)
        {
            self.pop_operator()?;
        }
        self.operators.push(op);
        Ok(())
    }

    fn underflow(&self, op: Operator) -> ParseError {
        let (line, column) = self.cursor.line_col();
        ParseError::OperandStackUnderflow {
            operator: op.symbol(),
            line,
            column,
        }
    }

    fn pop_operand(&mut self, op: Operator) -> Result<Expr, ParseError> {
        match self.operands.pop() {
            Some(operand) => Ok(operand),
            None => Err(self.underflow(op)),
        }
    }

    fn malformed_ternary(&self) -> ParseError {
        let (line, column) = self.cursor.line_col();
        ParseError::MalformedTernary { line, column }
    }

    /// Reduce the operator on top of the stack with its operands.
    fn pop_operator(&mut self) -> Result<(), ParseError> {
        let Some(op) = self.operators.pop() else {
            return Err(self.underflow(Operator::Sentinel));
        };
        let reduced = match op.kind() {
            OperatorKind::Binary => {
                let right = self.pop_operand(op)?;
                let left = self.pop_operand(op)?;
                Expr::binary(op, left, right)
            }
            OperatorKind::Unary => Expr::unary(op, self.pop_operand(op)?),
            OperatorKind::TernaryClose => {
                if self.operators.last() != Some(&Operator::TernaryOpen) {
                    return Err(self.malformed_ternary());
                }
                self.operators.pop();
                let alternative = self.pop_operand(op)?;
                let consequent = self.pop_operand(op)?;
                let condition = self.pop_operand(op)?;
                Expr::ternary(condition, consequent, alternative)
            }
            OperatorKind::TernaryOpen => return Err(self.malformed_ternary()),
            OperatorKind::Sentinel => {
                self.operators.push(op);
                return Err(self.underflow(op));
            }
        };
        trace!("Reduced `{op}` with {} operands left", self.operands.len());
        self.operands.push(reduced);
        Ok(())
    }

    fn primary(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.cursor.matches("(") {
            let Some(inner) = self.scoped_expression(true)? else {
                return Err(self.missing_operand("("));
            };
            self.expect(")")?;
            return Ok(Some(inner));
        }
        if let Some(number) = self.cursor.double()? {
            return Ok(Some(Expr::Number(number)));
        }
        if let Some(string) = self.string_function()? {
            return Ok(Some(Expr::String(string)));
        }
        if let Some(team) = TEAM
            .members_longest_first()
            .into_iter()
            .find(|member| self.cursor.match_word(member.name, true))
        {
            return Ok(Some(Expr::EnumConstant(team)));
        }
        if let Some(global) = self.global_variable() {
            return Ok(Some(global));
        }
        if let Some(call) = self.function(true)? {
            return Ok(Some(Expr::Call(call)));
        }
        if let Some(string) = self.string_literal_expr()? {
            return Ok(Some(Expr::String(string)));
        }
        if let Some(name) = self.cursor.identifier() {
            self.add_if_omitted(&name, true);
            return Ok(Some(Expr::Variable(VariableRef::Global { name })));
        }
        Ok(None)
    }

    /// `Custom String("text", args...)` or the localized `String("text", args...)`.
    fn string_function(&mut self) -> Result<Option<StringExpr>, ParseError> {
        let localized = if self.cursor.match_word("Custom String", true) {
            false
        } else if self.cursor.match_word("String", true) {
            true
        } else {
            return Ok(None);
        };
        self.expect("(")?;
        let text = self.cursor.string_literal().unwrap_or_default();
        let mut format_args = vec![];
        while self.cursor.matches(",") {
            if let Some(arg) = self.scoped_expression(true)? {
                format_args.push(arg);
            }
        }
        self.expect(")")?;
        Ok(Some(StringExpr {
            text,
            format_args,
            localized,
        }))
    }

    /// `"text"`, `@"text"`, or with format arguments `<"text {0}", arg>`.
    fn string_literal_expr(&mut self) -> Result<Option<StringExpr>, ParseError> {
        let start = self.checkpoint();
        let formatted = self.cursor.matches("<");
        let localized = self.cursor.current() == Some('@') && self.cursor.peek(1) == Some('"');
        if localized {
            self.cursor.advance();
        }
        let Some(text) = self.cursor.string_literal() else {
            self.rewind(start);
            return Ok(None);
        };

        let mut format_args = vec![];
        if formatted {
            while self.cursor.matches(",") {
                match self.scoped_with(true, true)? {
                    Some(arg) => format_args.push(arg),
                    None => return Err(self.missing_operand(",")),
                }
            }
            self.expect(">")?;
        }
        Ok(Some(StringExpr {
            text,
            format_args,
            localized,
        }))
    }

    /// `Global.name`. Backtracks entirely if no name follows the dot.
    fn global_variable(&mut self) -> Option<Expr> {
        let start = self.checkpoint();
        if self.cursor.match_word("Global", true)
            && self.cursor.matches(".")
            && let Some(name) = self.cursor.identifier()
        {
            self.add_if_omitted(&name, true);
            return Some(Expr::Variable(VariableRef::Global { name }));
        }
        self.rewind(start);
        None
    }

    /// Player variable chains (`.name`, repeated) and then, where allowed, indexers (`[expr]`).
    fn postfix(&mut self, mut expr: Expr, allow_index: bool) -> Result<Expr, ParseError> {
        while self.cursor.matches(".") {
            let name = self.required_identifier("player variable")?;
            self.add_if_omitted(&name, false);
            expr = Expr::Variable(VariableRef::Player {
                name,
                player: Box::new(expr),
            });
        }
        if allow_index {
            while let Some(index) = self.indexer()? {
                expr = Expr::Index {
                    base: Box::new(expr),
                    index: Box::new(index),
                };
            }
        }
        Ok(expr)
    }

    pub(crate) fn indexer(&mut self) -> Result<Option<Expr>, ParseError> {
        if !self.cursor.matches("[") {
            return Ok(None);
        }
        let Some(index) = self.scoped_expression(true)? else {
            return Err(self.missing_operand("["));
        };
        self.expect("]")?;
        Ok(Some(index))
    }
}
