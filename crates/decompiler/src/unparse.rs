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

use crate::ast::{
    Action, ActionKind, CallMode, EventInfo, Expr, FunctionCall, Rule, StringExpr, VariableRef,
};
use crate::errors::RenderError;
use crate::operators::{Operator, OperatorKind};
use crate::options::DecompileOptions;
use crate::overrides::{RenderOverride, RenderOverrides};
use crate::program::{Program, WorkshopVariable};
use itertools::Itertools;
use std::fmt::Write;

/// `open`, `inner`, `close`, with a space before a leading `<` since no delimiter matches when a
/// symbol follows it.
pub(crate) fn enclose(open: &str, inner: &str, close: &str) -> String {
    let gap = if inner.starts_with('<') { " " } else { "" };
    format!("{open}{gap}{inner}{close}")
}

/// Renders parsed Workshop structure as pseudo-code, with the fewest parentheses that still
/// re-parse to the same tree.
#[derive(Debug, Clone)]
pub struct Renderer {
    overrides: RenderOverrides,
    elide_event_player: bool,
    indent_width: usize,
}

impl Renderer {
    pub fn new(options: &DecompileOptions) -> Self {
        let overrides = if options.render_overrides {
            RenderOverrides::standard()
        } else {
            RenderOverrides::none()
        };
        Self::with_overrides(options, overrides)
    }

    pub fn with_overrides(options: &DecompileOptions, overrides: RenderOverrides) -> Self {
        Self {
            overrides,
            elide_event_player: options.elide_event_player,
            indent_width: options.indent_width,
        }
    }

    /// The operator expression a call renders as, so that it is grouped like one.
    fn operator_form(&self, expr: &Expr) -> Option<Expr> {
        match expr {
            Expr::Call(call) => self.overrides.operator_form(call),
            _ => None,
        }
    }

    pub fn render_expr(&self, current_expr: &Expr) -> Result<String, RenderError> {
        match current_expr {
            Expr::Number(number) => Ok(number.to_string()),
            Expr::String(string) => self.render_string(string),
            Expr::Binary { op, left, right } => {
                if op.kind() != OperatorKind::Binary {
                    return Err(RenderError::InvalidOperator(op.symbol()));
                }
                Ok(format!(
                    "{} {op} {}",
                    self.brace_operand(left, *op)?,
                    self.brace_operand(right, *op)?
                ))
            }
            Expr::Unary { op, operand } => {
                if op.kind() != OperatorKind::Unary {
                    return Err(RenderError::InvalidOperator(op.symbol()));
                }
                let form = self.operator_form(operand);
                // `!<` does not match `!`, so a formatted string is grouped too.
                let wrap = match form.as_ref().unwrap_or(operand) {
                    Expr::Binary { .. } | Expr::Ternary { .. } => true,
                    Expr::String(string) => !string.format_args.is_empty(),
                    _ => false,
                };
                Ok(format!("{op}{}", self.brace_if(operand, wrap)?))
            }
            Expr::Ternary {
                condition,
                consequent,
                alternative,
            } => {
                let form = self.operator_form(condition);
                let wrap = matches!(form.as_ref().unwrap_or(condition), Expr::Ternary { .. });
                Ok(format!(
                    "{} ? {} : {}",
                    self.brace_if(condition, wrap)?,
                    self.render_expr(consequent)?,
                    self.render_expr(alternative)?
                ))
            }
            Expr::EnumConstant(member) => Ok(member.to_string()),
            Expr::Call(call) => self.render_call(call),
            Expr::Index { base, index } => Ok(format!(
                "{}{}",
                self.render_operand(base)?,
                enclose("[", &self.render_expr(index)?, "]")
            )),
            Expr::Variable(variable) => self.render_variable(variable),
        }
    }

    fn brace_if(&self, expr: &Expr, wrap: bool) -> Result<String, RenderError> {
        let rendered = self.render_expr(expr)?;
        Ok(if wrap {
            enclose("(", &rendered, ")")
        } else {
            rendered
        })
    }

    /// A child of a binary operator. Lower precedence binary children and ternaries need
    /// parentheses, as does a `!` under an operator that binds as tightly as it does, since
    /// `!a ^ b` reads as `!(a ^ b)`.
    fn brace_operand(&self, expr: &Expr, parent: Operator) -> Result<String, RenderError> {
        let form = self.operator_form(expr);
        let wrap = match form.as_ref().unwrap_or(expr) {
            Expr::Ternary { .. } => true,
            Expr::Binary { op, .. } => op.precedence() < parent.precedence(),
            Expr::Unary { op, .. } => parent.precedence() >= op.precedence(),
            _ => false,
        };
        self.brace_if(expr, wrap)
    }

    /// An expression followed by `[index]`, which binds tighter than any operator.
    pub fn render_operand(&self, expr: &Expr) -> Result<String, RenderError> {
        let form = self.operator_form(expr);
        let wrap = matches!(
            form.as_ref().unwrap_or(expr),
            Expr::Binary { .. } | Expr::Unary { .. } | Expr::Ternary { .. }
        );
        self.brace_if(expr, wrap)
    }

    /// `player.name`, or just `name` for the event player when that is elided. Indexers are only
    /// read after a whole `.name` chain, so an indexed player is parenthesized too.
    pub fn render_member(&self, player: &Expr, name: &str) -> Result<String, RenderError> {
        if self.elide_event_player && player.is_call_to("Event Player") {
            return Ok(name.to_string());
        }
        let player = if matches!(player, Expr::Index { .. }) {
            self.brace_if(player, true)?
        } else {
            self.render_operand(player)?
        };
        Ok(format!("{player}.{name}"))
    }

    fn render_string(&self, string: &StringExpr) -> Result<String, RenderError> {
        let prefix = if string.localized { "@" } else { "" };
        if string.format_args.is_empty() {
            return Ok(format!("{prefix}\"{}\"", string.text));
        }
        let mut buffer = format!("<{prefix}\"{}\"", string.text);
        for arg in &string.format_args {
            let form = self.operator_form(arg);
            // A bare `>` would close the string.
            let wrap = matches!(
                form.as_ref().unwrap_or(arg),
                Expr::Binary { .. } | Expr::Ternary { .. }
            );
            write!(buffer, ", {}", self.brace_if(arg, wrap)?)?;
        }
        // Names and closing delimiters do not match when `>` follows them directly.
        let flush = match string.format_args.last() {
            Some(Expr::Number(_) | Expr::Variable(_)) => true,
            Some(Expr::String(last)) => last.format_args.is_empty(),
            _ => false,
        };
        if !flush {
            buffer.push(' ');
        }
        buffer.push('>');
        Ok(buffer)
    }

    pub fn render_args(&self, args: &[Expr]) -> Result<String, RenderError> {
        args.iter()
            .map(|arg| self.render_expr(arg))
            .process_results(|mut rendered| rendered.join(", "))
    }

    pub fn render_call(&self, call: &FunctionCall) -> Result<String, RenderError> {
        match self.overrides.get(call.name()) {
            Some(RenderOverride::Hook(hook)) => {
                if let Some(rendered) = hook(self, call)? {
                    return Ok(rendered);
                }
            }
            Some(RenderOverride::Operator(form)) => {
                if let Some(form) = form(call) {
                    return self.render_expr(&form);
                }
            }
            None => {}
        }
        if call.args.is_empty() && call.element.params.is_empty() {
            return Ok(call.name().to_string());
        }
        Ok(format!(
            "{}{}",
            call.name(),
            enclose("(", &self.render_args(&call.args)?, ")")
        ))
    }

    pub fn render_variable(&self, variable: &VariableRef) -> Result<String, RenderError> {
        match variable {
            VariableRef::Global { name } | VariableRef::Anonymous { name, .. } => Ok(name.clone()),
            VariableRef::Player { name, player } => self.render_member(player, name),
        }
    }

    /// The lines of one action, unindented. A comment goes on its own line above the action.
    pub fn render_action(&self, action: &Action) -> Result<Vec<String>, RenderError> {
        let mut lines = Vec::with_capacity(2);
        if let Some(comment) = &action.comment {
            lines.push(format!("// {comment}"));
        }
        let statement = match &action.kind {
            ActionKind::Call(call) => self.render_call(call)?,
            ActionKind::SetVariable {
                target,
                op,
                index,
                value,
            } => {
                let mut buffer = self.render_variable(target)?;
                if let Some(index) = index {
                    buffer.push_str(&enclose("[", &self.render_expr(index)?, "]"));
                }
                write!(buffer, " {op} {}", self.render_expr(value)?)?;
                buffer
            }
            ActionKind::CallSubroutine { name, mode } => match mode {
                CallMode::NoParallel => format!("{name}()"),
                CallMode::Parallel { restart: false } => format!("async {name}()"),
                CallMode::Parallel { restart: true } => format!("async! {name}()"),
            },
        };
        let disabled = if action.disabled { "// " } else { "" };
        lines.push(format!("{disabled}{statement};"));
        Ok(lines)
    }

    fn render_event(&self, event: &EventInfo) -> Vec<String> {
        match event {
            EventInfo::GlobalOngoing => vec!["Ongoing - Global;".to_string()],
            EventInfo::Subroutine { name } => vec!["Subroutine;".to_string(), format!("{name};")],
            EventInfo::Player { kind, team, player } => {
                vec![format!("{kind};"), format!("{team};"), format!("{player};")]
            }
        }
    }

    fn block(
        &self,
        out: &mut String,
        depth: usize,
        header: &str,
        lines: &[String],
    ) -> std::fmt::Result {
        let outer = " ".repeat(self.indent_width * depth);
        let inner = " ".repeat(self.indent_width * (depth + 1));
        writeln!(out, "{outer}{header}")?;
        writeln!(out, "{outer}{{")?;
        for line in lines {
            writeln!(out, "{inner}{line}")?;
        }
        write!(out, "{outer}}}")
    }

    pub fn render_rule(&self, rule: &Rule) -> Result<String, RenderError> {
        let mut sections = vec![];

        let mut event = String::new();
        self.block(&mut event, 1, "event", &self.render_event(&rule.event))?;
        sections.push(event);

        if !rule.conditions.is_empty() {
            let lines = rule
                .conditions
                .iter()
                .map(|condition| self.render_expr(condition).map(|c| format!("{c};")))
                .collect::<Result<Vec<_>, _>>()?;
            let mut conditions = String::new();
            self.block(&mut conditions, 1, "conditions", &lines)?;
            sections.push(conditions);
        }

        if !rule.actions.is_empty() {
            let mut lines = vec![];
            for action in &rule.actions {
                lines.extend(self.render_action(action)?);
            }
            let mut actions = String::new();
            self.block(&mut actions, 1, "actions", &lines)?;
            sections.push(actions);
        }

        let disabled = if rule.disabled { "disabled " } else { "" };
        let mut buffer = String::new();
        writeln!(buffer, "{disabled}rule(\"{}\")", rule.name)?;
        writeln!(buffer, "{{")?;
        writeln!(buffer, "{}", sections.join("\n\n"))?;
        write!(buffer, "}}")?;
        Ok(buffer)
    }

    fn variable_lines<'a>(variables: impl Iterator<Item = &'a WorkshopVariable>) -> Vec<String> {
        variables
            .map(|variable| format!("{}: {}", variable.index, variable.name))
            .collect()
    }

    /// The whole listing: the variable and subroutine tables, when there is anything in them,
    /// then each rule, separated by blank lines.
    pub fn render_program(&self, program: &Program) -> Result<String, RenderError> {
        let mut sections = vec![];

        if !program.variables.is_empty() {
            let indent = " ".repeat(self.indent_width);
            let mut lines = vec![];
            for (header, variables) in [
                ("global:", Self::variable_lines(program.global_variables())),
                ("player:", Self::variable_lines(program.player_variables())),
            ] {
                if variables.is_empty() {
                    continue;
                }
                lines.push(header.to_string());
                lines.extend(variables.into_iter().map(|line| format!("{indent}{line}")));
            }
            let mut block = String::new();
            self.block(&mut block, 0, "variables", &lines)?;
            sections.push(block);
        }

        if !program.subroutines.is_empty() {
            let lines: Vec<String> = program
                .subroutines
                .iter()
                .map(|subroutine| format!("{}: {}", subroutine.index, subroutine.name))
                .collect();
            let mut block = String::new();
            self.block(&mut block, 0, "subroutines", &lines)?;
            sections.push(block);
        }

        for rule in &program.rules {
            sections.push(self.render_rule(rule)?);
        }
        Ok(sections.join("\n\n"))
    }
}
