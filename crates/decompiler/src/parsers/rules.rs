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

//! The document grammar:
//!
//! ```text
//! document    := variables? subroutines? rule*
//! variables   := "variables" "{" ("global:" varlist)? ("player:" varlist)? "}"
//! varlist     := (INTEGER ":" IDENTIFIER)*
//! subroutines := "subroutines" "{" (INTEGER ":" IDENTIFIER)* "}"
//! rule        := "disabled"? "rule" "(" STRING ")" "{" event conditions? actions? "}"
//! action      := STRING? "disabled"? (subroutine-call | action-element | assignment) ";"
//! ```

use crate::ast::{
    Action, ActionKind, AssignOp, CallMode, EventInfo, EventTeam, MAX_SLOT, PlayerEvent,
    PlayerSelector, Rule, VariableRef,
};
use crate::errors::ParseError;
use crate::options::DecompileOptions;
use crate::parsers::Parser;
use crate::program::{Program, Subroutine, WorkshopVariable};
use strum::IntoEnumIterator;
use tracing::{debug, warn};
use wsdc_elements::SignatureRegistry;
use wsdc_elements::enums::{HERO, RULE_RESTART};

/// Parse a whole Workshop document.
pub fn parse_workshop<R: SignatureRegistry + ?Sized>(
    text: &str,
    registry: &R,
    options: &DecompileOptions,
) -> Result<Program, ParseError> {
    Parser::new(text, registry, options).document()
}

impl Parser {
    pub fn document(mut self) -> Result<Program, ParseError> {
        self.variables_block()?;
        self.subroutines_block()?;
        let mut rules = vec![];
        while let Some(rule) = self.rule()? {
            rules.push(rule);
        }

        if !self.cursor.at_end() {
            let (line, column) = self.cursor.line_col();
            if self.strict {
                return Err(ParseError::TrailingInput { line, column });
            }
            warn!("Ignoring unparsed input from line {line}, column {column}");
        }

        Ok(Program {
            variables: self.variables,
            subroutines: self.subroutines,
            rules,
        })
    }

    fn variables_block(&mut self) -> Result<(), ParseError> {
        if !self.cursor.match_word("variables", true) {
            return Ok(());
        }
        self.expect("{")?;
        if self.cursor.matches("global:") {
            self.variable_list(true)?;
        }
        if self.cursor.matches("player:") {
            self.variable_list(false)?;
        }
        self.expect("}")
    }

    fn variable_list(&mut self, is_global: bool) -> Result<(), ParseError> {
        while let Some(index) = self.cursor.integer()? {
            self.expect(":")?;
            let name = self.required_identifier("variable name")?;
            if self
                .variables
                .iter()
                .any(|v| v.is_global == is_global && v.name == name)
            {
                warn!("Ignoring redeclaration of variable {name} at index {index}");
                continue;
            }
            self.variables
                .push(WorkshopVariable::new(is_global, index, &name));
        }
        Ok(())
    }

    fn subroutines_block(&mut self) -> Result<(), ParseError> {
        if !self.cursor.match_word("subroutines", true) {
            return Ok(());
        }
        self.expect("{")?;
        while let Some(index) = self.cursor.integer()? {
            self.expect(":")?;
            let name = self.required_identifier("subroutine name")?;
            self.subroutines.push(Subroutine { index, name });
        }
        self.expect("}")
    }

    fn rule(&mut self) -> Result<Option<Rule>, ParseError> {
        let disabled = if self.cursor.match_word("disabled", true) {
            self.expect_word("rule")?;
            true
        } else if self.cursor.match_word("rule", true) {
            false
        } else {
            return Ok(None);
        };

        self.expect("(")?;
        let name = match self.cursor.string_literal() {
            Some(name) => name,
            None if self.strict => return Err(self.expected("rule name")),
            None => String::new(),
        };
        self.expect(")")?;
        self.expect("{")?;

        self.expect_word("event")?;
        self.expect("{")?;
        let event = self.event()?;
        self.expect("}")?;

        let mut conditions = vec![];
        if self.cursor.match_word("conditions", true) {
            self.expect("{")?;
            while let Some(condition) = self.scoped_expression(true)? {
                self.expect(";")?;
                conditions.push(condition);
            }
            self.expect("}")?;
        }

        let mut actions = vec![];
        if self.cursor.match_word("actions", true) {
            self.expect("{")?;
            while let Some(action) = self.action()? {
                actions.push(action);
            }
            self.expect("}")?;
        }
        self.expect("}")?;

        debug!(
            "Parsed rule {name:?}: {} conditions, {} actions",
            conditions.len(),
            actions.len()
        );
        Ok(Some(Rule {
            name,
            event,
            conditions,
            actions,
            disabled,
        }))
    }

    fn event(&mut self) -> Result<EventInfo, ParseError> {
        if self.cursor.matches("Ongoing - Global;") {
            return Ok(EventInfo::GlobalOngoing);
        }
        if self.cursor.matches("Subroutine;") {
            let name = self.required_identifier("subroutine event")?;
            self.expect(";")?;
            return Ok(EventInfo::Subroutine { name });
        }

        let kind = PlayerEvent::iter().find(|kind| self.cursor.matches(&format!("{kind};")));
        let team = EventTeam::iter()
            .find(|team| self.cursor.matches(&format!("{team};")))
            .unwrap_or_default();
        let player = self.player_selector();

        match kind {
            Some(kind) => Ok(EventInfo::Player { kind, team, player }),
            None if self.strict => Err(self.expected("event")),
            None => {
                let (line, column) = self.cursor.line_col();
                warn!("Unrecognized event at line {line}, column {column}; using Ongoing - Global");
                Ok(EventInfo::GlobalOngoing)
            }
        }
    }

    fn player_selector(&mut self) -> PlayerSelector {
        if self.cursor.matches("All;") {
            return PlayerSelector::All;
        }
        if let Some(hero) = HERO
            .members()
            .find(|hero| self.cursor.matches(&format!("{hero};")))
        {
            return PlayerSelector::Hero(hero);
        }
        (0..=MAX_SLOT)
            .find(|slot| self.cursor.matches(&format!("Slot {slot};")))
            .map(PlayerSelector::Slot)
            .unwrap_or_default()
    }

    pub(crate) fn action(&mut self) -> Result<Option<Action>, ParseError> {
        let start = self.checkpoint();
        let comment = self.cursor.string_literal();
        let disabled = self.cursor.match_word("disabled", true);

        let kind = if let Some(kind) = self.subroutine_call()? {
            kind
        } else if let Some(call) = self.function(false)? {
            ActionKind::Call(call)
        } else if let Some(kind) = self.assignment()? {
            kind
        } else {
            self.rewind(start);
            return Ok(None);
        };
        self.expect(";")?;
        Ok(Some(Action {
            kind,
            comment,
            disabled,
        }))
    }

    /// `Call Subroutine(Name)` and `Start Rule(Name, Restart Rule | Do Nothing)`, and their
    /// rendered forms `Name()`, `async Name()` and `async! Name()`.
    fn subroutine_call(&mut self) -> Result<Option<ActionKind>, ParseError> {
        if self.cursor.match_word("Call Subroutine", false) {
            self.expect("(")?;
            let name = self.required_identifier("subroutine name")?;
            self.expect(")")?;
            return Ok(Some(ActionKind::CallSubroutine {
                name,
                mode: CallMode::NoParallel,
            }));
        }
        if self.cursor.match_word("Start Rule", false) {
            self.expect("(")?;
            let name = self.required_identifier("subroutine name")?;
            self.expect(",")?;
            let restart = RULE_RESTART
                .members_longest_first()
                .into_iter()
                .find(|member| self.cursor.match_word(member.name, false))
                .is_some_and(|member| member.name == "Restart Rule");
            self.expect(")")?;
            return Ok(Some(ActionKind::CallSubroutine {
                name,
                mode: CallMode::Parallel { restart },
            }));
        }

        let start = self.checkpoint();
        let mode = if self.cursor.matches("async!") {
            CallMode::Parallel { restart: true }
        } else if self.cursor.match_word("async", true) {
            CallMode::Parallel { restart: false }
        } else {
            CallMode::NoParallel
        };
        if let Some(name) = self.cursor.identifier()
            && self.subroutines.iter().any(|s| s.name == name)
            && self.cursor.matches("(")
            && self.cursor.matches(")")
        {
            return Ok(Some(ActionKind::CallSubroutine { name, mode }));
        }
        self.rewind(start);
        Ok(None)
    }

    /// `target[index] op value`, where the target must be a variable.
    fn assignment(&mut self) -> Result<Option<ActionKind>, ParseError> {
        let start = self.checkpoint();
        let Some(target) = self.scoped_expression(false)? else {
            return Ok(None);
        };
        let target = VariableRef::try_from(target).map_err(|_| {
            let (line, column) = self.cursor.line_col_at(start.position);
            ParseError::NotAVariable { line, column }
        })?;
        let index = self.indexer()?;

        let Some(op) = AssignOp::all().find(|op| self.cursor.matches(op.symbol())) else {
            if self.strict {
                return Err(self.expected("assignment operator"));
            }
            let (line, column) = self.cursor.line_col();
            warn!(
                "Discarding statement without an assignment operator at line {line}, column {column}"
            );
            self.rewind(start);
            return Ok(None);
        };
        let Some(value) = self.scoped_expression(true)? else {
            return Err(self.missing_operand(op.symbol()));
        };
        Ok(Some(ActionKind::SetVariable {
            target,
            op,
            index,
            value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Expr;
    use crate::operators::Operator;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use unindent::unindent;
    use wsdc_elements::ELEMENTS;

    fn parse(text: &str) -> Program {
        parse_workshop(text, &*ELEMENTS, &DecompileOptions::default()).unwrap()
    }

    fn parse_strict(text: &str) -> Result<Program, ParseError> {
        parse_workshop(
            text,
            &*ELEMENTS,
            &DecompileOptions {
                strict: true,
                ..Default::default()
            },
        )
    }

    fn actions_of(body: &str) -> Vec<Action> {
        let text = format!(
            "subroutines {{ 0: Sub }} rule(\"r\") {{ event {{ Ongoing - Global; }} actions {{ {body} }} }}"
        );
        parse(&text).rules.remove(0).actions
    }

    #[test]
    fn test_end_to_end_scenario() {
        let program = parse(
            r#"variables { global: 0: A } subroutines { } rule("Test") { event { Ongoing - Global; } conditions { } actions { A = 5; } } }"#,
        );
        assert_eq!(program.variables, vec![WorkshopVariable::new(true, 0, "A")]);
        assert!(program.subroutines.is_empty());
        assert_eq!(program.rules.len(), 1);

        let rule = &program.rules[0];
        assert_eq!(rule.name, "Test");
        assert_eq!(rule.event, EventInfo::GlobalOngoing);
        assert!(rule.conditions.is_empty());
        assert_eq!(
            rule.actions,
            vec![Action::new(ActionKind::SetVariable {
                target: VariableRef::Global {
                    name: "A".to_string()
                },
                op: AssignOp::Assign,
                index: None,
                value: Expr::Number(5.0),
            })]
        );
    }

    #[test_case("variables { global: 0:A 1:B }"; "compact")]
    #[test_case("variables{global:0:A 1:B}"; "no spaces")]
    #[test_case("variables\n{\n\tglobal:\n\t\t0: A\n\t\t1: B\n}\n"; "workshop layout")]
    #[test_case("  variables {   global:  0 :  A  1 :   B   }  "; "extra spaces")]
    fn test_variable_table_ignores_layout(text: &str) {
        assert_eq!(
            parse(text).variables,
            vec![
                WorkshopVariable::new(true, 0, "A"),
                WorkshopVariable::new(true, 1, "B"),
            ]
        );
    }

    #[test]
    fn test_variable_and_subroutine_tables() {
        let program = parse(&unindent(
            r#"
            variables
            {
                global:
                    0: Score
                    5: B
                player:
                    0: Score
                    2: C
            }
            subroutines
            {
                0: Setup
                3: Spawn
            }
            "#,
        ));
        assert_eq!(
            program.variables,
            vec![
                WorkshopVariable::new(true, 0, "Score"),
                WorkshopVariable::new(true, 5, "B"),
                WorkshopVariable::new(false, 0, "Score"),
                WorkshopVariable::new(false, 2, "C"),
            ]
        );
        assert_eq!(program.subroutine("Spawn").map(|s| s.index), Some(3));
        assert_eq!(
            program.subroutine_by_index(0).map(|s| s.name.as_str()),
            Some("Setup")
        );
        assert!(program.rules.is_empty());
    }

    #[test]
    fn test_implicit_variable_registered_once() {
        let program = parse(&unindent(
            r#"
            rule("Implicit")
            {
                event
                {
                    Ongoing - Global;
                }

                actions
                {
                    Set Global Variable(C, 1);
                    Modify Global Variable(C, Add, 1);
                    Global.C = Global.C * 2;
                }
            }
            "#,
        ));
        assert_eq!(program.variables, vec![WorkshopVariable::new(true, 2, "C")]);
        assert_eq!(program.rules[0].actions.len(), 3);
    }

    #[test]
    fn test_declared_variable_is_not_duplicated() {
        let program = parse(
            r#"variables { global: 7: C } rule("r") { event { Ongoing - Global; } actions { Set Global Variable(C, 1); } }"#,
        );
        assert_eq!(program.variables, vec![WorkshopVariable::new(true, 7, "C")]);
    }

    #[test]
    fn test_player_event() {
        let program = parse(&unindent(
            r#"
            disabled rule("Heal on kill")
            {
                event
                {
                    Player Earned Elimination;
                    Team 2;
                    Slot 10;
                }

                conditions
                {
                    Is Alive(Event Player) == True;
                    Global.A > 3;
                }

                actions
                {
                    Heal(Event Player, Null, 50);
                }
            }
            "#,
        ));
        let rule = &program.rules[0];
        assert!(rule.disabled);
        assert_eq!(rule.name, "Heal on kill");
        assert_eq!(
            rule.event,
            EventInfo::Player {
                kind: PlayerEvent::EarnedElimination,
                team: EventTeam::Team2,
                player: PlayerSelector::Slot(10),
            }
        );
        assert_eq!(rule.conditions.len(), 2);
        assert!(matches!(
            rule.conditions[1],
            Expr::Binary {
                op: Operator::GreaterThan,
                ..
            }
        ));
        assert!(matches!(&rule.actions[0].kind, ActionKind::Call(call) if call.name() == "Heal"));
    }

    #[test]
    fn test_hero_selector_and_default_team() {
        let program = parse(
            r#"rule("r") { event { Ongoing - Each Player; Soldier: 76; } }"#,
        );
        let EventInfo::Player { kind, team, player } = &program.rules[0].event else {
            panic!("expected a player event");
        };
        assert_eq!(*kind, PlayerEvent::OngoingEachPlayer);
        assert_eq!(*team, EventTeam::All);
        assert_eq!(player.to_string(), "Soldier: 76");
    }

    #[test]
    fn test_subroutine_event() {
        let program = parse(
            r#"subroutines { 0: Setup } rule("r") { event { Subroutine; Setup; } }"#,
        );
        assert_eq!(
            program.rules[0].event,
            EventInfo::Subroutine {
                name: "Setup".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_event() {
        let text = r#"rule("r") { event { Whenever; } }"#;
        let program = parse(text);
        assert_eq!(program.rules[0].event, EventInfo::GlobalOngoing);
        assert!(matches!(
            parse_strict(text),
            Err(ParseError::Expected { ref expected, .. }) if expected == "event"
        ));
    }

    #[test]
    fn test_subroutine_calls() {
        let actions = actions_of(
            "Call Subroutine(Sub); Start Rule(Sub, Restart Rule); Start Rule(Sub, Do Nothing); \
             Sub(); async Sub(); async! Sub();",
        );
        let modes: Vec<_> = actions
            .iter()
            .map(|action| match &action.kind {
                ActionKind::CallSubroutine { name, mode } => {
                    assert_eq!(name, "Sub");
                    *mode
                }
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert_eq!(
            modes,
            vec![
                CallMode::NoParallel,
                CallMode::Parallel { restart: true },
                CallMode::Parallel { restart: false },
                CallMode::NoParallel,
                CallMode::Parallel { restart: false },
                CallMode::Parallel { restart: true },
            ]
        );
    }

    #[test]
    fn test_action_comment_and_disabled() {
        let actions = actions_of(r#""Reset the score" disabled Global.A = 0; Wait(1, Ignore Condition);"#);
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].comment.as_deref(), Some("Reset the score"));
        assert!(actions[0].disabled);
        assert_eq!(actions[1].comment, None);
        assert!(!actions[1].disabled);
    }

    #[test]
    fn test_compound_assignment_with_index() {
        let actions = actions_of("Event Player.B[2] -= 1;");
        let ActionKind::SetVariable {
            target,
            op,
            index,
            value,
        } = &actions[0].kind
        else {
            panic!("expected an assignment");
        };
        assert_eq!(target.name(), "B");
        assert!(!target.is_global());
        assert_eq!(*op, AssignOp::Subtract);
        assert_eq!(index, &Some(Expr::Number(2.0)));
        assert_eq!(value, &Expr::Number(1.0));
    }

    #[test]
    fn test_assignment_to_non_variable_is_fatal() {
        let text = r#"rule("r") { event { Ongoing - Global; } actions { 1 + 2 = 3; } }"#;
        assert_eq!(
            parse_workshop(text, &*ELEMENTS, &DecompileOptions::default()),
            Err(ParseError::NotAVariable {
                line: 1,
                column: 51
            })
        );
    }

    #[test]
    fn test_assignment_without_operator() {
        let text = r#"rule("r") { event { Ongoing - Global; } actions { Wait(1, Ignore Condition); Foo(); } }"#;
        let program = parse(text);
        assert_eq!(program.rules[0].actions.len(), 1);
        assert!(program.variables.is_empty());
        assert!(matches!(
            parse_strict(text),
            Err(ParseError::Expected { ref expected, .. }) if expected == "assignment operator"
        ));
    }

    #[test]
    fn test_trailing_input() {
        let text = r#"rule("r") { event { Ongoing - Global; } } }"#;
        assert_eq!(parse(text).rules.len(), 1);
        assert_eq!(
            parse_strict(text),
            Err(ParseError::TrailingInput {
                line: 1,
                column: 43
            })
        );
    }

    #[test]
    fn test_strict_requires_delimiters() {
        let text = r#"rule("r") { event { Ongoing - Global; } actions { Abort; }"#;
        assert_eq!(parse(text).rules[0].actions.len(), 1);
        assert!(matches!(
            parse_strict(text),
            Err(ParseError::Expected { ref expected, .. }) if expected == "}"
        ));
    }

    #[test]
    fn test_missing_rule_name_is_empty_when_lenient() {
        let program = parse(r#"rule() { event { Ongoing - Global; } }"#);
        assert_eq!(program.rules[0].name, "");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse(""), Program::default());
        assert_eq!(parse("  // nothing here\n"), Program::default());
    }
}
