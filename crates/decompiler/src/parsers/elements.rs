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

use crate::ast::{Expr, FunctionCall, VariableRef};
use crate::errors::ParseError;
use crate::parsers::Parser;
use wsdc_elements::{ElementSignature, ParameterKind};

impl Parser {
    /// Match a known value (or action) by name at the cursor, along with its arguments.
    pub(crate) fn function(&mut self, is_value: bool) -> Result<Option<FunctionCall>, ParseError> {
        let candidates = if is_value {
            self.values.len()
        } else {
            self.actions.len()
        };
        for offset in 0..candidates {
            let element = if is_value {
                self.values[offset]
            } else {
                self.actions[offset]
            };
            if !self.cursor.match_word(element.name, false) {
                continue;
            }
            let args = self.arguments(&element)?;
            return Ok(Some(FunctionCall { element, args }));
        }
        Ok(None)
    }

    /// The parenthesized argument list, if there is one. Each position is read according to the
    /// kind the signature declares for it.
    fn arguments(&mut self, element: &ElementSignature) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![];
        if !self.cursor.matches("(") {
            return Ok(args);
        }
        if self.cursor.matches(")") {
            return Ok(args);
        }

        let mut position = 0;
        loop {
            match element.param_kind(position) {
                ParameterKind::Value => {
                    if let Some(arg) = self.scoped_expression(true)? {
                        args.push(arg);
                    }
                }
                ParameterKind::Enum(workshop_enum) => {
                    if let Some(member) = workshop_enum
                        .members_longest_first()
                        .into_iter()
                        .find(|member| self.cursor.match_word(member.name, false))
                    {
                        args.push(Expr::EnumConstant(member));
                    }
                }
                ParameterKind::VariableReference { is_global } => {
                    let name = self.required_identifier("variable parameter")?;
                    self.add_if_omitted(&name, is_global);
                    args.push(Expr::Variable(VariableRef::Anonymous { name, is_global }));
                }
            }
            position += 1;
            if !self.cursor.matches(",") {
                break;
            }
        }
        self.expect(")")?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, VariableRef};
    use crate::errors::ParseError;
    use crate::options::DecompileOptions;
    use crate::parsers::Parser;
    use crate::program::WorkshopVariable;
    use pretty_assertions::assert_eq;
    use wsdc_elements::enums::WAIT_BEHAVIOR;
    use wsdc_elements::{ELEMENTS, ElementSignature, ParameterKind};

    fn parser(text: &str) -> Parser {
        Parser::new(text, &*ELEMENTS, &DecompileOptions::default())
    }

    #[test]
    fn test_longest_name_wins() {
        let mut parser = parser("Hero Of(Event Player)");
        let call = parser.function(true).unwrap().unwrap();
        assert_eq!(call.name(), "Hero Of");
        assert!(call.args[0].is_call_to("Event Player"));
    }

    #[test]
    fn test_name_without_arguments() {
        let mut parser = parser("Event Player;");
        let call = parser.function(true).unwrap().unwrap();
        assert_eq!(call.name(), "Event Player");
        assert!(call.args.is_empty());
        assert_eq!(parser.cursor.current(), Some(';'));
    }

    #[test]
    fn test_action_enum_argument() {
        let mut parser = parser("Wait(0.25, Abort When False)");
        let call = parser.function(false).unwrap().unwrap();
        assert_eq!(
            call.args,
            vec![
                Expr::Number(0.25),
                Expr::EnumConstant(WAIT_BEHAVIOR.member("Abort When False").unwrap()),
            ]
        );
    }

    #[test]
    fn test_values_are_not_actions() {
        let mut parser = parser("Event Player");
        assert_eq!(parser.function(false), Ok(None));
        assert_eq!(parser.cursor.position(), 0);
    }

    #[test]
    fn test_variable_reference_registers_once() {
        let mut parser = parser("Set Global Variable(C, Global.C + 1)");
        let call = parser.function(false).unwrap().unwrap();
        assert_eq!(
            call.args[0],
            Expr::Variable(VariableRef::Anonymous {
                name: "C".to_string(),
                is_global: true
            })
        );
        assert_eq!(parser.variables(), &[WorkshopVariable::new(true, 2, "C")]);
    }

    #[test]
    fn test_variable_reference_requires_identifier() {
        let mut parser = parser("Set Global Variable(5, 1)");
        assert!(matches!(
            parser.function(false),
            Err(ParseError::MissingIdentifier {
                context: "variable parameter",
                ..
            })
        ));
    }

    #[test]
    fn test_extra_arguments_read_as_values() {
        static PARAMS: [ParameterKind; 1] = [ParameterKind::VariableReference { is_global: false }];
        let registry = [ElementSignature {
            name: "Pick",
            is_value: true,
            params: &PARAMS,
        }];
        let mut parser = Parser::new(
            "Pick(X, 1 + 1, 3)",
            registry.as_slice(),
            &DecompileOptions::default(),
        );
        let call = parser.function(true).unwrap().unwrap();
        assert_eq!(call.args.len(), 3);
        assert_eq!(parser.variables(), &[WorkshopVariable::new(false, 23, "X")]);
    }

    #[test]
    fn test_empty_argument_list() {
        let mut parser = parser("All Players()");
        let call = parser.function(true).unwrap().unwrap();
        assert!(call.args.is_empty());
        assert!(parser.cursor.at_end());
    }
}
