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

//! Per-element rendering overrides, keyed by element name. A [`Renderer`] is handed one table at
//! construction and consults it before falling back to the plain `Name(arg, ...)` form.

use crate::ast::{Expr, FunctionCall};
use crate::errors::RenderError;
use crate::operators::Operator;
use crate::unparse::{Renderer, enclose};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Renders a call in some custom form, or returns `Ok(None)` to decline (for example when the
/// arguments are not the shape the override expects).
pub type RenderHook = fn(&Renderer, &FunctionCall) -> Result<Option<String>, RenderError>;

/// The operator expression a call stands for, e.g. `Add(a, b)` as `a + b`. `None` when the
/// arguments do not fit.
pub type OperatorForm = fn(&FunctionCall) -> Option<Expr>;

#[derive(Clone, Copy)]
pub enum RenderOverride {
    Hook(RenderHook),
    /// Rendered as its operator form, and parenthesized as an operand the way that form is.
    Operator(OperatorForm),
}

#[derive(Clone, Default)]
pub struct RenderOverrides {
    entries: HashMap<&'static str, RenderOverride>,
}

impl Debug for RenderOverrides {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        f.debug_struct("RenderOverrides")
            .field("names", &names)
            .finish()
    }
}

lazy_static! {
    static ref STANDARD_OVERRIDES: RenderOverrides = mk_standard_overrides();
}

impl RenderOverrides {
    /// No overrides: every call renders as `Name(arg, ...)`.
    pub fn none() -> Self {
        Self::default()
    }

    /// Operators, literals and variable assignments in their pseudo-code forms.
    pub fn standard() -> Self {
        STANDARD_OVERRIDES.clone()
    }

    pub fn insert(&mut self, name: &'static str, hook: RenderHook) {
        self.entries.insert(name, RenderOverride::Hook(hook));
    }

    pub fn insert_operator(&mut self, name: &'static str, form: OperatorForm) {
        self.entries.insert(name, RenderOverride::Operator(form));
    }

    pub fn get(&self, name: &str) -> Option<&RenderOverride> {
        self.entries.get(name)
    }

    pub fn operator_form(&self, call: &FunctionCall) -> Option<Expr> {
        match self.get(call.name())? {
            RenderOverride::Operator(form) => form(call),
            RenderOverride::Hook(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn mk_standard_overrides() -> RenderOverrides {
    let mut overrides = RenderOverrides::none();

    overrides.insert("True", |_, _| Ok(Some("true".to_string())));
    overrides.insert("False", |_, _| Ok(Some("false".to_string())));
    overrides.insert("Null", |_, _| Ok(Some("null".to_string())));
    overrides.insert("Empty Array", |_, _| Ok(Some("[]".to_string())));
    overrides.insert("Array", array);
    overrides.insert("Abort", |_, _| Ok(Some("return".to_string())));

    overrides.insert("Global Variable", global_variable);
    overrides.insert("Player Variable", player_variable);
    overrides.insert("Set Global Variable", set_global_variable);
    overrides.insert("Set Player Variable", set_player_variable);
    overrides.insert("Set Global Variable At Index", set_global_variable_at_index);
    overrides.insert("Set Player Variable At Index", set_player_variable_at_index);
    overrides.insert("Modify Global Variable", modify_global_variable);
    overrides.insert("Modify Player Variable", modify_player_variable);

    overrides.insert_operator("Add", |c| binary(c, Operator::Add));
    overrides.insert_operator("Subtract", |c| binary(c, Operator::Subtract));
    overrides.insert_operator("Multiply", |c| binary(c, Operator::Multiply));
    overrides.insert_operator("Divide", |c| binary(c, Operator::Divide));
    overrides.insert_operator("Modulo", |c| binary(c, Operator::Modulo));
    overrides.insert_operator("Raise To Power", |c| binary(c, Operator::Power));
    overrides.insert_operator("And", |c| binary(c, Operator::And));
    overrides.insert_operator("Or", |c| binary(c, Operator::Or));
    overrides.insert_operator("Not", not);
    overrides.insert_operator("Compare", compare);
    overrides.insert_operator("If-Then-Else", if_then_else);

    overrides
}

fn args<const N: usize>(call: &FunctionCall) -> Option<[&Expr; N]> {
    if call.args.len() != N {
        return None;
    }
    let refs: Vec<&Expr> = call.args.iter().collect();
    refs.try_into().ok()
}

/// The operation named by an `Operation` enum argument, as a compound assignment symbol.
fn compound_symbol(operation: &Expr) -> Option<&'static str> {
    let Expr::EnumConstant(member) = operation else {
        return None;
    };
    match member.name {
        "Add" => Some("+="),
        "Subtract" => Some("-="),
        "Multiply" => Some("*="),
        "Divide" => Some("/="),
        _ => None,
    }
}

fn binary(call: &FunctionCall, op: Operator) -> Option<Expr> {
    let [left, right] = args::<2>(call)?;
    Some(Expr::binary(op, left.clone(), right.clone()))
}

fn not(call: &FunctionCall) -> Option<Expr> {
    let [operand] = args::<1>(call)?;
    Some(Expr::unary(Operator::Not, operand.clone()))
}

fn compare(call: &FunctionCall) -> Option<Expr> {
    let [left, Expr::EnumConstant(operator), right] = args::<3>(call)? else {
        return None;
    };
    let op = Operator::binary_operators().find(|op| op.symbol() == operator.name)?;
    Some(Expr::binary(op, left.clone(), right.clone()))
}

fn if_then_else(call: &FunctionCall) -> Option<Expr> {
    let [condition, consequent, alternative] = args::<3>(call)?;
    Some(Expr::ternary(
        condition.clone(),
        consequent.clone(),
        alternative.clone(),
    ))
}

fn array(renderer: &Renderer, call: &FunctionCall) -> Result<Option<String>, RenderError> {
    Ok(Some(enclose("[", &renderer.render_args(&call.args)?, "]")))
}

fn global_variable(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([variable]) = args::<1>(call) else {
        return Ok(None);
    };
    renderer.render_expr(variable).map(Some)
}

fn player_variable(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([player, variable]) = args::<2>(call) else {
        return Ok(None);
    };
    renderer
        .render_member(player, &renderer.render_expr(variable)?)
        .map(Some)
}

fn set_global_variable(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([variable, value]) = args::<2>(call) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{} = {}",
        renderer.render_expr(variable)?,
        renderer.render_expr(value)?
    )))
}

fn set_player_variable(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([player, variable, value]) = args::<3>(call) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{} = {}",
        renderer.render_member(player, &renderer.render_expr(variable)?)?,
        renderer.render_expr(value)?
    )))
}

fn set_global_variable_at_index(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([variable, index, value]) = args::<3>(call) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{}{} = {}",
        renderer.render_expr(variable)?,
        enclose("[", &renderer.render_expr(index)?, "]"),
        renderer.render_expr(value)?
    )))
}

fn set_player_variable_at_index(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([player, variable, index, value]) = args::<4>(call) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{}{} = {}",
        renderer.render_member(player, &renderer.render_expr(variable)?)?,
        enclose("[", &renderer.render_expr(index)?, "]"),
        renderer.render_expr(value)?
    )))
}

fn modify_global_variable(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([variable, operation, value]) = args::<3>(call) else {
        return Ok(None);
    };
    let Some(symbol) = compound_symbol(operation) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{} {symbol} {}",
        renderer.render_expr(variable)?,
        renderer.render_expr(value)?
    )))
}

fn modify_player_variable(
    renderer: &Renderer,
    call: &FunctionCall,
) -> Result<Option<String>, RenderError> {
    let Some([player, variable, operation, value]) = args::<4>(call) else {
        return Ok(None);
    };
    let Some(symbol) = compound_symbol(operation) else {
        return Ok(None);
    };
    Ok(Some(format!(
        "{} {symbol} {}",
        renderer.render_member(player, &renderer.render_expr(variable)?)?,
        renderer.render_expr(value)?
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DecompileOptions;
    use crate::parsers::parse_expression;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use wsdc_elements::{ELEMENTS, SignatureRegistry};

    fn render(text: &str) -> String {
        let expr = parse_expression(text, &*ELEMENTS, &DecompileOptions::default())
            .unwrap()
            .unwrap();
        Renderer::new(&DecompileOptions::default())
            .render_expr(&expr)
            .unwrap()
    }

    #[test_case("True", "true"; "true literal")]
    #[test_case("Null", "null"; "null literal")]
    #[test_case("Empty Array", "[]"; "empty array")]
    #[test_case("Array(1, 2, 3)", "[1, 2, 3]"; "array literal")]
    #[test_case("Add(1, Multiply(2, 3))", "1 + 2 * 3"; "tighter operator call as operand")]
    #[test_case("Multiply(Add(1, 2), Multiply(3, 4))", "(1 + 2) * 3 * 4"; "mixed operator calls")]
    #[test_case("Raise To Power(Not(True), 2)", "(!true) ^ 2"; "not call under power")]
    #[test_case("Add(If-Then-Else(True, 1, 2), 3)", "(true ? 1 : 2) + 3"; "ternary call as operand")]
    #[test_case("Not(Compare(Global.A, ==, 1))", "!(A == 1)"; "not of compare")]
    #[test_case("Add(Compare(Global.A, ==, 1), 2)", "(A == 1) + 2"; "compare as operand")]
    #[test_case("Subtract(Global.A, 1)", "A - 1"; "subtract")]
    #[test_case("Raise To Power(2, 8)", "2 ^ 8"; "power")]
    #[test_case("Not(Is Alive(Event Player))", "!Is Alive(Event Player)"; "not")]
    #[test_case("Compare(Global.A, >=, 3)", "A >= 3"; "compare")]
    #[test_case("If-Then-Else(True, 1, 2)", "true ? 1 : 2"; "if then else")]
    #[test_case("Global Variable(B)", "B"; "global variable value")]
    #[test_case("Player Variable(Victim, B)", "Victim.B"; "player variable value")]
    #[test_case("Player Variable(Add(1, 2), B)", "(1 + 2).B"; "player variable of an operator")]
    #[test_case("Count Of(Add(1, 2))", "Count Of(1 + 2)"; "operator as argument")]
    #[test_case("Multiply(Add(1, 2), 3)", "(1 + 2) * 3"; "operator as operand")]
    fn test_standard_value_overrides(text: &str, expected: &str) {
        assert_eq!(render(text), expected);
    }

    #[test]
    fn test_override_declines_unexpected_shapes() {
        let compare = FunctionCall {
            element: *ELEMENTS.find("Compare", true).unwrap(),
            args: vec![Expr::Number(1.0), Expr::Number(2.0)],
        };
        let renderer = Renderer::new(&DecompileOptions::default());
        assert_eq!(
            renderer.render_expr(&Expr::Call(compare)).unwrap(),
            "Compare(1, 2)"
        );
    }

    #[test]
    fn test_standard_table_contents() {
        let overrides = RenderOverrides::standard();
        assert!(overrides.get("Set Global Variable").is_some());
        assert!(overrides.get("Wait").is_none());
        assert!(RenderOverrides::none().is_empty());
        assert_eq!(overrides.len(), STANDARD_OVERRIDES.len());
    }

    #[test]
    fn test_operator_form() {
        let overrides = RenderOverrides::standard();
        let call = |text: &str| {
            let Some(Expr::Call(call)) =
                parse_expression(text, &*ELEMENTS, &DecompileOptions::default()).unwrap()
            else {
                panic!("{text} is not a call");
            };
            call
        };
        assert_eq!(
            overrides.operator_form(&call("Add(1, 2)")),
            Some(Expr::binary(
                Operator::Add,
                Expr::Number(1.0),
                Expr::Number(2.0)
            ))
        );
        assert_eq!(overrides.operator_form(&call("Add(1)")), None);
        assert_eq!(overrides.operator_form(&call("Array(1, 2)")), None);
    }

    #[test]
    fn test_custom_override() {
        let mut overrides = RenderOverrides::none();
        overrides.insert("Event Player", |_, _| Ok(Some("self".to_string())));
        let renderer = Renderer::with_overrides(&DecompileOptions::default(), overrides);
        let expr = parse_expression(
            "Hero Of(Event Player)",
            &*ELEMENTS,
            &DecompileOptions::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(renderer.render_expr(&expr).unwrap(), "Hero Of(self)");
    }
}
