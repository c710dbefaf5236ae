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

use crate::operators::Operator;
use std::fmt::Display;
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};
use wsdc_elements::{ElementSignature, EnumMember};

/// A string value, either a custom string or one of the Workshop's localized strings.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    /// The text between the quotes, with escapes kept as written.
    pub text: String,
    /// Values substituted into `{0}`, `{1}`, ... placeholders.
    pub format_args: Vec<Expr>,
    pub localized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub element: ElementSignature,
    pub args: Vec<Expr>,
}

impl FunctionCall {
    pub fn name(&self) -> &'static str {
        self.element.name
    }

    pub fn arg(&self, position: usize) -> Option<&Expr> {
        self.args.get(position)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VariableRef {
    /// `Global.A`
    Global { name: String },
    /// A bare variable name passed to an element, e.g. the `A` in `Set Global Variable(A, 1)`.
    Anonymous { name: String, is_global: bool },
    /// `player.A`; chains nest through `player`.
    Player { name: String, player: Box<Expr> },
}

impl VariableRef {
    pub fn name(&self) -> &str {
        match self {
            VariableRef::Global { name }
            | VariableRef::Anonymous { name, .. }
            | VariableRef::Player { name, .. } => name,
        }
    }

    pub fn is_global(&self) -> bool {
        match self {
            VariableRef::Global { .. } => true,
            VariableRef::Anonymous { is_global, .. } => *is_global,
            VariableRef::Player { .. } => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    String(StringExpr),
    Binary {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: Operator,
        operand: Box<Expr>,
    },
    Ternary {
        condition: Box<Expr>,
        consequent: Box<Expr>,
        alternative: Box<Expr>,
    },
    EnumConstant(EnumMember),
    Call(FunctionCall),
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Variable(VariableRef),
}

impl Expr {
    pub fn binary(op: Operator, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: Operator, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn ternary(condition: Expr, consequent: Expr, alternative: Expr) -> Self {
        Expr::Ternary {
            condition: Box::new(condition),
            consequent: Box::new(consequent),
            alternative: Box::new(alternative),
        }
    }

    pub fn global(name: &str) -> Self {
        Expr::Variable(VariableRef::Global {
            name: name.to_string(),
        })
    }

    /// Whether this is a call to the value or action called `name`.
    pub fn is_call_to(&self, name: &str) -> bool {
        matches!(self, Expr::Call(call) if call.name() == name)
    }
}

/// Only variable references can be assigned to.
impl TryFrom<Expr> for VariableRef {
    type Error = Expr;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Variable(var) => Ok(var),
            other => Err(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum AssignOp {
    Assign,
    Add,
    Subtract,
    Divide,
    Multiply,
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::Add => "+=",
            AssignOp::Subtract => "-=",
            AssignOp::Divide => "/=",
            AssignOp::Multiply => "*=",
        }
    }

    pub fn all() -> impl Iterator<Item = AssignOp> {
        AssignOp::iter()
    }
}

impl Display for AssignOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How a subroutine is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallMode {
    /// `Call Subroutine`: the caller waits for it to finish.
    NoParallel,
    /// `Start Rule`: runs alongside the caller. `restart` restarts an instance already running
    /// instead of doing nothing.
    Parallel { restart: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    Call(FunctionCall),
    SetVariable {
        target: VariableRef,
        op: AssignOp,
        index: Option<Expr>,
        value: Expr,
    },
    CallSubroutine {
        name: String,
        mode: CallMode,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    pub comment: Option<String>,
    pub disabled: bool,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            comment: None,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
pub enum PlayerEvent {
    #[strum(to_string = "Ongoing - Each Player")]
    OngoingEachPlayer,
    #[strum(to_string = "Player Earned Elimination")]
    EarnedElimination,
    #[strum(to_string = "Player Dealt Final Blow")]
    DealtFinalBlow,
    #[strum(to_string = "Player Dealt Damage")]
    DealtDamage,
    #[strum(to_string = "Player Took Damage")]
    TookDamage,
    #[strum(to_string = "Player Died")]
    Died,
    #[strum(to_string = "Player Dealt Healing")]
    DealtHealing,
    #[strum(to_string = "Player Received Healing")]
    ReceivedHealing,
    #[strum(to_string = "Player Joined Match")]
    JoinedMatch,
    #[strum(to_string = "Player Left Match")]
    LeftMatch,
    #[strum(to_string = "Player Dealt Knockback")]
    DealtKnockback,
    #[strum(to_string = "Player Received Knockback")]
    ReceivedKnockback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, StrumDisplay)]
pub enum EventTeam {
    #[default]
    All,
    #[strum(to_string = "Team 1")]
    Team1,
    #[strum(to_string = "Team 2")]
    Team2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerSelector {
    #[default]
    All,
    Hero(EnumMember),
    Slot(u8),
}

pub const MAX_SLOT: u8 = 11;

impl Display for PlayerSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerSelector::All => f.write_str("All"),
            PlayerSelector::Hero(hero) => write!(f, "{hero}"),
            PlayerSelector::Slot(slot) => write!(f, "Slot {slot}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventInfo {
    GlobalOngoing,
    Subroutine {
        name: String,
    },
    Player {
        kind: PlayerEvent,
        team: EventTeam,
        player: PlayerSelector,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub event: EventInfo,
    pub conditions: Vec<Expr>,
    pub actions: Vec<Action>,
    pub disabled: bool,
}
