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

use crate::enums::*;
use ParameterKind::{Enum, Value};
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref ELEMENT_DESCRIPTORS: Vec<ElementSignature> = mk_element_table();
    pub static ref ELEMENTS: Elements = Elements::new();
}

/// How the text in one parameter position of an element is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Any value expression.
    Value,
    /// A literal member of the given enum, never a general expression.
    Enum(&'static WorkshopEnum),
    /// A bare variable name, e.g. the `A` in `Set Global Variable(A, 5)`.
    VariableReference { is_global: bool },
}

const GLOBAL_VAR: ParameterKind = ParameterKind::VariableReference { is_global: true };
const PLAYER_VAR: ParameterKind = ParameterKind::VariableReference { is_global: false };

/// A Workshop action or value and the kinds of its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementSignature {
    /// The name as it appears in Workshop text, e.g. `Set Global Variable`.
    pub name: &'static str,
    /// Values produce something usable in an expression; actions are statements.
    pub is_value: bool,
    pub params: &'static [ParameterKind],
}

impl ElementSignature {
    /// The kind of the parameter at `position`. Positions past the declared parameters read as
    /// plain values, which is how variadic elements like `Array` take their arguments.
    pub fn param_kind(&self, position: usize) -> ParameterKind {
        self.params.get(position).copied().unwrap_or(Value)
    }
}

/// Read-only source of element signatures for the decompiler.
pub trait SignatureRegistry {
    fn signatures(&self) -> &[ElementSignature];

    fn find(&self, name: &str, is_value: bool) -> Option<&ElementSignature> {
        self.signatures()
            .iter()
            .find(|s| s.is_value == is_value && s.name == name)
    }
}

impl SignatureRegistry for [ElementSignature] {
    fn signatures(&self) -> &[ElementSignature] {
        self
    }
}

impl SignatureRegistry for Vec<ElementSignature> {
    fn signatures(&self) -> &[ElementSignature] {
        self
    }
}

fn action(name: &'static str, params: &'static [ParameterKind]) -> ElementSignature {
    ElementSignature {
        name,
        is_value: false,
        params,
    }
}

fn value(name: &'static str, params: &'static [ParameterKind]) -> ElementSignature {
    ElementSignature {
        name,
        is_value: true,
        params,
    }
}

fn mk_element_table() -> Vec<ElementSignature> {
    vec![
        // Control flow
        action("Abort", &[]),
        action("Abort If", &[Value]),
        action("Abort If Condition Is False", &[]),
        action("Abort If Condition Is True", &[]),
        action("Break", &[]),
        action("Continue", &[]),
        action("Else", &[]),
        action("Else If", &[Value]),
        action("End", &[]),
        action("If", &[Value]),
        action("Loop", &[]),
        action("Loop If", &[Value]),
        action("Loop If Condition Is False", &[]),
        action("Loop If Condition Is True", &[]),
        action("Skip", &[Value]),
        action("Skip If", &[Value, Value]),
        action("Wait", &[Value, Enum(&WAIT_BEHAVIOR)]),
        action("Wait Until", &[Value, Value]),
        action("While", &[Value]),
        // Variables
        action("Set Global Variable", &[GLOBAL_VAR, Value]),
        action("Set Global Variable At Index", &[GLOBAL_VAR, Value, Value]),
        action("Set Player Variable", &[Value, PLAYER_VAR, Value]),
        action(
            "Set Player Variable At Index",
            &[Value, PLAYER_VAR, Value, Value],
        ),
        action(
            "Modify Global Variable",
            &[GLOBAL_VAR, Enum(&OPERATION), Value],
        ),
        action(
            "Modify Global Variable At Index",
            &[GLOBAL_VAR, Value, Enum(&OPERATION), Value],
        ),
        action(
            "Modify Player Variable",
            &[Value, PLAYER_VAR, Enum(&OPERATION), Value],
        ),
        action(
            "Modify Player Variable At Index",
            &[Value, PLAYER_VAR, Value, Enum(&OPERATION), Value],
        ),
        action(
            "Chase Global Variable At Rate",
            &[GLOBAL_VAR, Value, Value, Enum(&CHASE_RATE_REEVALUATION)],
        ),
        action(
            "Chase Global Variable Over Time",
            &[GLOBAL_VAR, Value, Value, Enum(&CHASE_TIME_REEVALUATION)],
        ),
        action(
            "Chase Player Variable At Rate",
            &[
                Value,
                PLAYER_VAR,
                Value,
                Value,
                Enum(&CHASE_RATE_REEVALUATION),
            ],
        ),
        action(
            "Chase Player Variable Over Time",
            &[
                Value,
                PLAYER_VAR,
                Value,
                Value,
                Enum(&CHASE_TIME_REEVALUATION),
            ],
        ),
        action("Stop Chasing Global Variable", &[GLOBAL_VAR]),
        action("Stop Chasing Player Variable", &[Value, PLAYER_VAR]),
        action("For Global Variable", &[GLOBAL_VAR, Value, Value, Value]),
        action(
            "For Player Variable",
            &[Value, PLAYER_VAR, Value, Value, Value],
        ),
        // Players
        action("Allow Button", &[Value, Enum(&BUTTON)]),
        action("Disallow Button", &[Value, Enum(&BUTTON)]),
        action("Press Button", &[Value, Enum(&BUTTON)]),
        action(
            "Apply Impulse",
            &[Value, Value, Value, Enum(&RELATIVE), Enum(&MOTION)],
        ),
        action("Clear Status", &[Value, Enum(&STATUS)]),
        action("Set Status", &[Value, Value, Enum(&STATUS), Value]),
        action("Communicate", &[Value, Enum(&COMMUNICATE)]),
        action("Damage", &[Value, Value, Value]),
        action("Heal", &[Value, Value, Value]),
        action("Kill", &[Value, Value]),
        action("Respawn", &[Value]),
        action("Resurrect", &[Value]),
        action("Teleport", &[Value, Value]),
        action("Set Invisible", &[Value, Enum(&INVISIBLE_TO)]),
        action("Set Move Speed", &[Value, Value]),
        action("Set Max Health", &[Value, Value]),
        action("Set Damage Dealt", &[Value, Value]),
        action("Set Damage Received", &[Value, Value]),
        action("Set Gravity", &[Value, Value]),
        action("Set Ultimate Charge", &[Value, Value]),
        action("Set Ability 1 Enabled", &[Value, Value]),
        action("Set Ability 2 Enabled", &[Value, Value]),
        action("Set Primary Fire Enabled", &[Value, Value]),
        action("Start Forcing Player To Be Hero", &[Value, Value]),
        action("Stop Forcing Player To Be Hero", &[Value]),
        action("Start Camera", &[Value, Value, Value, Value]),
        action("Stop Camera", &[Value]),
        // Messages, text and effects
        action("Big Message", &[Value, Value]),
        action("Small Message", &[Value, Value]),
        action(
            "Create HUD Text",
            &[
                Value,
                Value,
                Value,
                Value,
                Enum(&HUD_LOCATION),
                Value,
                Enum(&COLOR),
                Enum(&COLOR),
                Enum(&COLOR),
                Enum(&STRING_REEVALUATION),
                Enum(&SPECTATOR_VISIBILITY),
            ],
        ),
        action("Destroy HUD Text", &[Value]),
        action("Destroy All HUD Text", &[]),
        action(
            "Create Effect",
            &[
                Value,
                Enum(&EFFECT),
                Enum(&COLOR),
                Value,
                Value,
                Enum(&EFFECT_REEVALUATION),
            ],
        ),
        action("Destroy Effect", &[Value]),
        action("Destroy All Effects", &[]),
        action(
            "Play Effect",
            &[Value, Enum(&PLAY_EFFECT), Enum(&COLOR), Value, Value],
        ),
        action(
            "Set Objective Description",
            &[Value, Value, Enum(&STRING_REEVALUATION)],
        ),
        // Match
        action("Declare Match Draw", &[]),
        action("Declare Player Victory", &[Value]),
        action("Declare Team Victory", &[Value]),
        action("Pause Match Time", &[]),
        action("Unpause Match Time", &[]),
        action("Set Match Time", &[Value]),
        action("Log To Inspector", &[Value]),
        action("Enable Inspector Recording", &[]),
        action("Disable Inspector Recording", &[]),
        // Event and player values
        value("Event Player", &[]),
        value("Victim", &[]),
        value("Attacker", &[]),
        value("Healer", &[]),
        value("Healee", &[]),
        value("Event Damage", &[]),
        value("Event Healing", &[]),
        value("Event Was Critical Hit", &[]),
        value("Host Player", &[]),
        value("All Players", &[Value]),
        value("All Living Players", &[Value]),
        value("All Dead Players", &[Value]),
        value("Players In Slot", &[Value, Value]),
        value("Players On Hero", &[Value, Value]),
        value(
            "Players Within Radius",
            &[Value, Value, Value, Enum(&LOS_CHECK)],
        ),
        value("Closest Player To", &[Value, Value]),
        value("Farthest Player From", &[Value, Value]),
        value("Number Of Players", &[Value]),
        value("Hero", &[Enum(&HERO)]),
        value("Hero Of", &[Value]),
        value("All Heroes", &[]),
        value("Has Spawned", &[Value]),
        value("Is Alive", &[Value]),
        value("Is Dead", &[Value]),
        value("Is Button Held", &[Value, Enum(&BUTTON)]),
        value("Is On Ground", &[Value]),
        value("Is In Air", &[Value]),
        value("Is Crouching", &[Value]),
        value("Is Firing Primary", &[Value]),
        value("Is Using Ability 1", &[Value]),
        value("Is Using Ultimate", &[Value]),
        value("Health", &[Value]),
        value("Max Health", &[Value]),
        value("Normalized Health", &[Value]),
        value("Ultimate Charge Percent", &[Value]),
        value("Team Of", &[Value]),
        value("Opposite Team Of", &[Value]),
        value("Slot Of", &[Value]),
        value("Position Of", &[Value]),
        value("Eye Position", &[Value]),
        value("Facing Direction Of", &[Value]),
        value("Velocity Of", &[Value]),
        value("Speed Of", &[Value]),
        value("Throttle Of", &[Value]),
        value("Is In Line Of Sight", &[Value, Value, Enum(&BARRIERS_LOS)]),
        // Game state
        value("Is Game In Progress", &[]),
        value("Is Assembling Heroes", &[]),
        value("Is In Setup", &[]),
        value("Is Match Complete", &[]),
        value("Is Waiting For Players", &[]),
        value("Match Time", &[]),
        value("Total Time Elapsed", &[]),
        value("Team Score", &[Value]),
        value("Server Load", &[]),
        value("Last Created Entity", &[]),
        value("Last Text ID", &[]),
        // Vectors
        value("Vector", &[Value, Value, Value]),
        value("Up", &[]),
        value("Down", &[]),
        value("Left", &[]),
        value("Right", &[]),
        value("Forward", &[]),
        value("Backward", &[]),
        value("X Component Of", &[Value]),
        value("Y Component Of", &[Value]),
        value("Z Component Of", &[Value]),
        value("Distance Between", &[Value, Value]),
        value("Direction Towards", &[Value, Value]),
        value("Direction From Angles", &[Value, Value]),
        value("Horizontal Angle From Direction", &[Value]),
        value("Vertical Angle From Direction", &[Value]),
        value("Normalize", &[Value]),
        value("Dot Product", &[Value, Value]),
        value("Cross Product", &[Value, Value]),
        value("Nearest Walkable Position", &[Value]),
        value("World Vector Of", &[Value, Value, Enum(&TRANSFORMATION)]),
        value("Local Vector Of", &[Value, Value, Enum(&TRANSFORMATION)]),
        value(
            "Ray Cast Hit Position",
            &[Value, Value, Value, Value, Value],
        ),
        // Math and logic
        value("Absolute Value", &[Value]),
        value("Add", &[Value, Value]),
        value("Subtract", &[Value, Value]),
        value("Multiply", &[Value, Value]),
        value("Divide", &[Value, Value]),
        value("Modulo", &[Value, Value]),
        value("Raise To Power", &[Value, Value]),
        value("Min", &[Value, Value]),
        value("Max", &[Value, Value]),
        value("Square Root", &[Value]),
        value("Sine From Degrees", &[Value]),
        value("Cosine From Degrees", &[Value]),
        value("Arctangent In Degrees", &[Value, Value]),
        value("Round To Integer", &[Value, Enum(&ROUNDING_TYPE)]),
        value("Random Integer", &[Value, Value]),
        value("Random Real", &[Value, Value]),
        value("And", &[Value, Value]),
        value("Or", &[Value, Value]),
        value("Not", &[Value]),
        value("Compare", &[Value, Enum(&COMPARE_OPERATOR), Value]),
        value("True", &[]),
        value("False", &[]),
        value("Null", &[]),
        value("If-Then-Else", &[Value, Value, Value]),
        value("Is True For All", &[Value, Value]),
        value("Is True For Any", &[Value, Value]),
        // Arrays
        value("Array", &[Value]),
        value("Empty Array", &[]),
        value("Append To Array", &[Value, Value]),
        value("Remove From Array", &[Value, Value]),
        value("Array Contains", &[Value, Value]),
        value("Array Slice", &[Value, Value, Value]),
        value("Count Of", &[Value]),
        value("First Of", &[Value]),
        value("Last Of", &[Value]),
        value("Value In Array", &[Value, Value]),
        value("Index Of Array Value", &[Value, Value]),
        value("Filtered Array", &[Value, Value]),
        value("Sorted Array", &[Value, Value]),
        value("Mapped Array", &[Value, Value]),
        value("Randomized Array", &[Value]),
        value("Random Value In Array", &[Value]),
        value("Current Array Element", &[]),
        value("Current Array Index", &[]),
        // Variables and literals
        value("Global Variable", &[GLOBAL_VAR]),
        value("Player Variable", &[Value, PLAYER_VAR]),
        value("Team", &[Enum(&TEAM)]),
        value("Color", &[Enum(&COLOR)]),
        value("Button", &[Enum(&BUTTON)]),
        value("Input Binding String", &[Enum(&BUTTON)]),
        value("Hero Icon String", &[Value]),
    ]
}

/// The standard registry: every element in the table, indexed by name separately for actions and
/// values since the Workshop reuses some names across the two (e.g. `Add`).
pub struct Elements {
    actions: HashMap<&'static str, usize>,
    values: HashMap<&'static str, usize>,
}

impl Default for Elements {
    fn default() -> Self {
        Self::new()
    }
}

impl Elements {
    pub fn new() -> Self {
        let mut actions = HashMap::new();
        let mut values = HashMap::new();
        for (offset, element) in ELEMENT_DESCRIPTORS.iter().enumerate() {
            let index = if element.is_value {
                &mut values
            } else {
                &mut actions
            };
            index.insert(element.name, offset);
        }
        Self { actions, values }
    }
}

impl SignatureRegistry for Elements {
    fn signatures(&self) -> &[ElementSignature] {
        &ELEMENT_DESCRIPTORS
    }

    fn find(&self, name: &str, is_value: bool) -> Option<&ElementSignature> {
        let index = if is_value { &self.values } else { &self.actions };
        index
            .get(name)
            .and_then(|offset| ELEMENT_DESCRIPTORS.get(*offset))
    }
}
