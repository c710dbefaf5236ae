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

//! Workshop enumerations whose members appear as literal parameters, e.g. the `Ignore Condition`
//! in `Wait(0.25, Ignore Condition)`.

use std::fmt::Display;

/// A named set of literal members, as the Workshop displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkshopEnum {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

/// One member of a [`WorkshopEnum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumMember {
    pub enum_name: &'static str,
    pub name: &'static str,
}

impl Display for EnumMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl WorkshopEnum {
    pub fn members(&self) -> impl Iterator<Item = EnumMember> + '_ {
        self.members.iter().map(|name| EnumMember {
            enum_name: self.name,
            name,
        })
    }

    /// Members ordered so that no member is tried after a shorter member that is a prefix of it.
    pub fn members_longest_first(&self) -> Vec<EnumMember> {
        let mut members: Vec<_> = self.members().collect();
        members.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
        members
    }

    pub fn member(&self, name: &str) -> Option<EnumMember> {
        self.members().find(|m| m.name == name)
    }
}

pub const TEAM: WorkshopEnum = WorkshopEnum {
    name: "Team",
    members: &["All Teams", "Team 1", "Team 2"],
};

pub const OPERATION: WorkshopEnum = WorkshopEnum {
    name: "Operation",
    members: &[
        "Add",
        "Append To Array",
        "Divide",
        "Max",
        "Min",
        "Modulo",
        "Multiply",
        "Raise To Power",
        "Remove From Array By Index",
        "Remove From Array By Value",
        "Subtract",
    ],
};

pub const COMPARE_OPERATOR: WorkshopEnum = WorkshopEnum {
    name: "Operator",
    members: &["==", "!=", "<", "<=", ">", ">="],
};

pub const WAIT_BEHAVIOR: WorkshopEnum = WorkshopEnum {
    name: "Wait Behavior",
    members: &["Ignore Condition", "Abort When False", "Restart When True"],
};

pub const BUTTON: WorkshopEnum = WorkshopEnum {
    name: "Button",
    members: &[
        "Primary Fire",
        "Secondary Fire",
        "Ability 1",
        "Ability 2",
        "Ultimate",
        "Interact",
        "Jump",
        "Crouch",
        "Melee",
        "Reload",
    ],
};

pub const HERO: WorkshopEnum = WorkshopEnum {
    name: "Hero",
    members: &[
        "Ana",
        "Ashe",
        "Baptiste",
        "Bastion",
        "Brigitte",
        "Doomfist",
        "D.va",
        "Echo",
        "Genji",
        "Hanzo",
        "Junkrat",
        "Lúcio",
        "Mccree",
        "Mei",
        "Mercy",
        "Moira",
        "Orisa",
        "Pharah",
        "Reaper",
        "Reinhardt",
        "Roadhog",
        "Sigma",
        "Soldier: 76",
        "Sombra",
        "Symmetra",
        "Torbjörn",
        "Tracer",
        "Widowmaker",
        "Winston",
        "Wrecking Ball",
        "Zarya",
        "Zenyatta",
    ],
};

pub const COLOR: WorkshopEnum = WorkshopEnum {
    name: "Color",
    members: &[
        "White",
        "Yellow",
        "Green",
        "Purple",
        "Red",
        "Blue",
        "Team 1",
        "Team 2",
        "Aqua",
        "Orange",
        "Sky Blue",
        "Turquoise",
        "Lime Green",
        "Gray",
        "Violet",
        "Rose",
    ],
};

pub const ROUNDING_TYPE: WorkshopEnum = WorkshopEnum {
    name: "Rounding Type",
    members: &["Up", "Down", "To Nearest"],
};

pub const RELATIVE: WorkshopEnum = WorkshopEnum {
    name: "Relative",
    members: &["To World", "To Player"],
};

pub const MOTION: WorkshopEnum = WorkshopEnum {
    name: "Motion",
    members: &["Cancel Contrary Motion", "Incorporate Contrary Motion"],
};

pub const TRANSFORMATION: WorkshopEnum = WorkshopEnum {
    name: "Transformation",
    members: &["Rotation", "Rotation And Translation"],
};

pub const STATUS: WorkshopEnum = WorkshopEnum {
    name: "Status",
    members: &[
        "Hacked",
        "Burning",
        "Knocked Down",
        "Asleep",
        "Frozen",
        "Unkillable",
        "Invincible",
        "Phased Out",
        "Rooted",
        "Stunned",
    ],
};

pub const HUD_LOCATION: WorkshopEnum = WorkshopEnum {
    name: "HUD Location",
    members: &["Left", "Top", "Right"],
};

pub const STRING_REEVALUATION: WorkshopEnum = WorkshopEnum {
    name: "String Reevaluation",
    members: &[
        "Visible To And String",
        "Visible To Sort Order And String",
        "Visible To Sort Order String And Color",
        "String",
        "None",
    ],
};

pub const SPECTATOR_VISIBILITY: WorkshopEnum = WorkshopEnum {
    name: "Spectator Visibility",
    members: &["Default Visibility", "Visible Always", "Visible Never"],
};

pub const CHASE_TIME_REEVALUATION: WorkshopEnum = WorkshopEnum {
    name: "Time Chase Reevaluation",
    members: &["Destination And Duration", "None"],
};

pub const CHASE_RATE_REEVALUATION: WorkshopEnum = WorkshopEnum {
    name: "Rate Chase Reevaluation",
    members: &["Destination And Rate", "None"],
};

pub const EFFECT: WorkshopEnum = WorkshopEnum {
    name: "Effect",
    members: &[
        "Good Aura",
        "Bad Aura",
        "Cloud",
        "Ring",
        "Sphere",
        "Light Shaft",
        "Orb",
        "Sparkles",
        "Energy Sound",
    ],
};

pub const EFFECT_REEVALUATION: WorkshopEnum = WorkshopEnum {
    name: "Effect Reevaluation",
    members: &[
        "Visible To, Position, And Radius",
        "Position And Radius",
        "Visible To",
        "None",
    ],
};

pub const PLAY_EFFECT: WorkshopEnum = WorkshopEnum {
    name: "Play Effect",
    members: &[
        "Good Explosion",
        "Bad Explosion",
        "Ring Explosion",
        "Good Pickup Effect",
        "Bad Pickup Effect",
        "Debuff Impact Sound",
        "Buff Impact Sound",
    ],
};

pub const COMMUNICATE: WorkshopEnum = WorkshopEnum {
    name: "Communicate",
    members: &[
        "Acknowledge",
        "Hello",
        "Need Healing",
        "Group Up",
        "Thanks",
        "Ultimate Status",
        "Voice Line Up",
        "Voice Line Down",
        "Voice Line Left",
        "Voice Line Right",
        "Emote Up",
        "Emote Down",
        "Emote Left",
        "Emote Right",
    ],
};

pub const LOS_CHECK: WorkshopEnum = WorkshopEnum {
    name: "LOS Check",
    members: &[
        "Off",
        "Surfaces",
        "Surfaces And Enemy Barriers",
        "Surfaces And All Barriers",
    ],
};

pub const BARRIERS_LOS: WorkshopEnum = WorkshopEnum {
    name: "Barrier LOS",
    members: &[
        "Barriers Do Not Block LOS",
        "Enemy Barriers Block LOS",
        "All Barriers Block LOS",
    ],
};

pub const INVISIBLE_TO: WorkshopEnum = WorkshopEnum {
    name: "Invisible To",
    members: &["All", "Enemies", "Allies", "None"],
};

/// The `If Already Executing` argument of `Start Rule`.
pub const RULE_RESTART: WorkshopEnum = WorkshopEnum {
    name: "If Already Executing",
    members: &["Restart Rule", "Do Nothing"],
};
