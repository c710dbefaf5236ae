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

use crate::ast::Rule;

/// A global or player variable slot. At most one per `(is_global, name)`; indices need not be
/// contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkshopVariable {
    pub is_global: bool,
    pub index: i32,
    pub name: String,
}

impl WorkshopVariable {
    pub fn new(is_global: bool, index: i32, name: &str) -> Self {
        Self {
            is_global,
            index,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subroutine {
    pub index: i32,
    pub name: String,
}

/// Everything parsed from one Workshop document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub variables: Vec<WorkshopVariable>,
    pub subroutines: Vec<Subroutine>,
    pub rules: Vec<Rule>,
}

impl Program {
    pub fn variable(&self, is_global: bool, name: &str) -> Option<&WorkshopVariable> {
        self.variables
            .iter()
            .find(|v| v.is_global == is_global && v.name == name)
    }

    pub fn global_variables(&self) -> impl Iterator<Item = &WorkshopVariable> {
        self.variables.iter().filter(|v| v.is_global)
    }

    pub fn player_variables(&self) -> impl Iterator<Item = &WorkshopVariable> {
        self.variables.iter().filter(|v| !v.is_global)
    }

    pub fn subroutine(&self, name: &str) -> Option<&Subroutine> {
        self.subroutines.iter().find(|s| s.name == name)
    }

    pub fn subroutine_by_index(&self, index: i32) -> Option<&Subroutine> {
        self.subroutines.iter().find(|s| s.index == index)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name == name)
    }
}
