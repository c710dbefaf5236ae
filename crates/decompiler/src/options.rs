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

use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecompileOptions {
    /// Whether a missing required delimiter, an event block that names no known event, an
    /// expression statement without an assignment operator, or input left over after the last
    /// rule is an error rather than skipped.
    pub strict: bool,
    /// Whether `Event Player.A` is rendered as plain `A`.
    pub elide_event_player: bool,
    /// Whether well-known elements like `Add` or `Set Global Variable` render as operators and
    /// assignments instead of calls.
    pub render_overrides: bool,
    /// Spaces per block level in rendered rules.
    pub indent_width: usize,
}

impl Default for DecompileOptions {
    fn default() -> Self {
        Self {
            strict: false,
            elide_event_player: true,
            render_overrides: true,
            indent_width: 4,
        }
    }
}
