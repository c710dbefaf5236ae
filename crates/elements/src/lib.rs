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

//! Signatures of the actions and values the Overwatch Workshop knows about, and the enums that
//! supply their literal parameters. The decompiler only ever reads from this table.

mod elements;
pub mod enums;

pub use crate::elements::{ELEMENTS, ElementSignature, Elements, ParameterKind, SignatureRegistry};
pub use crate::enums::{EnumMember, WorkshopEnum};
