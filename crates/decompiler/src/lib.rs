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

//! Decompiles Overwatch Workshop text into a [`Program`] and renders it as readable pseudo-code.

pub mod ast;
mod cursor;
mod errors;
mod lexical;
mod operators;
mod options;
mod overrides;
mod parsers;
mod program;
mod unparse;

pub use crate::cursor::Cursor;
pub use crate::errors::{DecompileError, ParseError, RenderError};
pub use crate::operators::{Operator, OperatorKind};
pub use crate::options::DecompileOptions;
pub use crate::overrides::{OperatorForm, RenderHook, RenderOverride, RenderOverrides};
pub use crate::parsers::{Parser, parse_expression, parse_workshop};
pub use crate::program::{Program, Subroutine, WorkshopVariable};
pub use crate::unparse::Renderer;

use tracing::debug;
use wsdc_elements::ELEMENTS;

/// Parse a Workshop document against the standard element table and render the whole listing.
pub fn decompile(text: &str, options: &DecompileOptions) -> Result<String, DecompileError> {
    let program = parse_workshop(text, &*ELEMENTS, options)?;
    debug!(
        "Parsed {} variables, {} subroutines and {} rules",
        program.variables.len(),
        program.subroutines.len(),
        program.rules.len()
    );
    Ok(Renderer::new(options).render_program(&program)?)
}
