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

use clap_derive::Parser;
use serde_derive::{Deserialize, Serialize};
use wsdc_decompiler::DecompileOptions;

/// Overrides for [`DecompileOptions`]. Anything left unset keeps the library default.
#[derive(Parser, Debug, Default, Serialize, Deserialize)]
pub struct DecompileArgs {
    #[arg(
        long,
        help = "Treat missing delimiters, unknown events, statements without an assignment operator \
                and trailing input as errors instead of skipping past them"
    )]
    pub strict: Option<bool>,

    #[arg(
        long,
        help = "Render `Event Player.A` as plain `A`"
    )]
    pub elide_event_player: Option<bool>,

    #[arg(
        long,
        help = "Render well-known elements such as `Add` or `Set Global Variable` as operators \
                and assignments instead of calls"
    )]
    pub render_overrides: Option<bool>,

    #[arg(long, help = "Spaces per block level in the rendered listing")]
    pub indent_width: Option<usize>,
}

impl DecompileArgs {
    pub fn merge_config(&self, config: &mut DecompileOptions) -> Result<(), eyre::Report> {
        if let Some(args) = self.strict {
            config.strict = args;
        }
        if let Some(args) = self.elide_event_player {
            config.elide_event_player = args;
        }
        if let Some(args) = self.render_overrides {
            config.render_overrides = args;
        }
        if let Some(args) = self.indent_width {
            if args > 16 {
                return Err(eyre::eyre!("indent width {args} is larger than 16"));
            }
            config.indent_width = args;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_arguments_keep_defaults() {
        let mut options = DecompileOptions::default();
        DecompileArgs::default().merge_config(&mut options).unwrap();
        assert_eq!(options, DecompileOptions::default());
    }

    #[test]
    fn test_set_arguments_override() {
        let mut options = DecompileOptions::default();
        let args = DecompileArgs {
            strict: Some(true),
            elide_event_player: Some(false),
            render_overrides: None,
            indent_width: Some(2),
        };
        args.merge_config(&mut options).unwrap();
        assert!(options.strict);
        assert!(!options.elide_event_player);
        assert!(options.render_overrides);
        assert_eq!(options.indent_width, 2);
    }

    #[test]
    fn test_oversized_indent_is_rejected() {
        let args = DecompileArgs {
            indent_width: Some(40),
            ..Default::default()
        };
        assert!(args.merge_config(&mut DecompileOptions::default()).is_err());
    }
}
