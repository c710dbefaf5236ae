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

//! Variable and subroutine tables parse the same however the tokens are laid out, and render
//! back to text that parses to the same tables.

use proptest::prelude::*;
use std::collections::BTreeSet;
use wsdc_decompiler::{DecompileOptions, Renderer, WorkshopVariable, parse_workshop};
use wsdc_elements::ELEMENTS;

/// Zero or more blanks, newlines or line comments.
fn arb_gap() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[ \t\n]{0,3}",
        1 => Just(" // note\n".to_string()),
    ]
}

/// Like [`arb_gap`], but never empty, for places where two words would otherwise run together.
fn arb_separator() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[ \t\n]{1,3}",
        1 => Just("\n// note\n".to_string()),
    ]
}

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Z][A-Za-z0-9_]{0,6}", 0..6)
        .prop_map(|names: BTreeSet<String>| names.into_iter().collect())
}

/// `index : name` entries, with a gap around each token and a separator between entries.
fn arb_entries(names: Vec<String>) -> impl Strategy<Value = (Vec<(i32, String)>, String)> {
    let count = names.len();
    (
        prop::collection::vec(0i32..128, count),
        prop::collection::vec((arb_gap(), arb_gap(), arb_separator()), count),
    )
        .prop_map(move |(indices, gaps)| {
            let entries: Vec<(i32, String)> = indices.into_iter().zip(names.clone()).collect();
            let mut text = String::new();
            for ((index, name), (before, after, separator)) in entries.iter().zip(gaps) {
                text.push_str(&format!("{index}{before}:{after}{name}{separator}"));
            }
            (entries, text)
        })
}

fn arb_table() -> impl Strategy<Value = (Vec<(i32, String)>, Vec<(i32, String)>, String)> {
    (arb_names(), arb_names())
        .prop_flat_map(|(globals, players)| {
            (
                arb_entries(globals),
                arb_entries(players),
                prop::collection::vec(arb_gap(), 4),
            )
        })
        .prop_map(|((globals, global_text), (players, player_text), gaps)| {
            let text = format!(
                "variables{}{{{}global:{}{global_text}player:{}{player_text}}}",
                gaps[0], gaps[1], gaps[2], gaps[3]
            );
            (globals, players, text)
        })
}

fn expected(globals: &[(i32, String)], players: &[(i32, String)]) -> Vec<WorkshopVariable> {
    globals
        .iter()
        .map(|(index, name)| WorkshopVariable::new(true, *index, name))
        .chain(
            players
                .iter()
                .map(|(index, name)| WorkshopVariable::new(false, *index, name)),
        )
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn variable_table_ignores_layout((globals, players, text) in arb_table()) {
        let options = DecompileOptions { strict: true, ..Default::default() };
        let program = parse_workshop(&text, &*ELEMENTS, &options)
            .map_err(|e| TestCaseError::fail(format!("{e} in {text:?}")))?;
        prop_assert_eq!(&program.variables, &expected(&globals, &players));
        prop_assert!(program.rules.is_empty());
    }

    #[test]
    fn variable_table_renders_back((globals, players, text) in arb_table()) {
        let options = DecompileOptions::default();
        let program = parse_workshop(&text, &*ELEMENTS, &options).unwrap();
        let rendered = Renderer::new(&options).render_program(&program).unwrap();
        let reparsed = parse_workshop(&rendered, &*ELEMENTS, &options).unwrap();
        prop_assert_eq!(reparsed.variables, expected(&globals, &players));
    }
}
