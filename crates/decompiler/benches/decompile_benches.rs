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

//! Parsing and rendering throughput over a representative Workshop document.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wsdc_decompiler::{DecompileOptions, Renderer, decompile, parse_expression, parse_workshop};
use wsdc_elements::ELEMENTS;

const RULE: &str = r#"
rule("Award points")
{
    event
    {
        Player Earned Elimination;
        All;
        All;
    }

    conditions
    {
        Is Alive(Event Player) == True;
        Compare(Global.Score, <, 100) == True;
    }

    actions
    {
        "Count the kill"
        Modify Global Variable(Score, Add, 1);
        Set Player Variable(Event Player, B, Add(Player Variable(Event Player, B), 2));
        Event Player.C[Global.Score % 4] = Event Player.B * 2 + 1;
        Heal(Event Player, Null, Round To Integer(Max Health(Event Player) / 4, Up));
        Wait(0.25, Ignore Condition);
        Start Rule(Celebrate, Restart Rule);
    }
}
"#;

fn document(rules: usize) -> String {
    let mut text = String::from(
        "variables { global: 0: Score 1: Round player: 1: B 2: C } subroutines { 0: Celebrate }\n",
    );
    for _ in 0..rules {
        text.push_str(RULE);
    }
    text
}

fn bench_expressions(c: &mut Criterion) {
    let cases = [
        ("Arithmetic", "1 + 2 * 3 - 4 / 5 ^ 6 % 7"),
        ("Ternary", "Global.A ? Global.B : Global.C ? 1 : 2"),
        ("Chain", "Event Player.A.B[1][Global.C + 1]"),
        (
            "Nested Calls",
            "Distance Between(Position Of(Event Player), Position Of(Closest Player To(Event Player, All Teams)))",
        ),
    ];
    let options = DecompileOptions::default();
    let mut group = c.benchmark_group("Expressions");
    for (name, text) in cases {
        group.bench_with_input(BenchmarkId::new("parse", name), text, |b, text| {
            b.iter(|| parse_expression(black_box(text), &*ELEMENTS, &options))
        });
    }
    group.finish();
}

fn bench_documents(c: &mut Criterion) {
    let options = DecompileOptions::default();
    let renderer = Renderer::new(&options);
    let mut group = c.benchmark_group("Documents");
    for rules in [1, 10, 50] {
        let text = document(rules);
        group.bench_with_input(BenchmarkId::new("parse", rules), &text, |b, text| {
            b.iter(|| parse_workshop(black_box(text), &*ELEMENTS, &options))
        });
        let program = parse_workshop(&text, &*ELEMENTS, &options).unwrap();
        group.bench_with_input(BenchmarkId::new("render", rules), &program, |b, program| {
            b.iter(|| renderer.render_program(black_box(program)))
        });
        group.bench_with_input(BenchmarkId::new("decompile", rules), &text, |b, text| {
            b.iter(|| decompile(black_box(text), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_expressions, bench_documents);
criterion_main!(benches);
