#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use naivelog::{immediate_consequence, solve, Atom, Program, Rule, Term};

fn edge(from: &str, to: &str) -> Rule {
    Rule::fact(Atom::new("edge", vec![Term::sym(from), Term::sym(to)]))
}

/// path(X, Y) :- edge(X, Y).
/// path(X, Z) :- path(X, Y), edge(Y, Z).
fn path_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            Atom::new("path", vec![Term::var("X"), Term::var("Y")]),
            vec![Atom::new("edge", vec![Term::var("X"), Term::var("Y")])],
        ),
        Rule::new(
            Atom::new("path", vec![Term::var("X"), Term::var("Z")]),
            vec![
                Atom::new("path", vec![Term::var("X"), Term::var("Y")]),
                Atom::new("edge", vec![Term::var("Y"), Term::var("Z")]),
            ],
        ),
    ]
}

/// Benchmark for a single non-recursive rule
fn bench_simple_rule_evaluation(c: &mut Criterion) {
    let mut program: Program = (0..100)
        .map(|i| edge(&format!("n{i}"), &format!("n{}", i + 1)))
        .collect();
    program.push(path_rules().remove(0));

    c.bench_function("simple_rule_evaluation", |b| {
        b.iter(|| black_box(solve(black_box(&program)).unwrap()));
    });
}

/// Benchmark for transitive closure over a linear chain
fn bench_transitive_closure(c: &mut Criterion) {
    let mut program: Program = (0..20)
        .map(|i| edge(&format!("node_{i}"), &format!("node_{}", i + 1)))
        .collect();
    program.extend(path_rules());

    c.bench_function("transitive_closure", |b| {
        b.iter(|| black_box(solve(black_box(&program)).unwrap()));
    });
}

/// Benchmark for one operator application on a saturated knowledge base
fn bench_saturated_step(c: &mut Criterion) {
    let mut program: Program = (0..15)
        .flat_map(|i| {
            (0..2).map(move |j| edge(&format!("n{i}"), &format!("n{}", (i + j + 1) % 15)))
        })
        .collect();
    program.extend(path_rules());
    let kb = solve(&program).unwrap();

    c.bench_function("saturated_step", |b| {
        b.iter(|| black_box(immediate_consequence(&program, black_box(&kb)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_simple_rule_evaluation,
    bench_transitive_closure,
    bench_saturated_step
);
criterion_main!(benches);
