#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use naivelog::{query, Atom, Program, Query, Rule, Term};

fn setup_graph() -> Program {
    let mut program: Program = Vec::new();
    for i in 0..12 {
        for j in 0..2 {
            let next = (i + j + 1) % 12;
            program.push(Rule::fact(Atom::new(
                "edge",
                vec![Term::sym(&format!("node_{i}")), Term::sym(&format!("node_{next}"))],
            )));
        }
    }

    program.push(Rule::new(
        Atom::new("path", vec![Term::var("X"), Term::var("Y")]),
        vec![Atom::new("edge", vec![Term::var("X"), Term::var("Y")])],
    ));
    program.push(Rule::new(
        Atom::new("path", vec![Term::var("X"), Term::var("Z")]),
        vec![
            Atom::new("path", vec![Term::var("X"), Term::var("Y")]),
            Atom::new("edge", vec![Term::var("Y"), Term::var("Z")]),
        ],
    ));
    program
}

fn query_specific_paths(c: &mut Criterion) {
    let program = setup_graph();
    let q = Query::new(Atom::new(
        "path",
        vec![Term::sym("node_0"), Term::var("X")],
    ));

    c.bench_function("query_specific_paths", |b| {
        b.iter(|| black_box(query(&program, black_box(&q)).unwrap()));
    });
}

fn query_existence_check(c: &mut Criterion) {
    let program = setup_graph();
    let q = Query::new(Atom::new(
        "path",
        vec![Term::sym("node_0"), Term::sym("node_7")],
    ));

    c.bench_function("query_existence_check", |b| {
        b.iter(|| black_box(!query(&program, black_box(&q)).unwrap().is_empty()));
    });
}

fn query_all_paths(c: &mut Criterion) {
    let program = setup_graph();
    let q = Query::new(Atom::new("path", vec![Term::var("X"), Term::var("Y")]));

    c.bench_function("query_all_paths", |b| {
        b.iter(|| black_box(query(&program, black_box(&q)).unwrap()));
    });
}

criterion_group!(
    benches,
    query_specific_paths,
    query_existence_check,
    query_all_paths
);
criterion_main!(benches);
