//! # Naivelog
//!
//! A naive bottom-up Datalog evaluator.
//!
//! ## Features
//!
//! - Unification of body atoms against ground facts
//! - Naive fixpoint evaluation with up-front range-restriction checks
//! - Partially bound queries
//! - Program text parsing and fixture checking (`parsing` feature)
//!
//! ## Example
//!
//! ```rust
//! use naivelog::{query, Atom, Query, Rule, Term};
//!
//! // parent(a, b). parent(b, c).
//! // grandparent(X, Z) :- parent(X, Y), parent(Y, Z).
//! let program = vec![
//!     Rule::fact(Atom::new("parent", vec![Term::sym("a"), Term::sym("b")])),
//!     Rule::fact(Atom::new("parent", vec![Term::sym("b"), Term::sym("c")])),
//!     Rule::new(
//!         Atom::new("grandparent", vec![Term::var("X"), Term::var("Z")]),
//!         vec![
//!             Atom::new("parent", vec![Term::var("X"), Term::var("Y")]),
//!             Atom::new("parent", vec![Term::var("Y"), Term::var("Z")]),
//!         ],
//!     ),
//! ];
//!
//! let answers = query(
//!     &program,
//!     &Query::new(Atom::new("grandparent", vec![Term::var("G"), Term::var("C")])),
//! )
//! .unwrap();
//! assert_eq!(answers[0].to_string(), "grandparent(a,c)");
//! ```

/// Fixpoint evaluation and query answering.
pub mod engine;
pub mod error;
#[cfg(feature = "parsing")]
pub mod harness;
#[cfg(feature = "parsing")]
pub mod parser;
/// Unification and substitutions.
pub mod substitution;
/// Terms, atoms, rules and queries.
pub mod term;

pub use engine::{
    eval_atom, eval_rule, immediate_consequence, query, solve, validate, walk_body,
    KnowledgeBase, Solver,
};
pub use error::{EngineError, ErrorKind, Result};
#[cfg(feature = "parsing")]
pub use parser::{parse, Source};
pub use substitution::{merge, substitute, unify, Substitution};
pub use term::{Atom, Program, Query, Rule, Term, QUERY_PREDICATE};
