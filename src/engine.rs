use indexmap::IndexSet;
use log::{debug, info, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::substitution::{merge, substitute, unify, Substitution};
use crate::term::{Atom, Query, Rule, Term, QUERY_PREDICATE};

/// A set of ground atoms
///
/// Membership is structural: no two equal atoms are ever both present.
/// Atoms iterate in the order they were first derived. Two knowledge bases
/// compare equal when they hold the same atoms, whatever the order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnowledgeBase {
    atoms: IndexSet<Atom>,
}

impl KnowledgeBase {
    /// An empty knowledge base
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of atoms
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns true if no atom has been derived
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns whether this exact atom is present
    #[must_use]
    pub fn contains(&self, atom: &Atom) -> bool {
        self.atoms.contains(atom)
    }

    /// Returns whether a ground atom holds
    #[must_use]
    pub fn ask(&self, atom: &Atom) -> bool {
        atom.is_ground() && self.contains(atom)
    }

    /// Atoms in derivation order
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// All atoms of one predicate
    pub fn facts<'a>(&'a self, predicate: &'a str) -> impl Iterator<Item = &'a Atom> {
        self.atoms
            .iter()
            .filter(move |atom| atom.predicate == predicate)
    }

    /// Returns a new knowledge base holding these atoms plus `derived`
    fn extended(&self, derived: impl IntoIterator<Item = Atom>) -> Self {
        let mut atoms = self.atoms.clone();
        atoms.extend(derived);
        Self { atoms }
    }
}

impl IntoIterator for KnowledgeBase {
    type Item = Atom;
    type IntoIter = indexmap::set::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}

impl<'a> IntoIterator for &'a KnowledgeBase {
    type Item = &'a Atom;
    type IntoIter = indexmap::set::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

/// Extends every candidate substitution across one body atom
///
/// Each candidate grounds `body_atom` and is tried against every fact in
/// `kb`; every successful unification yields the candidate merged with the
/// new bindings. Candidates matching no fact are dropped.
///
/// # Errors
///
/// Propagates [`EngineError::NonGroundFact`] from [`unify`].
pub fn eval_atom(
    kb: &KnowledgeBase,
    body_atom: &Atom,
    substitutions: &[Substitution],
) -> Result<Vec<Substitution>> {
    let mut extended = Vec::new();
    for sub in substitutions {
        let grounded = substitute(body_atom, sub);
        for fact in kb {
            if let Some(extension) = unify(&grounded, fact)? {
                extended.push(merge(sub, &extension));
            }
        }
    }
    Ok(extended)
}

/// All substitutions satisfying a conjunctive body, joined left to right
///
/// Later atoms are grounded with bindings made by earlier ones, so body
/// order decides evaluation cost but not the result.
///
/// # Errors
///
/// Propagates [`EngineError::NonGroundFact`] from [`unify`].
pub fn walk_body(kb: &KnowledgeBase, body: &[Atom]) -> Result<Vec<Substitution>> {
    body.iter()
        .try_fold(vec![Substitution::new()], |substitutions, atom| {
            eval_atom(kb, atom, &substitutions)
        })
}

/// Atoms one rule derives from `kb`
///
/// A fact yields its head. Duplicates are possible and left to the caller.
///
/// # Errors
///
/// Propagates [`EngineError::NonGroundFact`] from [`unify`].
pub fn eval_rule(rule: &Rule, kb: &KnowledgeBase) -> Result<Vec<Atom>> {
    if rule.is_fact() {
        return Ok(vec![rule.head.clone()]);
    }

    let derived: Vec<Atom> = walk_body(kb, &rule.body)?
        .iter()
        .map(|sub| substitute(&rule.head, sub))
        .collect();
    trace!("Rule `{rule}` derived {} atoms", derived.len());
    Ok(derived)
}

/// One application of the immediate-consequence operator
///
/// Every rule is evaluated against the knowledge base as it was before
/// this step; the result is `kb` plus everything derived.
///
/// # Errors
///
/// Propagates [`EngineError::NonGroundFact`] from [`unify`].
pub fn immediate_consequence(program: &[Rule], kb: &KnowledgeBase) -> Result<KnowledgeBase> {
    let mut derived = Vec::new();
    for rule in program {
        derived.extend(eval_rule(rule, kb)?);
    }
    Ok(kb.extended(derived))
}

/// Checks every rule of `program` before evaluation
///
/// # Errors
///
/// - [`EngineError::NegationUnsupported`] if a rule has a negated literal
/// - [`EngineError::NotRangeRestricted`] if a head variable does not occur
///   in the body (for a fact: if the head is not ground)
pub fn validate(program: &[Rule]) -> Result<()> {
    for rule in program {
        if let Some(atom) = rule.negated.first() {
            return Err(EngineError::NegationUnsupported {
                rule: rule.to_string(),
                atom: atom.to_string(),
            });
        }
        if let Some(variable) = rule.unbound_head_variable() {
            return Err(EngineError::NotRangeRestricted {
                rule: rule.to_string(),
                variable: variable.to_string(),
            });
        }
    }
    Ok(())
}

/// Naive bottom-up evaluator
///
/// ```rust
/// use naivelog::{Atom, Rule, Solver, Term};
///
/// let program = vec![
///     Rule::fact(Atom::new("first", vec![Term::sym("a")])),
///     Rule::new(
///         Atom::new("second", vec![Term::var("X")]),
///         vec![Atom::new("first", vec![Term::var("X")])],
///     ),
/// ];
/// let kb = Solver::new().with_max_iterations(10).solve(&program).unwrap();
/// assert!(kb.ask(&Atom::new("second", vec![Term::sym("a")])));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Solver {
    max_iterations: Option<usize>,
}

impl Solver {
    /// A solver with no iteration limit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`EngineError::IterationLimit`] instead of running more
    /// than `limit` operator applications
    #[must_use]
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Evaluates `program` to its least fixpoint
    ///
    /// The program is validated once, up front. The loop stops as soon as
    /// one operator application leaves the size unchanged; since the
    /// operator only ever adds atoms, equal size means equal sets.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate`], [`EngineError::NonGroundFact`]
    /// from unification, or [`EngineError::IterationLimit`].
    pub fn solve(&self, program: &[Rule]) -> Result<KnowledgeBase> {
        validate(program)?;

        let mut kb = KnowledgeBase::new();
        let mut iteration = 0;
        loop {
            if self.max_iterations.is_some_and(|limit| iteration >= limit) {
                return Err(EngineError::IterationLimit { limit: iteration });
            }
            iteration += 1;

            let next = immediate_consequence(program, &kb)?;
            debug!(
                "Iteration {iteration}: {} -> {} atoms",
                kb.len(),
                next.len()
            );
            if next.len() == kb.len() {
                info!("Fixpoint reached after {iteration} iterations with {} atoms", next.len());
                return Ok(next);
            }
            kb = next;
        }
    }

    /// Answers `query` against the fixpoint of `program`
    ///
    /// Answers are instances of the query atom, in derivation order.
    ///
    /// # Errors
    ///
    /// [`EngineError::ReservedPredicate`] if `program` or the query uses
    /// the reserved query predicate, plus anything [`Solver::solve`] returns.
    pub fn query(&self, program: &[Rule], query: &Query) -> Result<Vec<Atom>> {
        let query_rule = query.rule();
        if let Some(rule) = program.iter().find(|rule| rule.mentions(QUERY_PREDICATE)) {
            return Err(EngineError::ReservedPredicate {
                rule: rule.to_string(),
            });
        }
        if query.atom.predicate == QUERY_PREDICATE {
            return Err(EngineError::ReservedPredicate {
                rule: query_rule.to_string(),
            });
        }

        let mut full_program = program.to_vec();
        full_program.push(query_rule.clone());
        let kb = self.solve(&full_program)?;

        let mut answers = Vec::new();
        for result in kb.facts(QUERY_PREDICATE) {
            if let Some(atom) = answer(query, &query_rule.head, result)? {
                answers.push(atom);
            }
        }
        debug!("Query {query} has {} answers", answers.len());
        Ok(answers)
    }
}

/// Rebuilds the query atom from one synthetic result atom
fn answer(query: &Query, head: &Atom, result: &Atom) -> Result<Option<Atom>> {
    let Some(sub) = unify(head, result)? else {
        return Ok(None);
    };
    let candidate = substitute(&query.atom, &sub);

    // Positions that were constants in the query must still carry them
    let constants_hold = query
        .atom
        .terms
        .iter()
        .zip(&candidate.terms)
        .all(|(expected, found)| match expected {
            Term::Symbol(_) => expected == found,
            Term::Variable(_) => !found.is_variable(),
        });
    Ok(constants_hold.then_some(candidate))
}

/// Evaluates `program` to its least fixpoint with the default [`Solver`]
///
/// # Errors
///
/// See [`Solver::solve`].
pub fn solve(program: &[Rule]) -> Result<KnowledgeBase> {
    Solver::new().solve(program)
}

/// Answers `query` against `program` with the default [`Solver`]
///
/// # Errors
///
/// See [`Solver::query`].
pub fn query(program: &[Rule], query: &Query) -> Result<Vec<Atom>> {
    Solver::new().query(program, query)
}
