use indexmap::IndexMap;

use crate::error::{EngineError, Result};
use crate::term::{Atom, Term};

/// Variable bindings: variable name to the symbol it is bound to
///
/// Bindings only ever hold ground values, so a symbol name is stored
/// rather than a whole [`Term`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: IndexMap<String, String>,
}

impl Substitution {
    /// A fresh, empty substitution
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The symbol bound to `variable`, if any
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.bindings.get(variable).map(String::as_str)
    }

    /// Binds `variable` to `symbol`, replacing any previous binding
    pub fn bind(&mut self, variable: &str, symbol: &str) {
        self.bindings
            .insert(variable.to_string(), symbol.to_string());
    }

    /// Number of bound variables
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in the order they were made
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut sub = Self::new();
        for (var, sym) in iter {
            sub.bind(var, sym);
        }
        sub
    }
}

/// Unifies a body atom against a ground fact
///
/// Returns `Ok(None)` when the two do not match: different predicates,
/// different arities, clashing symbols, or a repeated variable meeting two
/// different symbols (`p(X, X)` against `p(a, b)`).
///
/// # Errors
///
/// Returns [`EngineError::NonGroundFact`] if any term of `fact` is a
/// variable. Facts reaching unification must always be ground.
pub fn unify(body_atom: &Atom, fact: &Atom) -> Result<Option<Substitution>> {
    if body_atom.predicate != fact.predicate || body_atom.arity() != fact.arity() {
        return Ok(None);
    }

    let mut sub = Substitution::new();
    for (position, (body_term, fact_term)) in body_atom.terms.iter().zip(&fact.terms).enumerate() {
        match (body_term, fact_term) {
            (_, Term::Variable(_)) => {
                return Err(EngineError::NonGroundFact {
                    fact: fact.to_string(),
                    position,
                });
            }
            (Term::Symbol(expected), Term::Symbol(value)) => {
                if expected != value {
                    return Ok(None);
                }
            }
            (Term::Variable(var), Term::Symbol(value)) => match sub.get(var) {
                Some(bound) if bound != value.as_str() => return Ok(None),
                Some(_) => {}
                None => sub.bind(var, value),
            },
        }
    }

    Ok(Some(sub))
}

/// Union of both substitutions; on a shared variable `right` wins
///
/// No conflict detection happens here: conflicts are caught by [`unify`]
/// when `right` is built from an atom already grounded with `left`.
#[must_use]
pub fn merge(left: &Substitution, right: &Substitution) -> Substitution {
    let mut merged = left.clone();
    for (var, sym) in right.iter() {
        merged.bind(var, sym);
    }
    merged
}

/// Replaces every variable bound in `sub` by its symbol
///
/// Symbols and unbound variables pass through unchanged.
#[must_use]
pub fn substitute(atom: &Atom, sub: &Substitution) -> Atom {
    let terms = atom
        .terms
        .iter()
        .map(|term| match term {
            Term::Variable(var) => sub
                .get(var)
                .map_or_else(|| term.clone(), Term::sym),
            Term::Symbol(_) => term.clone(),
        })
        .collect();

    Atom {
        predicate: atom.predicate.clone(),
        terms,
    }
}
