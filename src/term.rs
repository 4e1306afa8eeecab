use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Predicate name reserved for the synthetic head of a query rule.
pub const QUERY_PREDICATE: &str = "__query";

/// A Datalog term
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Term {
    /// A placeholder bound during unification (e.g., `X`, `Person`)
    Variable(String),
    /// A constant (e.g., `alice`, `apple`)
    Symbol(String),
}

impl Term {
    /// Shorthand for `Term::Variable(name.to_string())`
    #[must_use]
    pub fn var(name: &str) -> Self {
        Self::Variable(name.to_string())
    }

    /// Shorthand for `Term::Symbol(name.to_string())`
    #[must_use]
    pub fn sym(name: &str) -> Self {
        Self::Symbol(name.to_string())
    }

    /// The variable or symbol name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(name) | Self::Symbol(name) => name,
        }
    }

    /// Returns true for `Term::Variable`
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }
}

/// A predicate applied to terms (e.g., `parent(alice, Y)`)
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atom {
    /// The name of the predicate (e.g., `"edge"`, `"path"`)
    pub predicate: String,
    /// The arguments of the predicate, in order
    pub terms: Vec<Term>,
}

impl Atom {
    /// Builds an atom from a predicate name and its terms
    #[must_use]
    pub fn new(predicate: &str, terms: Vec<Term>) -> Self {
        Self {
            predicate: predicate.to_string(),
            terms,
        }
    }

    /// Number of terms
    #[must_use]
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// True when no term is a variable
    #[must_use]
    pub fn is_ground(&self) -> bool {
        !self.terms.iter().any(Term::is_variable)
    }

    /// Variable names occurring in this atom, in order, repeats included
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().filter_map(|term| match term {
            Term::Variable(name) => Some(name.as_str()),
            Term::Symbol(_) => None,
        })
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.predicate)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(term.name())?;
        }
        f.write_str(")")
    }
}

/// A Datalog rule (e.g., `path(X, Z) :- path(X, Y), edge(Y, Z).`)
///
/// A rule with an empty body is a fact.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// The conclusion of the rule
    pub head: Atom,
    /// The conjunction of conditions, evaluated left to right
    pub body: Vec<Atom>,
    /// Negated body literals (`\+ atom`). Accepted by the parser,
    /// rejected by validation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub negated: Vec<Atom>,
}

impl Rule {
    /// Create a new rule with no negated literals
    #[must_use]
    pub fn new(head: Atom, body: Vec<Atom>) -> Self {
        Self {
            head,
            body,
            negated: Vec::new(),
        }
    }

    /// A rule with no body
    #[must_use]
    pub fn fact(head: Atom) -> Self {
        Self::new(head, Vec::new())
    }

    /// Returns true if the rule has no body at all
    #[must_use]
    pub fn is_fact(&self) -> bool {
        self.body.is_empty() && self.negated.is_empty()
    }

    /// Returns the first head variable that no body atom binds
    #[must_use]
    pub fn unbound_head_variable(&self) -> Option<&str> {
        self.head
            .variables()
            .find(|var| !self.body.iter().any(|atom| atom.variables().any(|v| v == *var)))
    }

    fn atoms(&self) -> impl Iterator<Item = &Atom> {
        std::iter::once(&self.head)
            .chain(&self.body)
            .chain(&self.negated)
    }

    pub(crate) fn mentions(&self, predicate: &str) -> bool {
        self.atoms().any(|atom| atom.predicate == predicate)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head)?;
        let literals = self
            .body
            .iter()
            .map(ToString::to_string)
            .chain(self.negated.iter().map(|atom| format!("\\+ {atom}")))
            .collect::<Vec<_>>();
        if !literals.is_empty() {
            write!(f, " :- {}", literals.join(", "))?;
        }
        f.write_str(".")
    }
}

/// An ordered sequence of rules
pub type Program = Vec<Rule>;

/// A Datalog query (e.g., `likes(alice, Y)`)
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Query {
    /// The atom pattern to match against the solved knowledge base
    pub atom: Atom,
}

impl Query {
    /// Create a new query over `atom`
    #[must_use]
    pub fn new(atom: Atom) -> Self {
        Self { atom }
    }

    /// Distinct variables of the query atom, in first-occurrence order
    #[must_use]
    pub fn variables(&self) -> SmallVec<[&str; 4]> {
        let mut vars: SmallVec<[&str; 4]> = SmallVec::new();
        for var in self.atom.variables() {
            if !vars.contains(&var) {
                vars.push(var);
            }
        }
        vars
    }

    /// The synthetic rule `__query(V1, ..., Vn) :- atom.` answering this query
    #[must_use]
    pub fn rule(&self) -> Rule {
        let head = Atom {
            predicate: QUERY_PREDICATE.to_string(),
            terms: self.variables().into_iter().map(Term::var).collect(),
        };
        Rule::new(head, vec![self.atom.clone()])
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{}?", self.atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atom_equality_is_structural() {
        let a = Atom::new("p", vec![Term::sym("a"), Term::var("X")]);
        let b = Atom::new("p", vec![Term::sym("a"), Term::var("X")]);
        assert_eq!(a, b);

        // Same name, different tag
        let c = Atom::new("p", vec![Term::sym("a"), Term::sym("X")]);
        assert_ne!(a, c);

        // Arity differs
        let d = Atom::new("p", vec![Term::sym("a")]);
        assert_ne!(a, d);
    }

    #[test]
    fn test_display_renders_without_spaces() {
        let atom = Atom::new("likes", vec![Term::sym("alice"), Term::var("Y")]);
        assert_eq!(atom.to_string(), "likes(alice,Y)");

        let rule = Rule::new(
            Atom::new("grandparent", vec![Term::var("X"), Term::var("Z")]),
            vec![
                Atom::new("parent", vec![Term::var("X"), Term::var("Y")]),
                Atom::new("parent", vec![Term::var("Y"), Term::var("Z")]),
            ],
        );
        assert_eq!(
            rule.to_string(),
            "grandparent(X,Z) :- parent(X,Y), parent(Y,Z)."
        );
        assert_eq!(
            Rule::fact(Atom::new("first", vec![Term::sym("a")])).to_string(),
            "first(a)."
        );
    }

    #[test]
    fn test_unbound_head_variable() {
        let rule = Rule::new(
            Atom::new("result", vec![Term::var("X"), Term::var("Y")]),
            vec![Atom::new("person", vec![Term::var("X")])],
        );
        assert_eq!(rule.unbound_head_variable(), Some("Y"));

        let fact = Rule::fact(Atom::new("p", vec![Term::var("X")]));
        assert_eq!(fact.unbound_head_variable(), Some("X"));

        let ground = Rule::fact(Atom::new("p", vec![Term::sym("x")]));
        assert_eq!(ground.unbound_head_variable(), None);
    }

    #[test]
    fn test_query_rule_uses_distinct_variables() {
        let query = Query::new(Atom::new(
            "edge",
            vec![Term::var("X"), Term::sym("b"), Term::var("X"), Term::var("Y")],
        ));
        assert_eq!(query.variables().as_slice(), &["X", "Y"]);

        let rule = query.rule();
        assert_eq!(rule.head.predicate, QUERY_PREDICATE);
        assert_eq!(rule.head.terms, vec![Term::var("X"), Term::var("Y")]);
        assert_eq!(rule.body, vec![query.atom.clone()]);
        assert!(rule.unbound_head_variable().is_none());
    }

    #[test]
    fn test_ground_query_has_empty_head() {
        let query = Query::new(Atom::new("red", vec![Term::sym("apple")]));
        let rule = query.rule();
        assert!(rule.head.terms.is_empty());
        assert!(!rule.is_fact());
    }
}
