//! Parser for program text
//!
//! ```text
//! parent(a, b).
//! parent(b, c).
//! grandparent(X, Z) :- parent(X, Y), parent(Y, Z).
//! -grandparent(G, C)?
//! ```
//!
//! Identifiers starting with an uppercase letter are variables, all others
//! are symbols. Negated literals (`\+ atom`) are accepted here and rejected
//! later by [`crate::validate`].

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char as nomchar, multispace0, satisfy},
    combinator::{map as nommap, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

use crate::error::{EngineError, Result};
use crate::term::{Atom, Program, Query, Rule, Term};

/// A parsed program and its optional query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    /// Facts and rules, in source order
    pub program: Program,
    /// The trailing `-atom?` line, if present
    pub query: Option<Query>,
}

enum Literal {
    Pos(Atom),
    Neg(Atom),
}

type In<'a> = &'a str;

fn ws<'a, F, O>(inner: F) -> impl FnMut(In<'a>) -> IResult<In<'a>, O>
where
    F: FnMut(In<'a>) -> IResult<In<'a>, O>,
{
    preceded(multispace0, inner)
}

fn identifier(s: In) -> IResult<In, In> {
    ws(recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    )))(s)
}

fn term(s: In) -> IResult<In, Term> {
    nommap(identifier, |name: &str| {
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            Term::var(name)
        } else {
            Term::sym(name)
        }
    })(s)
}

fn atom(s: In) -> IResult<In, Atom> {
    let terms = delimited(
        ws(nomchar('(')),
        separated_list1(ws(nomchar(',')), term),
        ws(nomchar(')')),
    );
    nommap(pair(identifier, terms), |(predicate, terms)| {
        Atom::new(predicate, terms)
    })(s)
}

fn literal(s: In) -> IResult<In, Literal> {
    let negated = nommap(preceded(ws(tag("\\+")), atom), Literal::Neg);
    let positive = nommap(atom, Literal::Pos);
    alt((negated, positive))(s)
}

fn rule(s: In) -> IResult<In, Rule> {
    let body = preceded(ws(tag(":-")), separated_list1(ws(nomchar(',')), literal));
    nommap(
        terminated(pair(atom, opt(body)), ws(nomchar('.'))),
        |(head, literals)| {
            let mut rule = Rule::fact(head);
            for literal in literals.unwrap_or_default() {
                match literal {
                    Literal::Pos(atom) => rule.body.push(atom),
                    Literal::Neg(atom) => rule.negated.push(atom),
                }
            }
            rule
        },
    )(s)
}

fn query(s: In) -> IResult<In, Query> {
    nommap(
        delimited(ws(nomchar('-')), atom, ws(nomchar('?'))),
        Query::new,
    )(s)
}

fn line_of(source: &str, rest: &str) -> usize {
    let offset = source.len() - rest.len();
    source[..offset].matches('\n').count() + 1
}

/// Parses a whole program, with at most one query at the end
///
/// # Errors
///
/// Returns [`EngineError::Parse`] pointing at the first line that is not a
/// rule, a fact or a final query.
pub fn parse(source: &str) -> Result<Source> {
    let (rest, (program, query)) = pair(many0(rule), opt(query))(source).map_err(|err| {
        EngineError::Parse {
            line: 1,
            message: err.to_string(),
        }
    })?;

    let rest = rest.trim_start();
    if !rest.is_empty() {
        let snippet: String = rest.lines().next().unwrap_or_default().chars().take(40).collect();
        return Err(EngineError::Parse {
            line: line_of(source, rest),
            message: format!("expected a rule, a fact or a final query, found `{snippet}`"),
        });
    }

    Ok(Source { program, query })
}
