//! Error types for naivelog

use std::io;

use thiserror::Error;

/// Broad category of an [`EngineError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The program was rejected before evaluation started
    Validation,
    /// The engine reached a state that well-formed input can never produce
    Invariant,
    /// A caller-configured limit stopped evaluation
    Limit,
    /// Program text or files could not be read
    Input,
}

/// Errors raised while validating, solving or loading a program
#[derive(Error, Debug)]
pub enum EngineError {
    /// A head variable is not bound by the body, or a fact is not ground
    #[error("Rule `{rule}` is not range restricted: variable '{variable}' does not occur in its body")]
    NotRangeRestricted {
        /// The offending rule, rendered
        rule: String,
        /// The first unbound head variable
        variable: String,
    },

    /// Negated body literals are parsed but never evaluated
    #[error("Rule `{rule}` uses negated literal `{atom}`, which is not supported")]
    NegationUnsupported {
        /// The offending rule, rendered
        rule: String,
        /// The first negated literal, rendered without `\+`
        atom: String,
    },

    /// A user rule or query names the predicate reserved for query answers
    #[error("Rule `{rule}` uses the reserved query predicate")]
    ReservedPredicate {
        /// The offending rule, rendered
        rule: String,
    },

    /// A variable reached the fact side of unification
    #[error("Fact `{fact}` must be ground, but term {position} is a variable")]
    NonGroundFact {
        /// The malformed fact, rendered
        fact: String,
        /// Zero-based index of the variable term
        position: usize,
    },

    /// The solver ran out of its configured iterations
    #[error("No fixpoint reached after {limit} iterations")]
    IterationLimit {
        /// The configured maximum
        limit: usize,
    },

    /// Program text does not follow the grammar
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// One-based line where parsing stopped
        line: usize,
        /// What was expected and what was found
        message: String,
    },

    /// A program or fixture file could not be read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    /// The category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotRangeRestricted { .. }
            | Self::NegationUnsupported { .. }
            | Self::ReservedPredicate { .. } => ErrorKind::Validation,
            Self::NonGroundFact { .. } => ErrorKind::Invariant,
            Self::IterationLimit { .. } => ErrorKind::Limit,
            Self::Parse { .. } | Self::Io(_) => ErrorKind::Input,
        }
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
