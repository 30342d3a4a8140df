#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Error taxonomy for the solver core and the DIMACS adapter.
//!
//! [`SolverError`] variants are programming-contract violations inside the
//! core: unreachable given correct search-engine usage, and fatal (the solve
//! is aborted) since they indicate an invariant breach. Backtracking is the
//! search algorithm, never error recovery, so nothing here is retried.
//! [`DimacsError`] covers malformed or missing input, surfaced by the
//! adapter; a malformed file fails as a whole.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Invariant violations inside the solver core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// An assignment was attempted on a variable that already has a value.
    #[error("invalid operation: literal {0} is already assigned")]
    AlreadyAssigned(i32),

    /// An undo was attempted on a literal that is not currently true.
    #[error("invalid operation: literal {0} is not the assigned polarity")]
    NotAssigned(i32),

    /// A clause reported as unit turned out to have no unassigned literal.
    #[error("invalid operation: clause {0} has no unassigned literal")]
    NoUnassignedLiteral(usize),
}

/// Failures while reading or parsing DIMACS CNF input.
#[derive(Debug, Error)]
pub enum DimacsError {
    /// The input could not be read. A missing file surfaces here.
    #[error("failed to read {path}")]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A clause line appeared before any `p cnf` header.
    #[error("missing 'p cnf <vars> <clauses>' header")]
    MissingHeader,

    /// The `p` line did not match `p cnf <vars> <clauses>`.
    #[error("malformed header line: {0:?}")]
    MalformedHeader(String),

    /// A token on a clause line was not a signed integer.
    #[error("malformed literal: {0:?}")]
    MalformedLiteral(String),

    /// A literal referenced a variable outside the declared range.
    #[error("literal {lit} out of range for {num_vars} declared variables")]
    LiteralOutOfRange {
        /// The offending literal.
        lit: i32,
        /// The declared variable count.
        num_vars: usize,
    },

    /// The number of clauses found disagrees with the header.
    #[error("header declares {declared} clauses but the file contains {found}")]
    ClauseCountMismatch {
        /// The clause count declared on the `p` line.
        declared: usize,
        /// The clause count actually parsed.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SolverError::AlreadyAssigned(-3).to_string(),
            "invalid operation: literal -3 is already assigned"
        );
        assert_eq!(
            DimacsError::ClauseCountMismatch {
                declared: 4,
                found: 2
            }
            .to_string(),
            "header declares 4 clauses but the file contains 2"
        );
    }
}
