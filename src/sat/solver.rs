#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The solver-facing interface: entry point, verdict, and statistics.

use crate::sat::assignment::Solutions;
use crate::sat::cnf::Cnf;
use crate::sat::error::SolverError;

/// The outcome of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The formula is satisfiable; the model lists every assigned variable.
    /// Variables absent from the model are don't-cares.
    Sat(Solutions),
    /// No assignment satisfies the formula.
    Unsat,
}

impl Verdict {
    /// `true` for [`Verdict::Sat`].
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    /// The model, if the formula was satisfiable.
    #[must_use]
    pub const fn solutions(&self) -> Option<&Solutions> {
        match self {
            Self::Sat(solutions) => Some(solutions),
            Self::Unsat => None,
        }
    }
}

/// Counters describing one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// Branching decisions made.
    pub decisions: usize,
    /// Literals assigned by unit propagation.
    pub propagations: usize,
    /// Falsified clauses encountered.
    pub conflicts: usize,
    /// Variables fixed by pure-literal elimination.
    pub pure_literals: usize,
    /// Clauses discharged by tautology elimination.
    pub tautologies: usize,
}

/// A complete SAT solver over a CNF formula.
pub trait Solver {
    /// Takes ownership of the formula. The formula's mutable state is
    /// exclusively owned by this solver for the duration of the solve.
    fn new(cnf: Cnf) -> Self;

    /// Decides satisfiability.
    ///
    /// # Errors
    ///
    /// [`SolverError`] on an internal contract violation; the solve is
    /// aborted, never retried.
    fn solve(&mut self) -> Result<Verdict, SolverError>;

    /// The current model. Meaningful after [`Solver::solve`] returned
    /// [`Verdict::Sat`].
    fn solutions(&self) -> Solutions;

    /// Statistics for the last solve.
    fn stats(&self) -> SolutionStats;
}
