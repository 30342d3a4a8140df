#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A disjunction of literals with incrementally maintained counters.
//!
//! A [`Clause`] tracks two counters so the solver never rescans its literals
//! to decide its status: `remaining` is the number of literals whose variable
//! is still unassigned, and `true_count` is the number of literals currently
//! evaluating to true. A clause is satisfied iff `true_count > 0` or it has
//! been marked as a tautology. Both counters are owned by
//! [`Cnf::assign_true`](crate::sat::cnf::Cnf::assign_true) and
//! [`Cnf::unassign`](crate::sat::cnf::Cnf::unassign), which update them
//! through the occurrence index; a clause never mutates itself.

use crate::sat::literal::Literal;
use core::ops::Index;
use smallvec::SmallVec;

/// The inline literal storage for a clause. Most clauses in practice are
/// short, so small clauses avoid a heap allocation entirely.
pub type LiteralStorage = SmallVec<[Literal; 8]>;

/// A disjunction of literals.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clause {
    /// The literals of the clause, deduplicated, in input order.
    pub literals: LiteralStorage,
    /// Number of literals whose variable is currently unassigned.
    pub remaining: u32,
    /// Number of literals currently evaluating to true.
    pub true_count: u32,
    /// Set once if the clause contains a literal and its complement.
    /// A tautological clause is permanently satisfied and excluded from
    /// unit and pure-literal consideration.
    pub tautology: bool,
}

impl Clause {
    /// Creates a clause from already-deduplicated literals.
    ///
    /// All variables start unassigned, so `remaining` begins at the literal
    /// count and `true_count` at zero.
    #[must_use]
    pub fn new(literals: LiteralStorage) -> Self {
        let remaining = literals.len() as u32;
        Self {
            literals,
            remaining,
            true_count: 0,
            tautology: false,
        }
    }

    /// Number of literals in the clause.
    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// `true` if the clause has no literals. An empty clause is trivially
    /// falsified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// `true` if the clause currently evaluates to true.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        self.tautology || self.true_count > 0
    }

    /// `true` if the clause has exactly one unassigned literal left and is
    /// not yet satisfied. The sole unassigned literal of a unit clause must
    /// be made true by any satisfying extension of the current assignment.
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        self.remaining == 1 && !self.is_satisfied()
    }

    /// `true` if every literal is assigned false: a conflict.
    #[must_use]
    pub const fn is_falsified(&self) -> bool {
        self.remaining == 0 && !self.is_satisfied()
    }

    /// Iterates over the literals of the clause.
    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }
}

impl Index<usize> for Clause {
    type Output = Literal;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
