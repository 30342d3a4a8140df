#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The formula: a conjunction of clauses with incremental satisfaction
//! tracking.
//!
//! A [`Cnf`] owns the clauses, the occurrence index built once at
//! construction, and a running count of satisfied clauses, so that the
//! "is the whole formula satisfied" test is a single comparison. All counter
//! maintenance runs through [`Cnf::assign_true`] and [`Cnf::unassign`]:
//! assigning a literal updates the clauses in its own membership set *and*
//! the clauses in its complement's membership set (both lose an unassigned
//! slot, since the complement's variable is now assigned too), with no
//! recursion between the two polarities. Undo reverses the exact deltas.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::clause::{Clause, LiteralStorage};
use crate::sat::error::SolverError;
use crate::sat::literal::Literal;
use crate::sat::occurrence::OccurrenceIndex;
use core::fmt;
use core::ops::Index;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// A CNF formula over variables `1..=num_vars`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// The clauses of the formula, in input order.
    pub clauses: Vec<Clause>,
    /// The number of declared variables.
    pub num_vars: usize,
    /// The membership index, built once and immutable afterwards.
    pub occurrence: OccurrenceIndex,
    /// How many clauses are currently satisfied (including tautologies).
    satisfied: usize,
}

impl Cnf {
    /// Builds a formula over `num_vars` variables from signed DIMACS
    /// clauses. Duplicate literals within a clause are merged; literal
    /// identity is preserved, so a clause containing both polarities keeps
    /// both and is later caught by tautology elimination.
    #[must_use]
    pub fn new(num_vars: usize, clauses: Vec<Vec<i32>>) -> Self {
        let clauses = clauses
            .into_iter()
            .map(|lits| {
                let mut seen = FxHashSet::default();
                let dedup: LiteralStorage = lits
                    .into_iter()
                    .map(Literal::from_i32)
                    .filter(|lit| seen.insert(*lit))
                    .collect();
                Clause::new(dedup)
            })
            .collect_vec();

        let occurrence = OccurrenceIndex::new(num_vars, &clauses);

        Self {
            clauses,
            num_vars,
            occurrence,
            satisfied: 0,
        }
    }

    /// Number of clauses in the formula.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` if the formula has no clauses. An empty conjunction is
    /// trivially satisfied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Iterates over the clauses of the formula.
    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// `true` if every clause is currently satisfied.
    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.satisfied == self.clauses.len()
    }

    /// Total number of literal occurrences across all clauses.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    /// Makes `lit` true: the literal's variable takes the literal's
    /// polarity, which simultaneously makes the complement false.
    ///
    /// Every clause containing `lit` gains a true literal; every clause
    /// containing either polarity loses an unassigned slot.
    ///
    /// # Errors
    ///
    /// [`SolverError::AlreadyAssigned`] if the variable already has a value.
    pub fn assign_true(
        &mut self,
        lit: Literal,
        assignment: &mut Assignment,
    ) -> Result<(), SolverError> {
        if assignment[lit.variable()].is_assigned() {
            return Err(SolverError::AlreadyAssigned(lit.to_i32()));
        }
        assignment.set(lit.variable(), lit.polarity());

        for &ci in &self.occurrence[lit] {
            let clause = &mut self.clauses[ci as usize];
            clause.remaining -= 1;
            clause.true_count += 1;
            if clause.true_count == 1 && !clause.tautology {
                self.satisfied += 1;
            }
        }
        for &ci in &self.occurrence[lit.negated()] {
            self.clauses[ci as usize].remaining -= 1;
        }

        Ok(())
    }

    /// Reverses a matching [`Cnf::assign_true`], restoring the unassigned
    /// state on both polarities and undoing every counter delta. The trail
    /// guarantees exactly one `unassign` per `assign_true`.
    ///
    /// # Errors
    ///
    /// [`SolverError::NotAssigned`] if `lit` is not currently true.
    pub fn unassign(
        &mut self,
        lit: Literal,
        assignment: &mut Assignment,
    ) -> Result<(), SolverError> {
        if assignment.literal_value(lit) != Some(true) {
            return Err(SolverError::NotAssigned(lit.to_i32()));
        }
        assignment.unset(lit.variable());

        for &ci in &self.occurrence[lit] {
            let clause = &mut self.clauses[ci as usize];
            clause.remaining += 1;
            clause.true_count -= 1;
            if clause.true_count == 0 && !clause.tautology {
                self.satisfied -= 1;
            }
        }
        for &ci in &self.occurrence[lit.negated()] {
            self.clauses[ci as usize].remaining += 1;
        }

        Ok(())
    }

    /// Permanently marks the clause at `index` satisfied without assigning
    /// any variable. Used by tautology elimination only.
    pub fn mark_tautology(&mut self, index: usize) {
        let clause = &mut self.clauses[index];
        if !clause.tautology {
            if clause.true_count == 0 {
                self.satisfied += 1;
            }
            clause.tautology = true;
        }
    }

    /// The sole unassigned literal of the unit clause at `index`.
    ///
    /// # Errors
    ///
    /// [`SolverError::NoUnassignedLiteral`] if every literal of the clause
    /// is assigned; reachable only through a contract violation, since the
    /// caller checks `is_unit` first.
    pub fn unit_literal(
        &self,
        index: usize,
        assignment: &Assignment,
    ) -> Result<Literal, SolverError> {
        self.clauses[index]
            .iter()
            .find(|lit| assignment[lit.variable()].is_unassigned())
            .copied()
            .ok_or(SolverError::NoUnassignedLiteral(index))
    }

    /// Checks a model against the original formula: every clause must
    /// contain at least one literal the model makes true. Don't-care
    /// variables satisfy no literal.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        self.clauses.iter().all(|clause| {
            clause
                .iter()
                .any(|lit| solutions.value_of(lit.variable()) == Some(lit.polarity()))
        })
    }
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl From<Vec<Vec<i32>>> for Cnf {
    /// Builds a formula deriving the variable count from the largest
    /// variable mentioned. Convenient for tests and text input.
    fn from(clauses: Vec<Vec<i32>>) -> Self {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self::new(num_vars, clauses)
    }
}

impl fmt::Display for Cnf {
    /// Renders the formula in DIMACS format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{} 0", clause.iter().join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserves_identity() {
        let cnf = Cnf::from(vec![vec![1, 2, 1, -1, 2]]);
        assert_eq!(cnf[0].len(), 3);
        assert_eq!(cnf[0].remaining, 3);
        let lits: Vec<i32> = cnf[0].iter().map(|l| l.to_i32()).collect();
        assert_eq!(lits, vec![1, 2, -1]);
    }

    #[test]
    fn test_assign_updates_both_membership_sets() {
        let mut cnf = Cnf::from(vec![vec![1, 2], vec![-1, 2], vec![-1, -2]]);
        let mut assignment = Assignment::new(cnf.num_vars);

        cnf.assign_true(Literal::from_i32(1), &mut assignment)
            .unwrap();

        assert!(cnf[0].is_satisfied());
        assert_eq!(cnf[0].remaining, 1);
        assert_eq!(cnf[1].remaining, 1);
        assert!(cnf[1].is_unit());
        assert_eq!(cnf[2].remaining, 1);
        assert!(!cnf.is_satisfied());
    }

    #[test]
    fn test_unassign_restores_every_counter() {
        let mut cnf = Cnf::from(vec![vec![1, 2], vec![-1, 2], vec![-1, -2]]);
        let mut assignment = Assignment::new(cnf.num_vars);
        let before = cnf.clone();

        for value in [1, -1] {
            let lit = Literal::from_i32(value);
            cnf.assign_true(lit, &mut assignment).unwrap();
            cnf.unassign(lit, &mut assignment).unwrap();
            assert_eq!(cnf, before);
            assert_eq!(assignment.unassigned_count(), 2);
        }
    }

    #[test]
    fn test_assign_twice_is_invalid() {
        let mut cnf = Cnf::from(vec![vec![1]]);
        let mut assignment = Assignment::new(cnf.num_vars);

        cnf.assign_true(Literal::from_i32(1), &mut assignment)
            .unwrap();
        assert_eq!(
            cnf.assign_true(Literal::from_i32(-1), &mut assignment),
            Err(SolverError::AlreadyAssigned(-1))
        );
        assert_eq!(
            cnf.unassign(Literal::from_i32(-1), &mut assignment),
            Err(SolverError::NotAssigned(-1))
        );
    }

    #[test]
    fn test_unit_literal_contract() {
        let mut cnf = Cnf::from(vec![vec![1, 2]]);
        let mut assignment = Assignment::new(cnf.num_vars);

        cnf.assign_true(Literal::from_i32(-1), &mut assignment)
            .unwrap();
        assert_eq!(
            cnf.unit_literal(0, &assignment),
            Ok(Literal::from_i32(2))
        );

        cnf.assign_true(Literal::from_i32(2), &mut assignment)
            .unwrap();
        assert_eq!(
            cnf.unit_literal(0, &assignment),
            Err(SolverError::NoUnassignedLiteral(0))
        );
    }

    #[test]
    fn test_mark_tautology_counts_once() {
        let mut cnf = Cnf::from(vec![vec![1, -1], vec![2]]);
        cnf.mark_tautology(0);
        cnf.mark_tautology(0);
        assert!(cnf[0].is_satisfied());
        assert!(!cnf.is_satisfied());
    }

    #[test]
    fn test_verify() {
        let cnf = Cnf::from(vec![vec![1, 2], vec![-1, -2]]);
        assert!(cnf.verify(&Solutions::new(vec![-1, 2])));
        assert!(!cnf.verify(&Solutions::new(vec![1, 2])));
        assert!(!cnf.verify(&Solutions::new(vec![2])));
    }

    #[test]
    fn test_display_round_trips_shape() {
        let cnf = Cnf::new(3, vec![vec![1, -2], vec![3]]);
        assert_eq!(cnf.to_string(), "p cnf 3 2\n1 -2 0\n3 0\n");
    }
}
