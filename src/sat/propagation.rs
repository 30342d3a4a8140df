#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The propagation engine: the three simplification rules.
//!
//! - **Unit propagation** ([`Propagator`]): run to a fixed point over a FIFO
//!   worklist of clause indices in discovery order, so the result is
//!   deterministic for a fixed input order. A falsified clause is reported
//!   as a conflict.
//! - **Pure-literal elimination** ([`eliminate_pure_literals`]): a variable
//!   whose one polarity appears in no *unsatisfied* clause while the other
//!   still appears gets the surviving polarity assigned true. A polarity
//!   with an entirely empty membership set forces the complement, which also
//!   assigns variables that appear nowhere.
//! - **Tautology elimination** ([`eliminate_tautologies`]): a clause
//!   containing a literal and its complement is marked satisfied outright,
//!   found with one stamped pass per clause over a per-literal marker array
//!   rather than a pairwise comparison.
//!
//! Pure-literal and tautology elimination run once before the first
//! decision; only unit propagation runs during search. Every rule records
//! the literals it assigned so the search engine can undo them.

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::error::SolverError;
use crate::sat::literal::Literal;
use std::collections::VecDeque;

/// The unit-propagation worklist, reused across decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Propagator {
    queue: VecDeque<usize>,
}

impl Propagator {
    /// Creates an empty worklist sized for the formula.
    #[must_use]
    pub fn new(cnf: &Cnf) -> Self {
        Self {
            queue: VecDeque::with_capacity(cnf.len()),
        }
    }

    /// Enqueues every clause of the formula, in clause order. Used once
    /// before the first decision.
    pub fn seed_all(&mut self, cnf: &Cnf) {
        self.queue.extend(0..cnf.len());
    }

    /// Enqueues the clauses that may have become unit or falsified because
    /// `assigned` was just made true: exactly the membership set of its
    /// complement.
    pub fn seed_from(&mut self, cnf: &Cnf, assigned: Literal) {
        self.queue
            .extend(cnf.occurrence[assigned.negated()].iter().map(|&ci| ci as usize));
    }

    /// Runs unit propagation to a fixed point.
    ///
    /// Every literal assigned is appended to `implied` for undo
    /// bookkeeping. Returns the index of a falsified clause if propagation
    /// ran into a conflict, draining the worklist either way.
    ///
    /// # Errors
    ///
    /// Propagates [`SolverError`] from the assignment contract; unreachable
    /// when the counters are consistent.
    pub fn propagate(
        &mut self,
        cnf: &mut Cnf,
        assignment: &mut Assignment,
        implied: &mut Vec<Literal>,
    ) -> Result<Option<usize>, SolverError> {
        while let Some(ci) = self.queue.pop_front() {
            let clause = &cnf[ci];
            if clause.is_satisfied() {
                continue;
            }
            if clause.is_falsified() {
                self.queue.clear();
                return Ok(Some(ci));
            }
            if clause.is_unit() {
                let lit = cnf.unit_literal(ci, assignment)?;
                cnf.assign_true(lit, assignment)?;
                implied.push(lit);
                self.seed_from(cnf, lit);
            }
        }
        Ok(None)
    }
}

/// Marks every tautological clause satisfied. Returns how many clauses were
/// marked.
///
/// A single stamp array keyed by literal index replaces the pairwise scan:
/// while walking a clause, each literal stamps its slot with the clause
/// index; meeting a literal whose complement already carries the current
/// stamp proves the tautology.
pub fn eliminate_tautologies(cnf: &mut Cnf) -> usize {
    let mut stamp = vec![usize::MAX; 2 * (cnf.num_vars + 1)];
    let mut marked = 0;

    for ci in 0..cnf.len() {
        for i in 0..cnf[ci].len() {
            let lit = cnf[ci][i];
            if stamp[lit.negated().index()] == ci {
                cnf.mark_tautology(ci);
                marked += 1;
                break;
            }
            stamp[lit.index()] = ci;
        }
    }

    marked
}

/// Assigns every pure literal true. Returns how many variables were
/// assigned, appending each assigned literal to `implied`.
///
/// Variables are scanned in declaration order, once; assignments made for
/// earlier variables influence which clauses still count as unsatisfied for
/// later ones.
///
/// # Errors
///
/// Propagates [`SolverError`] from the assignment contract.
pub fn eliminate_pure_literals(
    cnf: &mut Cnf,
    assignment: &mut Assignment,
    implied: &mut Vec<Literal>,
) -> Result<usize, SolverError> {
    let mut assigned = 0;

    for var in 1..=cnf.num_vars as u32 {
        if assignment[var].is_assigned() {
            continue;
        }
        let pos = Literal::new(var, true);
        let neg = pos.negated();

        let choice = if cnf.occurrence.is_absent(neg) {
            // The negation never appears at all, so the positive polarity
            // can never be contradicted. Covers variables absent from the
            // formula entirely.
            Some(pos)
        } else if cnf.occurrence.is_absent(pos) {
            Some(neg)
        } else {
            let pos_active = appears_unsatisfied(cnf, pos);
            let neg_active = appears_unsatisfied(cnf, neg);
            match (pos_active, neg_active) {
                (true, false) => Some(pos),
                (false, true) => Some(neg),
                _ => None,
            }
        };

        if let Some(lit) = choice {
            cnf.assign_true(lit, assignment)?;
            implied.push(lit);
            assigned += 1;
        }
    }

    Ok(assigned)
}

fn appears_unsatisfied(cnf: &Cnf, lit: Literal) -> bool {
    cnf.occurrence[lit]
        .iter()
        .any(|&ci| !cnf[ci as usize].is_satisfied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_propagation_reaches_fixed_point() {
        // 1 forces 2, which forces 3.
        let mut cnf = Cnf::from(vec![vec![1], vec![-1, 2], vec![-2, 3]]);
        let mut assignment = Assignment::new(cnf.num_vars);
        let mut propagator = Propagator::new(&cnf);
        let mut implied = Vec::new();

        propagator.seed_all(&cnf);
        let conflict = propagator
            .propagate(&mut cnf, &mut assignment, &mut implied)
            .unwrap();

        assert_eq!(conflict, None);
        assert_eq!(
            implied,
            vec![
                Literal::from_i32(1),
                Literal::from_i32(2),
                Literal::from_i32(3)
            ]
        );
        assert!(cnf.is_satisfied());
    }

    #[test]
    fn test_conflicting_units_report_conflict() {
        let mut cnf = Cnf::from(vec![vec![1], vec![-1]]);
        let mut assignment = Assignment::new(cnf.num_vars);
        let mut propagator = Propagator::new(&cnf);
        let mut implied = Vec::new();

        propagator.seed_all(&cnf);
        let conflict = propagator
            .propagate(&mut cnf, &mut assignment, &mut implied)
            .unwrap();

        assert_eq!(conflict, Some(1));
        assert_eq!(implied, vec![Literal::from_i32(1)]);
    }

    #[test]
    fn test_empty_clause_is_an_immediate_conflict() {
        let mut cnf = Cnf::new(1, vec![vec![]]);
        let mut assignment = Assignment::new(cnf.num_vars);
        let mut propagator = Propagator::new(&cnf);

        propagator.seed_all(&cnf);
        let conflict = propagator
            .propagate(&mut cnf, &mut assignment, &mut Vec::new())
            .unwrap();
        assert_eq!(conflict, Some(0));
    }

    #[test]
    fn test_tautology_elimination_marks_without_assigning() {
        let mut cnf = Cnf::from(vec![vec![1, 2, -1], vec![1, 2]]);
        assert_eq!(eliminate_tautologies(&mut cnf), 1);
        assert!(cnf[0].is_satisfied());
        assert!(!cnf[1].is_satisfied());
        // Idempotent: a marked clause is not counted again.
        assert_eq!(eliminate_tautologies(&mut cnf), 1);
        assert!(cnf[0].is_satisfied());
    }

    #[test]
    fn test_pure_literals_cascade_over_satisfied_clauses() {
        // 1 is pure; once its clause is satisfied, 2 and 3 never appear
        // negated and are forced in turn.
        let mut cnf = Cnf::from(vec![vec![1, 2, 3]]);
        let mut assignment = Assignment::new(cnf.num_vars);
        let mut implied = Vec::new();

        let n = eliminate_pure_literals(&mut cnf, &mut assignment, &mut implied).unwrap();
        assert_eq!(n, 3);
        assert_eq!(assignment.var_value(1), Some(true));
        assert_eq!(assignment.var_value(2), Some(true));
        assert_eq!(assignment.var_value(3), Some(true));
        assert!(cnf.is_satisfied());
    }

    #[test]
    fn test_mixed_polarity_variable_is_not_pure() {
        let mut cnf = Cnf::from(vec![vec![1, 2], vec![-1, -2]]);
        let mut assignment = Assignment::new(cnf.num_vars);

        let n =
            eliminate_pure_literals(&mut cnf, &mut assignment, &mut Vec::new()).unwrap();
        assert_eq!(n, 0);
        assert_eq!(assignment.unassigned_count(), 2);
    }

    #[test]
    fn test_pure_literal_considers_only_unsatisfied_clauses() {
        // After 1 satisfies the first clause, -2's only occurrence is in a
        // satisfied clause, leaving 2 pure.
        let mut cnf = Cnf::from(vec![vec![1, -2], vec![2, 3]]);
        let mut assignment = Assignment::new(cnf.num_vars);

        let n =
            eliminate_pure_literals(&mut cnf, &mut assignment, &mut Vec::new()).unwrap();
        assert_eq!(n, 3);
        assert_eq!(assignment.var_value(1), Some(true));
        assert_eq!(assignment.var_value(2), Some(true));
        assert!(cnf.is_satisfied());
    }
}
