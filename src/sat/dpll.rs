#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The DPLL (Davis-Putnam-Logemann-Loveland) search engine.
//!
//! The solve runs in two phases. Before the first decision, the three
//! simplification rules run once in a fixed order: pure-literal elimination,
//! tautology elimination, then unit propagation to a fixed point. Everything
//! assigned at this root level is permanent and never undone.
//!
//! The search itself is an iterative loop over an explicit trail rather than
//! recursion, so the depth of the decision tree never touches the call
//! stack:
//!
//! - **Decide**: if the formula is satisfied, return SAT with the current
//!   model (don't-care variables stay unassigned). Otherwise branch on the
//!   first unassigned variable in declaration order, trying `false` first,
//!   and propagate units, recording every implied literal on the new frame.
//! - **Backtrack**: on conflict, pop frames; each pop undoes the frame's
//!   implied literals in reverse and then its decision. An unflipped frame
//!   is flipped to `true`, re-propagated with a fresh implied set, and
//!   pushed back; a flipped frame is discarded. An empty trail with nothing
//!   left to flip is UNSAT.
//!
//! Each backtrack step retires one (variable, untried-polarity) pair, which
//! bounds the loop and guarantees termination.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::cnf::Cnf;
use crate::sat::error::SolverError;
use crate::sat::literal::Literal;
use crate::sat::propagation::{eliminate_pure_literals, eliminate_tautologies, Propagator};
use crate::sat::solver::{SolutionStats, Solver, Verdict};
use crate::sat::trail::{Frame, Trail};
use crate::sat::variable_selection::{DeclarationOrder, VariableSelection};

/// A DPLL SAT solver with counter-based clause tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dpll {
    /// The formula being solved; counters mutate during the solve.
    pub cnf: Cnf,
    /// The current truth assignment.
    pub assignment: Assignment,
    /// The decision stack.
    pub trail: Trail,
    selector: DeclarationOrder,
    propagator: Propagator,
    stats: SolutionStats,
}

impl Solver for Dpll {
    fn new(cnf: Cnf) -> Self {
        let assignment = Assignment::new(cnf.num_vars);
        let trail = Trail::new(cnf.num_vars);
        let selector = DeclarationOrder::new(cnf.num_vars);
        let propagator = Propagator::new(&cnf);

        Self {
            cnf,
            assignment,
            trail,
            selector,
            propagator,
            stats: SolutionStats::default(),
        }
    }

    fn solve(&mut self) -> Result<Verdict, SolverError> {
        if self.preprocess()? {
            return Ok(Verdict::Unsat);
        }

        loop {
            if self.cnf.is_satisfied() {
                return Ok(Verdict::Sat(self.solutions()));
            }

            let conflicted = match self.selector.pick(&self.assignment) {
                Some(var) => self.decide(var)?,
                // Every variable assigned yet some clause is unsatisfied.
                None => true,
            };

            if conflicted {
                self.stats.conflicts += 1;
                if !self.backtrack()? {
                    return Ok(Verdict::Unsat);
                }
            }
        }
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Dpll {
    /// Runs the root-level simplification rules. Returns `true` if the
    /// formula is already unsatisfiable.
    fn preprocess(&mut self) -> Result<bool, SolverError> {
        let mut root_implied = Vec::new();

        self.stats.pure_literals =
            eliminate_pure_literals(&mut self.cnf, &mut self.assignment, &mut root_implied)?;
        self.stats.tautologies = eliminate_tautologies(&mut self.cnf);

        self.propagator.seed_all(&self.cnf);
        let unit_start = root_implied.len();
        let conflict =
            self.propagator
                .propagate(&mut self.cnf, &mut self.assignment, &mut root_implied)?;
        self.stats.propagations += root_implied.len() - unit_start;

        // A conflict with an empty trail has no decision to revisit.
        Ok(conflict.is_some())
    }

    /// Branches on `var`, trying `false` first, and propagates. Returns
    /// `true` if propagation ran into a conflict.
    fn decide(&mut self, var: u32) -> Result<bool, SolverError> {
        let decision = Literal::new(var, false);
        self.cnf.assign_true(decision, &mut self.assignment)?;
        self.stats.decisions += 1;

        let mut frame = Frame::new(decision);
        self.propagator.seed_from(&self.cnf, decision);
        let conflict =
            self.propagator
                .propagate(&mut self.cnf, &mut self.assignment, &mut frame.implied)?;
        self.stats.propagations += frame.implied.len();
        self.trail.push(frame);

        Ok(conflict.is_some())
    }

    /// Unwinds the trail after a conflict. Returns `false` when both
    /// polarities of every decision are exhausted, i.e. UNSAT.
    fn backtrack(&mut self) -> Result<bool, SolverError> {
        while let Some(mut frame) = self.trail.pop() {
            for &lit in frame.implied.iter().rev() {
                self.cnf.unassign(lit, &mut self.assignment)?;
            }
            self.cnf.unassign(frame.decision, &mut self.assignment)?;

            if frame.flipped {
                continue;
            }

            frame.decision = frame.decision.negated();
            frame.flipped = true;
            frame.implied.clear();

            self.cnf.assign_true(frame.decision, &mut self.assignment)?;
            self.propagator.seed_from(&self.cnf, frame.decision);
            let conflict = self.propagator.propagate(
                &mut self.cnf,
                &mut self.assignment,
                &mut frame.implied,
            )?;
            self.stats.propagations += frame.implied.len();
            self.trail.push(frame);

            if conflict.is_none() {
                return Ok(true);
            }
            // The flipped branch conflicted too; keep unwinding. The frame
            // just pushed is flipped and will be discarded on the next pop.
            self.stats.conflicts += 1;
        }

        Ok(false)
    }
}
