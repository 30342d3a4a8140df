#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Picking the next branching variable.
//!
//! The solver deliberately carries no activity heuristic: branching follows
//! declaration order, which keeps repeated solves of the same input fully
//! deterministic. The trait leaves the seam open for other strategies.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;

/// Strategy for choosing the next unassigned variable to branch on.
pub trait VariableSelection {
    /// Creates a selector for variables `1..=num_vars`.
    fn new(num_vars: usize) -> Self;

    /// The next variable to branch on, or `None` when every variable is
    /// assigned.
    fn pick(&self, assignment: &Assignment) -> Option<Variable>;
}

/// Branches on the first unassigned variable in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeclarationOrder {
    num_vars: usize,
}

impl VariableSelection for DeclarationOrder {
    fn new(num_vars: usize) -> Self {
        Self { num_vars }
    }

    fn pick(&self, assignment: &Assignment) -> Option<Variable> {
        (1..=self.num_vars as Variable).find(|&v| assignment[v].is_unassigned())
    }
}
