#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The current truth assignment and the model returned on SAT.

use crate::sat::literal::{Literal, Variable};
use core::fmt;
use core::ops::Index;
use itertools::Itertools;

/// The assignment state of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    /// No value has been assigned yet.
    #[default]
    Unassigned,
    /// The variable carries a value.
    Assigned(bool),
}

impl VarState {
    /// `true` if the variable carries a value.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    /// `true` if no value has been assigned.
    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }
}

/// The truth assignment over all variables of a formula.
///
/// A literal and its complement are never in an inconsistent state: both are
/// views of the single [`VarState`] of their shared variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<VarState>);

impl Assignment {
    /// Creates an all-unassigned state for variables `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars + 1])
    }

    /// Sets `var` to `value`. The caller checks the variable is unassigned.
    pub fn set(&mut self, var: Variable, value: bool) {
        self.0[var as usize] = VarState::Assigned(value);
    }

    /// Clears the value of `var`.
    pub fn unset(&mut self, var: Variable) {
        self.0[var as usize] = VarState::Unassigned;
    }

    /// The value of `var`, or `None` if unassigned.
    #[must_use]
    pub fn var_value(&self, var: Variable) -> Option<bool> {
        match self.0.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    /// The truth value of `lit` under the current assignment, or `None` if
    /// its variable is unassigned.
    #[must_use]
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.var_value(lit.variable()).map(|b| b == lit.polarity())
    }

    /// Number of variables still unassigned.
    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.0.iter().skip(1).filter(|s| s.is_unassigned()).count()
    }

    /// Extracts the model as a [`Solutions`] value. Unassigned variables are
    /// don't-cares and are omitted.
    #[must_use]
    pub fn get_solutions(&self) -> Solutions {
        Solutions(
            self.0
                .iter()
                .enumerate()
                .skip(1)
                .filter_map(|(i, s)| match s {
                    VarState::Assigned(true) => Some(i as i32),
                    VarState::Assigned(false) => Some(-(i as i32)),
                    VarState::Unassigned => None,
                })
                .collect(),
        )
    }
}

impl Index<Variable> for Assignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}

/// A satisfying model: the signed DIMACS value of every assigned variable,
/// in variable order. Variables absent from the model are don't-cares.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(Vec<i32>);

impl Solutions {
    /// Creates a model from signed DIMACS values.
    #[must_use]
    pub fn new(values: Vec<i32>) -> Self {
        Self(values)
    }

    /// The value assigned to `var`, or `None` if it is a don't-care.
    #[must_use]
    pub fn value_of(&self, var: Variable) -> Option<bool> {
        self.0
            .iter()
            .find(|v| v.unsigned_abs() == var)
            .map(|v| v.is_positive())
    }

    /// Iterates over the signed values of the model.
    pub fn iter(&self) -> impl Iterator<Item = &i32> {
        self.0.iter()
    }

    /// Number of assigned variables in the model.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if every variable is a don't-care.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Solutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_value_tracks_polarity() {
        let mut a = Assignment::new(2);
        assert_eq!(a.literal_value(Literal::from_i32(1)), None);

        a.set(1, false);
        assert_eq!(a.literal_value(Literal::from_i32(1)), Some(false));
        assert_eq!(a.literal_value(Literal::from_i32(-1)), Some(true));

        a.unset(1);
        assert_eq!(a.literal_value(Literal::from_i32(-1)), None);
    }

    #[test]
    fn test_solutions_skip_dont_cares() {
        let mut a = Assignment::new(3);
        a.set(1, true);
        a.set(3, false);

        let sol = a.get_solutions();
        assert_eq!(sol.value_of(1), Some(true));
        assert_eq!(sol.value_of(2), None);
        assert_eq!(sol.value_of(3), Some(false));
        assert_eq!(sol.to_string(), "1 -3");
    }

    #[test]
    fn test_unassigned_count() {
        let mut a = Assignment::new(3);
        assert_eq!(a.unassigned_count(), 3);
        a.set(2, true);
        assert_eq!(a.unassigned_count(), 2);
    }
}
