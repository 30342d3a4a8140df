#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The variable/literal model.
//!
//! Variables are dense `u32` identifiers, numbered from 1 as declared in the
//! DIMACS header. A [`Literal`] packs a variable and a polarity into a single
//! `u32` (`var * 2 + polarity`), so the positive and negative literal of a
//! variable are adjacent and [`Literal::index`] is a dense key suitable for
//! indexing per-literal arrays such as the occurrence index. The complement of
//! a literal is obtained by flipping the low bit; both polarities exist
//! implicitly for every variable and are never re-created.

use core::fmt;
use core::ops::{Neg, Not};

/// A propositional variable, numbered from 1.
pub type Variable = u32;

/// A literal: a variable together with a polarity.
///
/// Encoded as `var * 2 + polarity`, where polarity `true` is the positive
/// literal. The encoding doubles as a dense array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    /// Creates the literal for `var` with the given polarity.
    #[must_use]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        Self(var * 2 + polarity as u32)
    }

    /// The variable this literal refers to.
    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0 / 2
    }

    /// `true` for the positive literal, `false` for the negation.
    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 % 2 != 0
    }

    /// The complementary literal of the same variable.
    #[must_use]
    pub const fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// The dense index of this literal, usable as an array key.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Builds a literal from a signed DIMACS integer (`k` or `-k`).
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        Self::new(value.unsigned_abs(), value.is_positive())
    }

    /// The signed DIMACS representation of this literal.
    #[must_use]
    pub const fn to_i32(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
