#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The trail: the ordered record of branching decisions and the propagation
//! side effects each one caused.
//!
//! Each [`Frame`] holds the decision literal (the polarity currently made
//! true), whether the second polarity has already been tried, and the
//! literals unit propagation assigned after the decision. Backtracking pops
//! frames and replays the recorded assignments in reverse, so undo is
//! iterative regardless of how deep the search went.

use crate::sat::literal::Literal;

/// One decision level: a branch plus everything it implied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The literal the decision made true. Decisions try the `false`
    /// polarity of the variable first.
    pub decision: Literal,
    /// `true` once the decision has been flipped to the second polarity;
    /// a flipped frame that conflicts again is discarded entirely.
    pub flipped: bool,
    /// The literals assigned by unit propagation under this decision, in
    /// assignment order.
    pub implied: Vec<Literal>,
}

impl Frame {
    /// Opens a frame for a fresh decision.
    #[must_use]
    pub const fn new(decision: Literal) -> Self {
        Self {
            decision,
            flipped: false,
            implied: Vec::new(),
        }
    }
}

/// The stack of decision frames, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail(Vec<Frame>);

impl Trail {
    /// Creates an empty trail with room for one frame per variable.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(Vec::with_capacity(num_vars))
    }

    /// Pushes a frame for a new decision level.
    pub fn push(&mut self, frame: Frame) {
        self.0.push(frame);
    }

    /// Pops the most recent frame.
    pub fn pop(&mut self) -> Option<Frame> {
        self.0.pop()
    }

    /// The current decision depth.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if no decision is in force.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the frames, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.0.iter()
    }
}
