#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The membership index: for each literal, the clauses that contain it.
//!
//! Built once per formula in a single linear pass and immutable afterwards
//! (clauses are never added or removed, only marked satisfied). This reverse
//! adjacency index is the sole mechanism the propagation engine uses to find
//! the clauses affected by an assignment in O(degree) time instead of
//! rescanning the whole formula.

use crate::sat::clause::Clause;
use crate::sat::literal::Literal;
use core::ops::Index;
use smallvec::SmallVec;

/// Maps every literal (by its dense index) to the indices of the clauses
/// containing it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OccurrenceIndex(Vec<SmallVec<[u32; 6]>>);

impl OccurrenceIndex {
    /// Builds the index over `clauses` for variables `1..=num_vars`.
    #[must_use]
    pub fn new(num_vars: usize, clauses: &[Clause]) -> Self {
        let mut lists = vec![SmallVec::new(); 2 * (num_vars + 1)];

        for (i, clause) in clauses.iter().enumerate() {
            for lit in clause.iter() {
                lists[lit.index()].push(i as u32);
            }
        }

        Self(lists)
    }

    /// The indices of the clauses containing `lit`.
    #[must_use]
    pub fn clauses_containing(&self, lit: Literal) -> &[u32] {
        &self.0[lit.index()]
    }

    /// `true` if `lit` appears in no clause at all.
    #[must_use]
    pub fn is_absent(&self, lit: Literal) -> bool {
        self.0[lit.index()].is_empty()
    }
}

impl Index<Literal> for OccurrenceIndex {
    type Output = [u32];

    fn index(&self, index: Literal) -> &Self::Output {
        self.clauses_containing(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(lits: &[i32]) -> Clause {
        lits.iter().map(|&l| Literal::from_i32(l)).collect()
    }

    #[test]
    fn test_index_collects_all_occurrences() {
        let clauses = vec![clause(&[1, -2]), clause(&[2, 3]), clause(&[-2])];
        let index = OccurrenceIndex::new(3, &clauses);

        assert_eq!(index[Literal::from_i32(1)], [0]);
        assert_eq!(index[Literal::from_i32(-2)], [0, 2]);
        assert_eq!(index[Literal::from_i32(2)], [1]);
        assert!(index.is_absent(Literal::from_i32(-3)));
        assert!(index.is_absent(Literal::from_i32(-1)));
    }
}
