#![deny(missing_docs)]
//! A DPLL SAT solver over CNF formulas.
//!
//! The solver tracks clause satisfaction incrementally through per-clause
//! counters and a membership index built once per formula, applies unit
//! propagation, pure-literal elimination, and tautology elimination, and
//! searches with an iterative decision/backtracking loop over an explicit
//! trail.

/// The `sat` module implements the solver core: the literal/clause/formula
/// model, the propagation engine, the DPLL search loop, and the DIMACS
/// adapter.
pub mod sat;
