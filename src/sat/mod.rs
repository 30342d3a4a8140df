#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The SAT solver core: formula representation, simplification rules, and
//! the DPLL search engine.

pub mod assignment;
pub mod clause;
pub mod cnf;
pub mod dimacs;
pub mod dpll;
pub mod error;
pub mod literal;
pub mod occurrence;
pub mod propagation;
pub mod solver;
pub mod trail;
pub mod variable_selection;
