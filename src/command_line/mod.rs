#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The command-line driver: argument parsing, dispatch, and reporting.

pub mod cli;
