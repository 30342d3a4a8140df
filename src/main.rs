//! Command-line entry point for the DPLL SAT solver.
//!
//! Parses arguments, dispatches to the `command_line` driver, and installs
//! jemalloc as the global allocator so the reported memory statistics match
//! what the solver actually used.

mod command_line;
mod sat;

use crate::command_line::cli;

/// Global allocator using `tikv-jemallocator`, paired with
/// `tikv-jemalloc-ctl` for the memory statistics in the report.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
