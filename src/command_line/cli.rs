#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_precision_loss)]
//! The clap-based CLI: solve a DIMACS file, inline text, or a directory of
//! `.cnf` files, with optional verification, statistics, and model output.

use crate::sat::cnf::Cnf;
use crate::sat::dimacs::{find_cnf_files, parse_file};
use crate::sat::dpll::Dpll;
use crate::sat::solver::{SolutionStats, Solver, Verdict};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the solver.
#[derive(Parser, Debug)]
#[command(name = "dpll-sat", version, about = "A DPLL SAT solver")]
pub struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a DIMACS .cnf file to solve.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "1 -2 0\n2 3 0").
        /// Each line is one clause; literals are space-separated, 0 ends a clause.
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file in a directory, recursively.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonOptions {
    /// Enable debug output, printing the parsed formula before solving.
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Re-check the model against the original formula after solving.
    #[arg(short, long, default_value_t = true)]
    pub verify: bool,

    /// Print performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub stats: bool,

    /// Print the satisfying assignment if the formula is satisfiable.
    #[arg(short, long, default_value_t = false)]
    pub print_solution: bool,
}

/// Parses the command line and dispatches.
///
/// # Errors
///
/// A human-readable message when parsing or solving fails.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            return solve_path(&path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_path(&path, &common),
        Some(Commands::Text { input, common }) => {
            let time = std::time::Instant::now();
            let cnf = Cnf::from(parse_textual_cnf(&input));
            solve_and_report(&cnf, &common, None, time.elapsed())
        }
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => Err("No command provided. Use --help for more information.".to_string()),
    }
}

/// Parses and solves a single DIMACS file.
fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let time = std::time::Instant::now();
    let cnf = parse_file(path).map_err(|e| e.to_string())?;
    solve_and_report(&cnf, common, Some(path), time.elapsed())
}

/// Solves every `.cnf` file under `path`.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for file in find_cnf_files(path).map_err(|e| e.to_string())? {
        solve_path(&file, common)?;
    }

    Ok(())
}

/// Solves a formula and reports verdict, verification, and statistics.
fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    if common.debug {
        println!("CNF: {cnf}");
        println!("Variables: {}", cnf.num_vars);
        println!("Clauses: {}", cnf.len());
        println!("Literals: {}", cnf.literal_count());
    }

    epoch::advance().map_err(|e| e.to_string())?;
    let time = std::time::Instant::now();

    let mut solver = Dpll::new(cnf.clone());
    let verdict = solver.solve().map_err(|e| e.to_string())?;

    let elapsed = time.elapsed();

    epoch::advance().map_err(|e| e.to_string())?;
    let allocated_bytes = stats::allocated::mib()
        .and_then(|m| m.read())
        .map_err(|e| e.to_string())?;
    let resident_bytes = stats::resident::mib()
        .and_then(|m| m.read())
        .map_err(|e| e.to_string())?;
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_solution(cnf, &verdict)?;
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            cnf,
            &solver.stats(),
            allocated_mib,
            resident_mib,
        );
    }

    if let Verdict::Sat(solutions) = &verdict {
        if common.print_solution {
            println!("Solutions: {solutions}");
        }
    }

    if verdict.is_sat() {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }

    Ok(())
}

/// Re-checks the model against the original formula.
fn verify_solution(cnf: &Cnf, verdict: &Verdict) -> Result<(), String> {
    match verdict.solutions() {
        Some(solutions) => {
            let ok = cnf.verify(solutions);
            println!("Verified: {ok:?}");
            if ok {
                Ok(())
            } else {
                Err("Solution failed verification!".to_string())
            }
        }
        None => {
            println!("UNSAT");
            Ok(())
        }
    }
}

/// Parses a textual CNF: one clause per line, literals space-separated,
/// `0` ends a clause; `c` and `p` lines are ignored.
fn parse_textual_cnf(input: &str) -> Vec<Vec<i32>> {
    input
        .lines()
        .filter(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('c') && !line.starts_with('p')
        })
        .map(|line| {
            line.split_whitespace()
                .filter_map(|s| s.parse::<i32>().ok())
                .take_while(|&lit| lit != 0)
                .collect()
        })
        .collect()
}

/// Prints a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    s: &SolutionStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.len());
    stat_line("Literals", cnf.literal_count());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", s.propagations, elapsed_secs);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed_secs);
    stat_line("Pure literals", s.pure_literals);
    stat_line("Tautologies", s.tautologies);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_textual_cnf_simple() {
        let input = "1 -2 0\n3 4 0";
        assert_eq!(parse_textual_cnf(input), vec![vec![1, -2], vec![3, 4]]);
    }

    #[test]
    fn test_parse_textual_cnf_skips_comments_and_header() {
        let input = "c comment\np cnf 2 2\n1 0\n-2 0";
        assert_eq!(parse_textual_cnf(input), vec![vec![1], vec![-2]]);
    }

    #[test]
    fn test_parse_textual_cnf_stops_at_zero() {
        let input = "1 2 0 3 4 0";
        assert_eq!(parse_textual_cnf(input), vec![vec![1, 2]]);
    }

    #[test]
    fn test_parse_textual_cnf_skips_blank_lines() {
        let input = "1 0\n\n-2 0";
        assert_eq!(parse_textual_cnf(input), vec![vec![1], vec![-2]]);
    }
}
