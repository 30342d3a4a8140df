#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF file format: the adapter between textual
//! input and the solver's [`Cnf`] graph.
//!
//! The format:
//! - Lines starting with `c` are comments and ignored.
//! - One line `p cnf <num_vars> <num_clauses>` declares the problem size
//!   and must precede the clauses.
//! - Every other line lists space-separated signed integers terminated by
//!   `0`; a positive integer `k` is the positive literal of variable `k`,
//!   `-k` its negation. Each such line is one clause.
//! - An optional `%` line marks end-of-data (common in competition files).
//!
//! Unlike lenient parsers, the declared counts are enforced: a clause
//! referencing a variable outside the declared range or a clause count that
//! disagrees with the header fails the whole file with a [`DimacsError`].

use crate::sat::cnf::Cnf;
use crate::sat::error::DimacsError;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parses DIMACS data from a reader into a [`Cnf`].
///
/// # Errors
///
/// [`DimacsError`] if the input cannot be read or violates the format.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, DimacsError> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|source| DimacsError::Io {
            path: PathBuf::from("<reader>"),
            source,
        })?;
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            None | Some(&"c") => {}
            Some(&"%") => break,
            Some(&"p") => header = Some(parse_header(&line)?),
            Some(_) => {
                let Some((num_vars, _)) = header else {
                    return Err(DimacsError::MissingHeader);
                };
                clauses.push(parse_clause(parts, num_vars)?);
            }
        }
    }

    let Some((num_vars, num_clauses)) = header else {
        return Err(DimacsError::MissingHeader);
    };
    if clauses.len() != num_clauses {
        return Err(DimacsError::ClauseCountMismatch {
            declared: num_clauses,
            found: clauses.len(),
        });
    }

    Ok(Cnf::new(num_vars, clauses))
}

fn parse_header(line: &str) -> Result<(usize, usize), DimacsError> {
    let malformed = || DimacsError::MalformedHeader(line.to_string());
    let mut parts = line.split_whitespace();

    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(malformed());
    }
    let num_vars = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    let num_clauses = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    Ok((num_vars, num_clauses))
}

fn parse_clause<'a>(
    parts: impl Iterator<Item = &'a str>,
    num_vars: usize,
) -> Result<Vec<i32>, DimacsError> {
    let mut clause = Vec::new();

    for token in parts {
        let lit: i32 = token
            .parse()
            .map_err(|_| DimacsError::MalformedLiteral(token.to_string()))?;
        if lit == 0 {
            break;
        }
        if lit.unsigned_abs() as usize > num_vars {
            return Err(DimacsError::LiteralOutOfRange { lit, num_vars });
        }
        clause.push(lit);
    }

    Ok(clause)
}

/// Parses a DIMACS CNF file from disk.
///
/// # Errors
///
/// [`DimacsError::Io`] if the file cannot be opened or read (a missing file
/// surfaces here); any parse error from [`parse_dimacs`].
pub fn parse_file(path: &Path) -> Result<Cnf, DimacsError> {
    let file = std::fs::File::open(path).map_err(|source| DimacsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dimacs(io::BufReader::new(file))
}

/// Collects every `.cnf` file under `dir`, recursively, in walk order.
///
/// # Errors
///
/// [`DimacsError::Io`] if a directory entry cannot be read.
pub fn find_cnf_files(dir: &Path) -> Result<Vec<PathBuf>, DimacsError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| DimacsError::Io {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "cnf") {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(content: &str) -> Result<Cnf, DimacsError> {
        parse_dimacs(Cursor::new(content))
    }

    #[test]
    fn test_parse_simple_file() {
        let cnf = parse("c a comment\np cnf 3 2\n1 -2 0\n2 3 0\n").unwrap();

        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.len(), 2);
        let lits: Vec<i32> = cnf[0].iter().map(|l| l.to_i32()).collect();
        assert_eq!(lits, vec![1, -2]);
    }

    #[test]
    fn test_parse_with_end_marker_and_blank_lines() {
        let cnf = parse("p cnf 2 2\n\n1 0\n\n-2 0\n%\n0\n").unwrap();
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf[1][0].to_i32(), -2);
    }

    #[test]
    fn test_missing_header_fails() {
        assert!(matches!(parse("1 2 0\n"), Err(DimacsError::MissingHeader)));
        assert!(matches!(parse(""), Err(DimacsError::MissingHeader)));
    }

    #[test]
    fn test_malformed_header_fails() {
        assert!(matches!(
            parse("p cnf three 2\n"),
            Err(DimacsError::MalformedHeader(_))
        ));
        assert!(matches!(
            parse("p sat 3 2\n"),
            Err(DimacsError::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_malformed_literal_fails() {
        assert!(matches!(
            parse("p cnf 2 1\n1 abc 0\n"),
            Err(DimacsError::MalformedLiteral(_))
        ));
    }

    #[test]
    fn test_clause_count_mismatch_fails() {
        assert!(matches!(
            parse("p cnf 2 3\n1 0\n2 0\n"),
            Err(DimacsError::ClauseCountMismatch {
                declared: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn test_literal_out_of_range_fails() {
        assert!(matches!(
            parse("p cnf 2 1\n1 5 0\n"),
            Err(DimacsError::LiteralOutOfRange { lit: 5, num_vars: 2 })
        ));
    }

    #[test]
    fn test_empty_clause_line_is_an_empty_clause() {
        let cnf = parse("p cnf 1 1\n0\n").unwrap();
        assert_eq!(cnf.len(), 1);
        assert!(cnf[0].is_empty());
    }
}
