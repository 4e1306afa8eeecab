//! File-based runs and fixture checking
//!
//! A fixture directory holds program files; the expected answers for
//! `dir/<name>` live in `dir/out/<name>`, one rendered atom per line
//! (`grandparent(a,c).`). Answers are compared as sets.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use log::{debug, warn};

use crate::engine::{query, solve};
use crate::error::Result;
use crate::parser::parse;
use crate::term::Atom;

/// Name of the subdirectory holding expected outputs
pub const EXPECTED_DIR: &str = "out";

/// Outcome of checking one program file against its expected output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureReport {
    /// The program file
    pub path: PathBuf,
    /// Expected lines that were not produced
    pub missing: Vec<String>,
    /// Produced lines that were not expected
    pub unexpected: Vec<String>,
}

impl FixtureReport {
    /// Returns true if produced and expected lines agree
    #[must_use]
    pub fn passed(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Parses and evaluates a program file
///
/// With a query, returns its answers; without one, every atom of the
/// solved knowledge base.
///
/// # Errors
///
/// IO, parse, validation and evaluation errors.
pub fn run_file(path: &Path) -> Result<Vec<Atom>> {
    let text = fs::read_to_string(path)?;
    let source = parse(&text)?;
    debug!(
        "Loaded {} rules from {}",
        source.program.len(),
        path.display()
    );

    match &source.query {
        Some(q) => query(&source.program, q),
        None => Ok(solve(&source.program)?.into_iter().collect()),
    }
}

/// Renders answers the way fixture files spell them
#[must_use]
pub fn render(atoms: &[Atom]) -> Vec<String> {
    atoms.iter().map(|atom| format!("{atom}.")).collect()
}

fn normalize(line: &[u8]) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let compact: String = line
        .to_str_lossy()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Some(compact)
}

/// Expected output lines of a fixture, whitespace removed, blanks skipped
///
/// # Errors
///
/// Fails if the file cannot be read.
pub fn read_expected(path: &Path) -> Result<BTreeSet<String>> {
    let bytes = fs::read(path)?;
    Ok(bytes.lines().filter_map(normalize).collect())
}

/// Runs one program file and compares it with its expected output
///
/// # Errors
///
/// Any error from [`run_file`] or [`read_expected`].
pub fn check_file(path: &Path, expected_path: &Path) -> Result<FixtureReport> {
    let got: BTreeSet<String> = render(&run_file(path)?).into_iter().collect();
    let expected = read_expected(expected_path)?;

    let report = FixtureReport {
        path: path.to_path_buf(),
        missing: expected.difference(&got).cloned().collect(),
        unexpected: got.difference(&expected).cloned().collect(),
    };
    for line in &report.missing {
        warn!("{}: expected {line}, but did not get it", path.display());
    }
    for line in &report.unexpected {
        warn!("{}: got {line}, but did not expect it", path.display());
    }
    Ok(report)
}

/// Checks every program file in `dir`, in file name order
///
/// # Errors
///
/// Stops at the first file that cannot be read, parsed or evaluated.
pub fn check_dir(dir: &Path) -> Result<Vec<FixtureReport>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.retain(|path| path.is_file());
    paths.sort();

    let expected_dir = dir.join(EXPECTED_DIR);
    paths
        .iter()
        .map(|path| {
            let name = path.file_name().unwrap_or_default();
            check_file(path, &expected_dir.join(name))
        })
        .collect()
}
