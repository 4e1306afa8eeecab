//! Command-line entry point
//!
//! ```text
//! naivelog <program-file>        print the answers of the program's query
//! naivelog --check <fixture-dir> compare every program with dir/out/<name>
//! ```

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use naivelog::harness::{check_dir, render, run_file};

const USAGE: &str = "usage: naivelog <program-file> | naivelog --check <fixture-dir>";

fn run(path: &Path) -> Result<ExitCode> {
    let answers =
        run_file(path).with_context(|| format!("failed to evaluate {}", path.display()))?;
    for line in render(&answers) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

fn check(dir: &Path) -> Result<ExitCode> {
    let reports =
        check_dir(dir).with_context(|| format!("failed to check fixtures in {}", dir.display()))?;

    let mut failures = 0;
    for report in &reports {
        if report.passed() {
            println!("PASS {}", report.path.display());
        } else {
            failures += 1;
            println!("FAIL {}", report.path.display());
            for line in &report.missing {
                println!("  expected {line}, but did not get it");
            }
            for line in &report.unexpected {
                println!("  got {line}, but did not expect it");
            }
        }
    }
    println!("{} passed, {failures} failed", reports.len() - failures);

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [flag, dir] if flag == "--check" => check(Path::new(dir)),
        [file] if !file.starts_with('-') => run(Path::new(file)),
        _ => bail!(USAGE),
    }
}
