//! Rewrite the `expected` values of the normalization golden files.
//!
//! Reads every `*.json` file under the golden directory, runs each `input`
//! through the current normalizer and writes the results back. Use `--check`
//! in CI to fail instead of writing when anything would change.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(about = "Regenerate normalization golden expectations")]
struct Args {
    /// Directory holding the golden JSON files
    #[arg(long, default_value = "testdata/normalize-golden")]
    dir: PathBuf,

    /// Report stale files without rewriting them
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct GoldenCase {
    input: String,
    expected: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut stale = Vec::new();

    for path in json_files(&args.dir)? {
        if update_file(&path, args.check)? {
            stale.push(path);
        }
    }

    if stale.is_empty() {
        println!("All golden files are up to date");
        return Ok(());
    }
    for path in &stale {
        println!("{} {}", if args.check { "stale:" } else { "updated:" }, path.display());
    }
    if args.check {
        bail!("{} golden files are stale", stale.len());
    }
    Ok(())
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Returns true if any expectation changed.
fn update_file(path: &Path, check: bool) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let cases: Vec<GoldenCase> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    let updated: Vec<GoldenCase> = cases
        .iter()
        .map(|case| GoldenCase {
            input: case.input.clone(),
            expected: retitle::normalize(&case.input),
        })
        .collect();

    if updated == cases {
        return Ok(false);
    }
    if !check {
        let mut json = serde_json::to_string_pretty(&updated)?;
        json.push('\n');
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_update_file_rewrites_stale_expectations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.json");
        fs::write(
            &path,
            r#"[{"input": "Cool Song - YouTube", "expected": "stale"}]"#,
        )
        .unwrap();

        assert!(update_file(&path, true).unwrap());
        assert!(fs::read_to_string(&path).unwrap().contains("stale"));

        assert!(update_file(&path, false).unwrap());
        let cases: Vec<GoldenCase> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cases[0].expected, "cool song");

        assert!(!update_file(&path, false).unwrap());
    }

    #[test]
    fn test_json_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        let files = json_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }
}
