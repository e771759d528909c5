//! Playbook module finder
//!
//! Scans playbook and task files for top-level task keys that are not
//! playbook keywords, which are most likely the modules being invoked.
//!
//! This crate provides:
//! - A document model built from parsed YAML
//! - The recursive candidate extractor
//! - Keyword filtering and report rendering
//! - A per-file scanner and the multi-file driver used by the CLI

pub mod config;
pub mod error;
pub mod extract;
pub mod keywords;
pub mod node;
pub mod report;
pub mod scan;

use std::io::Write;
use std::path::PathBuf;

pub use config::ScanConfig;
pub use error::ScanError;
pub use extract::{extract, DepthExceeded, Extractor};
pub use keywords::{keyword_set, KEYWORDS};
pub use node::Node;
pub use report::{filter_candidates, Report};
pub use scan::Scanner;

/// Scan every file in order, writing reports to `out` and skip diagnostics to `err`.
///
/// Per-file problems are reported and the loop moves on. Only a failure to
/// read a file ends the run early.
pub fn run<W, E>(scanner: &Scanner, files: &[PathBuf], out: &mut W, err: &mut E) -> anyhow::Result<()>
where
    W: Write,
    E: Write,
{
    for path in files {
        match scanner.scan_path(path) {
            Ok(report) => {
                tracing::debug!(file = %report.file(), modules = report.modules().len(), "Scanned file");
                writeln!(out, "{report}")?;
            }
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                tracing::debug!(file = %e.path(), error = ?e, "Skipping file");
                writeln!(err, "{e}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_strings(files: &[PathBuf]) -> (anyhow::Result<()>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run(&Scanner::default(), files, &mut out, &mut err);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_run_mixed_files() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site.yml");
        std::fs::write(&site, "- hosts: all\n  tasks:\n    - shell: ls\n    - copy: {}\n    - shell: pwd\n").unwrap();
        let vars = dir.path().join("vars.yaml");
        std::fs::write(&vars, "a: 1\n").unwrap();
        let empty = dir.path().join("empty.yml");
        std::fs::write(&empty, "- name: nothing\n").unwrap();
        let notes = dir.path().join("notes.txt");

        let (result, out, err) = run_to_strings(&[site.clone(), notes.clone(), vars.clone(), empty.clone()]);
        result.unwrap();

        assert_eq!(
            out,
            format!(
                "Modules found in {}:\ncopy\nshell\n\nNo modules found in {}\n",
                site.display(),
                empty.display()
            )
        );
        assert_eq!(
            err,
            format!(
                "{}: does not end in one of ('.yml', '.yaml'); skipping\n{} is not a list of plays or tasks, skipping\n",
                notes.display(),
                vars.display()
            )
        );
    }

    #[test]
    fn test_run_stops_on_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yml");
        let site = dir.path().join("site.yml");
        std::fs::write(&site, "- shell: ls\n").unwrap();

        let (result, out, err) = run_to_strings(&[missing, site]);
        let e = result.unwrap_err();
        assert!(e.downcast_ref::<ScanError>().is_some_and(ScanError::is_fatal));
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_parse_error_continues() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.yml");
        std::fs::write(&broken, "- [unclosed\n").unwrap();
        let site = dir.path().join("site.yml");
        std::fs::write(&site, "- debug: {msg: hi}\n").unwrap();

        let (result, out, err) = run_to_strings(&[broken.clone(), site.clone()]);
        result.unwrap();
        assert_eq!(err, format!("{}: error parsing YAML, skipping\n", broken.display()));
        assert_eq!(out, format!("Modules found in {}:\ndebug\n\n", site.display()));
    }
}
