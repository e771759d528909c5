//! Keyword filtering and per-file report rendering.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Drop keywords from raw candidates, then deduplicate and sort them.
pub fn filter_candidates<I>(candidates: I, keywords: &HashSet<&str>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .filter(|candidate| !keywords.contains(candidate.as_str()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Outcome for one successfully scanned file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// At least one module survived filtering.
    Found { file: String, modules: Vec<String> },

    /// Every candidate was a keyword, or there were none.
    Empty { file: String },
}

impl Report {
    /// Build a report from already filtered module names.
    pub fn new(file: impl Into<String>, modules: Vec<String>) -> Self {
        let file = file.into();
        if modules.is_empty() {
            Report::Empty { file }
        } else {
            Report::Found { file, modules }
        }
    }

    pub fn file(&self) -> &str {
        match self {
            Report::Found { file, .. } | Report::Empty { file } => file,
        }
    }

    pub fn modules(&self) -> &[String] {
        match self {
            Report::Found { modules, .. } => modules,
            Report::Empty { .. } => &[],
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Found { file, modules } => {
                writeln!(f, "Modules found in {file}:")?;
                for module in modules {
                    writeln!(f, "{module}")?;
                }
                Ok(())
            }
            Report::Empty { file } => write!(f, "No modules found in {file}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_dedup_sort() {
        let keywords: HashSet<&str> = ["name", "when"].into_iter().collect();
        let filtered = filter_candidates(strings(&["name", "copy", "when", "copy"]), &keywords);
        assert_eq!(filtered, vec!["copy"]);
    }

    #[test]
    fn test_filter_sorts_bytewise() {
        let keywords = HashSet::new();
        let filtered = filter_candidates(strings(&["shell", "Copy", "apt", "copy"]), &keywords);
        assert_eq!(filtered, vec!["Copy", "apt", "copy", "shell"]);
    }

    #[test]
    fn test_filter_all_keywords() {
        let keywords: HashSet<&str> = ["name"].into_iter().collect();
        assert!(filter_candidates(strings(&["name", "name"]), &keywords).is_empty());
    }

    #[test]
    fn test_report_found_format() {
        let report = Report::new("site.yml", strings(&["apt", "copy"]));
        assert_eq!(report.to_string(), "Modules found in site.yml:\napt\ncopy\n");
        assert_eq!(report.modules(), ["apt", "copy"]);
    }

    #[test]
    fn test_report_empty_format() {
        let report = Report::new("site.yml", Vec::new());
        assert_eq!(report, Report::Empty { file: "site.yml".to_string() });
        assert_eq!(report.to_string(), "No modules found in site.yml");
        assert_eq!(report.file(), "site.yml");
        assert!(report.modules().is_empty());
    }
}
