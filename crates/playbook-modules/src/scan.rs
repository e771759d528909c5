//! Per-file scanning: read, parse, extract, filter.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::extract::Extractor;
use crate::keywords::keyword_set;
use crate::node::Node;
use crate::report::{filter_candidates, Report};

/// Turns one playbook or task file into a [`Report`].
#[derive(Debug, Clone)]
pub struct Scanner {
    extensions: Vec<String>,
    extractor: Extractor,
    keywords: &'static HashSet<&'static str>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

impl Scanner {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            extractor: Extractor::new(config.max_depth),
            keywords: keyword_set(),
        }
    }

    /// Whether the file name ends with an accepted extension.
    pub fn accepts(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
    }

    /// Scan a single file.
    pub fn scan_path(&self, path: &Path) -> Result<Report, ScanError> {
        let name = path.display().to_string();
        if !self.accepts(&name) {
            return Err(ScanError::UnsupportedExtension {
                path: name,
                extensions: self.extensions.clone(),
            });
        }

        let bytes = fs::read(path).map_err(|source| ScanError::Io {
            path: name.clone(),
            source,
        })?;
        tracing::debug!(file = %name, bytes = bytes.len(), "Read playbook file");

        self.scan_bytes(name, &bytes)
    }

    /// Scan already loaded file contents, reporting under `name`.
    pub fn scan_bytes(&self, name: String, bytes: &[u8]) -> Result<Report, ScanError> {
        // An empty stream is a null document.
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ScanError::NotAList { path: name });
        }

        let document: Node = match serde_yaml::from_slice(bytes) {
            Ok(document) => document,
            Err(source) => return Err(ScanError::Parse { path: name, source }),
        };

        let Some(nodes) = document.into_sequence() else {
            return Err(ScanError::NotAList { path: name });
        };

        let candidates = match self.extractor.extract(&nodes) {
            Ok(candidates) => candidates,
            Err(e) => {
                return Err(ScanError::DepthExceeded {
                    path: name,
                    limit: e.limit,
                })
            }
        };
        tracing::debug!(file = %name, candidates = candidates.len(), "Extracted module candidates");

        Ok(Report::new(name, filter_candidates(candidates, self.keywords)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_scan_playbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "site.yml",
            r#"
- hosts: all
  become: true
  tasks:
    - name: install nginx
      apt:
        name: nginx
      notify: restart
    - name: copy config
      copy: {src: nginx.conf, dest: /etc/nginx/nginx.conf}
    - name: loop
      debug: {msg: "{{ item }}"}
      with_items: [1, 2]
  handlers:
    - name: restart
      service: {name: nginx, state: restarted}
"#,
        );

        let report = Scanner::default().scan_path(&path).unwrap();
        assert_eq!(report.modules(), ["apt", "copy", "debug", "service"]);
        assert_eq!(report.file(), path.display().to_string());
    }

    #[test]
    fn test_scan_only_keywords() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "tasks.yaml", "- name: x\n  when: y\n");

        let report = Scanner::default().scan_path(&path).unwrap();
        assert!(matches!(report, Report::Empty { .. }));
    }

    #[test]
    fn test_unsupported_extension_not_read() {
        let scanner = Scanner::default();
        let err = scanner.scan_path(Path::new("/nonexistent/notes.txt")).unwrap_err();
        assert!(matches!(err, ScanError::UnsupportedExtension { .. }));
        assert!(!scanner.accepts("playbook.YML"));
        assert!(scanner.accepts("playbook.yaml"));
    }

    #[test]
    fn test_not_a_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "vars.yml", "key: value\nother: 1\n");
        let err = Scanner::default().scan_path(&path).unwrap_err();
        assert!(matches!(err, ScanError::NotAList { .. }));

        let path = write_file(&dir, "scalar.yml", "just text\n");
        let err = Scanner::default().scan_path(&path).unwrap_err();
        assert!(matches!(err, ScanError::NotAList { .. }));
    }

    #[test]
    fn test_empty_file_is_not_a_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty.yml", "");
        let err = Scanner::default().scan_path(&path).unwrap_err();
        assert!(matches!(err, ScanError::NotAList { .. }));
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "broken.yml", "- shell: [unclosed\n");
        let err = Scanner::default().scan_path(&path).unwrap_err();
        assert!(matches!(err, ScanError::Parse { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_multiple_documents_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "multi.yml", "- shell: a\n---\n- copy: b\n");
        let err = Scanner::default().scan_path(&path).unwrap_err();
        assert!(matches!(err, ScanError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Scanner::default()
            .scan_path(&dir.path().join("missing.yml"))
            .unwrap_err();
        assert!(matches!(err, ScanError::Io { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_depth_exceeded() {
        let scanner = Scanner::from_config(&ScanConfig {
            max_depth: 2,
            ..ScanConfig::default()
        });
        let yaml = "- block:\n    - block:\n        - shell: x\n";
        let err = scanner.scan_bytes("deep.yml".to_string(), yaml.as_bytes()).unwrap_err();
        assert!(matches!(err, ScanError::DepthExceeded { limit: 2, .. }));
    }

    #[test]
    fn test_merge_keys_applied() {
        let yaml = r#"
- &defaults
  become: true
- <<: *defaults
  template: {src: a, dest: b}
"#;
        let report = Scanner::default()
            .scan_bytes("merge.yml".to_string(), yaml.as_bytes())
            .unwrap();
        assert_eq!(report.modules(), ["template"]);
    }

    #[test]
    fn test_repeated_key_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "dup.yml", "- shell: a\n  shell: b\n");

        let report = Scanner::default().scan_path(&path).unwrap();
        assert_eq!(report.modules(), ["shell"]);
    }

    #[test]
    fn test_repeated_key_last_value_decides() {
        let yaml = "- copy: {src: a}\n  copy:\n    - apt: {name: x}\n";
        let report = Scanner::default()
            .scan_bytes("dup.yml".to_string(), yaml.as_bytes())
            .unwrap();
        assert_eq!(report.modules(), ["apt"]);
    }

    #[test]
    fn test_custom_extensions() {
        let scanner = Scanner::from_config(&ScanConfig {
            extensions: vec![".playbook".to_string()],
            ..ScanConfig::default()
        });
        assert!(scanner.accepts("site.playbook"));
        assert!(!scanner.accepts("site.yml"));
    }
}
