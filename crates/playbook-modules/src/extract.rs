//! Module candidate extraction.
//!
//! Walks a list of plays or tasks and collects every mapping key that is
//! not itself a container of further tasks. Keyword filtering happens
//! later, in [`crate::report`].

use thiserror::Error;

use crate::node::Node;

/// Default limit on how many sequences may be nested inside each other.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Keys with this prefix are loop directives (`with_items`, `with_dict`, ...).
const LOOP_PREFIX: &str = "with_";

/// A play's `roles` list names roles, not tasks.
const ROLES_KEY: &str = "roles";

/// Returned when a document nests sequences deeper than the extractor allows.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("nesting deeper than {limit} levels")]
pub struct DepthExceeded {
    pub limit: usize,
}

/// Recursive candidate extractor with a nesting guard.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    max_depth: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Extractor {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Collect module candidates from a list of plays or tasks.
    ///
    /// Candidates come out in traversal order and may repeat.
    ///
    /// A sequence found directly inside a sequence replaces everything
    /// gathered so far at that level, and the siblings after it are never
    /// visited. Existing callers rely on this, so it is kept as is.
    pub fn extract(&self, nodes: &[Node]) -> Result<Vec<String>, DepthExceeded> {
        let mut candidates = Vec::new();
        self.walk(nodes, 1, &mut candidates)?;
        Ok(candidates)
    }

    fn walk(&self, nodes: &[Node], depth: usize, out: &mut Vec<String>) -> Result<(), DepthExceeded> {
        if depth > self.max_depth {
            return Err(DepthExceeded {
                limit: self.max_depth,
            });
        }

        let start = out.len();
        for node in nodes {
            match node {
                Node::Sequence(inner) => {
                    out.truncate(start);
                    return self.walk(inner, depth + 1, out);
                }
                Node::Mapping(entries) => {
                    for (key, value) in entries {
                        if key.starts_with(LOOP_PREFIX) {
                            continue;
                        }
                        match value {
                            Node::Sequence(items) => {
                                if key == ROLES_KEY {
                                    continue;
                                }
                                self.walk(items, depth + 1, out)?;
                            }
                            // Module arguments live under mapping values and are never inspected.
                            Node::Mapping(_) | Node::Scalar => out.push(key.clone()),
                        }
                    }
                }
                Node::Scalar => {}
            }
        }
        Ok(())
    }
}

/// Collect module candidates using the default nesting limit.
pub fn extract(nodes: &[Node]) -> Result<Vec<String>, DepthExceeded> {
    Extractor::default().extract(nodes)
}
