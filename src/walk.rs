//! Recursive directory walking and tree assembly
//!
//! Builds the node tree bottom-up: classify and recurse first, then decide
//! whether the parent survives based on its surviving child count. A
//! directory or file contributing nothing visible disappears silently; the
//! scan root itself is always returned, even childless.

use std::fs;
use std::path::Path;

use crate::analyzer::{SourceAnalyzer, TypeScriptAnalyzer};
use crate::classify::classify_file;
use crate::error::Error;
use crate::filter::PathFilter;
use crate::node::{TreeNode, Visibility};

/// Depth-first walker over a project directory.
///
/// Holds only read-only inputs; each `walk` call builds an independent tree.
pub struct TreeWalker<'a, A: SourceAnalyzer> {
    analyzer: &'a A,
    filter: &'a PathFilter,
    threshold: Visibility,
}

impl<'a, A: SourceAnalyzer> TreeWalker<'a, A> {
    pub fn new(analyzer: &'a A, filter: &'a PathFilter, threshold: Visibility) -> Self {
        Self {
            analyzer,
            filter,
            threshold,
        }
    }

    /// Walk `root` and return its tree. Directory enumeration failures are
    /// fatal; per-file parse failures prune the file and continue.
    pub fn walk(&self, root: &Path) -> Result<TreeNode, Error> {
        let children = self.walk_children(root, root)?;
        Ok(TreeNode::directory(entry_name(root), children))
    }

    fn walk_children(&self, dir: &Path, root: &Path) -> Result<Vec<TreeNode>, Error> {
        let entries = fs::read_dir(dir).map_err(|source| Error::Filesystem {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Filesystem {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();

            // symlinks would make the walk cyclic
            if path.is_symlink() {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(&path);
            if !self.filter.is_included(relative) {
                continue;
            }

            if path.is_dir() {
                let sub = self.walk_children(&path, root)?;
                if !sub.is_empty() {
                    children.push(TreeNode::directory(entry_name(&path), sub));
                }
            } else if path.is_file() && self.analyzer.supports(&path) {
                // parse failures mean zero declarations, not an aborted walk
                let Ok(declarations) = self.analyzer.declarations(&path) else {
                    continue;
                };
                let nodes = classify_file(&declarations, self.threshold);
                if !nodes.is_empty() {
                    children.push(TreeNode::file(entry_name(&path), nodes));
                }
            }
        }
        Ok(children)
    }
}

/// Load the project at `root` and build its API surface tree.
pub fn scan(root: &Path, filter: &PathFilter, threshold: Visibility) -> Result<TreeNode, Error> {
    let analyzer = TypeScriptAnalyzer::load(root)?;
    TreeWalker::new(&analyzer, filter, threshold).walk(root)
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}
