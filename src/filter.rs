//! Path filtering for the directory walk
//!
//! Candidate paths are matched against ignore patterns before any parsing
//! happens. A plain-string pattern matches by substring containment; a
//! pattern wrapped in slashes (`/.../`) is compiled as a regular expression,
//! with a trailing `i` marker enabling case-insensitive matching. Patterns
//! are OR-ed: a path is excluded as soon as any pattern matches.

use std::path::Path;

use regex::{Regex, RegexBuilder};

/// A single ignore pattern.
#[derive(Debug, Clone)]
pub enum IgnorePattern {
    Substring(String),
    Regex(Regex),
}

impl IgnorePattern {
    /// Parse a raw pattern argument. `/pat/` compiles as a regex, `/pat/i`
    /// as a case-insensitive regex, anything else matches by substring.
    pub fn parse(raw: &str) -> Result<Self, regex::Error> {
        if let Some(body) = raw.strip_prefix('/') {
            if let Some(body) = body.strip_suffix("/i") {
                let regex = RegexBuilder::new(body).case_insensitive(true).build()?;
                return Ok(IgnorePattern::Regex(regex));
            }
            if let Some(body) = body.strip_suffix('/') {
                return Ok(IgnorePattern::Regex(Regex::new(body)?));
            }
        }
        Ok(IgnorePattern::Substring(raw.to_string()))
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            IgnorePattern::Substring(needle) => path.contains(needle.as_str()),
            IgnorePattern::Regex(regex) => regex.is_match(path),
        }
    }
}

/// Pure include/exclude predicate over root-relative paths.
///
/// An empty filter includes everything. The pattern list is read-only input;
/// the filter holds no other state.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    patterns: Vec<IgnorePattern>,
}

impl PathFilter {
    pub fn new(patterns: Vec<IgnorePattern>) -> Self {
        Self { patterns }
    }

    /// A filter with no patterns; includes every path.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether a path (taken relative to the scan root) should be
    /// included. Invoked independently for directories and files.
    pub fn is_included(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        !self.patterns.iter().any(|pattern| pattern.matches(&text))
    }
}

/// The default ignore set: common noise directories plus test/spec sources.
pub fn default_patterns() -> Vec<IgnorePattern> {
    const DEFAULTS: &[&str] = &[
        "node_modules",
        r"/\.git/",
        r"/\.vscode/",
        r"/\.DS_Store/",
        r"/\.test\.ts$/",
        r"/\.spec\.ts$/",
    ];

    DEFAULTS
        .iter()
        .map(|raw| IgnorePattern::parse(raw).expect("default ignore pattern is invalid"))
        .collect()
}
