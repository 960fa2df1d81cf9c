//! Canopy - a tree view of a TypeScript project's exported API surface

pub mod analyzer;
pub mod classify;
pub mod error;
pub mod filter;
pub mod node;
pub mod output;
pub mod walk;

pub use analyzer::{Declaration, ParseError, SourceAnalyzer, TypeScriptAnalyzer};
pub use error::Error;
pub use filter::{IgnorePattern, PathFilter, default_patterns};
pub use node::{NodeKind, TreeNode, Visibility};
pub use output::{ListFormatter, OutputConfig, TreeFormatter, print_json};
pub use walk::{TreeWalker, scan};
