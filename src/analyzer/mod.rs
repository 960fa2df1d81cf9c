//! Source analysis interface
//!
//! The tree assembler talks to source code through one narrow contract:
//! "list the declarations of this file, with kind, name, modifiers, and a
//! pre-rendered signature string". Any analyzer that can answer that —
//! a full type-checker or a syntax-level scanner — slots in behind the
//! [`SourceAnalyzer`] trait without touching the classifier or the walk.
//!
//! This crate ships [`TypeScriptAnalyzer`], a syntax-level implementation
//! that renders raw type annotations without resolution.

mod typescript;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use typescript::TypeScriptAnalyzer;

/// A single file could not be analyzed. Non-fatal: the tree assembler
/// treats the file as having produced zero declarations.
#[derive(Debug, Error)]
#[error("cannot analyze '{}': {reason}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub reason: String,
}

impl ParseError {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Explicit access keyword on a declaration or class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    Private,
}

/// What kind of class member a [`Member`] record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Constructor,
    Getter,
    Setter,
    Property,
}

/// A class member as reported by the analyzer, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Explicit access keyword, if the member carries one.
    pub access: Option<Access>,
    pub is_static: bool,
    /// Pre-rendered signature: parameter list plus raw return annotation for
    /// function-like members, the raw type annotation for properties.
    pub signature: Option<String>,
}

/// The shape of the right-hand expression of a `export default ...`
/// statement, inspected by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprShape {
    /// `export default someName;` — resolves to the referenced declaration.
    Identifier(String),
    /// `export default { ... };`
    Object,
    /// `export default (x) => ...;` or a function expression.
    Function { signature: String },
    /// `export default 42;` and friends; carries the literal text.
    Literal(String),
}

/// Tagged declaration payload. Each variant carries only the fields that
/// kind of declaration actually has; the classifier matches exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    Function { signature: String },
    Class { members: Vec<Member> },
    Interface,
    Const { signature: Option<String> },
    /// A re-export or named-export statement entry; `display` is the
    /// synthetic name (`orig as alias`, or `* from "module"`).
    Reexport { display: String },
    /// `export default <expression>;`
    DefaultExport { expr: ExprShape },
}

/// One top-level declaration of a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// Absent for anonymous declarations.
    pub name: Option<String>,
    pub kind: DeclKind,
    pub exported: bool,
    pub is_default: bool,
    /// Explicit access keyword, if the language allows one at top level.
    pub access: Option<Access>,
}

/// Narrow interface between the tree assembler and source analysis.
pub trait SourceAnalyzer {
    /// Whether this analyzer recognizes the file as an analyzable source.
    fn supports(&self, path: &Path) -> bool;

    /// The file's top-level declarations, in declaration order.
    fn declarations(&self, path: &Path) -> Result<Vec<Declaration>, ParseError>;
}
