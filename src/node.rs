//! Node data model for the API surface tree

use std::fmt;

use serde::Serialize;

/// Computed accessibility tier of a declaration.
///
/// Ordered from most to least visible, so a threshold comparison is a plain
/// `<=`: a node survives a threshold `t` when `node_visibility <= t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    /// Check whether a declaration with this visibility survives the
    /// requested threshold. `Public` includes only public, `Protected`
    /// includes public and protected, `Private` includes everything.
    pub fn is_visible_at(self, threshold: Visibility) -> bool {
        self <= threshold
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a tree node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
    Function,
    Class,
    Method,
    Property,
    Interface,
    Const,
}

impl NodeKind {
    /// The kind word rendered before the node name, if any.
    /// Directories and files render bare.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            NodeKind::Directory | NodeKind::File => None,
            NodeKind::Function => Some("function"),
            NodeKind::Class => Some("class"),
            NodeKind::Method => Some("method"),
            NodeKind::Property => Some("property"),
            NodeKind::Interface => Some("interface"),
            NodeKind::Const => Some("const"),
        }
    }

    /// Directories and files contain other nodes and never carry visibility.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::File)
    }
}

/// A single node in the rendered tree: a directory, a file, or a classified
/// declaration. Built fresh per scan and discarded after rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Directory node. The display name carries a trailing path separator.
    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: format!("{}/", name.into()),
            kind: NodeKind::Directory,
            visibility: None,
            signature: None,
            is_default: false,
            children,
        }
    }

    pub fn file(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            visibility: None,
            signature: None,
            is_default: false,
            children,
        }
    }

    /// Leaf declaration node; signature and children can be filled in after.
    pub fn declaration(kind: NodeKind, name: impl Into<String>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: Some(visibility),
            signature: None,
            is_default: false,
            children: Vec::new(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// The display text for this node:
    /// `{visibility }{kind }{name}{signature}`, where the visibility word is
    /// omitted for public nodes and the kind word for directories and files.
    pub fn label(&self) -> String {
        let mut label = String::new();
        if let Some(visibility) = self.visibility {
            if visibility != Visibility::Public {
                label.push_str(visibility.as_str());
                label.push(' ');
            }
        }
        if let Some(kind) = self.kind.prefix() {
            label.push_str(kind);
            label.push(' ');
        }
        label.push_str(&self.name);
        if let Some(signature) = &self.signature {
            label.push_str(signature);
        }
        label
    }
}
