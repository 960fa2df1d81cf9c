//! Declaration classification
//!
//! Turns analyzer records into tree nodes: derives each declaration's
//! visibility, applies the caller's visibility threshold, and maps
//! declaration kinds onto node kinds. Declarations failing the threshold are
//! omitted entirely, never shown as stubs.
//!
//! Visibility derivation, first match wins:
//! 1. re-exports and default exports are public (publishing is itself an
//!    act of making something public)
//! 2. an explicit `private`/`protected` keyword wins over an export keyword
//! 3. exported top-level declarations are public
//! 4. unannotated class members are public (unannotated members are
//!    accessible by language convention)
//! 5. everything else at top level is private

use crate::analyzer::{Access, DeclKind, Declaration, ExprShape, Member, MemberKind};
use crate::node::{NodeKind, TreeNode, Visibility};

/// Classify every declaration of a file, preserving declaration order.
pub fn classify_file(declarations: &[Declaration], threshold: Visibility) -> Vec<TreeNode> {
    declarations
        .iter()
        .filter_map(|decl| classify(decl, declarations, threshold))
        .collect()
}

/// Classify a single declaration, or omit it when it fails the threshold.
/// `siblings` is the file's full declaration list; identifier-shaped default
/// exports resolve against it.
pub fn classify(
    decl: &Declaration,
    siblings: &[Declaration],
    threshold: Visibility,
) -> Option<TreeNode> {
    let visibility = declaration_visibility(decl);
    if !visibility.is_visible_at(threshold) {
        return None;
    }

    let mut node = match &decl.kind {
        DeclKind::Function { signature } => {
            let mut node =
                TreeNode::declaration(NodeKind::Function, declared_name(decl), visibility);
            node.signature = Some(signature.clone());
            node
        }
        DeclKind::Class { members } => {
            // a class always expands, even when no member survives
            let mut node = TreeNode::declaration(NodeKind::Class, declared_name(decl), visibility);
            node.children = members
                .iter()
                .filter_map(|member| classify_member(member, threshold))
                .collect();
            node
        }
        DeclKind::Interface => {
            TreeNode::declaration(NodeKind::Interface, declared_name(decl), visibility)
        }
        DeclKind::Const { signature } => {
            let mut node = TreeNode::declaration(NodeKind::Const, declared_name(decl), visibility);
            node.signature = signature.clone();
            node
        }
        DeclKind::Reexport { display } => {
            TreeNode::declaration(NodeKind::Const, display.clone(), Visibility::Public)
        }
        DeclKind::DefaultExport { expr } => classify_default_export(expr, siblings, threshold),
    };

    node.is_default = decl.is_default;
    Some(node)
}

/// Classify a class member, or omit it when it fails the threshold.
pub fn classify_member(member: &Member, threshold: Visibility) -> Option<TreeNode> {
    let visibility = member_visibility(member);
    if !visibility.is_visible_at(threshold) {
        return None;
    }

    let kind = match member.kind {
        MemberKind::Property => NodeKind::Property,
        _ => NodeKind::Method,
    };
    let mut node = TreeNode::declaration(kind, member_display_name(member), visibility);
    node.signature = member.signature.clone();
    Some(node)
}

/// Classify the right-hand expression of `export default ...` by its shape.
/// Always public: the threshold can never filter the node itself, only class
/// members reached through an identifier reference.
fn classify_default_export(
    expr: &ExprShape,
    siblings: &[Declaration],
    threshold: Visibility,
) -> TreeNode {
    match expr {
        ExprShape::Function { signature } => {
            let mut node = TreeNode::declaration(NodeKind::Function, "default", Visibility::Public);
            node.signature = Some(signature.clone());
            node
        }
        ExprShape::Object => {
            let mut node = TreeNode::declaration(NodeKind::Const, "default", Visibility::Public);
            node.signature = Some(" = {...}".to_string());
            node
        }
        ExprShape::Literal(text) => {
            let mut node = TreeNode::declaration(NodeKind::Const, "default", Visibility::Public);
            node.signature = Some(format!(" = {}", text));
            node
        }
        ExprShape::Identifier(name) => {
            let referenced = siblings
                .iter()
                .find(|decl| !decl.is_default && decl.name.as_deref() == Some(name.as_str()));
            match referenced.map(|decl| &decl.kind) {
                Some(DeclKind::Function { signature }) => {
                    let mut node =
                        TreeNode::declaration(NodeKind::Function, name.clone(), Visibility::Public);
                    node.signature = Some(signature.clone());
                    node
                }
                Some(DeclKind::Class { members }) => {
                    let mut node =
                        TreeNode::declaration(NodeKind::Class, name.clone(), Visibility::Public);
                    node.children = members
                        .iter()
                        .filter_map(|member| classify_member(member, threshold))
                        .collect();
                    node
                }
                Some(DeclKind::Interface) => {
                    TreeNode::declaration(NodeKind::Interface, name.clone(), Visibility::Public)
                }
                Some(DeclKind::Const { signature }) => {
                    let mut node =
                        TreeNode::declaration(NodeKind::Const, name.clone(), Visibility::Public);
                    node.signature = signature.clone();
                    node
                }
                _ => TreeNode::declaration(NodeKind::Const, name.clone(), Visibility::Public),
            }
        }
    }
}

fn declaration_visibility(decl: &Declaration) -> Visibility {
    if decl.is_default || matches!(decl.kind, DeclKind::Reexport { .. }) {
        return Visibility::Public;
    }
    match decl.access {
        Some(Access::Private) => Visibility::Private,
        Some(Access::Protected) => Visibility::Protected,
        Some(Access::Public) => Visibility::Public,
        None if decl.exported => Visibility::Public,
        None => Visibility::Private,
    }
}

fn member_visibility(member: &Member) -> Visibility {
    match member.access {
        Some(Access::Private) => Visibility::Private,
        Some(Access::Protected) => Visibility::Protected,
        Some(Access::Public) | None => Visibility::Public,
    }
}

fn declared_name(decl: &Declaration) -> String {
    match &decl.name {
        Some(name) => name.clone(),
        None if decl.is_default => "default".to_string(),
        None => "<anonymous>".to_string(),
    }
}

fn member_display_name(member: &Member) -> String {
    let mut name = String::new();
    if member.is_static {
        name.push_str("static ");
    }
    match member.kind {
        MemberKind::Getter => name.push_str("get "),
        MemberKind::Setter => name.push_str("set "),
        _ => {}
    }
    name.push_str(&member.name);
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str, access: Option<Access>) -> Member {
        Member {
            name: name.to_string(),
            kind: MemberKind::Method,
            access,
            is_static: false,
            signature: Some("()".to_string()),
        }
    }

    fn const_decl(name: &str, exported: bool) -> Declaration {
        Declaration {
            name: Some(name.to_string()),
            kind: DeclKind::Const { signature: None },
            exported,
            is_default: false,
            access: None,
        }
    }

    #[test]
    fn test_class_members_at_protected_threshold() {
        // one public method, one protected, one private, one public getter
        let class = Declaration {
            name: Some("NamedClass".to_string()),
            kind: DeclKind::Class {
                members: vec![
                    method("octuple", Some(Access::Public)),
                    method("quadruple", Some(Access::Protected)),
                    method("triple", Some(Access::Private)),
                    Member {
                        name: "version".to_string(),
                        kind: MemberKind::Getter,
                        access: None,
                        is_static: false,
                        signature: Some("()".to_string()),
                    },
                ],
            },
            exported: true,
            is_default: false,
            access: None,
        };

        let node = classify(&class, std::slice::from_ref(&class), Visibility::Protected)
            .expect("class should be visible");
        let names: Vec<&str> = node.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["octuple", "quadruple", "get version"]);
        assert_eq!(node.children[1].visibility, Some(Visibility::Protected));
    }

    #[test]
    fn test_unexported_const_is_private() {
        let decls = [const_decl("privateNumber", false), const_decl("publicArray", true)];

        let public = classify_file(&decls, Visibility::Public);
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name, "publicArray");
        assert_eq!(public[0].kind, NodeKind::Const);

        let private = classify_file(&decls, Visibility::Private);
        assert_eq!(private.len(), 2);
        assert_eq!(private[0].visibility, Some(Visibility::Private));
    }

    #[test]
    fn test_default_export_arrow_is_public_function() {
        let decl = Declaration {
            name: None,
            kind: DeclKind::DefaultExport {
                expr: ExprShape::Function {
                    signature: "(x: number): number".to_string(),
                },
            },
            exported: true,
            is_default: true,
            access: None,
        };

        let node = classify(&decl, std::slice::from_ref(&decl), Visibility::Public)
            .expect("default export should be visible");
        assert_eq!(node.name, "default");
        assert_eq!(node.kind, NodeKind::Function);
        assert_eq!(node.visibility, Some(Visibility::Public));
        assert!(node.is_default);
        assert_eq!(node.signature.as_deref(), Some("(x: number): number"));
    }

    #[test]
    fn test_default_export_identifier_resolves_to_sibling() {
        let class = Declaration {
            name: Some("App".to_string()),
            kind: DeclKind::Class {
                members: vec![method("run", None)],
            },
            exported: false,
            is_default: false,
            access: None,
        };
        let default = Declaration {
            name: None,
            kind: DeclKind::DefaultExport {
                expr: ExprShape::Identifier("App".to_string()),
            },
            exported: true,
            is_default: true,
            access: None,
        };
        let decls = [class, default];

        let nodes = classify_file(&decls, Visibility::Public);
        // the unexported class itself is private, only the default survives
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "App");
        assert_eq!(nodes[0].kind, NodeKind::Class);
        assert!(nodes[0].is_default);
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0].name, "run");
    }

    #[test]
    fn test_unresolved_default_identifier_falls_back_to_const() {
        let decl = Declaration {
            name: None,
            kind: DeclKind::DefaultExport {
                expr: ExprShape::Identifier("imported".to_string()),
            },
            exported: true,
            is_default: true,
            access: None,
        };
        let node = classify(&decl, std::slice::from_ref(&decl), Visibility::Public).unwrap();
        assert_eq!(node.kind, NodeKind::Const);
        assert_eq!(node.name, "imported");
    }

    #[test]
    fn test_default_export_literal_signature() {
        let decl = Declaration {
            name: None,
            kind: DeclKind::DefaultExport {
                expr: ExprShape::Literal("42".to_string()),
            },
            exported: true,
            is_default: true,
            access: None,
        };
        let node = classify(&decl, std::slice::from_ref(&decl), Visibility::Public).unwrap();
        assert_eq!(node.label(), "const default = 42");
    }

    #[test]
    fn test_reexport_is_forced_public() {
        let decl = Declaration {
            name: None,
            kind: DeclKind::Reexport {
                display: "* from \"./internal\"".to_string(),
            },
            exported: true,
            is_default: false,
            access: None,
        };
        let node = classify(&decl, std::slice::from_ref(&decl), Visibility::Public).unwrap();
        assert_eq!(node.kind, NodeKind::Const);
        assert_eq!(node.visibility, Some(Visibility::Public));
        assert_eq!(node.name, "* from \"./internal\"");
    }

    #[test]
    fn test_class_with_no_visible_members_still_classifies() {
        let class = Declaration {
            name: Some("Opaque".to_string()),
            kind: DeclKind::Class {
                members: vec![method("hidden", Some(Access::Private))],
            },
            exported: true,
            is_default: false,
            access: None,
        };
        let node = classify(&class, std::slice::from_ref(&class), Visibility::Public).unwrap();
        assert_eq!(node.kind, NodeKind::Class);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_static_accessor_name_prefixes() {
        let member = Member {
            name: "instance".to_string(),
            kind: MemberKind::Getter,
            access: None,
            is_static: true,
            signature: Some("()".to_string()),
        };
        let node = classify_member(&member, Visibility::Public).unwrap();
        assert_eq!(node.name, "static get instance");
        assert_eq!(node.kind, NodeKind::Method);
    }

    #[test]
    fn test_visibility_monotonicity() {
        let decls = [
            const_decl("a", true),
            const_decl("b", false),
            Declaration {
                name: Some("C".to_string()),
                kind: DeclKind::Class {
                    members: vec![
                        method("pub", None),
                        method("prot", Some(Access::Protected)),
                        method("priv", Some(Access::Private)),
                    ],
                },
                exported: true,
                is_default: false,
                access: None,
            },
        ];

        let count = |threshold: Visibility| -> usize {
            fn total(nodes: &[TreeNode]) -> usize {
                nodes.iter().map(|n| 1 + total(&n.children)).sum()
            }
            total(&classify_file(&decls, threshold))
        };

        assert!(count(Visibility::Public) <= count(Visibility::Protected));
        assert!(count(Visibility::Protected) <= count(Visibility::Private));
    }
}
