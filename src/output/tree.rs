//! Indented-tree formatter
//!
//! Renders the node graph in the classic tree style: the root line carries
//! no branch glyph, every other line is prefixed with its accumulated
//! ancestor prefix plus `└── ` for a last sibling or `├── ` otherwise.
//! Descendants of a non-last sibling continue the vertical rule; a last
//! sibling's descendants get blank continuation.

use std::io;

use termcolor::{ColorChoice, StandardStream};

use crate::node::TreeNode;

use super::{OutputConfig, write_label};

pub struct TreeFormatter {
    config: OutputConfig,
}

impl TreeFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the tree to a string. Pure: same tree in, same text out.
    pub fn format(&self, node: &TreeNode) -> String {
        let mut output = String::new();
        format_node(node, &mut output, "", true, true);
        output
    }

    /// Print the tree to stdout with colors.
    pub fn print(&self, node: &TreeNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        print_node(node, &mut stdout, "", true, true)
    }
}

fn format_node(node: &TreeNode, output: &mut String, prefix: &str, is_last: bool, is_root: bool) {
    if is_root {
        output.push_str(&node.label());
    } else {
        output.push_str(prefix);
        output.push_str(if is_last { "└── " } else { "├── " });
        output.push_str(&node.label());
    }
    output.push('\n');

    let child_prefix = child_prefix(prefix, is_last, is_root);
    for (i, child) in node.children.iter().enumerate() {
        let child_is_last = i == node.children.len() - 1;
        format_node(child, output, &child_prefix, child_is_last, false);
    }
}

fn print_node(
    node: &TreeNode,
    stdout: &mut StandardStream,
    prefix: &str,
    is_last: bool,
    is_root: bool,
) -> io::Result<()> {
    use std::io::Write;

    if !is_root {
        write!(stdout, "{}{}", prefix, if is_last { "└── " } else { "├── " })?;
    }
    write_label(stdout, node)?;
    writeln!(stdout)?;

    let child_prefix = child_prefix(prefix, is_last, is_root);
    for (i, child) in node.children.iter().enumerate() {
        let child_is_last = i == node.children.len() - 1;
        print_node(child, stdout, &child_prefix, child_is_last, false)?;
    }
    Ok(())
}

fn child_prefix(prefix: &str, is_last: bool, is_root: bool) -> String {
    if is_root {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    }
}
