//! Nested-list formatter
//!
//! Renders the node graph as a nested markdown list: the root line carries
//! no marker, every descendant is indented two spaces per depth level below
//! the root's children and prefixed with `- `.

use std::io;

use termcolor::{ColorChoice, StandardStream};

use crate::node::TreeNode;

use super::{OutputConfig, write_label};

pub struct ListFormatter {
    config: OutputConfig,
}

impl ListFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render the list to a string. Pure: same tree in, same text out.
    pub fn format(&self, node: &TreeNode) -> String {
        let mut output = String::new();
        format_node(node, &mut output, 0);
        output
    }

    /// Print the list to stdout with colors.
    pub fn print(&self, node: &TreeNode) -> io::Result<()> {
        let choice = if self.config.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        print_node(node, &mut stdout, 0)
    }
}

fn format_node(node: &TreeNode, output: &mut String, depth: usize) {
    if depth == 0 {
        output.push_str(&node.label());
    } else {
        for _ in 1..depth {
            output.push_str("  ");
        }
        output.push_str("- ");
        output.push_str(&node.label());
    }
    output.push('\n');

    for child in &node.children {
        format_node(child, output, depth + 1);
    }
}

fn print_node(node: &TreeNode, stdout: &mut StandardStream, depth: usize) -> io::Result<()> {
    use std::io::Write;

    if depth > 0 {
        for _ in 1..depth {
            write!(stdout, "  ")?;
        }
        write!(stdout, "- ")?;
    }
    write_label(stdout, node)?;
    writeln!(stdout)?;

    for child in &node.children {
        print_node(child, stdout, depth + 1)?;
    }
    Ok(())
}
