//! Rendering the node tree to text
//!
//! Two render strategies over the same node graph:
//!
//! - `tree` - indented tree with branch glyphs
//! - `list` - nested markdown list
//!
//! Both formatters expose a pure `format()` returning the text and a
//! `print()` that writes the same lines to stdout with colors. `json`
//! serializes the raw node tree instead of rendering it.

mod json;
mod list;
mod tree;

pub use json::print_json;
pub use list::ListFormatter;
pub use tree::TreeFormatter;

use std::io;

use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::node::{NodeKind, TreeNode, Visibility};

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_color: true }
    }
}

/// Write one node label with colors: directories bold blue, file names
/// white, and non-public visibility words highlighted.
fn write_label(stdout: &mut StandardStream, node: &TreeNode) -> io::Result<()> {
    use std::io::Write;

    if node.is_container() {
        if node.kind == NodeKind::Directory {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
        } else {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::White)))?;
        }
        write!(stdout, "{}", node.name)?;
        stdout.reset()?;
        return Ok(());
    }

    if let Some(visibility) = node.visibility {
        if visibility != Visibility::Public {
            let color = match visibility {
                Visibility::Protected => Color::Yellow,
                _ => Color::Red,
            };
            stdout.set_color(ColorSpec::new().set_fg(Some(color)))?;
            write!(stdout, "{} ", visibility)?;
            stdout.reset()?;
        }
    }
    if let Some(kind) = node.kind.prefix() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{} ", kind)?;
        stdout.reset()?;
    }
    write!(stdout, "{}", node.name)?;
    if let Some(signature) = &node.signature {
        stdout.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(stdout, "{}", signature)?;
        stdout.reset()?;
    }
    Ok(())
}
