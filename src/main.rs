//! CLI entry point for canopy

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use canopy::{
    IgnorePattern, ListFormatter, OutputConfig, PathFilter, TreeFormatter, Visibility,
    default_patterns, print_json, scan,
};
use clap::{Parser, ValueEnum};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            // Respect FORCE_COLOR environment variable
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            // Respect TERM=dumb
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            // Check if stdout is a TTY
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "canopy")]
#[command(about = "Print a visibility-filtered tree of a TypeScript project's exported API")]
#[command(version)]
struct Args {
    /// Ignore paths matching PATTERN: a substring, or /regex/ with an
    /// optional trailing i for case-insensitive matching
    #[arg(short = 'I', long = "ignore", num_args = 1.., value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Don't include the default ignore patterns
    #[arg(long = "no-default")]
    no_default: bool,

    /// Directory to scan (defaults to the current working directory)
    #[arg(long = "cwd", value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Include protected and private declarations
    #[arg(long)]
    private: bool,

    /// Include protected declarations
    #[arg(long)]
    protected: bool,

    /// Render as a nested markdown list
    #[arg(long, conflicts_with = "tree")]
    list: bool,

    /// Render as an indented tree (default)
    #[arg(long)]
    tree: bool,

    /// Output the node tree as JSON
    #[arg(long, conflicts_with_all = ["list", "tree"])]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

fn main() {
    let args = Args::parse();

    let mut patterns = Vec::new();
    for raw in &args.ignore {
        match IgnorePattern::parse(raw) {
            Ok(pattern) => patterns.push(pattern),
            Err(e) => {
                eprintln!("canopy: invalid --ignore pattern '{}': {}", raw, e);
                process::exit(1);
            }
        }
    }
    if !args.no_default {
        patterns.extend(default_patterns());
    }
    let filter = PathFilter::new(patterns);

    // --private wins over --protected when both are given
    let threshold = if args.private {
        Visibility::Private
    } else if args.protected {
        Visibility::Protected
    } else {
        Visibility::Public
    };

    let root = match args.cwd {
        Some(path) if path.is_absolute() => path,
        Some(path) => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let tree = match scan(&root, &filter, threshold) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("canopy: {}", e);
            process::exit(1);
        }
    };

    let result = if args.json {
        print_json(&tree)
    } else {
        let config = OutputConfig {
            use_color: should_use_color(args.color),
        };
        if args.list {
            ListFormatter::new(config).print(&tree)
        } else {
            TreeFormatter::new(config).print(&tree)
        }
    };

    if let Err(e) = result {
        eprintln!("canopy: error writing output: {}", e);
        process::exit(1);
    }
}
