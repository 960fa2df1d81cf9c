//! Fatal error types for a scan
//!
//! Per-file analysis failures are not represented here: those are
//! [`ParseError`](crate::analyzer::ParseError) values, swallowed at the tree
//! assembly boundary so a single unparseable file never aborts the walk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the whole scan.
#[derive(Debug, Error)]
pub enum Error {
    /// No project configuration was discoverable from the scan root upward.
    /// There is nothing to analyze, so the run terminates.
    #[error("could not find a 'tsconfig.json' from '{}' upward", .path.display())]
    Configuration { path: PathBuf },

    /// A directory could not be enumerated. Skipping it silently would
    /// misrepresent the project structure, so this is fatal.
    #[error("cannot read directory '{}': {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
