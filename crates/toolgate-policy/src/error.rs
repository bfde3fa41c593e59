// error.rs — Error types for policy document loading.
//
// The evaluation core itself never fails: unresolvable matcher references
// match nothing, invalid patterns never match, unknown requirement keys
// are satisfied. Only the I/O boundary — reading and parsing the document
// — produces errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading a policy document.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Failed to read the policy file.
    #[error("failed to read policy at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not valid policy YAML.
    #[error("failed to parse policy document: {0}")]
    Parse(#[from] serde_yaml::Error),
}
