//! Harness error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while locating, spawning, or collecting a trigger.
///
/// Note these cover harness failures only. A trigger dying from a signal
/// is not an error; it is a classified [`crate::ProbeOutcome`].
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The requested probe id is not in the catalog.
    #[error("unknown probe id '{0}'")]
    UnknownProbe(String),

    /// The trigger binary has not been built or the bin directory is wrong.
    #[error("trigger binary not found at {}", .path.display())]
    MissingBinary { path: PathBuf },

    /// Spawning the trigger process failed.
    #[error("failed to spawn trigger '{bin}'")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// Collecting the trigger's output failed.
    #[error("failed to collect output from trigger '{bin}'")]
    Collect {
        bin: String,
        #[source]
        source: std::io::Error,
    },
}
