//! Error taxonomy shared across the compile pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the compile pipeline.
pub type CompileResult<T> = Result<T, CompileError>;

/// Failures that abort a template compile.
///
/// Every variant carries the offending path so callers can diagnose the
/// failure without inspecting pipeline internals. All failures are terminal:
/// no step retries, and no partial artifact is ever left at the output path.
#[derive(Debug, Error)]
pub enum CompileError {
  /// The manifest file could not be read from disk.
  #[error("failed to read manifest {}", path.display())]
  ManifestRead {
    /// Path of the manifest that could not be read.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },

  /// The manifest content is not valid JSON or lacks a required field.
  #[error("invalid template manifest {}", path.display())]
  ManifestFormat {
    /// Path of the manifest that failed to parse.
    path: PathBuf,
    /// Parse failure, including any missing-field diagnostic.
    #[source]
    source: serde_json::Error,
  },

  /// A file referenced by the manifest is missing or unreadable.
  #[error("referenced asset not found: {}", path.display())]
  AssetNotFound {
    /// Full path that was attempted.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },

  /// The artifact could not be written and atomically moved into place.
  #[error("failed to write artifact {}", path.display())]
  Write {
    /// Output path of the artifact.
    path: PathBuf,
    /// Underlying I/O failure.
    #[source]
    source: io::Error,
  },
}
