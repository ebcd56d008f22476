//! Asset resolution and the bundled default remark script.

use std::fs;
use std::io;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

use crate::error::{CompileError, CompileResult};

/// Canonical filename recorded in metadata when the default remark script is
/// substituted for an absent `remark` field.
pub const DEFAULT_REMARK_FILENAME: &str = "default-remark.js";

/// Bundled fallback scripting asset.
pub const DEFAULT_REMARK_SCRIPT: &[u8] = include_bytes!("../assets/default-remark.js");

/// A resolved asset ready for embedding.
///
/// Created once by [`resolve`], owned by the container builder and consumed
/// by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedAsset {
  /// Filename as referenced by the manifest.
  pub filename: String,
  /// Raw file contents.
  pub contents: Vec<u8>,
}

impl EmbeddedAsset {
  /// The default remark asset, materialised for embedding.
  pub fn default_remark() -> Self {
    Self {
      filename: DEFAULT_REMARK_FILENAME.to_string(),
      contents: DEFAULT_REMARK_SCRIPT.to_vec(),
    }
  }

  /// Base64-encode the contents for the flat container encoding.
  pub fn to_base64(&self) -> String {
    general_purpose::STANDARD.encode(&self.contents)
  }

  /// Entry name used for this asset in the bundle encoding.
  ///
  /// Bundles are flat: only the final path component survives, so
  /// `fonts/body.ttf` and `body.ttf` land under the same entry name.
  pub fn entry_name(&self) -> String {
    Path::new(&self.filename)
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| self.filename.clone())
  }
}

/// Read the asset `filename` relative to `base_dir`.
///
/// Each call re-reads the file; there is no cache. Fails with
/// [`CompileError::AssetNotFound`] carrying the attempted path when the file
/// is missing or unreadable. Absolute manifest paths are rejected rather than
/// silently escaping the manifest directory.
pub fn resolve(filename: &str, base_dir: &Path) -> CompileResult<EmbeddedAsset> {
  let relative = Path::new(filename);
  if relative.is_absolute() {
    return Err(CompileError::AssetNotFound {
      path: relative.to_path_buf(),
      source: io::Error::new(
        io::ErrorKind::InvalidInput,
        "manifest paths must be relative to the manifest directory",
      ),
    });
  }

  let path = base_dir.join(relative);
  let contents = fs::read(&path).map_err(|source| CompileError::AssetNotFound {
    path: path.clone(),
    source,
  })?;

  Ok(EmbeddedAsset {
    filename: filename.to_string(),
    contents,
  })
}
