//! One-shot compile pipeline sequencing load, build and write.

use std::path::{Path, PathBuf};

use crate::container::{self, Encoding};
use crate::error::CompileResult;
use crate::manifest::{self, TemplateDescription};
use crate::writer;

/// File extension given to compiled template artifacts.
pub const ARTIFACT_EXTENSION: &str = "slidepack";

/// Outcome of a successful compile.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
  /// Path of the written artifact, next to the manifest.
  pub artifact_path: PathBuf,
  /// Preview image path resolved against the manifest directory, for
  /// post-compile hooks such as icon assignment.
  pub preview_image_path: PathBuf,
  /// Description as persisted, with any default substitution applied.
  pub description: TemplateDescription,
}

/// Compile the manifest at `manifest_path` into an artifact beside it.
///
/// The artifact path is the manifest path with its extension replaced by
/// [`ARTIFACT_EXTENSION`]. Load, build and write run in sequence,
/// short-circuiting on the first failure; errors propagate unchanged and no
/// partial artifact is left behind. Each invocation is independent; separate
/// compiles may run in parallel as long as their output paths differ.
pub fn compile(manifest_path: &Path, encoding: Encoding) -> CompileResult<CompiledTemplate> {
  let description = manifest::load_description(manifest_path)?;
  let base_dir = base_dir(manifest_path);

  let output = container::build_container(&description, base_dir, encoding)?;

  let artifact_path = manifest_path.with_extension(ARTIFACT_EXTENSION);
  writer::write_container(&output.container, &artifact_path)?;

  Ok(CompiledTemplate {
    artifact_path,
    preview_image_path: base_dir.join(&output.description.preview_image),
    description: output.description,
  })
}

fn base_dir(manifest_path: &Path) -> &Path {
  match manifest_path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  }
}
