//! Serialising containers to their on-disk form with atomic replacement.

use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::container::{BundleContainer, CONTENTS_ENTRY, Container, FlatContainer};
use crate::error::{CompileError, CompileResult};

/// Write `container` to `output_path`, replacing any previous artifact.
///
/// Both encodings stage the full artifact in a temporary sibling first, so a
/// failure part-way through never leaves a corrupt artifact visible at the
/// target path.
pub fn write_container(container: &Container, output_path: &Path) -> CompileResult<()> {
  match container {
    Container::Flat(flat) => write_flat(flat, output_path),
    Container::Bundle(bundle) => write_bundle(bundle, output_path),
  }
}

fn write_flat(flat: &FlatContainer, output_path: &Path) -> CompileResult<()> {
  let json = serde_json::to_string(flat).expect("flat container serializes to JSON");

  let mut staged = NamedTempFile::new_in(staging_dir(output_path))
    .map_err(|source| write_error(output_path, source))?;
  staged
    .write_all(json.as_bytes())
    .map_err(|source| write_error(output_path, source))?;

  // A previous bundle artifact at the same path cannot be renamed over.
  remove_previous_directory(output_path)?;
  staged
    .persist(output_path)
    .map_err(|persist| write_error(output_path, persist.error))?;
  Ok(())
}

fn write_bundle(bundle: &BundleContainer, output_path: &Path) -> CompileResult<()> {
  let staging = Builder::new()
    .prefix(".slidepack-staging")
    .tempdir_in(staging_dir(output_path))
    .map_err(|source| write_error(output_path, source))?;

  for (name, contents) in &bundle.entries {
    fs::write(staging.path().join(name), contents)
      .map_err(|source| write_error(output_path, source))?;
  }
  fs::write(staging.path().join(CONTENTS_ENTRY), &bundle.metadata)
    .map_err(|source| write_error(output_path, source))?;

  // The replacement is fully staged; only now may the old artifact go away.
  remove_previous(output_path)?;
  let staged = staging.keep();
  if let Err(source) = fs::rename(&staged, output_path) {
    let _ = fs::remove_dir_all(&staged);
    return Err(write_error(output_path, source));
  }
  Ok(())
}

fn staging_dir(output_path: &Path) -> &Path {
  match output_path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  }
}

fn remove_previous(output_path: &Path) -> CompileResult<()> {
  match fs::symlink_metadata(output_path) {
    Ok(meta) if meta.is_dir() => {
      fs::remove_dir_all(output_path).map_err(|source| write_error(output_path, source))
    }
    Ok(_) => fs::remove_file(output_path).map_err(|source| write_error(output_path, source)),
    Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(source) => Err(write_error(output_path, source)),
  }
}

fn remove_previous_directory(output_path: &Path) -> CompileResult<()> {
  match fs::symlink_metadata(output_path) {
    Ok(meta) if meta.is_dir() => {
      fs::remove_dir_all(output_path).map_err(|source| write_error(output_path, source))
    }
    _ => Ok(()),
  }
}

fn write_error(path: &Path, source: io::Error) -> CompileError {
  CompileError::Write {
    path: path.to_path_buf(),
    source,
  }
}
