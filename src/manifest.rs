//! Loading and interpreting template manifests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompileError, CompileResult};

/// Parsed representation of a template manifest.
///
/// All path fields are filenames relative to the manifest's own directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescription {
  /// Layout file rendered for each slide.
  pub template: String,
  /// Stylesheet applied to the rendered slides.
  pub stylesheet: String,
  /// Preview image shown in template pickers.
  pub preview_image: String,
  /// Font files shipped with the template, in presentation order.
  #[serde(default)]
  pub fonts: Vec<String>,
  /// Scripting asset driving the slideshow. When absent, the bundled default
  /// is substituted at build time and recorded here before persisting.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub remark: Option<String>,
}

/// Load and parse the template manifest at `path`.
///
/// Fails with [`CompileError::ManifestRead`] when the file is unreadable and
/// [`CompileError::ManifestFormat`] when the content is not valid JSON or is
/// missing a required field. Reads the file once and has no other side
/// effects.
pub fn load_description(path: &Path) -> CompileResult<TemplateDescription> {
  let contents = fs::read_to_string(path).map_err(|source| CompileError::ManifestRead {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&contents).map_err(|source| CompileError::ManifestFormat {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn parses_a_complete_manifest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("theme.json");
    fs::write(
      &path,
      r#"{
        "template": "t.html",
        "stylesheet": "s.css",
        "previewImage": "p.png",
        "fonts": ["f1.ttf", "f2.ttf"],
        "remark": "custom.js"
      }"#,
    )
    .unwrap();

    let description = load_description(&path).unwrap();
    assert_eq!(description.template, "t.html");
    assert_eq!(description.stylesheet, "s.css");
    assert_eq!(description.preview_image, "p.png");
    assert_eq!(description.fonts, vec!["f1.ttf", "f2.ttf"]);
    assert_eq!(description.remark.as_deref(), Some("custom.js"));
  }

  #[test]
  fn optional_fields_default_when_omitted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("theme.json");
    fs::write(
      &path,
      r#"{"template": "t.html", "stylesheet": "s.css", "previewImage": "p.png"}"#,
    )
    .unwrap();

    let description = load_description(&path).unwrap();
    assert!(description.fonts.is_empty());
    assert!(description.remark.is_none());
  }

  #[test]
  fn missing_required_field_is_a_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("theme.json");
    fs::write(&path, r#"{"stylesheet": "s.css", "previewImage": "p.png"}"#).unwrap();

    let err = load_description(&path).unwrap_err();
    assert!(matches!(err, CompileError::ManifestFormat { .. }));
    assert!(err.to_string().contains("theme.json"));
  }

  #[test]
  fn malformed_json_is_a_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("theme.json");
    fs::write(&path, "not json at all").unwrap();

    let err = load_description(&path).unwrap_err();
    assert!(matches!(err, CompileError::ManifestFormat { .. }));
  }

  #[test]
  fn unreadable_manifest_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_description(&path).unwrap_err();
    assert!(matches!(err, CompileError::ManifestRead { .. }));
  }
}
