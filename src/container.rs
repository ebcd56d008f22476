//! Assembling resolved assets into one of the two container encodings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets::{self, EmbeddedAsset};
use crate::error::CompileResult;
use crate::manifest::TemplateDescription;

/// Reserved bundle entry holding the serialized template metadata.
pub const CONTENTS_ENTRY: &str = "Contents";

/// Container encodings supported by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
  /// Single JSON document with base64 payloads.
  Flat,
  /// Directory-style bundle of raw entries plus a metadata entry.
  Bundle,
}

/// One embedded asset in its flat-encoding shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64Asset {
  /// Filename as referenced by the manifest.
  pub filename: String,
  /// Base64-encoded file contents.
  pub contents: String,
}

/// Flat single-file container. The document is both metadata and payload; no
/// separate manifest blob is embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatContainer {
  /// Preview image shown in template pickers.
  pub preview_image: Base64Asset,
  /// Layout file rendered for each slide.
  pub template: Base64Asset,
  /// Stylesheet applied to the rendered slides.
  pub stylesheet: Base64Asset,
  /// Scripting asset, either the manifest's or the substituted default.
  pub remark: Base64Asset,
  /// Font payloads in manifest order.
  pub fonts: Vec<Base64Asset>,
}

/// Directory-style container of raw entries plus serialized metadata.
#[derive(Debug, Clone)]
pub struct BundleContainer {
  /// Entry name to raw payload. Names are unique by construction; when the
  /// asset map and the font map collide on a name, the asset payload wins.
  pub entries: BTreeMap<String, Vec<u8>>,
  /// Persisted description serialized as JSON, written under
  /// [`CONTENTS_ENTRY`]. Held outside the entry map so the reserved name can
  /// never be shadowed by an asset.
  pub metadata: String,
}

/// The packaged result in one of the two encodings.
#[derive(Debug, Clone)]
pub enum Container {
  /// Flat single-file JSON container.
  Flat(FlatContainer),
  /// Directory-style bundle container.
  Bundle(BundleContainer),
}

/// Container plus the description that was actually persisted.
#[derive(Debug, Clone)]
pub struct BuildOutput {
  /// The assembled container.
  pub container: Container,
  /// The input description with any default substitution applied. When the
  /// manifest omitted `remark`, this names the substituted default asset
  /// rather than leaving the field absent.
  pub description: TemplateDescription,
}

/// Resolve every referenced asset and assemble a container.
///
/// Resolution order is previewImage, template, stylesheet, remark (or the
/// default substitution), then fonts in manifest order. The first failure
/// aborts the whole build; nothing is written here.
pub fn build_container(
  description: &TemplateDescription,
  base_dir: &Path,
  encoding: Encoding,
) -> CompileResult<BuildOutput> {
  let preview_image = assets::resolve(&description.preview_image, base_dir)?;
  let template = assets::resolve(&description.template, base_dir)?;
  let stylesheet = assets::resolve(&description.stylesheet, base_dir)?;

  let remark = match description.remark.as_deref() {
    Some(filename) => assets::resolve(filename, base_dir)?,
    None => EmbeddedAsset::default_remark(),
  };

  let mut fonts = Vec::with_capacity(description.fonts.len());
  for filename in &description.fonts {
    fonts.push(assets::resolve(filename, base_dir)?);
  }

  let mut description = description.clone();
  description.remark = Some(remark.filename.clone());

  let container = match encoding {
    Encoding::Flat => Container::Flat(FlatContainer {
      preview_image: to_base64_asset(&preview_image),
      template: to_base64_asset(&template),
      stylesheet: to_base64_asset(&stylesheet),
      remark: to_base64_asset(&remark),
      fonts: fonts.iter().map(to_base64_asset).collect(),
    }),
    Encoding::Bundle => {
      let mut entries = BTreeMap::new();
      for asset in [&preview_image, &template, &stylesheet, &remark] {
        entries.insert(asset.entry_name(), asset.contents.clone());
      }
      for font in &fonts {
        // First-write-wins: a font never displaces a non-font asset.
        entries
          .entry(font.entry_name())
          .or_insert_with(|| font.contents.clone());
      }
      let metadata = serde_json::to_string_pretty(&description)
        .expect("template description serializes to JSON");
      Container::Bundle(BundleContainer { entries, metadata })
    }
  };

  Ok(BuildOutput {
    container,
    description,
  })
}

fn to_base64_asset(asset: &EmbeddedAsset) -> Base64Asset {
  Base64Asset {
    filename: asset.filename.clone(),
    contents: asset.to_base64(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assets::{DEFAULT_REMARK_FILENAME, DEFAULT_REMARK_SCRIPT};
  use crate::error::CompileError;
  use base64::{Engine as _, engine::general_purpose};
  use std::fs;
  use std::path::Path;
  use tempfile::tempdir;

  fn description() -> TemplateDescription {
    TemplateDescription {
      template: "t.html".to_string(),
      stylesheet: "s.css".to_string(),
      preview_image: "p.png".to_string(),
      fonts: vec!["f1.ttf".to_string(), "f2.ttf".to_string()],
      remark: None,
    }
  }

  fn write_assets(base: &Path) {
    fs::write(base.join("t.html"), b"<html>layout</html>").unwrap();
    fs::write(base.join("s.css"), b"body { margin: 0 }").unwrap();
    fs::write(base.join("p.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();
    fs::write(base.join("f1.ttf"), b"font-one").unwrap();
    fs::write(base.join("f2.ttf"), b"font-two").unwrap();
  }

  fn decode(asset: &Base64Asset) -> Vec<u8> {
    general_purpose::STANDARD.decode(&asset.contents).unwrap()
  }

  #[test]
  fn flat_container_embeds_base64_payloads_in_order() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());

    let output = build_container(&description(), dir.path(), Encoding::Flat).unwrap();
    let Container::Flat(flat) = output.container else {
      panic!("expected flat container");
    };

    assert_eq!(decode(&flat.template), b"<html>layout</html>");
    assert_eq!(decode(&flat.stylesheet), b"body { margin: 0 }");
    assert_eq!(decode(&flat.preview_image), [0x89, 0x50, 0x4e, 0x47]);
    let font_names: Vec<&str> = flat
      .fonts
      .iter()
      .map(|font| font.filename.as_str())
      .collect();
    assert_eq!(font_names, vec!["f1.ttf", "f2.ttf"]);
  }

  #[test]
  fn absent_remark_substitutes_the_default_and_updates_metadata() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());

    let output = build_container(&description(), dir.path(), Encoding::Flat).unwrap();
    assert_eq!(
      output.description.remark.as_deref(),
      Some(DEFAULT_REMARK_FILENAME)
    );

    let Container::Flat(flat) = output.container else {
      panic!("expected flat container");
    };
    assert_eq!(flat.remark.filename, DEFAULT_REMARK_FILENAME);
    assert_eq!(decode(&flat.remark), DEFAULT_REMARK_SCRIPT);
  }

  #[test]
  fn explicit_remark_is_resolved_not_substituted() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());
    fs::write(dir.path().join("custom.js"), b"slideshow()").unwrap();

    let mut input = description();
    input.remark = Some("custom.js".to_string());

    let output = build_container(&input, dir.path(), Encoding::Bundle).unwrap();
    assert_eq!(output.description.remark.as_deref(), Some("custom.js"));

    let Container::Bundle(bundle) = output.container else {
      panic!("expected bundle container");
    };
    assert_eq!(bundle.entries["custom.js"], b"slideshow()");
  }

  #[test]
  fn build_never_mutates_its_input() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());

    let input = description();
    let output = build_container(&input, dir.path(), Encoding::Flat).unwrap();

    assert!(input.remark.is_none());
    assert!(output.description.remark.is_some());
  }

  #[test]
  fn bundle_metadata_round_trips_the_persisted_description() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());

    let output = build_container(&description(), dir.path(), Encoding::Bundle).unwrap();
    let Container::Bundle(bundle) = output.container else {
      panic!("expected bundle container");
    };

    let persisted: TemplateDescription = serde_json::from_str(&bundle.metadata).unwrap();
    assert_eq!(persisted, output.description);
    assert_eq!(persisted.remark.as_deref(), Some(DEFAULT_REMARK_FILENAME));
  }

  #[test]
  fn colliding_font_does_not_displace_an_asset_entry() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());
    fs::create_dir_all(dir.path().join("fonts")).unwrap();
    fs::write(dir.path().join("fonts/s.css"), b"font bytes").unwrap();

    let mut input = description();
    input.fonts.push("fonts/s.css".to_string());

    let output = build_container(&input, dir.path(), Encoding::Bundle).unwrap();
    let Container::Bundle(bundle) = output.container else {
      panic!("expected bundle container");
    };

    assert_eq!(bundle.entries["s.css"], b"body { margin: 0 }");
  }

  #[test]
  fn first_missing_asset_aborts_the_build() {
    let dir = tempdir().unwrap();
    write_assets(dir.path());
    fs::remove_file(dir.path().join("f2.ttf")).unwrap();

    let err = build_container(&description(), dir.path(), Encoding::Flat).unwrap_err();
    match err {
      CompileError::AssetNotFound { path, .. } => assert!(path.ends_with("f2.ttf")),
      other => panic!("unexpected error: {other}"),
    }
  }
}
