//! Optional post-compile icon assignment for produced artifacts.

use std::path::Path;

use anyhow::Result;

/// Capability for tagging an artifact with a preview icon.
///
/// Icon assignment is a platform facility, not part of compilation: it runs
/// after the artifact is written, and its failure must never roll back the
/// already-written artifact.
pub trait IconTagger {
  /// Apply `image` as the visual tag of `artifact`.
  fn tag(&self, artifact: &Path, image: &Path) -> Result<()>;
}

/// Tagger used on platforms without a native icon facility.
#[derive(Debug, Default)]
pub struct NoopIconTagger;

impl IconTagger for NoopIconTagger {
  fn tag(&self, _artifact: &Path, _image: &Path) -> Result<()> {
    Ok(())
  }
}

/// The icon tagger available on the current platform, if any.
///
/// No target currently ships a native implementation, so the hook is absent
/// everywhere and callers fall through without tagging.
pub fn platform_tagger() -> Option<Box<dyn IconTagger>> {
  None
}
