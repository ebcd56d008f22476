//! Command-line entry point for the template compiler.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use slidepack::container::Encoding;
use slidepack::{compiler, icon};

/// Compile a presentation template manifest into a self-contained artifact.
#[derive(Debug, Parser)]
#[command(name = "slidepack", version, about)]
struct Cli {
  /// Path to the template manifest JSON file.
  manifest: PathBuf,

  /// Container encoding for the produced artifact.
  #[arg(long, value_enum, default_value_t = EncodingArg::Flat)]
  encoding: EncodingArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EncodingArg {
  /// Single JSON file with base64 payloads.
  Flat,
  /// Directory bundle of raw entries.
  Bundle,
}

impl From<EncodingArg> for Encoding {
  fn from(arg: EncodingArg) -> Self {
    match arg {
      EncodingArg::Flat => Encoding::Flat,
      EncodingArg::Bundle => Encoding::Bundle,
    }
  }
}

fn run(cli: &Cli) -> Result<PathBuf> {
  let compiled = compiler::compile(&cli.manifest, cli.encoding.into())?;

  // The artifact is already on disk; a failed tag is a warning, not an error.
  if let Some(tagger) = icon::platform_tagger() {
    if let Err(err) = tagger.tag(&compiled.artifact_path, &compiled.preview_image_path) {
      eprintln!("warning: could not assign artifact icon: {err:#}");
    }
  }

  Ok(compiled.artifact_path)
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  match run(&cli) {
    Ok(artifact) => {
      println!("{}", artifact.display());
      ExitCode::SUCCESS
    }
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}
