#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod assets;
pub mod compiler;
pub mod container;
pub mod error;
pub mod icon;
pub mod manifest;
pub mod writer;

pub use compiler::{ARTIFACT_EXTENSION, CompiledTemplate, compile};
pub use container::{BuildOutput, Container, Encoding};
pub use error::{CompileError, CompileResult};
pub use manifest::TemplateDescription;
