#![forbid(unsafe_code)]
//! convgen: server type-conversion generator
//!
//! For every service of an API definition, convgen produces one Rust source file holding the constructors that
//! convert wire messages into service payloads (and service results into wire messages), the validation functions
//! of the wire types, and the shared transform helpers those constructors call.
//!
//! ## Pipeline
//!
//! ```text
//! Manifest → Service → collect → assemble (DedupIndex) → Artifact → render → write
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod codegen;
pub mod config;
pub mod manifest;
pub mod model;
pub mod output;
pub mod render;
pub mod version;

pub use codegen::{Artifact, DedupIndex, Section, ServerTypes, server_type_files};
pub use config::GeneratorConfig;
pub use manifest::Manifest;
pub use render::{RenderConfig, RenderError, render_all, render_artifact};
