//! convgen version information.
//!
//! Exposes the generator version as a single constant so the CLI and the generated file headers agree on it.

/// The convgen version string (for example, `0.1.0-alpha.1`).
pub const CONVGEN_VERSION: &str = env!("CARGO_PKG_VERSION");
