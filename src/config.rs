//! Generator configuration
//!
//! Controls where artifacts are placed and which package paths the generated header imports from.

use std::path::PathBuf;

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Root directory of generated code, relative to the output directory
    pub gen_dir: PathBuf,
    /// Wire protocol name; used as a path segment and in the header title
    pub protocol: String,
    /// Rust path of the generated package, used to build the default header imports
    pub gen_pkg: String,
    /// File name of each artifact
    pub file_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            gen_dir: PathBuf::from("gen"),
            protocol: "grpc".to_string(),
            gen_pkg: "crate::generated".to_string(),
            file_name: "types.rs".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated code root directory
    pub fn with_gen_dir(mut self, gen_dir: impl Into<PathBuf>) -> Self {
        self.gen_dir = gen_dir.into();
        self
    }

    /// Set the wire protocol name
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Set the generated package path
    pub fn with_gen_pkg(mut self, gen_pkg: impl Into<String>) -> Self {
        self.gen_pkg = gen_pkg.into();
        self
    }

    /// Set the artifact file name
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}
