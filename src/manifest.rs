//! Service manifest loading
//!
//! The endpoint enumerator hands services over as a JSON manifest:
//!
//! ```json
//! {
//!   "services": [
//!     {
//!       "name": "Adder",
//!       "endpoints": [
//!         {
//!           "name": "Add",
//!           "request": {
//!             "init": {
//!               "name": "NewAddPayload",
//!               "param_type_ref": "pb::AddRequest",
//!               "result_type_ref": "adder::AddPayload",
//!               "code": "let res = adder::AddPayload { a: v.a, b: v.b };"
//!             }
//!           }
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Decoding errors keep the manifest text and the failing line/column so they can be reported with `miette`.

use std::fs;
use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Service;

/// Maximum manifest size (64 MB)
pub const MAX_MANIFEST_SIZE: u64 = 64 * 1024 * 1024;

/// Errors that occur while loading a manifest
#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("cannot read manifest '{path}': {source}")]
    #[diagnostic(code(convgen::manifest::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest '{path}' is too large ({size} bytes, max {max} bytes)")]
    #[diagnostic(code(convgen::manifest::too_large))]
    TooLarge { path: String, size: u64, max: u64 },

    #[error("invalid manifest: {message}")]
    #[diagnostic(code(convgen::manifest::decode), help("check the manifest against the service descriptor schema"))]
    Decode {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

/// All services of one API definition, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Manifest {
    /// Decode a manifest from JSON text. `name` labels the source in diagnostics.
    pub fn parse(name: &str, source: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(source).map_err(|e| {
            let offset = SourceOffset::from_location(source, e.line(), e.column());
            ManifestError::Decode {
                message: e.to_string(),
                src: NamedSource::new(name, source.to_string()),
                span: SourceSpan::new(offset, 0),
            }
        })
    }

    /// Read and decode a manifest file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let metadata = fs::metadata(path).map_err(|source| ManifestError::Io {
            path: display.clone(),
            source,
        })?;
        if metadata.len() > MAX_MANIFEST_SIZE {
            return Err(ManifestError::TooLarge {
                path: display,
                size: metadata.len(),
                max: MAX_MANIFEST_SIZE,
            });
        }

        let source = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: display.clone(),
            source,
        })?;
        let manifest = Self::parse(&display, &source)?;
        tracing::debug!(services = manifest.services.len(), "manifest loaded");
        Ok(manifest)
    }

    /// Look up a service by display name.
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
