//! Render assembled artifacts to formatted Rust source.
//!
//! Each section is emitted with `quote!`, parsed into a `syn` item on its own (so a bad descriptor is reported
//! against its section), and the whole file is formatted with `prettyplease`.
//!
//! ## Generated items
//!
//! - header: `//!` title, a generated-code marker, optional lint allows and the `use` items
//! - `server-type-init`: `pub fn <Name>(v: <Param>) -> <Result>`
//! - `server-validate`: `pub fn validate_<type>(<arg>: &<Type>) -> Result<(), <ValidationError>>`
//! - `server-transform-helper`: `pub fn <Name>(v: &<Param>) -> <Result>`
//!
//! Constructor and helper bodies are expected to bind the converted value to `res`; the template returns it.
//! Validation bodies return early on failure; the template ends with `Ok(())`.
//!
//! ## Notes
//!
//! - Rendering is codegen-only: it does not read or write files.

mod errors;
mod items;

pub use errors::RenderError;

use std::path::PathBuf;

use crate::codegen::{Artifact, Section};

/// Rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Error type returned by generated validation functions
    pub validation_error: String,
    /// Whether to emit `#![allow(...)]` for lints generated code routinely trips
    pub allow_lints: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            validation_error: "ValidationError".to_string(),
            allow_lints: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error type of generated validation functions
    pub fn with_validation_error(mut self, ty: impl Into<String>) -> Self {
        self.validation_error = ty.into();
        self
    }

    /// Disable lint allows (for warning-clean output)
    pub fn without_lint_allows(mut self) -> Self {
        self.allow_lints = false;
        self
    }
}

/// Source text of one artifact, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub service: String,
    pub path: PathBuf,
    pub source: String,
}

/// Render one artifact to formatted Rust source.
#[tracing::instrument(skip_all, fields(service = artifact.service, sections = artifact.sections.len()))]
pub fn render_artifact(artifact: &Artifact<'_>, config: &RenderConfig) -> Result<String, RenderError> {
    let mut file = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items: Vec::new(),
    };

    for section in &artifact.sections {
        match section {
            Section::Header(header) => {
                let header_file = items::header(header, config)?;
                file.attrs.extend(header_file.attrs);
                file.items.extend(header_file.items);
            }
            Section::TypeInit(init) => file.items.push(items::type_init(init)?),
            Section::Validate(validation) => file.items.push(items::validate(validation, config)?),
            Section::TransformHelper(helper) => file.items.push(items::transform_helper(helper)?),
        }
    }

    Ok(prettyplease::unparse(&file))
}

/// Render every artifact, in order.
pub fn render_all(artifacts: &[Artifact<'_>], config: &RenderConfig) -> Result<Vec<RenderedArtifact>, RenderError> {
    artifacts
        .iter()
        .map(|artifact| {
            Ok(RenderedArtifact {
                service: artifact.service.to_string(),
                path: artifact.path.clone(),
                source: render_artifact(artifact, config)?,
            })
        })
        .collect()
}
