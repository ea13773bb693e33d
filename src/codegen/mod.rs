//! Server type assembly
//!
//! This module turns services into per-service [`Artifact`]s: ordered, deduplicated section lists that the
//! renderer consumes.
//!
//! ```text
//! Service → collect_inits → assemble (consulting DedupIndex) → Artifact
//! ```
//!
//! ## Module Organization
//!
//! - `collect` - constructor descriptors of a service, in emission order
//! - `dedup` - run-scoped registry of emitted transform helpers
//! - `assemble` - section layout of one artifact
//! - `artifact` - artifact and section types
//! - `path` - service name to output path
//!
//! ## Notes
//!
//! - Generation is single-threaded: services are assembled one after another and share one [`DedupIndex`].
//! - Nothing here fails. Malformed descriptors are an upstream defect and surface as malformed generated code.

pub mod artifact;
pub mod assemble;
pub mod collect;
pub mod dedup;
pub mod path;

pub use artifact::{Artifact, Header, Section, validate_fn_name};
pub use assemble::{assemble, default_imports};
pub use collect::{collect_inits, endpoint_conversions};
pub use dedup::DedupIndex;
pub use path::{artifact_path, snake_case};

use std::collections::HashMap;
use std::path::Path;

use crate::config::GeneratorConfig;
use crate::model::Service;

/// Generation driver for server type artifacts.
///
/// Every call to [`ServerTypes::generate`] is one run: it owns a fresh [`DedupIndex`] and lends it to each
/// service's assembly step in turn.
#[derive(Debug, Clone, Default)]
pub struct ServerTypes {
    config: GeneratorConfig,
}

impl ServerTypes {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Assemble one artifact per service, in service order.
    #[tracing::instrument(skip_all, fields(service_count = services.len()))]
    pub fn generate<'a>(&self, services: &'a [Service]) -> Vec<Artifact<'a>> {
        let mut seen = DedupIndex::new();
        let artifacts: Vec<Artifact<'a>> = services
            .iter()
            .map(|service| assemble(service, &self.config, &mut seen))
            .collect();
        tracing::debug!(helpers_emitted = seen.len(), "server types generated");
        artifacts
    }
}

/// Assemble the server types artifact of every service in one run.
pub fn server_type_files<'a>(services: &'a [Service], config: &GeneratorConfig) -> Vec<Artifact<'a>> {
    ServerTypes::new(config.clone()).generate(services)
}

/// The first two artifacts, in service order, whose names normalize to the same output path.
///
/// Writing both would let the later file replace the earlier one, losing the helpers only the earlier one holds.
pub fn path_conflict<'r, 'a>(artifacts: &'r [Artifact<'a>]) -> Option<(&'r Artifact<'a>, &'r Artifact<'a>)> {
    let mut by_path: HashMap<&'r Path, &'r Artifact<'a>> = HashMap::new();
    for artifact in artifacts {
        if let Some(first) = by_path.insert(artifact.path.as_path(), artifact) {
            return Some((first, artifact));
        }
    }
    None
}
