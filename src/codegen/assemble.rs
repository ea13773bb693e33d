//! Assemble one service's artifact.
//!
//! Section groups are always laid out as: header, constructors (collector order), validations (service order),
//! transform helpers (service order, minus helpers already emitted earlier in the run). Nothing is sorted.

use crate::config::GeneratorConfig;
use crate::model::{ImportSpec, Service};

use super::artifact::{Artifact, Header, Section};
use super::collect::collect_inits;
use super::dedup::DedupIndex;
use super::path::{artifact_path, snake_case};

/// Build the artifact for `service`, recording emitted helpers in `seen`.
#[tracing::instrument(skip_all, fields(service = %service.name))]
pub fn assemble<'a>(service: &'a Service, config: &GeneratorConfig, seen: &mut DedupIndex) -> Artifact<'a> {
    let inits = collect_inits(&service.endpoints);

    let mut sections = Vec::with_capacity(1 + inits.len() + service.validations.len() + service.transform_helpers.len());
    sections.push(Section::Header(header(service, config)));
    sections.extend(inits.into_iter().map(Section::TypeInit));
    sections.extend(service.validations.iter().map(Section::Validate));
    sections.extend(
        service
            .transform_helpers
            .iter()
            .filter(|helper| seen.should_emit(&helper.name))
            .map(Section::TransformHelper),
    );

    let artifact = Artifact {
        service: &service.name,
        path: artifact_path(config, &service.name),
        sections,
    };
    tracing::debug!(
        path = %artifact.path.display(),
        inits = artifact.inits().count(),
        validations = artifact.validations().count(),
        helpers = artifact.transform_helpers().count(),
        "assembled server types"
    );
    artifact
}

fn header(service: &Service, config: &GeneratorConfig) -> Header {
    let mut imports = default_imports(config, &snake_case(&service.name));
    imports.extend(service.imports.iter().cloned());
    Header {
        title: format!("{} {} server types", service.name, config.protocol),
        imports,
    }
}

/// Service package, its views package and the wire message package.
pub fn default_imports(config: &GeneratorConfig, svc: &str) -> Vec<ImportSpec> {
    let pkg = &config.gen_pkg;
    vec![
        ImportSpec::new(format!("{pkg}::{svc}")),
        ImportSpec::new(format!("{pkg}::{svc}::views")),
        ImportSpec::new(format!("{pkg}::{}::{svc}::pb", config.protocol)),
    ]
}
