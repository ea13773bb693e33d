//! Assembled, not yet rendered, per-service artifacts.

use std::path::PathBuf;

use crate::model::{ImportSpec, InitDescriptor, TransformHelperDescriptor, ValidationDescriptor};

use super::path::snake_case;

/// The generated file for one service: an output path and its ordered sections.
///
/// Sections borrow the descriptors they were built from; an artifact lives as long as the service list it was
/// assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact<'a> {
    /// Name of the service this artifact was generated for.
    pub service: &'a str,
    /// Output path, relative to the output directory.
    pub path: PathBuf,
    pub sections: Vec<Section<'a>>,
}

impl<'a> Artifact<'a> {
    pub fn header(&self) -> Option<&Header> {
        self.sections.iter().find_map(|s| match s {
            Section::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn inits(&self) -> impl Iterator<Item = &'a InitDescriptor> + '_ {
        self.sections.iter().filter_map(|s| match s {
            Section::TypeInit(init) => Some(*init),
            _ => None,
        })
    }

    pub fn validations(&self) -> impl Iterator<Item = &'a ValidationDescriptor> + '_ {
        self.sections.iter().filter_map(|s| match s {
            Section::Validate(v) => Some(*v),
            _ => None,
        })
    }

    pub fn transform_helpers(&self) -> impl Iterator<Item = &'a TransformHelperDescriptor> + '_ {
        self.sections.iter().filter_map(|s| match s {
            Section::TransformHelper(h) => Some(*h),
            _ => None,
        })
    }

    /// `<template>: <name>` for every section, in order. Used for layout snapshots and debugging.
    pub fn layout(&self) -> Vec<String> {
        self.sections
            .iter()
            .map(|s| format!("{}: {}", s.template_name(), s.name()))
            .collect()
    }
}

/// One emittable unit of an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section<'a> {
    Header(Header),
    /// Constructor converting between a wire type and a domain type.
    TypeInit(&'a InitDescriptor),
    Validate(&'a ValidationDescriptor),
    TransformHelper(&'a TransformHelperDescriptor),
}

impl Section<'_> {
    /// Template name of the section.
    pub fn template_name(&self) -> &'static str {
        match self {
            Section::Header(_) => "header",
            Section::TypeInit(_) => "server-type-init",
            Section::Validate(_) => "server-validate",
            Section::TransformHelper(_) => "server-transform-helper",
        }
    }

    /// Header title, or the descriptor's name.
    pub fn name(&self) -> &str {
        match self {
            Section::Header(h) => &h.title,
            Section::TypeInit(init) => &init.name,
            Section::Validate(v) => &v.name,
            Section::TransformHelper(h) => &h.name,
        }
    }

    /// Doc comment of the generated item, if the section produces one.
    pub fn doc_comment(&self) -> Option<String> {
        match self {
            Section::Header(_) => None,
            Section::TypeInit(init) => Some(builds_doc(&init.name, &init.result_type_ref, &init.param_type_ref)),
            Section::Validate(v) => Some(format!(
                "{} runs the validations defined on {}.",
                validate_fn_name(&v.name),
                v.type_ref
            )),
            Section::TransformHelper(h) => Some(builds_doc(&h.name, &h.result_type_ref, &h.param_type_ref)),
        }
    }
}

fn builds_doc(name: &str, result: &str, param: &str) -> String {
    format!("{name} builds a value of type {result} from a value of type {param}.")
}

/// Name of the generated validation function for a type name.
pub fn validate_fn_name(type_name: &str) -> String {
    format!("validate_{}", snake_case(type_name))
}

/// Artifact header: title line and `use` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub imports: Vec<ImportSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_doc_comment() {
        let init = InitDescriptor::new("NewAddPayload", "pb::AddRequest", "adder::AddPayload");
        assert_eq!(
            Section::TypeInit(&init).doc_comment().as_deref(),
            Some("NewAddPayload builds a value of type adder::AddPayload from a value of type pb::AddRequest.")
        );
    }

    #[test]
    fn test_validate_doc_comment() {
        let v = ValidationDescriptor::new("AddRequest", "pb::AddRequest");
        assert_eq!(
            Section::Validate(&v).doc_comment().as_deref(),
            Some("validate_add_request runs the validations defined on pb::AddRequest.")
        );
    }

    #[test]
    fn test_template_names() {
        let h = TransformHelperDescriptor::new("svc_item_to_pb_item", "svc::Item", "pb::Item");
        let header = Header {
            title: "t".to_string(),
            imports: Vec::new(),
        };
        assert_eq!(Section::Header(header).template_name(), "header");
        assert_eq!(Section::TransformHelper(&h).template_name(), "server-transform-helper");
        assert_eq!(Section::TransformHelper(&h).name(), "svc_item_to_pb_item");
    }
}
