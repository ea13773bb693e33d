//! Per-section item emission.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use crate::codegen::{Header, Section, validate_fn_name};
use crate::model::{ImportSpec, InitDescriptor, TransformHelperDescriptor, ValidationDescriptor};
use crate::version::CONVGEN_VERSION;

use super::{RenderConfig, RenderError};

/// Reserved + strict keywords in Rust (2024 edition).
const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Path segments that are keywords but valid as-is at the head of a `use` path. `super` may also repeat.
const PATH_ROOTS: &[&str] = &["crate", "self", "super", "Self"];

const HEADER: &str = "header";
const TYPE_INIT: &str = "server-type-init";
const VALIDATE: &str = "server-validate";
const TRANSFORM_HELPER: &str = "server-transform-helper";

pub(super) fn header(header: &Header, config: &RenderConfig) -> Result<syn::File, RenderError> {
    let title = format!(" {}", header.title);
    let marker = format!(" Code generated by convgen {CONVGEN_VERSION}. DO NOT EDIT.");
    let allows = if config.allow_lints {
        quote! { #![allow(unused_imports, dead_code, non_snake_case, clippy::all)] }
    } else {
        quote! {}
    };
    let uses = header
        .imports
        .iter()
        .map(use_item)
        .collect::<Result<Vec<_>, _>>()?;

    let tokens = quote! {
        #![doc = #title]
        #![doc = ""]
        #![doc = #marker]
        #allows
        #(#uses)*
    };
    syn::parse2(tokens).map_err(|e| RenderError::SynParse {
        section: HEADER,
        name: header.title.clone(),
        message: e.to_string(),
    })
}

pub(super) fn type_init(init: &InitDescriptor) -> Result<syn::Item, RenderError> {
    let doc = doc_attr(&Section::TypeInit(init));
    let name = ident(TYPE_INIT, &init.name)?;
    let param = parse_type(TYPE_INIT, &init.param_type_ref)?;
    let result = parse_type(TYPE_INIT, &init.result_type_ref)?;
    let body = parse_code(TYPE_INIT, &init.name, &init.code)?;

    item(
        TYPE_INIT,
        &init.name,
        quote! {
            #doc
            pub fn #name(v: #param) -> #result {
                #body
                res
            }
        },
    )
}

pub(super) fn validate(validation: &ValidationDescriptor, config: &RenderConfig) -> Result<syn::Item, RenderError> {
    let doc = doc_attr(&Section::Validate(validation));
    let fn_name = validate_fn_name(&validation.name);
    let name = ident(VALIDATE, &fn_name)?;
    let arg = ident(VALIDATE, &validation.arg_name)?;
    let ty = parse_type(VALIDATE, &validation.type_ref)?;
    let error = parse_type(VALIDATE, &config.validation_error)?;
    let body = parse_code(VALIDATE, &validation.name, &validation.code)?;

    item(
        VALIDATE,
        &validation.name,
        quote! {
            #doc
            pub fn #name(#arg: &#ty) -> Result<(), #error> {
                #body
                Ok(())
            }
        },
    )
}

pub(super) fn transform_helper(helper: &TransformHelperDescriptor) -> Result<syn::Item, RenderError> {
    let doc = doc_attr(&Section::TransformHelper(helper));
    let name = ident(TRANSFORM_HELPER, &helper.name)?;
    let param = parse_type(TRANSFORM_HELPER, &helper.param_type_ref)?;
    let result = parse_type(TRANSFORM_HELPER, &helper.result_type_ref)?;
    let body = parse_code(TRANSFORM_HELPER, &helper.name, &helper.code)?;

    item(
        TRANSFORM_HELPER,
        &helper.name,
        quote! {
            #doc
            pub fn #name(v: &#param) -> #result {
                #body
                res
            }
        },
    )
}

fn use_item(import: &ImportSpec) -> Result<TokenStream, RenderError> {
    let mut in_prefix = true;
    let segments = import
        .path
        .split("::")
        .enumerate()
        .map(|(i, segment)| {
            let is_root = in_prefix && (segment == "super" || (i == 0 && PATH_ROOTS.contains(&segment)));
            in_prefix = is_root && segment == "super";
            if is_root {
                Ok(Ident::new(segment, Span::call_site()))
            } else {
                ident(HEADER, segment)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match &import.alias {
        Some(alias) => {
            let alias = ident(HEADER, alias)?;
            quote! { use #(#segments)::* as #alias; }
        }
        None => quote! { use #(#segments)::*; },
    })
}

fn doc_attr(section: &Section<'_>) -> TokenStream {
    match section.doc_comment() {
        Some(doc) => {
            let doc = format!(" {doc}");
            quote! { #[doc = #doc] }
        }
        None => quote! {},
    }
}

fn item(section: &'static str, name: &str, tokens: TokenStream) -> Result<syn::Item, RenderError> {
    syn::parse2(tokens).map_err(|e| RenderError::SynParse {
        section,
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Escape Rust keywords by adding `r#` prefix.
///
/// Note: `self` and `Self` cannot be raw identifiers.
fn escape_keyword(name: &str) -> String {
    if matches!(name, "self" | "Self") {
        return name.to_string();
    }
    if RUST_KEYWORDS.contains(&name) {
        return format!("r#{}", name);
    }
    name.to_string()
}

/// Parse `name` as a single identifier, escaping keywords.
///
/// The parsed token must spell exactly `name`: surrounding whitespace or comments are rejected rather than trimmed.
fn ident(section: &'static str, name: &str) -> Result<Ident, RenderError> {
    let escaped = escape_keyword(name);
    syn::parse_str::<Ident>(&escaped)
        .ok()
        .filter(|parsed| *parsed == escaped)
        .ok_or_else(|| RenderError::InvalidIdent {
            section,
            name: name.to_string(),
        })
}

fn parse_type(section: &'static str, type_ref: &str) -> Result<syn::Type, RenderError> {
    syn::parse_str(type_ref).map_err(|e| RenderError::InvalidType {
        section,
        type_ref: type_ref.to_string(),
        message: e.to_string(),
    })
}

fn parse_code(section: &'static str, name: &str, code: &str) -> Result<TokenStream, RenderError> {
    code.parse::<TokenStream>().map_err(|e| RenderError::InvalidCode {
        section,
        name: name.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keyword() {
        assert_eq!(escape_keyword("type"), "r#type");
        assert_eq!(escape_keyword("gen"), "r#gen");
        assert_eq!(escape_keyword("self"), "self");
        assert_eq!(escape_keyword("payload"), "payload");
    }

    #[test]
    fn test_ident_rejects_garbage() {
        assert!(ident(HEADER, "has space").is_err());
        assert!(ident(HEADER, "").is_err());
        assert!(ident(HEADER, "9lives").is_err());
        assert!(ident(HEADER, "r#type").is_ok());
    }

    #[test]
    fn test_use_item_with_alias() {
        let tokens = use_item(&ImportSpec::aliased("crate::generated::adder::views", "adder_views")).unwrap();
        let item: syn::ItemUse = syn::parse2(tokens).unwrap();
        let source = prettyplease::unparse(&syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: vec![syn::Item::Use(item)],
        });
        assert_eq!(source.trim(), "use crate::generated::adder::views as adder_views;");
    }

    #[test]
    fn test_use_item_escapes_keyword_segments() {
        let tokens = use_item(&ImportSpec::new("crate::generated::type")).unwrap();
        assert!(syn::parse2::<syn::ItemUse>(tokens).is_ok());
    }

    #[test]
    fn test_ident_rejects_padding_and_comments() {
        for name in ["NewFoo ", " NewFoo", "helper /* x */", "helper // x", "a b"] {
            let err = ident(TYPE_INIT, name).unwrap_err();
            assert!(matches!(err, RenderError::InvalidIdent { section: TYPE_INIT, .. }), "{name:?}");
        }
        assert_eq!(ident(TYPE_INIT, "NewFoo").unwrap().to_string(), "NewFoo");
    }

    #[test]
    fn test_use_item_repeated_super() {
        let tokens = use_item(&ImportSpec::new("super::super::views")).unwrap();
        let item: syn::ItemUse = syn::parse2(tokens).unwrap();
        let source = prettyplease::unparse(&syn::File {
            shebang: None,
            attrs: Vec::new(),
            items: vec![syn::Item::Use(item)],
        });
        assert_eq!(source.trim(), "use super::super::views;");
    }

    #[test]
    fn test_use_item_root_only_at_head() {
        assert!(use_item(&ImportSpec::new("crate::super::views")).is_err());
        assert!(use_item(&ImportSpec::new("views::crate")).is_err());
    }

    #[test]
    fn test_padded_import_segment_is_rejected() {
        assert!(use_item(&ImportSpec::new("crate::generated ::adder")).is_err());
    }

    #[test]
    fn test_empty_import_segment_is_rejected() {
        assert!(use_item(&ImportSpec::new("crate::::adder")).is_err());
    }
}
