//! Define error types for artifact rendering.
//!
//! Rendering fails only when a descriptor handed over by an upstream collaborator is not valid Rust. Every variant
//! names the section template and the offending text so the descriptor can be traced back.

use thiserror::Error;

/// Error during artifact rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{section}: `{name}` is not a valid identifier")]
    InvalidIdent { section: &'static str, name: String },

    #[error("{section}: `{type_ref}` is not a valid type: {message}")]
    InvalidType {
        section: &'static str,
        type_ref: String,
        message: String,
    },

    #[error("{section} `{name}`: code body does not tokenize: {message}")]
    InvalidCode {
        section: &'static str,
        name: String,
        message: String,
    },

    #[error("{section} `{name}`: syn parse error: {message}")]
    SynParse {
        section: &'static str,
        name: String,
        message: String,
    },
}
