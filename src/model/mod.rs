//! Service and conversion descriptors handed to the generator.
//!
//! These types are produced by the endpoint enumerator (or decoded from a manifest) and are read-only from the
//! generator's point of view. The only ordering the generator ever relies on is the order in which endpoints and
//! errors appear here.
//!
//! ## Notes
//!
//! - [`Endpoints`] is an ordered sequence, not a set: it can be iterated and appended to, never sorted.
//! - Descriptor `code` bodies are opaque. They are only touched by the renderer.

mod endpoints;

pub use endpoints::Endpoints;

use serde::{Deserialize, Serialize};

/// One service of the API definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Display name (e.g. `Order Service`). Also the source of the output path.
    pub name: String,
    /// Endpoints in declaration order.
    #[serde(default)]
    pub endpoints: Endpoints,
    /// Validation code for every composite type of this service that requires it.
    #[serde(default)]
    pub validations: Vec<ValidationDescriptor>,
    /// Transform helpers referenced by this service, not yet deduplicated.
    #[serde(default)]
    pub transform_helpers: Vec<TransformHelperDescriptor>,
    /// Imports requested by upstream collaborators, appended after the default header imports.
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            endpoints: Endpoints::new(),
            validations: Vec::new(),
            transform_helpers: Vec::new(),
            imports: Vec::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn with_validation(mut self, validation: ValidationDescriptor) -> Self {
        self.validations.push(validation);
        self
    }

    pub fn with_transform_helper(mut self, helper: TransformHelperDescriptor) -> Self {
        self.transform_helpers.push(helper);
        self
    }

    pub fn with_import(mut self, import: ImportSpec) -> Self {
        self.imports.push(import);
        self
    }
}

/// One operation of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    /// Wire request message → service payload.
    #[serde(default)]
    pub request: Option<ConversionDescriptor>,
    /// Service result → wire response message.
    #[serde(default)]
    pub response: Option<ConversionDescriptor>,
    /// Present only for streaming endpoints.
    #[serde(default)]
    pub stream: Option<StreamDescriptor>,
    /// Per-error response conversions, in declaration order.
    #[serde(default)]
    pub errors: Vec<ErrorConversion>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_request(mut self, conversion: ConversionDescriptor) -> Self {
        self.request = Some(conversion);
        self
    }

    pub fn with_response(mut self, conversion: ConversionDescriptor) -> Self {
        self.response = Some(conversion);
        self
    }

    pub fn with_stream(mut self, stream: StreamDescriptor) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn with_error(mut self, error: ErrorConversion) -> Self {
        self.errors.push(error);
        self
    }
}

/// Send/receive conversions of a streaming endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(default)]
    pub send: Option<ConversionDescriptor>,
    #[serde(default)]
    pub recv: Option<ConversionDescriptor>,
}

/// Response conversion for one error of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorConversion {
    /// Error name as declared on the endpoint (e.g. `not_found`).
    pub name: String,
    #[serde(default)]
    pub response: Option<ConversionDescriptor>,
}

impl ErrorConversion {
    pub fn new(name: impl Into<String>, response: Option<ConversionDescriptor>) -> Self {
        Self {
            name: name.into(),
            response,
        }
    }
}

/// A conversion between a wire type and a domain type.
///
/// Carries an [`InitDescriptor`] only when a constructor has to be generated for it; conversions that are
/// plain assignments upstream come through with `init: None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionDescriptor {
    #[serde(default)]
    pub init: Option<InitDescriptor>,
}

impl ConversionDescriptor {
    /// A conversion that needs no generated code.
    pub fn none() -> Self {
        Self { init: None }
    }

    pub fn with_init(init: InitDescriptor) -> Self {
        Self { init: Some(init) }
    }
}

/// A generated constructor function converting one type into another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitDescriptor {
    /// Constructor function name.
    pub name: String,
    pub param_type_ref: String,
    pub result_type_ref: String,
    /// Function body.
    #[serde(default)]
    pub code: String,
}

impl InitDescriptor {
    pub fn new(name: impl Into<String>, param_type_ref: impl Into<String>, result_type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type_ref: param_type_ref.into(),
            result_type_ref: result_type_ref.into(),
            code: String::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

/// Validation code for one composite type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationDescriptor {
    /// Type name the validation function is named after.
    pub name: String,
    pub type_ref: String,
    /// Name of the argument the validation code refers to.
    #[serde(default = "default_validation_arg")]
    pub arg_name: String,
    #[serde(default)]
    pub code: String,
}

fn default_validation_arg() -> String {
    "message".to_string()
}

impl ValidationDescriptor {
    pub fn new(name: impl Into<String>, type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            arg_name: default_validation_arg(),
            code: String::new(),
        }
    }

    pub fn with_arg_name(mut self, arg_name: impl Into<String>) -> Self {
        self.arg_name = arg_name.into();
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

/// A shared conversion function, keyed by `name` for deduplication across the whole run.
///
/// A helper is a pure function of its (param, result) type pair, so the same helper may be referenced by many
/// endpoints of many services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformHelperDescriptor {
    pub name: String,
    pub param_type_ref: String,
    pub result_type_ref: String,
    #[serde(default)]
    pub code: String,
}

impl TransformHelperDescriptor {
    pub fn new(name: impl Into<String>, param_type_ref: impl Into<String>, result_type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type_ref: param_type_ref.into(),
            result_type_ref: result_type_ref.into(),
            code: String::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }
}

/// A `use` item for the artifact header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Rust path, `::`-separated (e.g. `crate::generated::adder`).
    pub path: String,
    /// Optional `as` alias.
    #[serde(default)]
    pub alias: Option<String>,
}

impl ImportSpec {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }
}
