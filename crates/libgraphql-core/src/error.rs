//! The per-subsystem error taxonomy. Every fallible boundary in this crate
//! returns one of these `thiserror`-derived enums rather than a single
//! catch-all error type, split by the stage that can fail: building a
//! schema, validating a query, coercing input, or executing.

use crate::path::Path;
use libgraphql_parser::SourcePosition;

#[derive(Clone, Debug, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("duplicate definition of type `{name}`")]
    DuplicateTypeDefinition { name: String },

    #[error("duplicate definition of directive `{name}`")]
    DuplicateDirectiveDefinition { name: String },

    #[error("unknown type `{name}` referenced at {position}")]
    UnknownType { name: String, position: SourcePosition },

    #[error("unknown scalar `{name}`; register it as an additional scalar or remove the reference")]
    UnknownScalar { name: String },

    #[error("unknown directive `@{name}` referenced at {position}")]
    UnknownDirective { name: String, position: SourcePosition },

    #[error("`{type_name}` implements `{interface_name}`, but is missing required field(s): {}", .missing_fields.join(", "))]
    MissingInterfaceFields { type_name: String, interface_name: String, missing_fields: Vec<String> },

    #[error("no root `query` type declared")]
    MissingQueryRoot,

    #[error("invalid arguments for directive `@{directive}`: {message}")]
    InvalidDirectiveArguments { directive: String, message: String },

    #[error(transparent)]
    Validation(#[from] SchemaValidationError),

    #[error("syntax error while parsing SDL: {0}")]
    Syntax(#[from] libgraphql_parser::SyntaxError),
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("input position `{position}` references output-only type `{type_name}`")]
    OutputTypeInInputPosition { type_name: String, position: SourcePosition },

    #[error("output position `{position}` references input-only type `{type_name}`")]
    InputTypeInOutputPosition { type_name: String, position: SourcePosition },

    #[error("input object `{type_name}` has a non-null reference cycle through field `{field_name}`")]
    NonNullInputCycle { type_name: String, field_name: String },

    #[error("object field `{type_name}.{field_name}` is not a valid covariant override of interface field `{interface_name}.{field_name}`")]
    InvalidInterfaceFieldCovariance { type_name: String, interface_name: String, field_name: String },

    #[error("union `{union_name}` member `{member_name}` is not an object type")]
    InvalidUnionMember { union_name: String, member_name: String },
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub positions: Vec<SourcePosition>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, positions: Vec<SourcePosition>) -> Self {
        ValidationError { message: message.into(), positions }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message} (at {path})")]
pub struct CoercionError {
    pub message: String,
    pub path: Path,
}

impl CoercionError {
    pub fn new(message: impl Into<String>, path: Path) -> Self {
        CoercionError { message: message.into(), path }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct ResolverError {
    pub message: String,
    pub extensions: Option<serde_json::Value>,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        ResolverError { message: message.into(), extensions: None }
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("{message}")]
    Internal { message: String, path: Path },

    #[error(transparent)]
    Resolver(#[from] ResolverError),

    #[error("unknown directive `@{name}` queried via get_directive_arguments")]
    UnknownDirective { name: String },
}

impl ExecutionError {
    pub fn internal(message: impl Into<String>, path: Path) -> Self {
        ExecutionError::Internal { message: message.into(), path }
    }
}
