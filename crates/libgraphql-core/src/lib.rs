//! The schema model, SDL builder, query validator, input coercion, and
//! executor: everything downstream of parsing (GraphQL spec sections 3
//! Type System, 5 Validation, and 6 Execution). Built on top of
//! [`libgraphql_parser`], which owns the lexer/parser/AST and has no
//! knowledge of schemas or execution.

pub mod coercion;
pub mod error;
pub mod executor;
mod introspection;
pub mod named_ref;
pub mod path;
pub mod resolver;
pub mod runtime;
pub mod schema;
pub mod schema_builder;
pub mod schema_printer;
pub mod types;
pub mod validator;
pub mod value;

pub use error::CoercionError;
pub use error::ExecutionError;
pub use error::ResolverError;
pub use error::SchemaBuildError;
pub use error::SchemaValidationError;
pub use error::ValidationError;
pub use executor::execute;
pub use executor::subscribe;
pub use executor::ExecutionRequest;
pub use executor::Response;
pub use executor::SubscriptionRequest;
pub use path::Path;
pub use resolver::Arguments;
pub use resolver::EventStream;
pub use resolver::FieldContext;
pub use resolver::FieldOutput;
pub use resolver::Resolvable;
pub use resolver::Resolver;
pub use resolver::SourceResolver;
pub use runtime::BlockingRuntime;
pub use runtime::CooperativeRuntime;
pub use runtime::Runtime;
pub use runtime::ThreadPoolRuntime;
pub use schema::Schema;
pub use schema_builder::SchemaBuilder;
pub use schema_builder::SchemaDirective;
pub use schema_printer::print_schema;
pub use value::ResolvedValue;
pub use validator::validate;
pub use validator::ValidationOptions;
