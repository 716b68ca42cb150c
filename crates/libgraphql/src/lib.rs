//! The public surface: parse source text, build a schema, validate a query
//! document, execute or subscribe to it, and print an AST or a built schema
//! back to SDL. Every operation here is a thin pipeline over
//! [`libgraphql_parser`] (lexer/parser/AST/printer) and [`libgraphql_core`]
//! (schema model/builder/validator/coercion/executor) — this crate adds no
//! new semantics of its own, only the entry points an embedder calls.

pub use libgraphql_core::*;

pub use libgraphql_parser::ast;
pub use libgraphql_parser::parse_document as parse;
pub use libgraphql_parser::parse_query;
pub use libgraphql_parser::parse_schema;
pub use libgraphql_parser::print_ast;
pub use libgraphql_parser::print_value;
pub use libgraphql_parser::ParserOptions;
pub use libgraphql_parser::SourcePosition;
pub use libgraphql_parser::Span;
pub use libgraphql_parser::SyntaxError;

/// Runtime and validation knobs an embedder supplies at the execution
/// boundary, rather than reading environment variables or files directly
/// (all builders/validators/executors take their dependencies by
/// parameter).
///
/// The schema a [`SchemaBuilder`] produces always carries the
/// `__schema`/`__type`/`__typename` introspection surface — it's part of
/// the type system itself, per the GraphQL spec's Introspection section
/// (§4). `enable_introspection` doesn't control whether that surface
/// exists; it controls whether a given request is allowed to query it,
/// the way a production deployment commonly locks introspection down
/// without rebuilding the schema. `__typename` is never gated by this flag.
#[derive(Clone, Debug)]
pub struct ExecutionOptions {
    pub max_query_depth: Option<usize>,
    pub enable_introspection: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        ExecutionOptions { max_query_depth: None, enable_introspection: true }
    }
}

impl ExecutionOptions {
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions { max_depth: self.max_query_depth, enable_introspection: self.enable_introspection }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Query;
    impl Resolvable for Query {
        fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
            match key {
                "hello" => Some(FieldOutput::Leaf(ResolvedValue::String("world".to_string()))),
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn parses_builds_validates_and_executes_a_hello_query() {
        let sdl_doc = parse_schema("type Query {\n  hello: String\n}\n").expect("schema parses");
        let schema = SchemaBuilder::new(&sdl_doc).build().expect("schema builds");

        let query_doc = parse_query("{ hello }").expect("query parses");
        let options = ExecutionOptions::default();
        let errors = validate(&schema, &query_doc, None, &options.validation_options());
        assert!(errors.is_empty());

        let request = ExecutionRequest {
            schema: &schema,
            document: &query_doc,
            operation_name: None,
            raw_variable_values: Default::default(),
            root_value: Arc::new(Query),
        };
        let response = execute(request, &BlockingRuntime).await;
        assert!(response.errors.is_empty());
        assert!(matches!(response.data, Some(ResolvedValue::Object(_))));
    }

    #[tokio::test]
    async fn resolves_typename_on_the_query_root() {
        let sdl_doc = parse_schema("type Query {\n  hello: String\n}\n").expect("schema parses");
        let schema = SchemaBuilder::new(&sdl_doc).build().expect("schema builds");

        let query_doc = parse_query("{ hello __typename }").expect("query parses");
        let options = ExecutionOptions::default();
        let errors = validate(&schema, &query_doc, None, &options.validation_options());
        assert!(errors.is_empty());

        let request = ExecutionRequest {
            schema: &schema,
            document: &query_doc,
            operation_name: None,
            raw_variable_values: Default::default(),
            root_value: Arc::new(Query),
        };
        let response = execute(request, &BlockingRuntime).await;
        assert!(response.errors.is_empty());
        let Some(ResolvedValue::Object(fields)) = response.data else { panic!("expected an object") };
        assert_eq!(fields.get("__typename"), Some(&ResolvedValue::String("Query".to_string())));
    }

    #[tokio::test]
    async fn runs_a_basic_schema_introspection_query() {
        let sdl_doc = parse_schema("type Query {\n  hello: String\n}\n").expect("schema parses");
        let schema = SchemaBuilder::new(&sdl_doc).build().expect("schema builds");

        let query_doc = parse_query("{ __schema { queryType { name } types { name } } }").expect("query parses");
        let options = ExecutionOptions::default();
        let errors = validate(&schema, &query_doc, None, &options.validation_options());
        assert!(errors.is_empty());

        let request = ExecutionRequest {
            schema: &schema,
            document: &query_doc,
            operation_name: None,
            raw_variable_values: Default::default(),
            root_value: Arc::new(Query),
        };
        let response = execute(request, &BlockingRuntime).await;
        assert!(response.errors.is_empty());
        let Some(ResolvedValue::Object(fields)) = response.data else { panic!("expected an object") };
        let Some(ResolvedValue::Object(schema_fields)) = fields.get("__schema") else { panic!("expected __schema object") };
        let Some(ResolvedValue::Object(query_type)) = schema_fields.get("queryType") else { panic!("expected queryType object") };
        assert_eq!(query_type.get("name"), Some(&ResolvedValue::String("Query".to_string())));
        let Some(ResolvedValue::List(types)) = schema_fields.get("types") else { panic!("expected types list") };
        assert!(types.iter().any(|t| matches!(t, ResolvedValue::Object(f) if f.get("name") == Some(&ResolvedValue::String("__Schema".to_string())))));
    }

    #[tokio::test]
    async fn runs_a_named_type_introspection_query() {
        let sdl_doc = parse_schema("type Query {\n  hello: String\n}\n").expect("schema parses");
        let schema = SchemaBuilder::new(&sdl_doc).build().expect("schema builds");

        let query_doc = parse_query("{ __type(name: \"Query\") { name kind fields { name } } }").expect("query parses");
        let options = ExecutionOptions::default();
        let errors = validate(&schema, &query_doc, None, &options.validation_options());
        assert!(errors.is_empty());

        let request = ExecutionRequest {
            schema: &schema,
            document: &query_doc,
            operation_name: None,
            raw_variable_values: Default::default(),
            root_value: Arc::new(Query),
        };
        let response = execute(request, &BlockingRuntime).await;
        assert!(response.errors.is_empty());
        let Some(ResolvedValue::Object(fields)) = response.data else { panic!("expected an object") };
        let Some(ResolvedValue::Object(ty)) = fields.get("__type") else { panic!("expected __type object") };
        assert_eq!(ty.get("name"), Some(&ResolvedValue::String("Query".to_string())));
        assert_eq!(ty.get("kind"), Some(&ResolvedValue::Enum("OBJECT".to_string())));
        let Some(ResolvedValue::List(type_fields)) = ty.get("fields") else { panic!("expected fields list") };
        assert!(type_fields.iter().any(|f| matches!(f, ResolvedValue::Object(ff) if ff.get("name") == Some(&ResolvedValue::String("hello".to_string())))));
    }

    #[tokio::test]
    async fn rejects_introspection_when_disabled_for_the_request() {
        let sdl_doc = parse_schema("type Query {\n  hello: String\n}\n").expect("schema parses");
        let schema = SchemaBuilder::new(&sdl_doc).build().expect("schema builds");

        let query_doc = parse_query("{ __schema { queryType { name } } }").expect("query parses");
        let options = ExecutionOptions { enable_introspection: false, ..ExecutionOptions::default() };
        let errors = validate(&schema, &query_doc, None, &options.validation_options());
        assert!(!errors.is_empty());

        let typename_doc = parse_query("{ hello __typename }").expect("query parses");
        let errors = validate(&schema, &typename_doc, None, &options.validation_options());
        assert!(errors.is_empty());
    }

    #[test]
    fn round_trips_a_schema_through_print_schema() {
        let doc = parse_schema("type Query {\n  hello: String\n}\n").expect("schema parses");
        let schema = SchemaBuilder::new(&doc).build().expect("schema builds");
        let printed = print_schema(&schema);
        let reparsed_doc = parse_schema(&printed).expect("printed schema reparses");
        let reparsed = SchemaBuilder::new(&reparsed_doc).build().expect("printed schema rebuilds");
        assert_eq!(schema.get_type("Query"), reparsed.get_type("Query"));
    }
}
