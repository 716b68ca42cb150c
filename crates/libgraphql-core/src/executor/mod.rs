//! Drives a parsed, validated operation to completion against a schema and
//! a root [`Resolvable`] value, per the GraphQL spec's Execution section
//! (§6). The executor is generic over a [`Runtime`] so the same
//! field-collection/completion/non-null-propagation logic runs unchanged
//! under the blocking, cooperative, or thread-pool reference runtimes.

pub mod resolve_info;

mod collect_fields;

pub use collect_fields::collect_fields;

use crate::coercion::coerce_variable_value;
use crate::error::ExecutionError;
use crate::path::Path;
use crate::resolver::Arguments;
use crate::resolver::DefaultResolver;
use crate::resolver::FieldContext;
use crate::resolver::FieldOutput;
use crate::resolver::Resolvable;
use crate::resolver::Resolver;
use crate::runtime::Deferred;
use crate::runtime::Runtime;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::value::ResolvedValue;
use futures::future::FutureExt;
use futures::stream::BoxStream;
use futures::stream::StreamExt;
use indexmap::IndexMap;
use libgraphql_parser::ast;
use resolve_info::ResolveInfo;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

/// Everything needed to drive one operation: which schema, which document,
/// which operation (by name, if ambiguous), what variables were supplied,
/// and the root object resolvers dispatch against.
pub struct ExecutionRequest<'a> {
    pub schema: &'a Schema,
    pub document: &'a ast::Document,
    pub operation_name: Option<&'a str>,
    pub raw_variable_values: IndexMap<String, ResolvedValue>,
    pub root_value: Arc<dyn Resolvable>,
}

/// The wire-facing `{data, errors}` envelope, per the GraphQL spec's
/// Response section (§7).
#[derive(Debug)]
pub struct Response {
    pub data: Option<ResolvedValue>,
    pub errors: Vec<ExecutionError>,
}

struct ExecutionContext<'a> {
    schema: &'a Schema,
    fragments: &'a HashMap<String, ast::FragmentDefinition>,
    variable_values: &'a IndexMap<String, ResolvedValue>,
    errors: Mutex<Vec<ExecutionError>>,
}

impl<'a> ExecutionContext<'a> {
    fn push_error(&self, error: ExecutionError) {
        self.errors.lock().expect("execution error list mutex poisoned").push(error);
    }
}

/// Picks the operation to run: the sole operation if the document has only
/// one, otherwise the named one.
fn select_operation<'a>(document: &'a ast::Document, operation_name: Option<&str>) -> Result<&'a ast::OperationDefinition, ExecutionError> {
    let operations: Vec<&ast::OperationDefinition> = document.operations().collect();
    match operation_name {
        Some(name) => operations
            .into_iter()
            .find(|op| op.name.as_deref() == Some(name))
            .ok_or_else(|| ExecutionError::internal(format!("unknown operation `{name}`"), Path::root())),
        None => match operations.as_slice() {
            [op] => Ok(op),
            [] => Err(ExecutionError::internal("document has no operations", Path::root())),
            _ => Err(ExecutionError::internal("an operation name must be supplied when a document has more than one operation", Path::root())),
        },
    }
}

fn root_type_name(schema: &Schema, kind: ast::OperationKind) -> Option<String> {
    let result = match kind {
        ast::OperationKind::Query => Some(schema.query_type()),
        ast::OperationKind::Mutation => schema.mutation_type(),
        ast::OperationKind::Subscription => schema.subscription_type(),
    };
    result.and_then(Result::ok).map(|t| t.name().to_string())
}

/// Whether `type_name`'s concrete type satisfies `condition` — either by
/// direct equality, interface implementation, or union membership.
fn type_condition_is_satisfied(schema: &Schema, type_name: &str, condition: &str) -> bool {
    if type_name == condition {
        return true;
    }
    match schema.get_type(type_name) {
        Some(GraphQLType::Object(object)) => {
            object.implements(condition)
                || matches!(schema.get_type(condition), Some(GraphQLType::Union(u)) if u.has_member(type_name))
        }
        Some(GraphQLType::Interface(iface)) => iface.interfaces.iter().any(|i| i.name() == condition),
        _ => false,
    }
}

/// Runs `request` to completion under `runtime`, returning the `{data,
/// errors}` envelope. Never panics on GraphQL-level failures — those become
/// entries in `errors` and, per non-null propagation, possibly a `null`
/// `data`.
pub async fn execute<R: Runtime>(request: ExecutionRequest<'_>, runtime: &R) -> Response {
    tracing::debug!(operation_name = request.operation_name, "starting execution");
    let fragments: HashMap<String, ast::FragmentDefinition> = request.document.fragments().map(|f| (f.name.clone(), f.clone())).collect();

    let operation = match select_operation(request.document, request.operation_name) {
        Ok(op) => op,
        Err(err) => return Response { data: None, errors: vec![err] },
    };

    let Some(root_type_name) = root_type_name(request.schema, operation.kind) else {
        return Response {
            data: None,
            errors: vec![ExecutionError::internal(format!("schema declares no root {} type", operation.kind), Path::root())],
        };
    };

    let mut variable_values = IndexMap::new();
    for var_def in &operation.variable_definitions {
        let type_annotation = TypeAnnotation::from_ast(var_def.span, &var_def.var_type);
        let path = Path::root().field(format!("${}", var_def.name));
        let raw = request.raw_variable_values.get(&var_def.name);
        match coerce_variable_value(request.schema, &type_annotation, var_def.default_value.as_ref(), raw, &path) {
            Ok(value) => {
                variable_values.insert(var_def.name.clone(), value);
            }
            Err(err) => return Response { data: None, errors: vec![ExecutionError::internal(err.to_string(), path)] },
        }
    }

    let ctx = ExecutionContext { schema: request.schema, fragments: &fragments, variable_values: &variable_values, errors: Mutex::new(Vec::new()) };

    let groups = match collect_fields(
        &operation.selection_set,
        &root_type_name,
        |t, i| type_condition_is_satisfied(request.schema, t, i),
        &fragments,
        &variable_values,
        &Path::root(),
    ) {
        Ok(groups) => groups,
        Err(err) => return Response { data: None, errors: vec![err] },
    };

    let concurrent = matches!(operation.kind, ast::OperationKind::Query);
    let data = execute_grouped_fields(&ctx, runtime, operation, request.root_value.as_ref(), &root_type_name, groups, Path::root(), concurrent).await;

    let response = Response { data: data.ok().flatten(), errors: ctx.errors.into_inner().expect("execution error list mutex poisoned") };
    tracing::debug!(error_count = response.errors.len(), "execution finished");
    response
}

/// Everything needed to open one subscription. Every piece is independently
/// owned (`Arc`/owned values) rather than borrowed, since the returned
/// stream can outlive this call by an arbitrary amount — unlike
/// [`ExecutionRequest`], which only needs to survive a single `execute`
/// call. `subscribe` defines only the initiation contract: it hands back a
/// stream of already-complete `{data, errors}` envelopes, one per source
/// event, and has no opinion on resubscription, backpressure, or transport
/// framing.
pub struct SubscriptionRequest {
    pub schema: Arc<Schema>,
    pub document: Arc<ast::Document>,
    pub operation_name: Option<String>,
    pub raw_variable_values: IndexMap<String, ResolvedValue>,
    pub root_value: Arc<dyn Resolvable>,
}

/// Opens a subscription against `request`'s sole root field. A setup
/// failure (no such operation, wrong operation kind, a root selection that
/// isn't exactly one field, bad variables/arguments, no subscription
/// resolver attached) yields a single-item stream carrying that one error,
/// so callers always drive the same `Stream<Item = Response>` shape
/// regardless of how far setup got.
pub fn subscribe<R: Runtime + 'static>(request: SubscriptionRequest, runtime: Arc<R>) -> BoxStream<'static, Response> {
    fn fail(message: impl Into<String>, path: Path) -> BoxStream<'static, Response> {
        let response = Response { data: None, errors: vec![ExecutionError::internal(message, path)] };
        futures::stream::once(async move { response }).boxed()
    }

    let operations: Vec<&ast::OperationDefinition> = request.document.operations().collect();
    let operation = match request.operation_name.as_deref() {
        Some(name) => operations.into_iter().find(|op| op.name.as_deref() == Some(name)).cloned(),
        None => match operations.as_slice() {
            [op] => Some((*op).clone()),
            _ => None,
        },
    };
    let Some(operation) = operation else {
        return fail("no matching subscription operation in document", Path::root());
    };
    if operation.kind != ast::OperationKind::Subscription {
        return fail("the selected operation is not a subscription", Path::root());
    }
    let [selection] = operation.selection_set.selections.as_slice() else {
        return fail("a subscription must select exactly one root field", Path::root());
    };
    let ast::Selection::Field(root_field) = selection else {
        return fail("a subscription's root selection must be a field", Path::root());
    };

    let Some(Ok(subscription_type)) = request.schema.subscription_type() else {
        return fail("schema declares no subscription root type", Path::root());
    };
    let subscription_type_name = subscription_type.name().to_string();
    let Some(field_def) = subscription_type.field(&root_field.name) else {
        return fail(format!("field `{}` is not defined on `{subscription_type_name}`", root_field.name), Path::root());
    };
    let Some(source_resolver) = field_def.subscription_resolver.clone() else {
        return fail(format!("field `{}` has no subscription resolver attached", root_field.name), Path::root());
    };

    let mut variable_values = IndexMap::new();
    for var_def in &operation.variable_definitions {
        let type_annotation = TypeAnnotation::from_ast(var_def.span, &var_def.var_type);
        let path = Path::root().field(format!("${}", var_def.name));
        let raw = request.raw_variable_values.get(&var_def.name);
        match coerce_variable_value(&request.schema, &type_annotation, var_def.default_value.as_ref(), raw, &path) {
            Ok(value) => {
                variable_values.insert(var_def.name.clone(), value);
            }
            Err(err) => return fail(err.to_string(), path),
        }
    }

    let mut arguments = IndexMap::new();
    for arg_def in &field_def.arguments {
        let supplied = root_field.arguments.iter().find(|a| a.name == arg_def.name);
        let arg_path = Path::root().field(format!("@{}", arg_def.name));
        let value = match supplied {
            Some(arg) => crate::coercion::coerce_literal_value(&request.schema, &arg_def.type_annotation, &arg.value, &variable_values, &arg_path),
            None => coerce_variable_value(&request.schema, &arg_def.type_annotation, arg_def.default_value.as_ref(), None, &arg_path),
        };
        match value {
            Ok(v) => {
                arguments.insert(arg_def.resolver_key().to_string(), v);
            }
            Err(err) => return fail(err.to_string(), arg_path),
        }
    }

    let fragments: HashMap<String, ast::FragmentDefinition> = request.document.fragments().map(|f| (f.name.clone(), f.clone())).collect();
    let info = ResolveInfo {
        field_def,
        parent_type: subscription_type,
        path: Path::root().field(root_field.response_key()),
        schema: &request.schema,
        variable_values: &variable_values,
        operation: &operation,
        fragments: &fragments,
        query_field: root_field,
    };
    let field_context = FieldContext { parent: request.root_value.as_ref(), arguments: Arguments(arguments), info };
    let event_stream = match source_resolver.subscribe(&field_context) {
        Ok(stream) => stream,
        Err(err) => return fail(err.to_string(), Path::root()),
    };

    let field_def = field_def.clone();
    let selection_set = root_field.selection_set.clone();
    let response_key = root_field.response_key().to_string();
    let schema = request.schema;
    let fragments = Arc::new(fragments);
    let variable_values = Arc::new(variable_values);
    let operation = Arc::new(operation);

    event_stream
        .then(move |event| {
            let schema = schema.clone();
            let fragments = fragments.clone();
            let variable_values = variable_values.clone();
            let operation = operation.clone();
            let runtime = runtime.clone();
            let field_def = field_def.clone();
            let selection_set = selection_set.clone();
            let response_key = response_key.clone();
            async move {
                let ctx = ExecutionContext { schema: &schema, fragments: &fragments, variable_values: &variable_values, errors: Mutex::new(Vec::new()) };
                let path = Path::root().field(response_key.clone());
                let result =
                    complete_value(&ctx, runtime.as_ref(), &operation, &field_def.type_annotation, FieldOutput::Node(event), selection_set.as_ref(), path)
                        .await;
                let data = match result {
                    Ok(value) => {
                        let mut map = IndexMap::new();
                        map.insert(response_key, value);
                        Some(ResolvedValue::Object(map))
                    }
                    Err(()) => None,
                };
                Response { data, errors: ctx.errors.into_inner().expect("execution error list mutex poisoned") }
            }
        })
        .boxed()
}

/// A grouped-field execution step common to the root selection set and
/// every object-typed field's nested selection set. Returns `Ok(None)` when
/// a nested non-null violation legitimately nulls out this whole object
/// (rather than propagating further as an `Err`).
#[allow(clippy::too_many_arguments)]
fn execute_grouped_fields<'a, R: Runtime>(
    ctx: &'a ExecutionContext<'a>,
    runtime: &'a R,
    operation: &'a ast::OperationDefinition,
    parent: &'a dyn Resolvable,
    parent_type_name: &'a str,
    groups: IndexMap<String, Vec<&'a ast::Field>>,
    path: Path,
    concurrent: bool,
) -> Deferred<'a, Result<Option<ResolvedValue>, ()>> {
    async move {
        let Some(parent_graphql_type) = ctx.schema.get_type(parent_type_name) else {
            ctx.push_error(ExecutionError::internal(format!("unknown type `{parent_type_name}`"), path.clone()));
            return Err(());
        };
        let GraphQLType::Object(object) = parent_graphql_type else {
            ctx.push_error(ExecutionError::internal(format!("`{parent_type_name}` is not an object type"), path.clone()));
            return Err(());
        };

        let mut keys = Vec::with_capacity(groups.len());
        let mut field_futures = Vec::with_capacity(groups.len());
        for (response_key, fields) in &groups {
            if fields[0].name == "__typename" {
                keys.push(response_key.clone());
                let type_name = parent_type_name.to_string();
                field_futures.push(async move { Ok(ResolvedValue::String(type_name)) }.boxed());
                continue;
            }
            let Some(field_def) = object.field(&fields[0].name) else {
                ctx.push_error(ExecutionError::internal(
                    format!("field `{}` is not defined on `{parent_type_name}`", fields[0].name),
                    path.field(response_key.clone()),
                ));
                continue;
            };
            keys.push(response_key.clone());
            field_futures.push(execute_field(
                ctx,
                runtime,
                operation,
                parent,
                parent_graphql_type,
                field_def,
                fields.clone(),
                path.field(response_key.clone()),
            ));
        }

        let results = if concurrent { runtime.gather(field_futures).await } else {
            let mut out = Vec::with_capacity(field_futures.len());
            for f in field_futures {
                out.push(f.await);
            }
            out
        };

        let mut map = IndexMap::new();
        for (key, result) in keys.into_iter().zip(results) {
            match result {
                Ok(value) => {
                    map.insert(key, value);
                }
                Err(()) => return Ok(None),
            }
        }
        Ok(Some(ResolvedValue::Object(map)))
    }
    .boxed()
}

#[allow(clippy::too_many_arguments)]
fn execute_field<'a, R: Runtime>(
    ctx: &'a ExecutionContext<'a>,
    runtime: &'a R,
    operation: &'a ast::OperationDefinition,
    parent: &'a dyn Resolvable,
    parent_type: &'a GraphQLType,
    field_def: &'a crate::types::Field,
    ast_fields: Vec<&'a ast::Field>,
    path: Path,
) -> Deferred<'a, Result<ResolvedValue, ()>> {
    async move {
        let primary = ast_fields[0];

        let mut arguments = IndexMap::new();
        for arg_def in &field_def.arguments {
            let supplied = primary.arguments.iter().find(|a| a.name == arg_def.name);
            let arg_path = path.field(format!("@{}", arg_def.name));
            let value = match supplied {
                Some(arg) => crate::coercion::coerce_literal_value(ctx.schema, &arg_def.type_annotation, &arg.value, ctx.variable_values, &arg_path),
                None => crate::coercion::coerce_variable_value(ctx.schema, &arg_def.type_annotation, arg_def.default_value.as_ref(), None, &arg_path),
            };
            match value {
                Ok(v) => {
                    arguments.insert(arg_def.resolver_key().to_string(), v);
                }
                Err(err) => {
                    ctx.push_error(ExecutionError::internal(err.to_string(), path.clone()));
                    return Err(());
                }
            }
        }

        let info = ResolveInfo {
            field_def,
            parent_type,
            path: path.clone(),
            schema: ctx.schema,
            variable_values: ctx.variable_values,
            operation,
            fragments: ctx.fragments,
            query_field: primary,
        };
        let field_context = FieldContext { parent, arguments: Arguments(arguments), info };

        let _span = tracing::trace_span!("resolve_field", path = %path, field = %field_def.name).entered();
        let resolver_output = match &field_def.resolver {
            Some(resolver) => resolver.resolve(&field_context),
            None => DefaultResolver { key: field_def.resolver_key().to_string() }.resolve(&field_context),
        };

        let output = match resolver_output {
            Ok(output) => output,
            Err(err) => {
                ctx.push_error(ExecutionError::Resolver(err));
                if field_def.type_annotation.nullable() {
                    return Ok(ResolvedValue::Null);
                }
                return Err(());
            }
        };

        let merged_selection_set = merge_selection_sets(&ast_fields);
        complete_value(ctx, runtime, operation, &field_def.type_annotation, output, merged_selection_set.as_ref(), path).await
    }
    .boxed()
}

/// Concatenates every same-response-key field's selections into one set, a
/// simplified stand-in for full field-selection-merging — sufficient for
/// driving completion of the union of what each occurrence asked for.
fn merge_selection_sets(fields: &[&ast::Field]) -> Option<ast::SelectionSet> {
    let mut selections = Vec::new();
    let mut span = None;
    for field in fields {
        if let Some(selection_set) = &field.selection_set {
            span.get_or_insert(selection_set.span);
            selections.extend(selection_set.selections.iter().cloned());
        }
    }
    if selections.is_empty() {
        None
    } else {
        Some(ast::SelectionSet { selections, span: span.unwrap_or(field_span(fields[0])) })
    }
}

fn field_span(field: &ast::Field) -> libgraphql_parser::Span {
    field.span
}

#[allow(clippy::too_many_arguments)]
fn complete_value<'a, R: Runtime>(
    ctx: &'a ExecutionContext<'a>,
    runtime: &'a R,
    operation: &'a ast::OperationDefinition,
    type_annotation: &'a TypeAnnotation,
    output: FieldOutput,
    selection_set: Option<&'a ast::SelectionSet>,
    path: Path,
) -> Deferred<'a, Result<ResolvedValue, ()>> {
    async move {
        if matches!(output, FieldOutput::Null) {
            return if type_annotation.nullable() {
                Ok(ResolvedValue::Null)
            } else {
                ctx.push_error(ExecutionError::internal("non-null field resolved to null", path.clone()));
                Err(())
            };
        }

        match type_annotation {
            TypeAnnotation::List { inner, nullable, .. } => {
                let FieldOutput::List(items) = output else {
                    ctx.push_error(ExecutionError::internal("expected a list result for a list-typed field", path.clone()));
                    return Err(());
                };
                let mut futures = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    futures.push(complete_value(ctx, runtime, operation, inner, item, selection_set, path.index(index)));
                }
                let results = runtime.gather(futures).await;
                let mut out = Vec::with_capacity(results.len());
                for r in results {
                    match r {
                        Ok(v) => out.push(v),
                        Err(()) if *nullable => return Ok(ResolvedValue::Null),
                        Err(()) => return Err(()),
                    }
                }
                Ok(ResolvedValue::List(out))
            }
            TypeAnnotation::Named { type_ref, nullable, .. } => {
                let Ok(named_type) = type_ref.deref(ctx.schema) else {
                    ctx.push_error(ExecutionError::internal(format!("unknown type `{}`", type_ref.name()), path.clone()));
                    return Err(());
                };
                let result = complete_named_value(ctx, runtime, operation, named_type, output, selection_set, path.clone()).await;
                match result {
                    Ok(v) => Ok(v),
                    Err(()) if *nullable => Ok(ResolvedValue::Null),
                    Err(()) => Err(()),
                }
            }
        }
    }
    .boxed()
}

fn complete_named_value<'a, R: Runtime>(
    ctx: &'a ExecutionContext<'a>,
    runtime: &'a R,
    operation: &'a ast::OperationDefinition,
    named_type: &'a GraphQLType,
    output: FieldOutput,
    selection_set: Option<&'a ast::SelectionSet>,
    path: Path,
) -> Deferred<'a, Result<ResolvedValue, ()>> {
    async move {
        match named_type {
            GraphQLType::Scalar(scalar) => match output {
                FieldOutput::Leaf(value) => scalar.implementation.serialize(&value, &path).map_err(|e| {
                    ctx.push_error(ExecutionError::internal(e.to_string(), path.clone()));
                }),
                _ => {
                    ctx.push_error(ExecutionError::internal("expected a leaf value for a scalar field", path.clone()));
                    Err(())
                }
            },
            GraphQLType::Enum(enum_type) => match output {
                FieldOutput::Leaf(ResolvedValue::Enum(name)) | FieldOutput::Leaf(ResolvedValue::String(name)) => match enum_type.value(&name) {
                    Some(v) => Ok(ResolvedValue::Enum(v.name.clone())),
                    None => {
                        ctx.push_error(ExecutionError::internal(format!("`{name}` is not a value of enum `{}`", enum_type.name), path.clone()));
                        Err(())
                    }
                },
                _ => {
                    ctx.push_error(ExecutionError::internal("expected an enum value", path.clone()));
                    Err(())
                }
            },
            GraphQLType::Object(object) => {
                let FieldOutput::Node(node) = output else {
                    ctx.push_error(ExecutionError::internal("expected an object value", path.clone()));
                    return Err(());
                };
                let Some(selection_set) = selection_set else {
                    ctx.push_error(ExecutionError::internal("object-typed field has no selection set", path.clone()));
                    return Err(());
                };
                let groups = collect_fields(
                    selection_set,
                    &object.name,
                    |t, i| type_condition_is_satisfied(ctx.schema, t, i),
                    ctx.fragments,
                    ctx.variable_values,
                    &path,
                )
                .map_err(|e| ctx.push_error(e))?;
                execute_grouped_fields(ctx, runtime, operation, node.as_ref(), &object.name, groups, path.clone(), true).await.and_then(|v| v.ok_or(()))
            }
            GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                let FieldOutput::Node(node) = output else {
                    ctx.push_error(ExecutionError::internal("expected an object value for an interface/union field", path.clone()));
                    return Err(());
                };
                let Some(concrete_name) = resolve_abstract_type(ctx.schema, named_type, node.as_ref()) else {
                    ctx.push_error(ExecutionError::internal("could not determine the concrete type of an abstract-typed value", path.clone()));
                    return Err(());
                };
                let Some(selection_set) = selection_set else {
                    ctx.push_error(ExecutionError::internal("abstract-typed field has no selection set", path.clone()));
                    return Err(());
                };
                let groups = collect_fields(
                    selection_set,
                    &concrete_name,
                    |t, i| type_condition_is_satisfied(ctx.schema, t, i),
                    ctx.fragments,
                    ctx.variable_values,
                    &path,
                )
                .map_err(|e| ctx.push_error(e))?;
                execute_grouped_fields(ctx, runtime, operation, node.as_ref(), &concrete_name, groups, path.clone(), true).await.and_then(|v| v.ok_or(()))
            }
            GraphQLType::InputObject(_) => {
                ctx.push_error(ExecutionError::internal("an input object cannot appear in output position", path.clone()));
                Err(())
            }
        }
    }
    .boxed()
}

/// Resolves the concrete object type backing an interface/union value: the
/// abstract type's `resolve_type` hook if one is configured, otherwise every
/// object type in the schema that the value structurally reports itself as
/// via [`Resolvable::resolve_field`]'s sibling contract is out of scope here
/// — this engine requires an explicit `resolve_type` for every abstract
/// type a schema declares.
fn resolve_abstract_type(_schema: &Schema, named_type: &GraphQLType, value: &dyn Resolvable) -> Option<String> {
    match named_type {
        GraphQLType::Interface(iface) => iface.resolve_type.as_ref().and_then(|r| r.resolve_type(value)),
        GraphQLType::Union(union_type) => union_type.resolve_type.as_ref().and_then(|r| r.resolve_type(value)),
        _ => None,
    }
}
