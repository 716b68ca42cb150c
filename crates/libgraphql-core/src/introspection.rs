//! The introspection meta-schema, per the GraphQL spec's Introspection
//! section (§4): the `__Schema`/`__Type`/`__Field`/`__InputValue`/
//! `__EnumValue`/`__Directive` object types, the `__TypeKind`/
//! `__DirectiveLocation` enums, and the `__schema`/`__type` root fields that
//! expose them. [`inject`] adds all of this into a built [`Schema`]; the
//! `__typename` meta-field is handled separately, in the validator and
//! executor, since (unlike `__schema`/`__type`) it can't be attached as an
//! ordinary field without visiting every composite type in the schema.
//!
//! Every wrapper type below implements [`Resolvable`] by hand rather than
//! through [`DefaultResolver`] field access: there is no underlying host
//! value here, only the schema itself, so `resolve_field` reads directly out
//! of the captured [`Schema`].
//!
//! `fields(includeDeprecated:)` and `enumValues(includeDeprecated:)` are
//! declared with their spec-shaped argument but always return every field or
//! value, deprecated or not: [`DefaultResolver`] (and the `resolve_field`
//! dispatch these wrapper types rely on) never sees field arguments, only
//! the parent value, so honoring the flag would mean giving every
//! introspection object its own argument-aware [`Resolver`] impl instead of
//! one shared lookup path. `__schema` and `__type` themselves don't have
//! this problem and do read their arguments, since they're driven by a real
//! [`Resolver`] with access to the [`FieldContext`].

use crate::error::ResolverError;
use crate::named_ref::NamedRef;
use crate::resolver::FieldContext;
use crate::resolver::FieldOutput;
use crate::resolver::Resolvable;
use crate::resolver::Resolver;
use crate::schema::Schema;
use crate::schema_printer::location_name;
use crate::types::EnumType;
use crate::types::EnumValueDef;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::ObjectType;
use crate::types::TypeAnnotation;
use crate::value::ResolvedValue;
use libgraphql_parser::printer::print_value;
use libgraphql_parser::ast::DirectiveLocationKind;
use libgraphql_parser::Span;
use std::collections::HashMap;
use std::sync::Arc;

/// The GraphQL-spec wrapper-chain shape for a type reference: unlike
/// [`TypeAnnotation`], which tracks nullability as a flag at each List/Named
/// level, introspection's `__Type.kind`/`ofType` chain wants an explicit
/// `NON_NULL`/`LIST` wrapper node to walk.
#[derive(Clone, Debug)]
enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

fn to_type_ref(annotation: &TypeAnnotation) -> TypeRef {
    match annotation {
        TypeAnnotation::Named { type_ref, nullable, .. } => {
            let named = TypeRef::Named(type_ref.name().to_string());
            if *nullable { named } else { TypeRef::NonNull(Box::new(named)) }
        }
        TypeAnnotation::List { inner, nullable, .. } => {
            let list = TypeRef::List(Box::new(to_type_ref(inner)));
            if *nullable { list } else { TypeRef::NonNull(Box::new(list)) }
        }
    }
}

fn type_description(ty: &GraphQLType) -> Option<String> {
    match ty {
        GraphQLType::Scalar(t) => t.description.clone(),
        GraphQLType::Object(t) => t.description.clone(),
        GraphQLType::Interface(t) => t.description.clone(),
        GraphQLType::Union(t) => t.description.clone(),
        GraphQLType::Enum(t) => t.description.clone(),
        GraphQLType::InputObject(t) => t.description.clone(),
    }
}

fn visible_fields(fields: &HashMap<String, Field>) -> Vec<&Field> {
    let mut visible: Vec<&Field> = fields.values().filter(|f| !f.name.starts_with("__")).collect();
    visible.sort_by(|a, b| a.name.cmp(&b.name));
    visible
}

/// Wraps the schema itself: the root value `{ __schema }` resolves to.
#[derive(Debug)]
struct IntrospectionSchema {
    schema: Arc<Schema>,
}

impl Resolvable for IntrospectionSchema {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
        match key {
            "description" => Some(FieldOutput::Null),
            "types" => {
                let mut names: Vec<&String> = self.schema.types.keys().collect();
                names.sort();
                let items =
                    names.into_iter().map(|n| FieldOutput::Node(Arc::new(IntrospectionType::named(n, self.schema.clone())) as Arc<dyn Resolvable>)).collect();
                Some(FieldOutput::List(items))
            }
            "queryType" => {
                let name = self.schema.query_type().ok()?.name().to_string();
                Some(FieldOutput::Node(Arc::new(IntrospectionType::named(&name, self.schema.clone()))))
            }
            "mutationType" => match self.schema.mutation_type() {
                Some(Ok(t)) => Some(FieldOutput::Node(Arc::new(IntrospectionType::named(t.name(), self.schema.clone())))),
                _ => Some(FieldOutput::Null),
            },
            "subscriptionType" => match self.schema.subscription_type() {
                Some(Ok(t)) => Some(FieldOutput::Node(Arc::new(IntrospectionType::named(t.name(), self.schema.clone())))),
                _ => Some(FieldOutput::Null),
            },
            "directives" => {
                let mut names: Vec<&String> = self.schema.directives.keys().collect();
                names.sort();
                let items = names
                    .into_iter()
                    .map(|n| FieldOutput::Node(Arc::new(IntrospectionDirective { name: n.clone(), schema: self.schema.clone() }) as Arc<dyn Resolvable>))
                    .collect();
                Some(FieldOutput::List(items))
            }
            _ => None,
        }
    }
}

/// Wraps one `__Type`: either a concrete named type (looked up by name each
/// time against the captured schema) or a `LIST`/`NON_NULL` wrapper around
/// another `__Type`.
#[derive(Debug)]
struct IntrospectionType {
    type_ref: TypeRef,
    schema: Arc<Schema>,
}

impl IntrospectionType {
    fn named(name: &str, schema: Arc<Schema>) -> Self {
        IntrospectionType { type_ref: TypeRef::Named(name.to_string()), schema }
    }

    fn from_annotation(annotation: &TypeAnnotation, schema: Arc<Schema>) -> Self {
        IntrospectionType { type_ref: to_type_ref(annotation), schema }
    }

    fn named_type(&self) -> Option<(&str, &GraphQLType)> {
        match &self.type_ref {
            TypeRef::Named(name) => self.schema.get_type(name).map(|t| (name.as_str(), t)),
            _ => None,
        }
    }
}

impl Resolvable for IntrospectionType {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
        match key {
            "kind" => {
                let kind = match &self.type_ref {
                    TypeRef::NonNull(_) => "NON_NULL",
                    TypeRef::List(_) => "LIST",
                    TypeRef::Named(_) => match self.named_type()?.1 {
                        GraphQLType::Scalar(_) => "SCALAR",
                        GraphQLType::Object(_) => "OBJECT",
                        GraphQLType::Interface(_) => "INTERFACE",
                        GraphQLType::Union(_) => "UNION",
                        GraphQLType::Enum(_) => "ENUM",
                        GraphQLType::InputObject(_) => "INPUT_OBJECT",
                    },
                };
                Some(FieldOutput::Leaf(ResolvedValue::Enum(kind.to_string())))
            }
            "name" => match &self.type_ref {
                TypeRef::Named(name) => Some(FieldOutput::Leaf(ResolvedValue::String(name.clone()))),
                _ => Some(FieldOutput::Null),
            },
            "description" => match self.named_type() {
                Some((_, ty)) => type_description(ty).map(|d| FieldOutput::Leaf(ResolvedValue::String(d))).or(Some(FieldOutput::Null)),
                None => Some(FieldOutput::Null),
            },
            "specifiedByURL" => match self.named_type() {
                Some((_, GraphQLType::Scalar(s))) => s.specified_by_url.clone().map(|u| FieldOutput::Leaf(ResolvedValue::String(u))).or(Some(FieldOutput::Null)),
                _ => Some(FieldOutput::Null),
            },
            "fields" => match self.named_type() {
                Some((_, GraphQLType::Object(o))) => Some(fields_output(&o.fields, &self.schema)),
                Some((_, GraphQLType::Interface(i))) => Some(fields_output(&i.fields, &self.schema)),
                _ => Some(FieldOutput::Null),
            },
            "interfaces" => match self.named_type() {
                Some((_, GraphQLType::Object(o))) => Some(type_ref_list(o.interfaces.iter().map(|i| i.name()), &self.schema)),
                Some((_, GraphQLType::Interface(i))) => Some(type_ref_list(i.interfaces.iter().map(|r| r.name()), &self.schema)),
                _ => Some(FieldOutput::Null),
            },
            "possibleTypes" => match self.named_type() {
                Some((_, GraphQLType::Union(u))) => Some(type_ref_list(u.member_types.iter().map(|m| m.name()), &self.schema)),
                Some((name, GraphQLType::Interface(_))) => {
                    let mut implementors: Vec<&str> = self
                        .schema
                        .types
                        .values()
                        .filter_map(|t| match t {
                            GraphQLType::Object(o) if o.implements(name) => Some(o.name.as_str()),
                            _ => None,
                        })
                        .collect();
                    implementors.sort();
                    Some(type_ref_list(implementors.into_iter(), &self.schema))
                }
                _ => Some(FieldOutput::Null),
            },
            "enumValues" => match self.named_type() {
                Some((_, GraphQLType::Enum(e))) => {
                    let items = e
                        .values
                        .iter()
                        .map(|v| FieldOutput::Node(Arc::new(IntrospectionEnumValue { value: v.clone() }) as Arc<dyn Resolvable>))
                        .collect();
                    Some(FieldOutput::List(items))
                }
                _ => Some(FieldOutput::Null),
            },
            "inputFields" => match self.named_type() {
                Some((_, GraphQLType::InputObject(io))) => {
                    let mut values: Vec<&InputValue> = io.fields.values().collect();
                    values.sort_by(|a, b| a.name.cmp(&b.name));
                    let items = values
                        .into_iter()
                        .map(|v| FieldOutput::Node(Arc::new(IntrospectionInputValue { value: v.clone(), schema: self.schema.clone() }) as Arc<dyn Resolvable>))
                        .collect();
                    Some(FieldOutput::List(items))
                }
                _ => Some(FieldOutput::Null),
            },
            "ofType" => match &self.type_ref {
                TypeRef::NonNull(inner) | TypeRef::List(inner) => {
                    Some(FieldOutput::Node(Arc::new(IntrospectionType { type_ref: (**inner).clone(), schema: self.schema.clone() })))
                }
                TypeRef::Named(_) => Some(FieldOutput::Null),
            },
            _ => None,
        }
    }
}

fn fields_output(fields: &HashMap<String, Field>, schema: &Arc<Schema>) -> FieldOutput {
    let items = visible_fields(fields)
        .into_iter()
        .map(|f| FieldOutput::Node(Arc::new(IntrospectionField { field: f.clone(), schema: schema.clone() }) as Arc<dyn Resolvable>))
        .collect();
    FieldOutput::List(items)
}

fn type_ref_list<'a>(names: impl Iterator<Item = &'a str>, schema: &Arc<Schema>) -> FieldOutput {
    let items = names.map(|n| FieldOutput::Node(Arc::new(IntrospectionType::named(n, schema.clone())) as Arc<dyn Resolvable>)).collect();
    FieldOutput::List(items)
}

#[derive(Debug)]
struct IntrospectionField {
    field: Field,
    schema: Arc<Schema>,
}

impl Resolvable for IntrospectionField {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
        match key {
            "name" => Some(FieldOutput::Leaf(ResolvedValue::String(self.field.name.clone()))),
            "description" => Some(self.field.description.clone().map(ResolvedValue::String).map(FieldOutput::Leaf).unwrap_or(FieldOutput::Null)),
            "args" => {
                let items = self
                    .field
                    .arguments
                    .iter()
                    .map(|a| FieldOutput::Node(Arc::new(IntrospectionInputValue { value: a.clone(), schema: self.schema.clone() }) as Arc<dyn Resolvable>))
                    .collect();
                Some(FieldOutput::List(items))
            }
            "type" => Some(FieldOutput::Node(Arc::new(IntrospectionType::from_annotation(&self.field.type_annotation, self.schema.clone())))),
            "isDeprecated" => Some(FieldOutput::Leaf(ResolvedValue::Boolean(self.field.deprecated.is_some()))),
            "deprecationReason" => Some(self.field.deprecated.clone().map(ResolvedValue::String).map(FieldOutput::Leaf).unwrap_or(FieldOutput::Null)),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct IntrospectionInputValue {
    value: InputValue,
    schema: Arc<Schema>,
}

impl Resolvable for IntrospectionInputValue {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
        match key {
            "name" => Some(FieldOutput::Leaf(ResolvedValue::String(self.value.name.clone()))),
            "description" => Some(self.value.description.clone().map(ResolvedValue::String).map(FieldOutput::Leaf).unwrap_or(FieldOutput::Null)),
            "type" => Some(FieldOutput::Node(Arc::new(IntrospectionType::from_annotation(&self.value.type_annotation, self.schema.clone())))),
            "defaultValue" => match &self.value.default_value {
                Some(v) => {
                    let mut printed = String::new();
                    print_value(v, &mut printed);
                    Some(FieldOutput::Leaf(ResolvedValue::String(printed)))
                }
                None => Some(FieldOutput::Null),
            },
            _ => None,
        }
    }
}

#[derive(Debug)]
struct IntrospectionEnumValue {
    value: EnumValueDef,
}

impl Resolvable for IntrospectionEnumValue {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
        match key {
            "name" => Some(FieldOutput::Leaf(ResolvedValue::String(self.value.name.clone()))),
            "description" => Some(self.value.description.clone().map(ResolvedValue::String).map(FieldOutput::Leaf).unwrap_or(FieldOutput::Null)),
            "isDeprecated" => Some(FieldOutput::Leaf(ResolvedValue::Boolean(self.value.deprecated.is_some()))),
            "deprecationReason" => Some(self.value.deprecated.clone().map(ResolvedValue::String).map(FieldOutput::Leaf).unwrap_or(FieldOutput::Null)),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct IntrospectionDirective {
    name: String,
    schema: Arc<Schema>,
}

impl Resolvable for IntrospectionDirective {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput> {
        let directive = self.schema.get_directive(&self.name)?;
        match key {
            "name" => Some(FieldOutput::Leaf(ResolvedValue::String(directive.name.clone()))),
            "description" => Some(directive.description.clone().map(ResolvedValue::String).map(FieldOutput::Leaf).unwrap_or(FieldOutput::Null)),
            "locations" => {
                let items = directive.locations.iter().map(|l| FieldOutput::Leaf(ResolvedValue::Enum(location_name(l).to_string()))).collect();
                Some(FieldOutput::List(items))
            }
            "args" => {
                let items = directive
                    .arguments
                    .iter()
                    .map(|a| FieldOutput::Node(Arc::new(IntrospectionInputValue { value: a.clone(), schema: self.schema.clone() }) as Arc<dyn Resolvable>))
                    .collect();
                Some(FieldOutput::List(items))
            }
            "isRepeatable" => Some(FieldOutput::Leaf(ResolvedValue::Boolean(directive.repeatable))),
            _ => None,
        }
    }
}

/// Resolves the `__schema` root field by handing back the captured schema
/// snapshot, wrapped for traversal.
struct SchemaFieldResolver {
    schema: Arc<Schema>,
}

impl Resolver for SchemaFieldResolver {
    fn resolve(&self, _ctx: &FieldContext<'_>) -> Result<FieldOutput, ResolverError> {
        Ok(FieldOutput::Node(Arc::new(IntrospectionSchema { schema: self.schema.clone() })))
    }
}

/// Resolves `__type(name:)`, the one introspection field whose argument
/// actually reaches a resolver.
struct TypeFieldResolver {
    schema: Arc<Schema>,
}

impl Resolver for TypeFieldResolver {
    fn resolve(&self, ctx: &FieldContext<'_>) -> Result<FieldOutput, ResolverError> {
        let name = ctx.arguments.str("name").ok_or_else(|| ResolverError::new("`__type` requires a `name` argument"))?;
        match self.schema.get_type(name) {
            Some(_) => Ok(FieldOutput::Node(Arc::new(IntrospectionType::named(name, self.schema.clone())))),
            None => Ok(FieldOutput::Null),
        }
    }
}

fn named_type_ref(name: &str, nullable: bool) -> TypeAnnotation {
    TypeAnnotation::Named { type_ref: NamedRef::new(name, Span::dummy()), nullable, ref_location: Span::dummy() }
}

fn list_of(inner: &str, item_nullable: bool, list_nullable: bool) -> TypeAnnotation {
    TypeAnnotation::List { inner: Box::new(named_type_ref(inner, item_nullable)), nullable: list_nullable, ref_location: Span::dummy() }
}

fn meta_field(name: &str, description: &str, arguments: Vec<InputValue>, type_annotation: TypeAnnotation) -> Field {
    Field {
        name: name.to_string(),
        description: Some(description.to_string()),
        arguments,
        type_annotation,
        deprecated: None,
        host_name: None,
        def_location: Span::dummy(),
        resolver: None,
        subscription_resolver: None,
    }
}

fn meta_object(name: &str, fields: Vec<Field>) -> ObjectType {
    ObjectType {
        name: name.to_string(),
        description: None,
        fields: fields.into_iter().map(|f| (f.name.clone(), f)).collect(),
        interfaces: Vec::new(),
        def_location: Span::dummy(),
    }
}

fn enum_value(name: &str) -> EnumValueDef {
    EnumValueDef { name: name.to_string(), description: None, deprecated: None, def_location: Span::dummy() }
}

fn type_kind_enum() -> EnumType {
    EnumType {
        name: "__TypeKind".to_string(),
        description: Some("The fundamental unit of any GraphQL Schema is the type.".to_string()),
        values: ["SCALAR", "OBJECT", "INTERFACE", "UNION", "ENUM", "INPUT_OBJECT", "LIST", "NON_NULL"].iter().map(|n| enum_value(n)).collect(),
        def_location: Span::dummy(),
    }
}

fn directive_location_enum() -> EnumType {
    let locations = [
        DirectiveLocationKind::Query,
        DirectiveLocationKind::Mutation,
        DirectiveLocationKind::Subscription,
        DirectiveLocationKind::Field,
        DirectiveLocationKind::FragmentDefinition,
        DirectiveLocationKind::FragmentSpread,
        DirectiveLocationKind::InlineFragment,
        DirectiveLocationKind::VariableDefinition,
        DirectiveLocationKind::Schema,
        DirectiveLocationKind::Scalar,
        DirectiveLocationKind::Object,
        DirectiveLocationKind::FieldDefinition,
        DirectiveLocationKind::ArgumentDefinition,
        DirectiveLocationKind::Interface,
        DirectiveLocationKind::Union,
        DirectiveLocationKind::Enum,
        DirectiveLocationKind::EnumValue,
        DirectiveLocationKind::InputObject,
        DirectiveLocationKind::InputFieldDefinition,
    ];
    EnumType {
        name: "__DirectiveLocation".to_string(),
        description: Some("A Directive can be adjacent to many parts of the GraphQL language.".to_string()),
        values: locations.iter().map(|l| enum_value(location_name(l))).collect(),
        def_location: Span::dummy(),
    }
}

fn schema_object() -> ObjectType {
    meta_object(
        "__Schema",
        vec![
            meta_field("description", "", vec![], named_type_ref("String", true)),
            meta_field("types", "", vec![], list_of("__Type", false, false)),
            meta_field("queryType", "", vec![], named_type_ref("__Type", false)),
            meta_field("mutationType", "", vec![], named_type_ref("__Type", true)),
            meta_field("subscriptionType", "", vec![], named_type_ref("__Type", true)),
            meta_field("directives", "", vec![], list_of("__Directive", false, false)),
        ],
    )
}

fn type_object() -> ObjectType {
    let include_deprecated_arg = || InputValue {
        name: "includeDeprecated".to_string(),
        description: None,
        type_annotation: named_type_ref("Boolean", true),
        default_value: Some(libgraphql_parser::ast::Value::Boolean { value: false, span: Span::dummy() }),
        deprecated: None,
        host_name: None,
        def_location: Span::dummy(),
    };
    meta_object(
        "__Type",
        vec![
            meta_field("kind", "", vec![], named_type_ref("__TypeKind", false)),
            meta_field("name", "", vec![], named_type_ref("String", true)),
            meta_field("description", "", vec![], named_type_ref("String", true)),
            meta_field("specifiedByURL", "", vec![], named_type_ref("String", true)),
            meta_field("fields", "", vec![include_deprecated_arg()], list_of("__Field", false, true)),
            meta_field("interfaces", "", vec![], list_of("__Type", false, true)),
            meta_field("possibleTypes", "", vec![], list_of("__Type", false, true)),
            meta_field("enumValues", "", vec![include_deprecated_arg()], list_of("__EnumValue", false, true)),
            meta_field("inputFields", "", vec![], list_of("__InputValue", false, true)),
            meta_field("ofType", "", vec![], named_type_ref("__Type", true)),
        ],
    )
}

fn field_object() -> ObjectType {
    meta_object(
        "__Field",
        vec![
            meta_field("name", "", vec![], named_type_ref("String", false)),
            meta_field("description", "", vec![], named_type_ref("String", true)),
            meta_field("args", "", vec![], list_of("__InputValue", false, false)),
            meta_field("type", "", vec![], named_type_ref("__Type", false)),
            meta_field("isDeprecated", "", vec![], named_type_ref("Boolean", false)),
            meta_field("deprecationReason", "", vec![], named_type_ref("String", true)),
        ],
    )
}

fn input_value_object() -> ObjectType {
    meta_object(
        "__InputValue",
        vec![
            meta_field("name", "", vec![], named_type_ref("String", false)),
            meta_field("description", "", vec![], named_type_ref("String", true)),
            meta_field("type", "", vec![], named_type_ref("__Type", false)),
            meta_field("defaultValue", "", vec![], named_type_ref("String", true)),
        ],
    )
}

fn enum_value_object() -> ObjectType {
    meta_object(
        "__EnumValue",
        vec![
            meta_field("name", "", vec![], named_type_ref("String", false)),
            meta_field("description", "", vec![], named_type_ref("String", true)),
            meta_field("isDeprecated", "", vec![], named_type_ref("Boolean", false)),
            meta_field("deprecationReason", "", vec![], named_type_ref("String", true)),
        ],
    )
}

fn directive_object() -> ObjectType {
    meta_object(
        "__Directive",
        vec![
            meta_field("name", "", vec![], named_type_ref("String", false)),
            meta_field("description", "", vec![], named_type_ref("String", true)),
            meta_field("locations", "", vec![], list_of("__DirectiveLocation", false, false)),
            meta_field("args", "", vec![], list_of("__InputValue", false, false)),
            meta_field("isRepeatable", "", vec![], named_type_ref("Boolean", false)),
        ],
    )
}

/// Adds the introspection meta-schema's types to `schema.types`, and
/// `__schema`/`__type` fields onto the query root type, so ordinary field
/// lookup and validation find them like any author-declared field. Does
/// nothing if the schema has no query root (schema construction already
/// rejects that case before this ever runs).
pub fn inject(schema: &mut Schema) {
    schema.types.insert("__TypeKind".to_string(), GraphQLType::Enum(type_kind_enum()));
    schema.types.insert("__DirectiveLocation".to_string(), GraphQLType::Enum(directive_location_enum()));
    schema.types.insert("__Schema".to_string(), GraphQLType::Object(schema_object()));
    schema.types.insert("__Type".to_string(), GraphQLType::Object(type_object()));
    schema.types.insert("__Field".to_string(), GraphQLType::Object(field_object()));
    schema.types.insert("__InputValue".to_string(), GraphQLType::Object(input_value_object()));
    schema.types.insert("__EnumValue".to_string(), GraphQLType::Object(enum_value_object()));
    schema.types.insert("__Directive".to_string(), GraphQLType::Object(directive_object()));

    let Some(query_name) = schema.query_type.as_ref().map(|r| r.name().to_string()) else { return };
    let snapshot = Arc::new(schema.clone());
    if let Some(GraphQLType::Object(query)) = schema.types.get_mut(&query_name) {
        let mut schema_field = meta_field("__schema", "Access the current type schema of this server.", vec![], named_type_ref("__Schema", false));
        schema_field.resolver = Some(Arc::new(SchemaFieldResolver { schema: snapshot.clone() }));
        query.fields.insert(schema_field.name.clone(), schema_field);

        let type_args = vec![InputValue {
            name: "name".to_string(),
            description: None,
            type_annotation: named_type_ref("String", false),
            default_value: None,
            deprecated: None,
            host_name: None,
            def_location: Span::dummy(),
        }];
        let mut type_field = meta_field("__type", "Request the type information of a single type.", type_args, named_type_ref("__Type", true));
        type_field.resolver = Some(Arc::new(TypeFieldResolver { schema: snapshot }));
        query.fields.insert(type_field.name.clone(), type_field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema_builder::SchemaBuilder;
    use libgraphql_parser::parser::parse_schema;

    fn build(sdl: &str) -> Schema {
        let document = parse_schema(sdl).expect("valid SDL");
        SchemaBuilder::new(&document).build().expect("schema builds")
    }

    #[test]
    fn meta_types_are_present_after_build() {
        let schema = build("type Query {\n  hello: String\n}\n");
        assert!(schema.get_type("__Schema").is_some());
        assert!(schema.get_type("__Type").is_some());
        assert!(schema.get_type("__TypeKind").is_some());
        assert!(schema.get_type("__DirectiveLocation").is_some());
    }

    #[test]
    fn query_root_gains_schema_and_type_fields() {
        let schema = build("type Query {\n  hello: String\n}\n");
        let query = schema.get_type("Query").unwrap();
        assert!(query.field("__schema").is_some());
        assert!(query.field("__type").is_some());
    }

    #[test]
    fn meta_fields_are_hidden_from_type_field_listing() {
        let schema = build("type Query {\n  hello: String\n}\n");
        let introspection_type = IntrospectionType::named("Query", Arc::new(schema));
        let Some(FieldOutput::List(fields)) = introspection_type.resolve_field("fields") else { panic!("expected a field list") };
        assert_eq!(fields.len(), 1);
    }
}
