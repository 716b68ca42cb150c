//! Materializes an executable [`Schema`] from a parsed SDL [`ast::Document`]
//! plus caller-supplied side inputs: a resolver map, type-resolver
//! hooks for interfaces/unions, additional scalar implementations, and
//! schema directive implementations.
//!
//! Some builders break reference cycles with a placeholder-then-hydrate
//! construction. This port doesn't need it: every cross-type pointer in
//! [`Schema`] is a [`crate::named_ref::NamedRef`] resolved by name against
//! the owning `Schema`, not a Rust reference, so a type can name another
//! type that hasn't been built yet without any indirection beyond the
//! string itself (see the design note on cyclic type references). The
//! builder therefore gathers, then builds each type in one pass.

use crate::error::CoercionError;
use crate::error::SchemaBuildError;
use crate::named_ref::NamedRef;
use crate::path::Path;
use crate::resolver::Resolver;
use crate::resolver::SourceResolver;
use crate::schema::missing_query_root;
use crate::schema::Schema;
use crate::types::enum_type::EnumValueDef;
use crate::types::scalar::additional_scalar;
use crate::types::scalar::builtin_scalar;
use crate::types::DirectiveDef;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputObjectType;
use crate::types::InputValue;
use crate::types::InterfaceType;
use crate::types::NamedTypeRef;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeAnnotation;
use crate::types::TypeResolver;
use crate::types::UnionType;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use libgraphql_parser::ast;
use libgraphql_parser::Span;
use std::collections::HashMap;
use std::sync::Arc;

/// What a [`SchemaDirective`] hook returns after inspecting (and optionally
/// mutating) the schema element it was applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveOutcome {
    Keep,
    /// Drops the element the directive was applied to. Dangling references
    /// left behind (an interface requiring a now-removed field, a union
    /// member that no longer exists) surface as ordinary
    /// validation errors from the final `Schema::validate()` call,
    /// rather than being chased down eagerly here.
    Remove,
}

/// A schema directive implementation: one hook per location it can be
/// declared `on`. Every hook defaults to a no-op `Keep` so
/// an implementation only needs to override the locations it cares about.
/// Repeatable directives invoke the matching hook once per application, in
/// source order.
pub trait SchemaDirective: Send + Sync {
    fn on_schema(&self, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_scalar(&self, _scalar: &mut ScalarType, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_object(&self, _object: &mut ObjectType, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_field(&self, _owner: &str, _field: &mut Field, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_argument(&self, _owner: &str, _field: &str, _argument: &mut InputValue, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_interface(&self, _interface: &mut InterfaceType, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_union(&self, _union_type: &mut UnionType, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_enum(&self, _enum_type: &mut EnumType, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_enum_value(&self, _owner: &str, _value: &mut EnumValueDef, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_input_object(&self, _input_object: &mut InputObjectType, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
    fn on_input_field(&self, _owner: &str, _field: &mut InputValue, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
        DirectiveOutcome::Keep
    }
}

/// Builds a [`Schema`] from a single parsed SDL document. Every side input
/// (resolvers, type resolvers, additional scalars, host-name aliases,
/// schema directive implementations) is supplied through the builder
/// methods before calling [`SchemaBuilder::build`]; nothing is read from
/// global state.
pub struct SchemaBuilder<'a> {
    document: &'a ast::Document,
    field_resolvers: HashMap<(String, String), Arc<dyn Resolver>>,
    subscription_resolvers: HashMap<(String, String), Arc<dyn SourceResolver>>,
    type_resolvers: HashMap<String, Arc<dyn TypeResolver>>,
    additional_scalars: HashMap<String, ScalarType>,
    host_names: HashMap<(String, String), String>,
    schema_directives: HashMap<String, Arc<dyn SchemaDirective>>,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(document: &'a ast::Document) -> Self {
        SchemaBuilder {
            document,
            field_resolvers: HashMap::new(),
            subscription_resolvers: HashMap::new(),
            type_resolvers: HashMap::new(),
            additional_scalars: HashMap::new(),
            host_names: HashMap::new(),
            schema_directives: HashMap::new(),
        }
    }

    pub fn resolver(mut self, type_name: impl Into<String>, field_name: impl Into<String>, resolver: Arc<dyn Resolver>) -> Self {
        self.field_resolvers.insert((type_name.into(), field_name.into()), resolver);
        self
    }

    pub fn subscription_resolver(mut self, type_name: impl Into<String>, field_name: impl Into<String>, resolver: Arc<dyn SourceResolver>) -> Self {
        self.subscription_resolvers.insert((type_name.into(), field_name.into()), resolver);
        self
    }

    pub fn type_resolver(mut self, type_name: impl Into<String>, resolver: Arc<dyn TypeResolver>) -> Self {
        self.type_resolvers.insert(type_name.into(), resolver);
        self
    }

    pub fn additional_scalar(mut self, scalar: ScalarType) -> Self {
        self.additional_scalars.insert(scalar.name.clone(), scalar);
        self
    }

    pub fn host_name(mut self, type_name: impl Into<String>, field_name: impl Into<String>, host_name: impl Into<String>) -> Self {
        self.host_names.insert((type_name.into(), field_name.into()), host_name.into());
        self
    }

    pub fn schema_directive(mut self, name: impl Into<String>, directive: Arc<dyn SchemaDirective>) -> Self {
        self.schema_directives.insert(name.into(), directive);
        self
    }

    pub fn build(self) -> Result<Schema, SchemaBuildError> {
        tracing::debug!(definition_count = self.document.definitions.len(), "building schema");
        // Step 1: gather all type/directive definitions and extensions,
        // rejecting duplicates.
        let mut type_defs: IndexMap<String, &ast::TypeDefinition> = IndexMap::new();
        let mut directive_defs: IndexMap<String, &ast::DirectiveDefinition> = IndexMap::new();
        let mut schema_defs: Vec<&ast::SchemaDefinition> = Vec::new();
        let mut object_extensions: HashMap<String, Vec<&ast::ObjectTypeDefinition>> = HashMap::new();
        let mut interface_extensions: HashMap<String, Vec<&ast::InterfaceTypeDefinition>> = HashMap::new();
        let mut union_extensions: HashMap<String, Vec<&ast::UnionTypeDefinition>> = HashMap::new();
        let mut enum_extensions: HashMap<String, Vec<&ast::EnumTypeDefinition>> = HashMap::new();
        let mut input_object_extensions: HashMap<String, Vec<&ast::InputObjectTypeDefinition>> = HashMap::new();

        for def in &self.document.definitions {
            match def {
                ast::Definition::TypeSystem(td) => {
                    if type_defs.insert(td.name().to_string(), td).is_some() {
                        return Err(SchemaBuildError::DuplicateTypeDefinition { name: td.name().to_string() });
                    }
                }
                ast::Definition::Directive(dd) => {
                    if directive_defs.insert(dd.name.clone(), dd).is_some() {
                        return Err(SchemaBuildError::DuplicateDirectiveDefinition { name: dd.name.clone() });
                    }
                }
                ast::Definition::Schema(sd) => schema_defs.push(sd),
                ast::Definition::TypeSystemExtension(ext) => match ext {
                    ast::TypeExtension::Object(o) => object_extensions.entry(o.name.clone()).or_default().push(o),
                    ast::TypeExtension::Interface(i) => interface_extensions.entry(i.name.clone()).or_default().push(i),
                    ast::TypeExtension::Union(u) => union_extensions.entry(u.name.clone()).or_default().push(u),
                    ast::TypeExtension::Enum(e) => enum_extensions.entry(e.name.clone()).or_default().push(e),
                    ast::TypeExtension::InputObject(io) => input_object_extensions.entry(io.name.clone()).or_default().push(io),
                    ast::TypeExtension::Scalar(_) => {}
                    ast::TypeExtension::Schema(s) => schema_defs.push(s),
                },
                ast::Definition::Operation(_) | ast::Definition::Fragment(_) => {}
            }
        }

        // Directives declared in the SDL itself, seeded with the built-ins;
        // an SDL redeclaration of a built-in name is a duplicate.
        let mut directives: HashMap<String, DirectiveDef> = Schema::empty().directives;
        for (name, dd) in &directive_defs {
            if directives.contains_key(name) {
                return Err(SchemaBuildError::DuplicateDirectiveDefinition { name: name.clone() });
            }
            directives.insert(name.clone(), build_directive_def(dd));
        }

        // Step 3: instantiate every named type, scalars included. Step 2's
        // placeholder/hydrate split collapses into this single pass (see
        // the module doc comment).
        let mut types: HashMap<String, GraphQLType> = HashMap::new();
        for name in crate::schema::BUILTIN_SCALAR_NAMES {
            types.insert(name.to_string(), GraphQLType::Scalar(builtin_scalar(name).expect("covers every builtin name")));
        }

        for (name, type_def) in &type_defs {
            if types.contains_key(name) {
                // An SDL redeclaration of a built-in scalar name; the
                // built-in implementation always wins.
                continue;
            }
            let built = match type_def {
                ast::TypeDefinition::Scalar(s) => {
                    let base = self
                        .additional_scalars
                        .get(name)
                        .cloned()
                        .or_else(|| additional_scalar(name))
                        .ok_or_else(|| SchemaBuildError::UnknownScalar { name: name.clone() })?;
                    GraphQLType::Scalar(ScalarType { description: s.description.clone(), def_location: s.span, ..base })
                }
                ast::TypeDefinition::Object(o) => {
                    let extensions = object_extensions.get(name).map(Vec::as_slice).unwrap_or(&[]);
                    GraphQLType::Object(self.build_object(o, extensions))
                }
                ast::TypeDefinition::Interface(i) => {
                    let extensions = interface_extensions.get(name).map(Vec::as_slice).unwrap_or(&[]);
                    GraphQLType::Interface(self.build_interface(i, extensions))
                }
                ast::TypeDefinition::Union(u) => {
                    let extensions = union_extensions.get(name).map(Vec::as_slice).unwrap_or(&[]);
                    GraphQLType::Union(self.build_union(u, extensions))
                }
                ast::TypeDefinition::Enum(e) => {
                    let extensions = enum_extensions.get(name).map(Vec::as_slice).unwrap_or(&[]);
                    GraphQLType::Enum(build_enum(e, extensions))
                }
                ast::TypeDefinition::InputObject(io) => {
                    let extensions = input_object_extensions.get(name).map(Vec::as_slice).unwrap_or(&[]);
                    GraphQLType::InputObject(build_input_object(io, extensions))
                }
            };
            types.insert(name.clone(), built);
        }

        // Step 5: apply schema directives, in declaration order, before
        // final validation.
        let scratch = Schema { types: types.clone(), directives: directives.clone(), query_type: None, mutation_type: None, subscription_type: None };
        self.apply_schema_directives(&mut types, &scratch, &schema_defs)?;

        // Root operation types: an explicit `schema { ... }` definition (plus
        // any `extend schema` root operation types) wins; otherwise fall
        // back to the conventional `Query`/`Mutation`/`Subscription` names.
        let mut query_type = None;
        let mut mutation_type = None;
        let mut subscription_type = None;
        let mut saw_schema_def = false;
        for schema_def in &schema_defs {
            saw_schema_def = true;
            for root in &schema_def.root_operation_types {
                let type_ref = NamedTypeRef::new(&root.named_type, root.span);
                match root.operation {
                    ast::OperationKind::Query => query_type = Some(type_ref),
                    ast::OperationKind::Mutation => mutation_type = Some(type_ref),
                    ast::OperationKind::Subscription => subscription_type = Some(type_ref),
                }
            }
        }
        if !saw_schema_def {
            if types.contains_key("Query") {
                query_type = Some(NamedTypeRef::new("Query", Span::dummy()));
            }
            if types.contains_key("Mutation") {
                mutation_type = Some(NamedTypeRef::new("Mutation", Span::dummy()));
            }
            if types.contains_key("Subscription") {
                subscription_type = Some(NamedTypeRef::new("Subscription", Span::dummy()));
            }
        }
        if query_type.is_none() {
            return Err(missing_query_root());
        }

        let mut schema = Schema { types, directives, query_type, mutation_type, subscription_type };

        // Step 6: inject the introspection meta-schema (§4) — `__Schema`,
        // `__Type`, and friends — then run full invariant validation.
        crate::introspection::inject(&mut schema);
        schema.validate()?;
        tracing::debug!(type_count = schema.types.len(), directive_count = schema.directives.len(), "schema build succeeded");
        Ok(schema)
    }

    fn build_object(&self, def: &ast::ObjectTypeDefinition, extensions: &[&ast::ObjectTypeDefinition]) -> ObjectType {
        let mut fields = HashMap::new();
        for field_def in def.fields.iter().chain(extensions.iter().flat_map(|e| e.fields.iter())) {
            fields.insert(field_def.name.clone(), self.build_field(&def.name, field_def));
        }
        let mut interfaces: Vec<_> = def.implements_interfaces.iter().map(|n| NamedRef::new(n, def.span)).collect();
        for ext in extensions {
            interfaces.extend(ext.implements_interfaces.iter().map(|n| NamedRef::new(n, ext.span)));
        }
        ObjectType { name: def.name.clone(), description: def.description.clone(), fields, interfaces, def_location: def.span }
    }

    fn build_interface(&self, def: &ast::InterfaceTypeDefinition, extensions: &[&ast::InterfaceTypeDefinition]) -> InterfaceType {
        let mut fields = HashMap::new();
        for field_def in def.fields.iter().chain(extensions.iter().flat_map(|e| e.fields.iter())) {
            fields.insert(field_def.name.clone(), self.build_field(&def.name, field_def));
        }
        let mut interfaces: Vec<_> = def.implements_interfaces.iter().map(|n| NamedRef::new(n, def.span)).collect();
        for ext in extensions {
            interfaces.extend(ext.implements_interfaces.iter().map(|n| NamedRef::new(n, ext.span)));
        }
        InterfaceType {
            name: def.name.clone(),
            description: def.description.clone(),
            fields,
            interfaces,
            def_location: def.span,
            resolve_type: self.type_resolvers.get(&def.name).cloned(),
        }
    }

    fn build_union(&self, def: &ast::UnionTypeDefinition, extensions: &[&ast::UnionTypeDefinition]) -> UnionType {
        let mut member_types: Vec<_> = def.member_types.iter().map(|n| NamedRef::new(n, def.span)).collect();
        for ext in extensions {
            member_types.extend(ext.member_types.iter().map(|n| NamedRef::new(n, ext.span)));
        }
        UnionType {
            name: def.name.clone(),
            description: def.description.clone(),
            member_types,
            def_location: def.span,
            resolve_type: self.type_resolvers.get(&def.name).cloned(),
        }
    }

    fn build_field(&self, type_name: &str, def: &ast::FieldDefinition) -> Field {
        let arguments = def.arguments.iter().map(|a| self.build_input_value(type_name, Some(&def.name), a)).collect();
        Field {
            name: def.name.clone(),
            description: def.description.clone(),
            arguments,
            type_annotation: TypeAnnotation::from_ast(def.span, &def.field_type),
            deprecated: extract_deprecated_reason(&def.directives),
            host_name: self.host_names.get(&(type_name.to_string(), def.name.clone())).cloned(),
            def_location: def.span,
            resolver: self.field_resolvers.get(&(type_name.to_string(), def.name.clone())).cloned(),
            subscription_resolver: self.subscription_resolvers.get(&(type_name.to_string(), def.name.clone())).cloned(),
        }
    }

    fn build_input_value(&self, owner: &str, field_name: Option<&str>, def: &ast::InputValueDefinition) -> InputValue {
        let key_scope = field_name.map(|f| f.to_string()).unwrap_or_else(|| def.name.clone());
        InputValue {
            name: def.name.clone(),
            description: def.description.clone(),
            type_annotation: TypeAnnotation::from_ast(def.span, &def.value_type),
            default_value: def.default_value.clone(),
            deprecated: extract_deprecated_reason(&def.directives),
            host_name: self.host_names.get(&(owner.to_string(), format!("{key_scope}.{}", def.name))).cloned(),
            def_location: def.span,
        }
    }

    fn apply_schema_directives(
        &self,
        types: &mut HashMap<String, GraphQLType>,
        scratch: &Schema,
        schema_defs: &[&ast::SchemaDefinition],
    ) -> Result<(), SchemaBuildError> {
        if self.schema_directives.is_empty() {
            return Ok(());
        }

        for schema_def in schema_defs {
            for annotation in &schema_def.directives {
                let Some(hook) = self.schema_directives.get(&annotation.name) else { continue };
                let args = self.coerce_directive_arguments(annotation, scratch.get_directive(&annotation.name), scratch)?;
                hook.on_schema(&args);
            }
        }

        for def in &self.document.definitions {
            let ast::Definition::TypeSystem(type_def) = def else { continue };
            match types.get_mut(type_def.name()) {
                Some(GraphQLType::Scalar(scalar)) => {
                    if let ast::TypeDefinition::Scalar(s) = type_def {
                        let remove = self.apply_annotations(&s.directives, scratch, |hook, args| hook.on_scalar(scalar, args))?;
                        if remove {
                            types.remove(type_def.name());
                        }
                    }
                }
                Some(GraphQLType::Object(object)) => {
                    if let ast::TypeDefinition::Object(o) = type_def {
                        self.apply_field_directives(&o.name, &o.fields, &mut object.fields, scratch)?;
                        let remove = self.apply_annotations(&o.directives, scratch, |hook, args| hook.on_object(object, args))?;
                        if remove {
                            types.remove(type_def.name());
                        }
                    }
                }
                Some(GraphQLType::Interface(interface)) => {
                    if let ast::TypeDefinition::Interface(i) = type_def {
                        self.apply_field_directives(&i.name, &i.fields, &mut interface.fields, scratch)?;
                        let remove = self.apply_annotations(&i.directives, scratch, |hook, args| hook.on_interface(interface, args))?;
                        if remove {
                            types.remove(type_def.name());
                        }
                    }
                }
                Some(GraphQLType::Union(union_type)) => {
                    if let ast::TypeDefinition::Union(u) = type_def {
                        let remove = self.apply_annotations(&u.directives, scratch, |hook, args| hook.on_union(union_type, args))?;
                        if remove {
                            types.remove(type_def.name());
                        }
                    }
                }
                Some(GraphQLType::Enum(enum_type)) => {
                    if let ast::TypeDefinition::Enum(e) = type_def {
                        let mut removed_values = Vec::new();
                        for value_def in &e.values {
                            let Some(value) = enum_type.values.iter_mut().find(|v| v.name == value_def.name) else { continue };
                            let remove = self.apply_annotations(&value_def.directives, scratch, |hook, args| hook.on_enum_value(&e.name, value, args))?;
                            if remove {
                                removed_values.push(value_def.name.clone());
                            }
                        }
                        enum_type.values.retain(|v| !removed_values.contains(&v.name));
                        let remove = self.apply_annotations(&e.directives, scratch, |hook, args| hook.on_enum(enum_type, args))?;
                        if remove {
                            types.remove(type_def.name());
                        }
                    }
                }
                Some(GraphQLType::InputObject(input_object)) => {
                    if let ast::TypeDefinition::InputObject(io) = type_def {
                        let mut removed_fields = Vec::new();
                        for field_def in &io.fields {
                            let Some(field) = input_object.fields.get_mut(&field_def.name) else { continue };
                            let remove =
                                self.apply_annotations(&field_def.directives, scratch, |hook, args| hook.on_input_field(&io.name, field, args))?;
                            if remove {
                                removed_fields.push(field_def.name.clone());
                            }
                        }
                        for name in removed_fields {
                            input_object.fields.remove(&name);
                        }
                        let remove = self.apply_annotations(&io.directives, scratch, |hook, args| hook.on_input_object(input_object, args))?;
                        if remove {
                            types.remove(type_def.name());
                        }
                    }
                }
                None => {}
            }
        }
        Ok(())
    }

    fn apply_field_directives(
        &self,
        owner: &str,
        field_defs: &[ast::FieldDefinition],
        fields: &mut HashMap<String, Field>,
        scratch: &Schema,
    ) -> Result<(), SchemaBuildError> {
        let mut removed_fields = Vec::new();
        for field_def in field_defs {
            let Some(field) = fields.get_mut(&field_def.name) else { continue };
            let mut removed_arguments = Vec::new();
            for arg_def in &field_def.arguments {
                let Some(argument) = field.arguments.iter_mut().find(|a| a.name == arg_def.name) else { continue };
                let remove =
                    self.apply_annotations(&arg_def.directives, scratch, |hook, args| hook.on_argument(owner, &field_def.name, argument, args))?;
                if remove {
                    removed_arguments.push(arg_def.name.clone());
                }
            }
            field.arguments.retain(|a| !removed_arguments.contains(&a.name));
            let remove = self.apply_annotations(&field_def.directives, scratch, |hook, args| hook.on_field(owner, field, args))?;
            if remove {
                removed_fields.push(field_def.name.clone());
            }
        }
        for name in removed_fields {
            fields.remove(&name);
        }
        Ok(())
    }

    /// Invokes every registered schema directive implementation found among
    /// `annotations`, in source order (so a repeatable directive applied
    /// twice fires its hook twice), coercing each application's arguments
    /// against the declared directive signature when one is known.
    fn apply_annotations(
        &self,
        annotations: &[ast::DirectiveAnnotation],
        scratch: &Schema,
        mut apply_one: impl FnMut(&dyn SchemaDirective, &IndexMap<String, ResolvedValue>) -> DirectiveOutcome,
    ) -> Result<bool, SchemaBuildError> {
        let mut removed = false;
        for annotation in annotations {
            let Some(hook) = self.schema_directives.get(&annotation.name) else { continue };
            let args = self.coerce_directive_arguments(annotation, scratch.get_directive(&annotation.name), scratch)?;
            if matches!(apply_one(hook.as_ref(), &args), DirectiveOutcome::Remove) {
                removed = true;
            }
        }
        Ok(removed)
    }

    fn coerce_directive_arguments(
        &self,
        annotation: &ast::DirectiveAnnotation,
        directive_def: Option<&DirectiveDef>,
        scratch: &Schema,
    ) -> Result<IndexMap<String, ResolvedValue>, SchemaBuildError> {
        let Some(directive_def) = directive_def else {
            // An unregistered directive (no matching `directive @name on ...`
            // SDL declaration): coerce args by literal shape alone.
            let mut args = IndexMap::new();
            for arg in &annotation.arguments {
                args.insert(arg.name.clone(), literal_to_resolved_value(&arg.value));
            }
            return Ok(args);
        };

        let mut args = IndexMap::new();
        for input_value in &directive_def.arguments {
            let supplied = annotation.arguments.iter().find(|a| a.name == input_value.name);
            let coerced = match supplied {
                Some(a) => crate::coercion::coerce_literal_value(scratch, &input_value.type_annotation, &a.value, &IndexMap::new(), &Path::root()),
                None => match &input_value.default_value {
                    Some(default) => crate::coercion::coerce_literal_value(scratch, &input_value.type_annotation, default, &IndexMap::new(), &Path::root()),
                    None if input_value.type_annotation.nullable() => Ok(ResolvedValue::Null),
                    None => Err(CoercionError::new(format!("missing required directive argument `{}`", input_value.name), Path::root())),
                },
            };
            let value = coerced.map_err(|e| SchemaBuildError::InvalidDirectiveArguments {
                directive: annotation.name.clone(),
                message: e.to_string(),
            })?;
            args.insert(input_value.name.clone(), value);
        }
        Ok(args)
    }
}

fn build_directive_def(def: &ast::DirectiveDefinition) -> DirectiveDef {
    DirectiveDef {
        name: def.name.clone(),
        description: def.description.clone(),
        arguments: def.arguments.iter().map(|a| InputValue {
            name: a.name.clone(),
            description: a.description.clone(),
            type_annotation: TypeAnnotation::from_ast(a.span, &a.value_type),
            default_value: a.default_value.clone(),
            deprecated: extract_deprecated_reason(&a.directives),
            host_name: None,
            def_location: a.span,
        }).collect(),
        locations: def.locations.iter().map(|l| l.kind).collect(),
        repeatable: def.repeatable,
        def_location: def.span,
    }
}

fn build_enum(def: &ast::EnumTypeDefinition, extensions: &[&ast::EnumTypeDefinition]) -> EnumType {
    let values = def
        .values
        .iter()
        .chain(extensions.iter().flat_map(|e| e.values.iter()))
        .map(|v| EnumValueDef {
            name: v.name.clone(),
            description: v.description.clone(),
            deprecated: extract_deprecated_reason(&v.directives),
            def_location: v.span,
        })
        .collect();
    EnumType { name: def.name.clone(), description: def.description.clone(), values, def_location: def.span }
}

fn build_input_object(def: &ast::InputObjectTypeDefinition, extensions: &[&ast::InputObjectTypeDefinition]) -> InputObjectType {
    let mut fields = HashMap::new();
    for field_def in def.fields.iter().chain(extensions.iter().flat_map(|e| e.fields.iter())) {
        fields.insert(
            field_def.name.clone(),
            InputValue {
                name: field_def.name.clone(),
                description: field_def.description.clone(),
                type_annotation: TypeAnnotation::from_ast(field_def.span, &field_def.value_type),
                default_value: field_def.default_value.clone(),
                deprecated: extract_deprecated_reason(&field_def.directives),
                host_name: None,
                def_location: field_def.span,
            },
        );
    }
    InputObjectType { name: def.name.clone(), description: def.description.clone(), fields, def_location: def.span }
}

/// `@deprecated(reason: String = "No longer supported")`, read directly off
/// the literal argument rather than through full coercion — its argument
/// shape is fixed and known at build time.
fn extract_deprecated_reason(directives: &[ast::DirectiveAnnotation]) -> Option<String> {
    let annotation = directives.iter().find(|d| d.name == "deprecated")?;
    let reason = match annotation.argument("reason") {
        Some(ast::Value::String { value, .. }) => value.clone(),
        _ => "No longer supported".to_string(),
    };
    Some(reason)
}

fn literal_to_resolved_value(value: &ast::Value) -> ResolvedValue {
    match value {
        ast::Value::Variable { .. } | ast::Value::Null { .. } => ResolvedValue::Null,
        ast::Value::Int { raw, .. } => raw.parse().map(ResolvedValue::Int).unwrap_or(ResolvedValue::Null),
        ast::Value::Float { raw, .. } => raw.parse().map(ResolvedValue::Float).unwrap_or(ResolvedValue::Null),
        ast::Value::String { value, .. } => ResolvedValue::String(value.clone()),
        ast::Value::Boolean { value, .. } => ResolvedValue::Boolean(*value),
        ast::Value::Enum { name, .. } => ResolvedValue::Enum(name.clone()),
        ast::Value::List { values, .. } => ResolvedValue::List(values.iter().map(literal_to_resolved_value).collect()),
        ast::Value::Object { fields, .. } => {
            ResolvedValue::Object(fields.iter().map(|f| (f.name.clone(), literal_to_resolved_value(&f.value))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libgraphql_parser::parser::parse_schema;

    fn build(sdl: &str) -> Result<Schema, SchemaBuildError> {
        let document = parse_schema(sdl).expect("valid SDL");
        SchemaBuilder::new(&document).build()
    }

    #[test]
    fn builds_a_minimal_query_root() {
        let schema = build("type Query { hello: String }").unwrap();
        assert!(schema.query_type().is_ok());
        assert!(schema.get_type("Query").unwrap().field("hello").is_some());
    }

    #[test]
    fn missing_query_root_is_an_error() {
        let err = build("type Foo { bar: String }").unwrap_err();
        assert!(matches!(err, SchemaBuildError::MissingQueryRoot));
    }

    #[test]
    fn unknown_scalar_fails_build() {
        let err = build("scalar Money\ntype Query { price: Money }").unwrap_err();
        assert!(matches!(err, SchemaBuildError::UnknownScalar { .. }));
    }

    #[test]
    fn additional_scalar_can_be_registered_by_name() {
        let document = parse_schema("scalar UUID\ntype Query { id: UUID }").unwrap();
        let schema = SchemaBuilder::new(&document).build().unwrap();
        assert!(schema.get_type("UUID").is_some());
    }

    #[test]
    fn object_extension_adds_fields() {
        let schema = build("type Query { a: String }\nextend type Query { b: String }").unwrap();
        let query = schema.get_type("Query").unwrap();
        assert!(query.field("a").is_some());
        assert!(query.field("b").is_some());
    }

    #[test]
    fn deprecated_directive_is_captured() {
        let schema = build("type Query { old: String @deprecated(reason: \"use new\") new: String }").unwrap();
        let field = schema.get_type("Query").unwrap().field("old").unwrap();
        assert_eq!(field.deprecated.as_deref(), Some("use new"));
    }

    struct RemoveField;
    impl SchemaDirective for RemoveField {
        fn on_field(&self, _owner: &str, _field: &mut Field, _args: &IndexMap<String, ResolvedValue>) -> DirectiveOutcome {
            DirectiveOutcome::Remove
        }
    }

    #[test]
    fn schema_directive_can_remove_a_field() {
        let document =
            parse_schema("directive @hidden on FIELD_DEFINITION\ntype Query { visible: String hidden: String @hidden }").unwrap();
        let schema = SchemaBuilder::new(&document).schema_directive("hidden", Arc::new(RemoveField)).build().unwrap();
        let query = schema.get_type("Query").unwrap();
        assert!(query.field("visible").is_some());
        assert!(query.field("hidden").is_none());
    }
}
