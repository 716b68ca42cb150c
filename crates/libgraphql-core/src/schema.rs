//! The built, validated in-memory representation of a GraphQL schema: a
//! named-type registry plus root operation types and directive definitions.
//! A [`Schema`] is always fully built via [`crate::schema_builder::SchemaBuilder`]
//! before it is handed to a validator or executor — there is no mutation API
//! on this type once constructed.

use crate::error::SchemaBuildError;
use crate::error::SchemaValidationError;
use crate::named_ref::DerefByNameError;
use crate::types::directive::builtin_deprecated;
use crate::types::directive::builtin_include;
use crate::types::directive::builtin_skip;
use crate::types::scalar::builtin_scalar;
use crate::types::DirectiveDef;
use crate::types::GraphQLType;
use crate::types::NamedTypeRef;
use std::collections::HashMap;
use std::sync::LazyLock;

/// The names and definitions of the three built-in directives, injected into
/// every schema the builder produces and never overridable by redeclaration.
static BUILTIN_DIRECTIVES: LazyLock<[DirectiveDef; 3]> = LazyLock::new(|| [builtin_skip(), builtin_include(), builtin_deprecated()]);

/// The five scalar type names the GraphQL spec requires every schema to
/// provide, regardless of whether the SDL source mentions them.
pub const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub types: HashMap<String, GraphQLType>,
    pub directives: HashMap<String, DirectiveDef>,
    pub query_type: Option<NamedTypeRef>,
    pub mutation_type: Option<NamedTypeRef>,
    pub subscription_type: Option<NamedTypeRef>,
}

impl Schema {
    /// A registry pre-seeded with the five built-in scalars and three
    /// built-in directives, and nothing else — the starting point for
    /// [`crate::schema_builder::SchemaBuilder`]'s placeholder phase.
    pub fn empty() -> Self {
        let mut types = HashMap::new();
        for name in BUILTIN_SCALAR_NAMES {
            let scalar = builtin_scalar(name).expect("builtin_scalar covers every name in BUILTIN_SCALAR_NAMES");
            types.insert(name.to_string(), GraphQLType::Scalar(scalar));
        }

        let mut directives = HashMap::new();
        for directive in BUILTIN_DIRECTIVES.iter() {
            directives.insert(directive.name.clone(), directive.clone());
        }

        Schema { types, directives, query_type: None, mutation_type: None, subscription_type: None }
    }

    pub fn get_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    pub fn get_directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directives.get(name)
    }

    pub fn query_type(&self) -> Result<&GraphQLType, DerefByNameError> {
        match &self.query_type {
            Some(r) => r.deref(self),
            None => Err(DerefByNameError::DanglingReference("(no query root)".to_string())),
        }
    }

    pub fn mutation_type(&self) -> Option<Result<&GraphQLType, DerefByNameError>> {
        self.mutation_type.as_ref().map(|r| r.deref(self))
    }

    pub fn subscription_type(&self) -> Option<Result<&GraphQLType, DerefByNameError>> {
        self.subscription_type.as_ref().map(|r| r.deref(self))
    }

    /// Enforces the GraphQL Type System's structural invariants (§3) beyond
    /// what construction already guarantees: every field/argument type
    /// reference resolves, no interface-field covariance violations, no
    /// non-null input cycles, and every union member is an object type. The
    /// schema builder calls this as the final step of building a schema
    /// from SDL.
    pub fn validate(&self) -> Result<(), SchemaValidationError> {
        if self.query_type.is_none() {
            // Caller (schema builder) surfaces MissingQueryRoot separately,
            // since that's a SchemaBuildError, not a SchemaValidationError.
        }

        for type_def in self.types.values() {
            self.validate_type(type_def)?;
        }

        Ok(())
    }

    fn validate_type(&self, type_def: &GraphQLType) -> Result<(), SchemaValidationError> {
        match type_def {
            GraphQLType::Object(object) => {
                for field in object.fields.values() {
                    self.validate_field_type_position(&object.name, field)?;
                }
                for interface_ref in &object.interfaces {
                    let Ok(interface) = interface_ref.deref(self) else { continue };
                    self.validate_interface_covariance(&object.name, object, interface)?;
                }
            }
            GraphQLType::Interface(interface) => {
                for field in interface.fields.values() {
                    self.validate_field_type_position(&interface.name, field)?;
                }
            }
            GraphQLType::Union(union_type) => {
                for member in &union_type.member_types {
                    let Ok(member_type) = member.deref(self) else { continue };
                    if !matches!(member_type, GraphQLType::Object(_)) {
                        return Err(SchemaValidationError::InvalidUnionMember {
                            union_name: union_type.name.clone(),
                            member_name: member.name().to_string(),
                        });
                    }
                }
            }
            GraphQLType::InputObject(input_object) => {
                self.validate_no_non_null_cycle(&input_object.name, &input_object.name, &mut Vec::new())?;
            }
            GraphQLType::Scalar(_) | GraphQLType::Enum(_) => {}
        }
        Ok(())
    }

    fn validate_field_type_position(&self, type_name: &str, field: &crate::types::Field) -> Result<(), SchemaValidationError> {
        let Ok(referenced) = field.type_annotation.inner_type(self) else { return Ok(()) };
        if !referenced.is_output_type() {
            return Err(SchemaValidationError::OutputTypeInInputPosition {
                type_name: referenced.name().to_string(),
                position: field.type_annotation.ref_location().start,
            });
        }
        for argument in &field.arguments {
            let Ok(arg_type) = argument.type_annotation.inner_type(self) else { continue };
            if !arg_type.is_input_type() {
                return Err(SchemaValidationError::InputTypeInOutputPosition {
                    type_name: arg_type.name().to_string(),
                    position: argument.type_annotation.ref_location().start,
                });
            }
        }
        let _ = type_name;
        Ok(())
    }

    /// A field on an object type implementing an interface must return a
    /// type at least as specific as the interface field's declared type.
    fn validate_interface_covariance(
        &self,
        object_name: &str,
        object: &crate::types::ObjectType,
        interface: &crate::types::InterfaceType,
    ) -> Result<(), SchemaValidationError> {
        for (field_name, interface_field) in &interface.fields {
            let Some(object_field) = object.fields.get(field_name) else { continue };
            if !object_field.type_annotation.is_subtype_of(&interface_field.type_annotation) {
                return Err(SchemaValidationError::InvalidInterfaceFieldCovariance {
                    type_name: object_name.to_string(),
                    interface_name: interface.name.clone(),
                    field_name: field_name.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_no_non_null_cycle(&self, root_name: &str, current_name: &str, visiting: &mut Vec<String>) -> Result<(), SchemaValidationError> {
        if visiting.contains(&current_name.to_string()) {
            return Ok(());
        }
        let Some(GraphQLType::InputObject(input_object)) = self.types.get(current_name) else { return Ok(()) };
        visiting.push(current_name.to_string());
        for field in input_object.fields.values() {
            if field.type_annotation.nullable() || field.default_value.is_some() {
                continue;
            }
            let inner_name = field.type_annotation.inner_named_type_ref().name();
            if inner_name == root_name {
                visiting.pop();
                return Err(SchemaValidationError::NonNullInputCycle { type_name: root_name.to_string(), field_name: field.name.clone() });
            }
            self.validate_no_non_null_cycle(root_name, inner_name, visiting)?;
        }
        visiting.pop();
        Ok(())
    }
}

pub(crate) fn missing_query_root() -> SchemaBuildError {
    SchemaBuildError::MissingQueryRoot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_schema_carries_builtin_scalars_and_directives() {
        let schema = Schema::empty();
        for name in BUILTIN_SCALAR_NAMES {
            assert!(schema.get_type(name).is_some());
        }
        assert!(schema.get_directive("skip").is_some());
        assert!(schema.get_directive("include").is_some());
        assert!(schema.get_directive("deprecated").is_some());
    }

    #[test]
    fn query_type_errors_when_unset() {
        let schema = Schema::empty();
        assert!(schema.query_type().is_err());
    }
}
