//! Input coercion, per the GraphQL spec's Coercing Variable Values and
//! Coercing Field Arguments rules (§2.9, §6.4.1): turning raw JSON-ish
//! variable values, or AST
//! literal [`ast::Value`] nodes, into [`ResolvedValue`]s validated against a
//! declared [`TypeAnnotation`]. Both routines share the same per-kind
//! dispatch and both report failures as a [`CoercionError`] carrying the
//! field/argument/element path at which coercion broke down.

use crate::error::CoercionError;
use crate::path::Path;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeAnnotation;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use libgraphql_parser::ast;

/// Coerces a raw (already JSON-decoded) variable value against its declared
/// type. `raw` is `None` when the caller supplied no entry at all for this
/// variable (as opposed to an explicit JSON `null`).
pub fn coerce_variable_value(
    schema: &Schema,
    type_annotation: &TypeAnnotation,
    default_value: Option<&ast::Value>,
    raw: Option<&ResolvedValue>,
    path: &Path,
) -> Result<ResolvedValue, CoercionError> {
    let raw = match raw {
        Some(v) => v,
        None => {
            return match default_value {
                Some(default) => coerce_literal_value(schema, type_annotation, default, &IndexMap::new(), path),
                None if type_annotation.nullable() => Ok(ResolvedValue::Null),
                None => Err(CoercionError::new("missing value for required variable", path.clone())),
            };
        }
    };

    if matches!(raw, ResolvedValue::Null) {
        return if type_annotation.nullable() {
            Ok(ResolvedValue::Null)
        } else {
            Err(CoercionError::new("null is not a valid value for a non-null type", path.clone()))
        };
    }

    match type_annotation {
        TypeAnnotation::List { inner, .. } => {
            let elements = match raw {
                ResolvedValue::List(items) => items.clone(),
                other => vec![other.clone()],
            };
            let mut coerced = Vec::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                coerced.push(coerce_variable_value(schema, inner, None, Some(element), &path.index(index))?);
            }
            Ok(ResolvedValue::List(coerced))
        }
        TypeAnnotation::Named { type_ref, .. } => {
            let named_type = type_ref.deref(schema).map_err(|e| CoercionError::new(e.to_string(), path.clone()))?;
            coerce_named_value(schema, named_type, raw, path)
        }
    }
}

fn coerce_named_value(schema: &Schema, named_type: &GraphQLType, raw: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
    match named_type {
        GraphQLType::Scalar(scalar) => scalar.implementation.parse_value(raw, path),
        GraphQLType::Enum(enum_type) => {
            let name = raw.as_str().ok_or_else(|| CoercionError::new(format!("expected an enum value name, found {raw:?}"), path.clone()))?;
            enum_type
                .value(name)
                .map(|v| ResolvedValue::Enum(v.name.clone()))
                .ok_or_else(|| CoercionError::new(format!("`{name}` is not a value of enum `{}`", enum_type.name), path.clone()))
        }
        GraphQLType::InputObject(input_object) => {
            let fields = raw.as_object().ok_or_else(|| CoercionError::new(format!("expected an input object, found {raw:?}"), path.clone()))?;
            let mut coerced = IndexMap::new();
            for field in input_object.fields.values() {
                let field_path = path.field(field.name.clone());
                let raw_field = fields.get(&field.name);
                let value = coerce_variable_value(schema, &field.type_annotation, field.default_value.as_ref(), raw_field, &field_path)?;
                coerced.insert(field.name.clone(), value);
            }
            for key in fields.keys() {
                if !input_object.fields.contains_key(key) {
                    return Err(CoercionError::new(format!("`{key}` is not a field of input object `{}`", input_object.name), path.clone()));
                }
            }
            Ok(ResolvedValue::Object(coerced))
        }
        other => Err(CoercionError::new(format!("`{}` is not a valid input type", other.name()), path.clone())),
    }
}

/// Coerces an AST literal, resolving any `$variable` references against the
/// already-coerced variable map.
pub fn coerce_literal_value(
    schema: &Schema,
    type_annotation: &TypeAnnotation,
    literal: &ast::Value,
    variables: &IndexMap<String, ResolvedValue>,
    path: &Path,
) -> Result<ResolvedValue, CoercionError> {
    if let ast::Value::Variable { name, .. } = literal {
        return match variables.get(name) {
            Some(value) => Ok(value.clone()),
            None if type_annotation.nullable() => Ok(ResolvedValue::Null),
            None => Err(CoercionError::new(format!("no value supplied for variable `${name}`"), path.clone())),
        };
    }

    if literal.is_null() {
        return if type_annotation.nullable() {
            Ok(ResolvedValue::Null)
        } else {
            Err(CoercionError::new("null is not a valid value for a non-null type", path.clone()))
        };
    }

    match type_annotation {
        TypeAnnotation::List { inner, .. } => {
            let elements: Vec<&ast::Value> = match literal {
                ast::Value::List { values, .. } => values.iter().collect(),
                other => vec![other],
            };
            let mut coerced = Vec::with_capacity(elements.len());
            for (index, element) in elements.into_iter().enumerate() {
                coerced.push(coerce_literal_value(schema, inner, element, variables, &path.index(index))?);
            }
            Ok(ResolvedValue::List(coerced))
        }
        TypeAnnotation::Named { type_ref, .. } => {
            let named_type = type_ref.deref(schema).map_err(|e| CoercionError::new(e.to_string(), path.clone()))?;
            coerce_named_literal(schema, named_type, literal, variables, path)
        }
    }
}

fn coerce_named_literal(
    schema: &Schema,
    named_type: &GraphQLType,
    literal: &ast::Value,
    variables: &IndexMap<String, ResolvedValue>,
    path: &Path,
) -> Result<ResolvedValue, CoercionError> {
    match named_type {
        GraphQLType::Scalar(scalar) => scalar.implementation.parse_literal(literal, path),
        GraphQLType::Enum(enum_type) => match literal {
            ast::Value::Enum { name, .. } => enum_type
                .value(name)
                .map(|v| ResolvedValue::Enum(v.name.clone()))
                .ok_or_else(|| CoercionError::new(format!("`{name}` is not a value of enum `{}`", enum_type.name), path.clone())),
            other => Err(CoercionError::new(format!("expected an enum value literal, found {other:?}"), path.clone())),
        },
        GraphQLType::InputObject(input_object) => match literal {
            ast::Value::Object { fields, .. } => {
                let mut coerced = IndexMap::new();
                for field in input_object.fields.values() {
                    let field_path = path.field(field.name.clone());
                    let supplied = fields.iter().find(|f| f.name == field.name);
                    let value = match supplied {
                        Some(f) => coerce_literal_value(schema, &field.type_annotation, &f.value, variables, &field_path)?,
                        None => coerce_literal_value_missing(&field.type_annotation, field.default_value.as_ref(), &field_path)?,
                    };
                    coerced.insert(field.name.clone(), value);
                }
                for f in fields {
                    if !input_object.fields.contains_key(&f.name) {
                        return Err(CoercionError::new(format!("`{}` is not a field of input object `{}`", f.name, input_object.name), path.clone()));
                    }
                }
                Ok(ResolvedValue::Object(coerced))
            }
            other => Err(CoercionError::new(format!("expected an input object literal, found {other:?}"), path.clone())),
        },
        other => Err(CoercionError::new(format!("`{}` is not a valid input type", other.name()), path.clone())),
    }
}

fn coerce_literal_value_missing(
    type_annotation: &TypeAnnotation,
    default_value: Option<&ast::Value>,
    path: &Path,
) -> Result<ResolvedValue, CoercionError> {
    match default_value {
        Some(_) if !type_annotation.nullable() => Err(CoercionError::new("missing required input field with no usable default", path.clone())),
        Some(_) | None if type_annotation.nullable() => Ok(ResolvedValue::Null),
        None => Err(CoercionError::new("missing required input field", path.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::named_ref::NamedRef;
    use libgraphql_parser::Span;

    fn named(name: &str, nullable: bool) -> TypeAnnotation {
        TypeAnnotation::Named { type_ref: NamedRef::new(name, Span::dummy()), nullable, ref_location: Span::dummy() }
    }

    #[test]
    fn missing_required_variable_is_an_error() {
        let schema = Schema::empty();
        let ty = named("Int", false);
        let result = coerce_variable_value(&schema, &ty, None, None, &Path::root());
        assert!(result.is_err());
    }

    #[test]
    fn missing_nullable_variable_yields_null() {
        let schema = Schema::empty();
        let ty = named("Int", true);
        let result = coerce_variable_value(&schema, &ty, None, None, &Path::root()).unwrap();
        assert_eq!(result, ResolvedValue::Null);
    }

    #[test]
    fn single_value_auto_wraps_into_a_list() {
        let schema = Schema::empty();
        let ty = TypeAnnotation::List { inner: Box::new(named("Int", false)), nullable: true, ref_location: Span::dummy() };
        let raw = ResolvedValue::Int(7);
        let result = coerce_variable_value(&schema, &ty, None, Some(&raw), &Path::root()).unwrap();
        assert_eq!(result, ResolvedValue::List(vec![ResolvedValue::Int(7)]));
    }
}
