use crate::error::CoercionError;
use crate::path::Path;
use crate::value::ResolvedValue;
use libgraphql_parser::ast;
use libgraphql_parser::Span;
use std::sync::Arc;

/// `{serialize, parse_value, parse_literal}` for one scalar type, per the
/// GraphQL spec's Scalars section (§3.5).
pub trait ScalarImplementation: Send + Sync + std::fmt::Debug {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError>;
    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError>;
    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError>;
}

#[derive(Clone)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub specified_by_url: Option<String>,
    pub def_location: Span,
    pub implementation: Arc<dyn ScalarImplementation>,
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType").field("name", &self.name).finish()
    }
}

impl PartialEq for ScalarType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description
    }
}

macro_rules! mismatch {
    ($path:expr, $expected:literal, $found:expr) => {
        Err(CoercionError::new(format!("Expected {}, found {:?}", $expected, $found), $path.clone()))
    };
}

#[derive(Debug)]
struct IntScalar;
impl ScalarImplementation for IntScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::Int(_) => Ok(value.clone()),
            other => mismatch!(path, "Int", other),
        }
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::Int(_) => Ok(value.clone()),
            other => mismatch!(path, "Int", other),
        }
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        value
            .as_int()
            .map(ResolvedValue::Int)
            .ok_or_else(|| CoercionError::new(format!("Expected Int literal, found {value:?}"), path.clone()))
    }
}

#[derive(Debug)]
struct FloatScalar;
impl ScalarImplementation for FloatScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        value.as_f64().map(ResolvedValue::Float).ok_or_else(|| CoercionError::new(format!("Expected Float, found {value:?}"), path.clone()))
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        self.serialize(value, path)
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        value
            .as_float()
            .map(ResolvedValue::Float)
            .ok_or_else(|| CoercionError::new(format!("Expected Float literal, found {value:?}"), path.clone()))
    }
}

#[derive(Debug)]
struct StringScalar;
impl ScalarImplementation for StringScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::String(_) => Ok(value.clone()),
            other => mismatch!(path, "String", other),
        }
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        self.serialize(value, path)
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ast::Value::String { value, .. } => Ok(ResolvedValue::String(value.clone())),
            other => Err(CoercionError::new(format!("Expected String literal, found {other:?}"), path.clone())),
        }
    }
}

#[derive(Debug)]
struct BooleanScalar;
impl ScalarImplementation for BooleanScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::Boolean(_) => Ok(value.clone()),
            other => mismatch!(path, "Boolean", other),
        }
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        self.serialize(value, path)
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ast::Value::Boolean { value, .. } => Ok(ResolvedValue::Boolean(*value)),
            other => Err(CoercionError::new(format!("Expected Boolean literal, found {other:?}"), path.clone())),
        }
    }
}

/// `ID` accepts both string and integer inputs, and always serializes as a
/// string.
#[derive(Debug)]
struct IdScalar;
impl ScalarImplementation for IdScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::String(s) => Ok(ResolvedValue::String(s.clone())),
            ResolvedValue::Int(i) => Ok(ResolvedValue::String(i.to_string())),
            other => mismatch!(path, "ID", other),
        }
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        self.serialize(value, path)
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ast::Value::String { value, .. } => Ok(ResolvedValue::String(value.clone())),
            ast::Value::Int { raw, .. } => Ok(ResolvedValue::String(raw.clone())),
            other => Err(CoercionError::new(format!("Expected ID literal, found {other:?}"), path.clone())),
        }
    }
}

pub fn builtin_scalar(name: &str) -> Option<ScalarType> {
    let implementation: Arc<dyn ScalarImplementation> = match name {
        "Int" => Arc::new(IntScalar),
        "Float" => Arc::new(FloatScalar),
        "String" => Arc::new(StringScalar),
        "Boolean" => Arc::new(BooleanScalar),
        "ID" => Arc::new(IdScalar),
        _ => return None,
    };
    Some(ScalarType {
        name: name.to_string(),
        description: None,
        specified_by_url: None,
        def_location: Span::dummy(),
        implementation,
    })
}

/// An additional, not-auto-applied scalar extension, outside the base
/// language: `UUID` stores and serializes as its canonical hyphenated
/// string form, validating format on input.
#[derive(Debug)]
pub struct UuidScalar;
impl ScalarImplementation for UuidScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::String(s) if is_uuid_format(s) => Ok(ResolvedValue::String(s.clone())),
            other => Err(CoercionError::new(format!("Expected a UUID string, found {other:?}"), path.clone())),
        }
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        self.serialize(value, path)
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ast::Value::String { value, .. } if is_uuid_format(value) => Ok(ResolvedValue::String(value.clone())),
            other => Err(CoercionError::new(format!("Expected a UUID string literal, found {other:?}"), path.clone())),
        }
    }
}

fn is_uuid_format(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == 5
        && [8, 4, 4, 4, 12].iter().zip(&parts).all(|(len, part)| part.len() == *len && part.chars().all(|c| c.is_ascii_hexdigit()))
}

/// An additional scalar extension, outside the base language: `DateTime`
/// stores an ISO 8601 timestamp string, without pulling in a date/time
/// crate dependency the rest of this workspace doesn't otherwise need.
#[derive(Debug)]
pub struct DateTimeScalar;
impl ScalarImplementation for DateTimeScalar {
    fn serialize(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ResolvedValue::String(s) if looks_like_iso8601(s) => Ok(ResolvedValue::String(s.clone())),
            other => Err(CoercionError::new(format!("Expected an ISO 8601 DateTime string, found {other:?}"), path.clone())),
        }
    }

    fn parse_value(&self, value: &ResolvedValue, path: &Path) -> Result<ResolvedValue, CoercionError> {
        self.serialize(value, path)
    }

    fn parse_literal(&self, value: &ast::Value, path: &Path) -> Result<ResolvedValue, CoercionError> {
        match value {
            ast::Value::String { value, .. } if looks_like_iso8601(value) => Ok(ResolvedValue::String(value.clone())),
            other => Err(CoercionError::new(format!("Expected an ISO 8601 DateTime literal, found {other:?}"), path.clone())),
        }
    }
}

fn looks_like_iso8601(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 19
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && (bytes[10] == b'T' || bytes[10] == b' ')
        && bytes[13] == b':'
        && bytes[16] == b':'
}

pub fn additional_scalar(name: &str) -> Option<ScalarType> {
    let implementation: Arc<dyn ScalarImplementation> = match name {
        "UUID" => Arc::new(UuidScalar),
        "DateTime" => Arc::new(DateTimeScalar),
        _ => return None,
    };
    Some(ScalarType { name: name.to_string(), description: None, specified_by_url: None, def_location: Span::dummy(), implementation })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_scalar_serializes_int_as_string() {
        let scalar = builtin_scalar("ID").unwrap();
        let out = scalar.implementation.serialize(&ResolvedValue::Int(42), &Path::root()).unwrap();
        assert_eq!(out, ResolvedValue::String("42".to_string()));
    }

    #[test]
    fn uuid_scalar_rejects_malformed_string() {
        let scalar = additional_scalar("UUID").unwrap();
        assert!(scalar.implementation.serialize(&ResolvedValue::String("not-a-uuid".to_string()), &Path::root()).is_err());
    }

    #[test]
    fn uuid_scalar_accepts_well_formed_string() {
        let scalar = additional_scalar("UUID").unwrap();
        let value = ResolvedValue::String("123e4567-e89b-12d3-a456-426614174000".to_string());
        assert!(scalar.implementation.serialize(&value, &Path::root()).is_ok());
    }
}
