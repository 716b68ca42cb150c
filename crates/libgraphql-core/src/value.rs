//! The runtime value representation shared by coercion (input) and
//! completion (output): variables, argument values, resolver return values,
//! and the final `data` payload are all one [`ResolvedValue`].

use indexmap::IndexMap;

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedValue {
    Null,
    Boolean(bool),
    Int(i32),
    Float(f64),
    String(String),
    /// An enum member, by name.
    Enum(String),
    List(Vec<ResolvedValue>),
    Object(IndexMap<String, ResolvedValue>),
}

impl ResolvedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ResolvedValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(s) | ResolvedValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ResolvedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ResolvedValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResolvedValue::Int(i) => Some(*i as f64),
            ResolvedValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ResolvedValue]> {
        match self {
            ResolvedValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, ResolvedValue>> {
        match self {
            ResolvedValue::Object(m) => Some(m),
            _ => None,
        }
    }
}

impl From<ResolvedValue> for serde_json::Value {
    fn from(value: ResolvedValue) -> Self {
        match value {
            ResolvedValue::Null => serde_json::Value::Null,
            ResolvedValue::Boolean(b) => serde_json::Value::Bool(b),
            ResolvedValue::Int(i) => serde_json::Value::from(i),
            ResolvedValue::Float(f) => serde_json::Number::from_f64(f).map(serde_json::Value::Number).unwrap_or(serde_json::Value::Null),
            ResolvedValue::String(s) | ResolvedValue::Enum(s) => serde_json::Value::String(s),
            ResolvedValue::List(items) => serde_json::Value::Array(items.into_iter().map(Into::into).collect()),
            ResolvedValue::Object(fields) => {
                serde_json::Value::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<serde_json::Value> for ResolvedValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ResolvedValue::Null,
            serde_json::Value::Bool(b) => ResolvedValue::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if let Ok(i32_val) = i32::try_from(i) {
                        return ResolvedValue::Int(i32_val);
                    }
                }
                ResolvedValue::Float(n.as_f64().unwrap_or(0.0))
            }
            serde_json::Value::String(s) => ResolvedValue::String(s),
            serde_json::Value::Array(items) => ResolvedValue::List(items.into_iter().map(Into::into).collect()),
            serde_json::Value::Object(fields) => {
                ResolvedValue::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
