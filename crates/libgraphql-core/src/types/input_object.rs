use crate::types::InputValue;
use libgraphql_parser::Span;
use std::collections::HashMap;

/// An `InputObjectType`: `{name, description, fields}` per the GraphQL
/// spec's Input Objects section (§3.10), where each
/// field is an [`InputValue`] rather than a [`crate::types::Field`] — input
/// object fields carry no resolver or arguments of their own.
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: HashMap<String, InputValue>,
    pub def_location: Span,
}

impl InputObjectType {
    pub fn field(&self, name: &str) -> Option<&InputValue> {
        self.fields.get(name)
    }
}
