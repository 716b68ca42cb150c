use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::field::Field;
use crate::types::InterfaceType;
use libgraphql_parser::Span;
use std::collections::HashMap;

pub type NamedInterfaceRef = NamedRef<Schema, Span, InterfaceType>;

/// An `ObjectType`: `{name, description, fields, interfaces[]}` per the
/// GraphQL spec's Objects section (§3.6).
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub fields: HashMap<String, Field>,
    pub interfaces: Vec<NamedInterfaceRef>,
    pub def_location: Span,
}

impl ObjectType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces.iter().any(|i| i.name() == interface_name)
    }
}
