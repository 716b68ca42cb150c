use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::field::Field;
use libgraphql_parser::Span;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves which concrete object type backs a value returned through an
/// interface (or union) field, given the boxed runtime value. The schema
/// builder attaches this from the caller-supplied resolver map; when absent,
/// the executor falls back to the resolved node's own reported type name via
/// [`crate::resolver::Resolvable`].
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, value: &dyn crate::resolver::Resolvable) -> Option<String>;
}

/// An `InterfaceType`: like [`crate::types::ObjectType`], plus interfaces it
/// itself implements (interface-implementing-interface) and an optional
/// `resolve_type` hook.
#[derive(Clone)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub fields: HashMap<String, Field>,
    pub interfaces: Vec<NamedRef<Schema, Span, InterfaceType>>,
    pub def_location: Span,
    pub resolve_type: Option<Arc<dyn TypeResolver>>,
}

impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType").field("name", &self.name).field("fields", &self.fields).finish()
    }
}

impl PartialEq for InterfaceType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description && self.fields == other.fields && self.interfaces == other.interfaces
    }
}

impl InterfaceType {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}
