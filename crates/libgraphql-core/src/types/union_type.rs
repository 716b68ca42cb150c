use crate::types::interface::TypeResolver;
use crate::types::object::ObjectType;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use libgraphql_parser::Span;
use std::sync::Arc;

pub type NamedObjectRef = NamedRef<Schema, Span, ObjectType>;

/// A `UnionType`: `{name, description, member_types[]}` per the GraphQL
/// spec's Unions section (§3.7), plus an optional `resolve_type` hook
/// mirroring [`crate::types::InterfaceType`].
#[derive(Clone)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub member_types: Vec<NamedObjectRef>,
    pub def_location: Span,
    pub resolve_type: Option<Arc<dyn TypeResolver>>,
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType").field("name", &self.name).field("member_types", &self.member_types).finish()
    }
}

impl PartialEq for UnionType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description && self.member_types == other.member_types
    }
}

impl UnionType {
    pub fn has_member(&self, name: &str) -> bool {
        self.member_types.iter().any(|m| m.name() == name)
    }
}
