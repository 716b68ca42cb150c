use libgraphql_parser::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDef {
    pub name: String,
    pub description: Option<String>,
    pub deprecated: Option<String>,
    pub def_location: Span,
}

/// An `EnumType`: `{name, description, values[]}` per the GraphQL spec's
/// Enums section (§3.9).
#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub values: Vec<EnumValueDef>,
    pub def_location: Span,
}

impl EnumType {
    pub fn value(&self, name: &str) -> Option<&EnumValueDef> {
        self.values.iter().find(|v| v.name == name)
    }
}
