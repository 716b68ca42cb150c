use crate::types::NamedTypeRef;
use crate::types::TypeAnnotation;
use libgraphql_parser::ast;
use libgraphql_parser::Span;

/// The base shape for both an `Argument` (field/directive argument) and an
/// input-object field: `{name, type, default_value?, description, host_name?}`.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub type_annotation: TypeAnnotation,
    pub default_value: Option<ast::Value>,
    pub deprecated: Option<String>,
    /// Maps the exposed GraphQL name to a host-language-friendly key used by
    /// resolvers, when it differs from `name` (the Rust port's name for the
    /// source's `python_name` concept).
    pub host_name: Option<String>,
    pub def_location: Span,
}

impl InputValue {
    pub fn resolver_key(&self) -> &str {
        self.host_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_required(&self) -> bool {
        !self.type_annotation.nullable() && self.default_value.is_none()
    }

    fn builtin(name: &str, type_name: &str, nullable: bool, description: &str) -> Self {
        InputValue {
            name: name.to_string(),
            description: Some(description.to_string()),
            type_annotation: TypeAnnotation::Named {
                type_ref: NamedTypeRef::new(type_name, Span::dummy()),
                nullable,
                ref_location: Span::dummy(),
            },
            default_value: None,
            deprecated: None,
            host_name: None,
            def_location: Span::dummy(),
        }
    }

    pub fn required_boolean(name: &str, description: &str) -> Self {
        Self::builtin(name, "Boolean", false, description)
    }

    pub fn optional_string_with_default(name: &str, description: &str, default: &str) -> Self {
        let mut iv = Self::builtin(name, "String", true, description);
        iv.default_value = Some(ast::Value::String { value: default.to_string(), block: false, span: Span::dummy() });
        iv
    }
}
