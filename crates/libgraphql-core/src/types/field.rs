use crate::resolver::Resolver;
use crate::resolver::SourceResolver;
use crate::types::InputValue;
use crate::types::TypeAnnotation;
use libgraphql_parser::Span;
use std::sync::Arc;

/// A field defined on an [`crate::types::ObjectType`] or
/// [`crate::types::InterfaceType`].
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub type_annotation: TypeAnnotation,
    pub deprecated: Option<String>,
    pub host_name: Option<String>,
    pub def_location: Span,
    /// Attached by the schema builder from the caller-supplied resolver map
    /// (step 4 of schema build); `None` falls back to
    /// [`crate::resolver::DefaultResolver`] at execution time.
    pub resolver: Option<Arc<dyn Resolver>>,
    /// A subscription root field's source-stream resolver; unused on any
    /// other field.
    pub subscription_resolver: Option<Arc<dyn SourceResolver>>,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_annotation", &self.type_annotation)
            .field("arguments", &self.arguments)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.arguments == other.arguments
            && self.type_annotation == other.type_annotation
            && self.deprecated == other.deprecated
            && self.host_name == other.host_name
    }
}

impl Field {
    pub fn resolver_key(&self) -> &str {
        self.host_name.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.iter().find(|a| a.name == name)
    }
}
