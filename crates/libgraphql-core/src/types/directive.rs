use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::InputValue;
use libgraphql_parser::ast::DirectiveLocationKind;
use libgraphql_parser::Span;

pub type NamedDirectiveRef = NamedRef<Schema, Span, DirectiveDef>;

/// A `directive @name(...) on LOCATIONS` declaration. The three built-in
/// directives (`@skip`, `@include`, `@deprecated`) are always present in a
/// built schema and are not overridable by SDL redeclaration.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub locations: Vec<DirectiveLocationKind>,
    pub repeatable: bool,
    pub def_location: Span,
}

impl DirectiveDef {
    pub fn is_valid_at(&self, location: DirectiveLocationKind) -> bool {
        self.locations.contains(&location)
    }
}

impl DerefByName for DirectiveDef {
    type Source = Schema;
    type RefLocation = Span;

    fn deref_name<'a>(schema: &'a Schema, name: &str) -> Result<&'a Self, DerefByNameError> {
        schema.directives.get(name).ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}

pub fn builtin_skip() -> DirectiveDef {
    DirectiveDef {
        name: "skip".to_string(),
        description: Some("Directs the executor to skip this field or fragment when the `if` argument is true.".to_string()),
        arguments: vec![InputValue::required_boolean("if", "Skipped when true.")],
        locations: vec![DirectiveLocationKind::Field, DirectiveLocationKind::FragmentSpread, DirectiveLocationKind::InlineFragment],
        repeatable: false,
        def_location: Span::dummy(),
    }
}

pub fn builtin_include() -> DirectiveDef {
    DirectiveDef {
        name: "include".to_string(),
        description: Some("Directs the executor to include this field or fragment only when the `if` argument is true.".to_string()),
        arguments: vec![InputValue::required_boolean("if", "Included when true.")],
        locations: vec![DirectiveLocationKind::Field, DirectiveLocationKind::FragmentSpread, DirectiveLocationKind::InlineFragment],
        repeatable: false,
        def_location: Span::dummy(),
    }
}

pub fn builtin_deprecated() -> DirectiveDef {
    DirectiveDef {
        name: "deprecated".to_string(),
        description: Some("Marks a field or enum value as deprecated.".to_string()),
        arguments: vec![InputValue::optional_string_with_default(
            "reason",
            "Explains why this element is deprecated.",
            "No longer supported",
        )],
        locations: vec![DirectiveLocationKind::FieldDefinition, DirectiveLocationKind::EnumValue],
        repeatable: false,
        def_location: Span::dummy(),
    }
}
