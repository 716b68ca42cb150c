use crate::ast::shared_nodes::Argument;
use crate::ast::shared_nodes::DirectiveAnnotation;
use crate::ast::type_annotation::TypeAnnotation;
use crate::ast::value::Value;
use crate::source_position::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize, serde::Serialize)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub var_type: TypeAnnotation,
    pub default_value: Option<Value>,
    /// Directives on variable definitions (graphql-spec PR 510): parsed for
    /// syntax completeness but not otherwise interpreted by this engine.
    pub directives: Vec<DirectiveAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn span(&self) -> Span {
        match self {
            Selection::Field(f) => f.span,
            Selection::FragmentSpread(f) => f.span,
            Selection::InlineFragment(f) => f.span,
        }
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Selection::Field(f) => &f.directives,
            Selection::FragmentSpread(f) => &f.directives,
            Selection::InlineFragment(f) => &f.directives,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: Option<SelectionSet>,
    pub span: Span,
}

impl Field {
    /// The key this field's result is reported under in the response map:
    /// the alias if present, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub fragment_name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: Span,
}
