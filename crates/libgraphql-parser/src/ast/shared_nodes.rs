use crate::ast::value::Value;
use crate::source_position::Span;

/// A single `name: value` argument, used both by field/directive invocations
/// (executable documents) and by directive *definitions* don't use this type
/// directly (they use `InputValueDefinition` instead).
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
    pub span: Span,
}

/// A directive *application* (`@name(arg: val, ...)`), as opposed to a
/// `DirectiveDefinition` (the `directive @name on LOCATION` declaration).
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub span: Span,
}

impl DirectiveAnnotation {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.iter().find(|a| a.name == name).map(|a| &a.value)
    }
}

/// A description string attached to any SDL definition
/// (`"""…"""` or `"…"` immediately preceding it).
pub type Description = Option<String>;
