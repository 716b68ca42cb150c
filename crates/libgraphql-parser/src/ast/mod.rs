//! The typed GraphQL abstract syntax tree, shared between the executable
//! (query language) grammar and the Schema Definition Language (SDL)
//! grammar.
//!
//! Every node is deep-copyable (`Clone`) and structurally comparable
//! (`PartialEq`) and carries a [`Span`](crate::source_position::Span). The
//! tree is a closed sum type (see [`Definition`]); there is no open-ended
//! node trait or inheritance hierarchy.

pub mod executable;
pub mod shared_nodes;
pub mod type_annotation;
pub mod type_system;
pub mod value;

use crate::source_position::Span;

pub use executable::Field;
pub use executable::FragmentDefinition;
pub use executable::FragmentSpread;
pub use executable::InlineFragment;
pub use executable::OperationDefinition;
pub use executable::OperationKind;
pub use executable::Selection;
pub use executable::SelectionSet;
pub use executable::VariableDefinition;
pub use shared_nodes::Argument;
pub use shared_nodes::DirectiveAnnotation;
pub use type_annotation::TypeAnnotation;
pub use type_system::DirectiveDefinition;
pub use type_system::DirectiveLocation;
pub use type_system::DirectiveLocationKind;
pub use type_system::EnumTypeDefinition;
pub use type_system::EnumValueDefinition;
pub use type_system::FieldDefinition;
pub use type_system::InputObjectTypeDefinition;
pub use type_system::InputValueDefinition;
pub use type_system::InterfaceTypeDefinition;
pub use type_system::ObjectTypeDefinition;
pub use type_system::RootOperationTypeDefinition;
pub use type_system::ScalarTypeDefinition;
pub use type_system::SchemaDefinition;
pub use type_system::TypeDefinition;
pub use type_system::TypeExtension;
pub use type_system::UnionTypeDefinition;
pub use value::ObjectField;
pub use value::Value;

/// A single top-level definition within a [`Document`].
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    TypeSystem(TypeDefinition),
    TypeSystemExtension(TypeExtension),
    Schema(SchemaDefinition),
    Directive(DirectiveDefinition),
}

impl Definition {
    pub fn span(&self) -> Span {
        match self {
            Definition::Operation(d) => d.span,
            Definition::Fragment(d) => d.span,
            Definition::TypeSystem(d) => d.span(),
            Definition::TypeSystemExtension(_) => Span::dummy(),
            Definition::Schema(d) => d.span,
            Definition::Directive(d) => d.span,
        }
    }
}

/// A parsed document: either an executable query-language document, an SDL
/// document, or a mix of both within one source file.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|d| match d {
            Definition::Fragment(f) => Some(f),
            _ => None,
        })
    }
}

/// A borrowed reference to any AST node, used purely for the visitor's
/// uniform dispatch-by-tag (see [`crate::visitor`]). This is the "tagged
/// variant" the design notes call for: visitors match on `Node` rather than
/// relying on a shared base trait.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Document(&'a Document),
    OperationDefinition(&'a OperationDefinition),
    FragmentDefinition(&'a FragmentDefinition),
    VariableDefinition(&'a VariableDefinition),
    SelectionSet(&'a SelectionSet),
    Field(&'a Field),
    FragmentSpread(&'a FragmentSpread),
    InlineFragment(&'a InlineFragment),
    Argument(&'a Argument),
    Directive(&'a DirectiveAnnotation),
    Value(&'a Value),
}
