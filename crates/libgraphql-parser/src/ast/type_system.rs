use crate::ast::executable::OperationKind;
use crate::ast::shared_nodes::Description;
use crate::ast::shared_nodes::DirectiveAnnotation;
use crate::ast::type_annotation::TypeAnnotation;
use crate::ast::value::Value;
use crate::source_position::Span;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DirectiveLocationKind {
    // Executable locations.
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,
    // Type-system locations.
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocationKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "QUERY" => Self::Query,
            "MUTATION" => Self::Mutation,
            "SUBSCRIPTION" => Self::Subscription,
            "FIELD" => Self::Field,
            "FRAGMENT_DEFINITION" => Self::FragmentDefinition,
            "FRAGMENT_SPREAD" => Self::FragmentSpread,
            "INLINE_FRAGMENT" => Self::InlineFragment,
            "VARIABLE_DEFINITION" => Self::VariableDefinition,
            "SCHEMA" => Self::Schema,
            "SCALAR" => Self::Scalar,
            "OBJECT" => Self::Object,
            "FIELD_DEFINITION" => Self::FieldDefinition,
            "ARGUMENT_DEFINITION" => Self::ArgumentDefinition,
            "INTERFACE" => Self::Interface,
            "UNION" => Self::Union,
            "ENUM" => Self::Enum,
            "ENUM_VALUE" => Self::EnumValue,
            "INPUT_OBJECT" => Self::InputObject,
            "INPUT_FIELD_DEFINITION" => Self::InputFieldDefinition,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Query => "QUERY",
            Self::Mutation => "MUTATION",
            Self::Subscription => "SUBSCRIPTION",
            Self::Field => "FIELD",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
            Self::Schema => "SCHEMA",
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::InputObject => "INPUT_OBJECT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveLocation {
    pub kind: DirectiveLocationKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub description: Description,
    pub name: String,
    pub value_type: TypeAnnotation,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub description: Description,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: TypeAnnotation,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Description,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RootOperationTypeDefinition {
    pub operation: OperationKind,
    pub named_type: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    pub description: Description,
    pub directives: Vec<DirectiveAnnotation>,
    pub root_operation_types: Vec<RootOperationTypeDefinition>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Description,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Description,
    pub name: String,
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub description: Description,
    pub name: String,
    /// `interface X implements Y & Z` (graphql-spec PR 373).
    pub implements_interfaces: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub description: Description,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub member_types: Vec<String>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Description,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub values: Vec<EnumValueDefinition>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub description: Description,
    pub name: String,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<InputValueDefinition>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Description,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Scalar(d) => &d.name,
            TypeDefinition::Object(d) => &d.name,
            TypeDefinition::Interface(d) => &d.name,
            TypeDefinition::Union(d) => &d.name,
            TypeDefinition::Enum(d) => &d.name,
            TypeDefinition::InputObject(d) => &d.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeDefinition::Scalar(d) => d.span,
            TypeDefinition::Object(d) => d.span,
            TypeDefinition::Interface(d) => d.span,
            TypeDefinition::Union(d) => d.span,
            TypeDefinition::Enum(d) => d.span,
            TypeDefinition::InputObject(d) => d.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtension {
    Schema(SchemaDefinition),
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}
