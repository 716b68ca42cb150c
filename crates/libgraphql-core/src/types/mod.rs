pub mod directive;
pub mod enum_type;
pub mod field;
pub mod input_object;
pub mod input_value;
pub mod interface;
pub mod object;
pub mod scalar;
pub mod type_annotation;
pub mod union_type;

pub use directive::DirectiveDef;
pub use directive::NamedDirectiveRef;
pub use enum_type::EnumType;
pub use enum_type::EnumValueDef;
pub use field::Field;
pub use input_object::InputObjectType;
pub use input_value::InputValue;
pub use interface::InterfaceType;
pub use interface::TypeResolver;
pub use object::ObjectType;
pub use scalar::ScalarType;
pub use type_annotation::TypeAnnotation;
pub use union_type::UnionType;

use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use libgraphql_parser::Span;

pub type NamedTypeRef = NamedRef<Schema, Span, GraphQLType>;

/// The closed sum of named type kinds a schema's type registry can hold, per
/// the GraphQL spec's Type System section (§3). Every cross-type pointer in
/// the schema (a field's type, an
/// interface's implementors, a union's members) is a [`NamedTypeRef`]
/// resolved against the owning [`Schema`], never a direct Rust reference —
/// see the design note on cyclic type references.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl GraphQLType {
    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Scalar(t) => &t.name,
            GraphQLType::Object(t) => &t.name,
            GraphQLType::Interface(t) => &t.name,
            GraphQLType::Union(t) => &t.name,
            GraphQLType::Enum(t) => &t.name,
            GraphQLType::InputObject(t) => &t.name,
        }
    }

    pub fn def_location(&self) -> Span {
        match self {
            GraphQLType::Scalar(t) => t.def_location,
            GraphQLType::Object(t) => t.def_location,
            GraphQLType::Interface(t) => t.def_location,
            GraphQLType::Union(t) => t.def_location,
            GraphQLType::Enum(t) => t.def_location,
            GraphQLType::InputObject(t) => t.def_location,
        }
    }

    pub fn is_input_type(&self) -> bool {
        matches!(self, GraphQLType::Scalar(_) | GraphQLType::Enum(_) | GraphQLType::InputObject(_))
    }

    pub fn is_output_type(&self) -> bool {
        matches!(
            self,
            GraphQLType::Scalar(_) | GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_) | GraphQLType::Enum(_)
        )
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_))
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            GraphQLType::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceType> {
        match self {
            GraphQLType::Interface(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&ScalarType> {
        match self {
            GraphQLType::Scalar(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            GraphQLType::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            GraphQLType::Union(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            GraphQLType::InputObject(t) => Some(t),
            _ => None,
        }
    }

    /// Looks up a field by name on an object or interface type; returns
    /// `None` for any other kind, including the introspection-free meta
    /// fields the executor handles separately.
    pub fn field(&self, name: &str) -> Option<&Field> {
        match self {
            GraphQLType::Object(t) => t.field(name),
            GraphQLType::Interface(t) => t.field(name),
            _ => None,
        }
    }
}

impl DerefByName for GraphQLType {
    type Source = Schema;
    type RefLocation = Span;

    fn deref_name<'a>(schema: &'a Schema, name: &str) -> Result<&'a Self, DerefByNameError> {
        schema.types.get(name).ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}
