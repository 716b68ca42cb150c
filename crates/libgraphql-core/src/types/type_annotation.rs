use crate::named_ref::DerefByName;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::NamedTypeRef;
use libgraphql_parser::ast;
use libgraphql_parser::Span;

/// A field/argument/variable's declared type, as resolved against the
/// schema's type registry. Unlike the parser's `ast::TypeAnnotation` (which
/// models non-null as an explicit wrapper), this mirrors the nullable-flag
/// convention the schema model uses so list/named nodes can each carry their
/// own nullability without an extra wrapper layer.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    List { inner: Box<TypeAnnotation>, nullable: bool, ref_location: Span },
    Named { type_ref: NamedTypeRef, nullable: bool, ref_location: Span },
}

impl TypeAnnotation {
    pub fn from_ast(ref_location: Span, ast_type: &ast::TypeAnnotation) -> Self {
        Self::from_ast_impl(ref_location, ast_type, true)
    }

    fn from_ast_impl(ref_location: Span, ast_type: &ast::TypeAnnotation, nullable: bool) -> Self {
        match ast_type {
            ast::TypeAnnotation::List { inner, .. } => TypeAnnotation::List {
                inner: Box::new(Self::from_ast_impl(ref_location, inner, true)),
                nullable,
                ref_location,
            },
            ast::TypeAnnotation::Named { name, .. } => {
                TypeAnnotation::Named { type_ref: NamedTypeRef::new(name, ref_location), nullable, ref_location }
            }
            ast::TypeAnnotation::NonNull { inner, .. } => Self::from_ast_impl(ref_location, inner, false),
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            TypeAnnotation::List { nullable, .. } => *nullable,
            TypeAnnotation::Named { nullable, .. } => *nullable,
        }
    }

    pub fn ref_location(&self) -> Span {
        match self {
            TypeAnnotation::List { ref_location, .. } => *ref_location,
            TypeAnnotation::Named { ref_location, .. } => *ref_location,
        }
    }

    pub fn inner_named_type_ref(&self) -> &NamedTypeRef {
        match self {
            TypeAnnotation::List { inner, .. } => inner.inner_named_type_ref(),
            TypeAnnotation::Named { type_ref, .. } => type_ref,
        }
    }

    pub fn inner_type<'schema>(&self, schema: &'schema Schema) -> Result<&'schema GraphQLType, crate::named_ref::DerefByNameError> {
        self.inner_named_type_ref().deref(schema)
    }

    /// Structural equivalence ignoring source locations: same List/Named
    /// shape, same nullability at each level, same innermost type name.
    pub fn is_equivalent_to(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeAnnotation::List { inner: a, nullable: na, .. }, TypeAnnotation::List { inner: b, nullable: nb, .. }) => {
                na == nb && a.is_equivalent_to(b)
            }
            (TypeAnnotation::Named { type_ref: a, nullable: na, .. }, TypeAnnotation::Named { type_ref: b, nullable: nb, .. }) => {
                na == nb && a.name() == b.name()
            }
            _ => false,
        }
    }

    /// Variable-usage covariance (spec `IsVariableUsageAllowed`): `self` (the
    /// variable's declared type) may be used where `location_type` is
    /// expected when it is at least as strict.
    pub fn is_subtype_of(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeAnnotation::List { inner: a, nullable: na, .. }, TypeAnnotation::List { inner: b, nullable: nb, .. }) => {
                (!na || *nb) && a.is_subtype_of(b)
            }
            (TypeAnnotation::Named { type_ref: a, nullable: na, .. }, TypeAnnotation::Named { type_ref: b, nullable: nb, .. }) => {
                (!na || *nb) && a.name() == b.name()
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::List { inner, nullable, .. } => {
                write!(f, "[{inner}]{}", if *nullable { "" } else { "!" })
            }
            TypeAnnotation::Named { type_ref, nullable, .. } => {
                write!(f, "{}{}", type_ref.name(), if *nullable { "" } else { "!" })
            }
        }
    }
}
