use std::marker::PhantomData;

/// A strongly-typed, `String`-named reference to a resource (`TResource`)
/// stored in some other data store (`TSource`), held without an explicit
/// reference to that store. Dereferencing happens via [`NamedRef::deref`] by
/// providing an explicit reference to the `TSource` at the call site.
///
/// This is how [`crate::schema::Schema`] represents cyclic references (an
/// object field's type, an interface's implementors, a union's members)
/// without self-referential structs: every cross-type pointer inside the
/// schema is a `NamedRef` resolved against the owning `Schema`, not a
/// borrowed Rust reference.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NamedRef<TSource, TRefLocation, TResource>
where
    TResource: DerefByName<Source = TSource, RefLocation = TRefLocation>,
{
    name: String,
    ref_location: TRefLocation,
    phantom: PhantomData<TResource>,
}

impl<TSource, TRefLocation, TResource> NamedRef<TSource, TRefLocation, TResource>
where
    TResource: DerefByName<Source = TSource, RefLocation = TRefLocation>,
{
    pub fn new(name: impl AsRef<str>, ref_location: TRefLocation) -> Self {
        NamedRef { name: name.as_ref().to_string(), ref_location, phantom: PhantomData }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn ref_location(&self) -> &TRefLocation {
        &self.ref_location
    }

    pub fn deref<'a>(&self, source: &'a TSource) -> Result<&'a TResource, DerefByNameError> {
        TResource::deref_name(source, self.name.as_str())
    }
}

/// Implement for any type that can be the target of a [`NamedRef`].
pub trait DerefByName: Clone + std::fmt::Debug {
    type Source;
    type RefLocation;

    fn deref_name<'a>(source: &'a Self::Source, name: &str) -> Result<&'a Self, DerefByNameError>
    where
        Self: Sized;

    fn named_ref(name: &str, ref_location: Self::RefLocation) -> NamedRef<Self::Source, Self::RefLocation, Self>
    where
        Self: Sized,
    {
        NamedRef::new(name, ref_location)
    }
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum DerefByNameError {
    #[error("dangling reference to `{0}`")]
    DanglingReference(String),
}
