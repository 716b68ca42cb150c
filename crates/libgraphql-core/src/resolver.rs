//! The statically-typed replacement for the source's dynamic resolver
//! dispatch (design note: "a single resolver trait exposes `(ctx) -> Result`,
//! where `FieldContext` carries the root value, the `ResolveInfo`, and a
//! typed `Arguments` map").
//!
//! Rust has no runtime reflection, so the "methods only" default-resolver
//! rule (see the schema-builder open question in DESIGN.md) is enforced
//! structurally rather than by inspecting a dynamic object: a resolvable
//! parent value implements [`Resolvable::resolve_field`] itself, and there
//! is no path by which the executor could pull an arbitrary `Fn`-typed
//! struct field out of a map and invoke it as though it were a method.

use crate::error::ResolverError;
use crate::executor::resolve_info::ResolveInfo;
use crate::value::ResolvedValue;
use indexmap::IndexMap;
use std::sync::Arc;

/// What a resolver (or the default field-access fallback) produced for one
/// field, prior to completion against the declared field type.
#[derive(Clone)]
pub enum FieldOutput {
    Null,
    /// A scalar or enum leaf value, to be passed through `serialize`/
    /// enum-name lookup during completion.
    Leaf(ResolvedValue),
    /// An object/interface/union result: completion recurses into this with
    /// a child selection set.
    Node(Arc<dyn Resolvable>),
    List(Vec<FieldOutput>),
}

impl std::fmt::Debug for FieldOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldOutput::Null => write!(f, "Null"),
            FieldOutput::Leaf(v) => write!(f, "Leaf({v:?})"),
            FieldOutput::Node(_) => write!(f, "Node(..)"),
            FieldOutput::List(items) => write!(f, "List({items:?})"),
        }
    }
}

/// Implemented by any root/parent value the executor walks into. The
/// default field resolver calls `resolve_field` with the field's
/// `host_name` (falling back to its GraphQL name); there is no generic
/// "invoke whatever is at this key" path.
pub trait Resolvable: Send + Sync + std::fmt::Debug {
    fn resolve_field(&self, key: &str) -> Option<FieldOutput>;
}

/// A field argument map, already coerced, keyed by GraphQL argument name.
#[derive(Clone, Debug, Default)]
pub struct Arguments(pub IndexMap<String, ResolvedValue>);

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&ResolvedValue> {
        self.0.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ResolvedValue::as_str)
    }

    pub fn i32(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(ResolvedValue::as_i32)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ResolvedValue::as_bool)
    }
}

/// Everything a [`Resolver`] implementation needs: the parent value, the
/// coerced arguments, and the ambient [`ResolveInfo`] for this field.
pub struct FieldContext<'a> {
    pub parent: &'a dyn Resolvable,
    pub arguments: Arguments,
    pub info: ResolveInfo<'a>,
}

pub trait Resolver: Send + Sync {
    fn resolve(&self, ctx: &FieldContext<'_>) -> Result<FieldOutput, ResolverError>;
}

/// Wraps a plain closure as a [`Resolver`], for the common case of a
/// resolver that doesn't need to hold additional state.
pub struct FnResolver<F>(pub F)
where
    F: Fn(&FieldContext<'_>) -> Result<FieldOutput, ResolverError> + Send + Sync;

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&FieldContext<'_>) -> Result<FieldOutput, ResolverError> + Send + Sync,
{
    fn resolve(&self, ctx: &FieldContext<'_>) -> Result<FieldOutput, ResolverError> {
        (self.0)(ctx)
    }
}

/// A stream of root values for one subscription field, each driving its own
/// independent `{data, errors}` response, per the GraphQL spec's Subscription
/// execution mode (§6.2.3). Unlike
/// [`Resolver`], which resolves once, this hands back a long-lived source
/// the executor polls for as long as the subscription is open.
pub type EventStream = futures::stream::BoxStream<'static, Arc<dyn Resolvable>>;

pub trait SourceResolver: Send + Sync {
    fn subscribe(&self, ctx: &FieldContext<'_>) -> Result<EventStream, ResolverError>;
}

/// The default resolver: looks up `host_name ?? field_name` on the parent
/// value via [`Resolvable::resolve_field`]. This *is* the "methods only"
/// rule in a statically typed host — there is no fallback to generic
/// callable-member invocation because nothing in this trait exposes one.
pub struct DefaultResolver {
    pub key: String,
}

impl Resolver for DefaultResolver {
    fn resolve(&self, ctx: &FieldContext<'_>) -> Result<FieldOutput, ResolverError> {
        Ok(ctx.parent.resolve_field(&self.key).unwrap_or(FieldOutput::Null))
    }
}
