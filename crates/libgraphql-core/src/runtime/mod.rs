//! The executor's concurrency plugin point: everything the executor
//! needs from "how do independent fields get evaluated" is captured in the
//! five [`Runtime`] operations, so the executor's own code never mentions a
//! specific async executor or thread pool by name.

mod blocking;
mod cooperative;
mod thread_pool;

pub use blocking::BlockingRuntime;
pub use cooperative::CooperativeRuntime;
pub use thread_pool::ThreadPoolRuntime;

use futures::future::BoxFuture;
use futures::FutureExt;

/// A value that becomes available some time after `submit`/`gather`, without
/// committing the executor to any particular async runtime's task type.
/// Parametric over `'a` (rather than fixed to `'static`) so the executor can
/// hold borrowed schema/AST references across await points instead of
/// cloning them into every recursive call.
pub type Deferred<'a, T> = BoxFuture<'a, T>;

/// A small capability trait the executor schedules field evaluation
/// through. Resolvers themselves never see this — only the executor's
/// internal field-collection and result-assembly code does.
pub trait Runtime: Send + Sync {
    /// Lifts an already-available value into `Deferred`, for the common
    /// case of a resolver that returned synchronously.
    fn wrap_value<'a, T: Send + 'a>(&self, value: T) -> Deferred<'a, T> {
        futures::future::ready(value).boxed()
    }

    /// Schedules `f` to run according to this runtime's strategy (inline,
    /// cooperatively yielded, or on a worker thread) and returns a handle to
    /// its eventual result. Always `'static` since `f` may genuinely cross a
    /// thread (or cooperative task) boundary.
    fn submit<T, F>(&self, f: F) -> Deferred<'static, T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static;

    /// Runs a set of independently-submitted deferreds to completion and
    /// collects their results in the original order.
    fn gather<'a, T: Send + 'a>(&self, items: Vec<Deferred<'a, T>>) -> Deferred<'a, Vec<T>> {
        futures::future::join_all(items).boxed()
    }

    fn map<'a, T, U, F>(&self, deferred: Deferred<'a, T>, f: F) -> Deferred<'a, U>
    where
        T: Send + 'a,
        U: Send + 'a,
        F: FnOnce(T) -> U + Send + 'a,
    {
        deferred.map(f).boxed()
    }

    fn map_err<'a, T, E, E2, F>(&self, deferred: Deferred<'a, Result<T, E>>, f: F) -> Deferred<'a, Result<T, E2>>
    where
        T: Send + 'a,
        E: Send + 'a,
        E2: Send + 'a,
        F: FnOnce(E) -> E2 + Send + 'a,
    {
        deferred.map(|r| r.map_err(f)).boxed()
    }
}
