use super::Deferred;
use super::Runtime;
use futures::FutureExt;

/// A suspendable, single-threaded runtime. `submit` yields to the
/// surrounding async executor before running `f`, and `gather` yields again
/// between each item — no resolver ever runs concurrently with another on
/// the same thread, but the host's executor (tokio, in this crate's case)
/// can still interleave other work at those yield points.
#[derive(Debug, Default, Clone, Copy)]
pub struct CooperativeRuntime;

impl Runtime for CooperativeRuntime {
    fn submit<T, F>(&self, f: F) -> Deferred<'static, T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        async move {
            tokio::task::yield_now().await;
            f()
        }
        .boxed()
    }

    fn gather<'a, T: Send + 'a>(&self, items: Vec<Deferred<'a, T>>) -> Deferred<'a, Vec<T>> {
        async move {
            let mut results = Vec::with_capacity(items.len());
            for item in items {
                results.push(item.await);
                tokio::task::yield_now().await;
            }
            results
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_eventually_resolves() {
        let runtime = CooperativeRuntime;
        assert_eq!(runtime.submit(|| 42).await, 42);
    }

    #[tokio::test]
    async fn gather_preserves_order() {
        let runtime = CooperativeRuntime;
        let items = vec![runtime.submit(|| "a"), runtime.submit(|| "b")];
        assert_eq!(runtime.gather(items).await, vec!["a", "b"]);
    }
}
