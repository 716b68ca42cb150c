use super::Deferred;
use super::Runtime;
use futures::FutureExt;

/// `Deferred == value`, `gather` is eager, no parallelism. Every `submit`
/// call runs `f` to completion inline before wrapping the result — the
/// simplest runtime to embed, useful for tests and for hosts that don't
/// want to pull in an async runtime at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockingRuntime;

impl Runtime for BlockingRuntime {
    fn submit<T, F>(&self, f: F) -> Deferred<'static, T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        futures::future::ready(f()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_runs_inline() {
        let runtime = BlockingRuntime;
        let result = runtime.submit(|| 1 + 1).await;
        assert_eq!(result, 2);
    }

    #[tokio::test]
    async fn gather_preserves_order() {
        let runtime = BlockingRuntime;
        let items = vec![runtime.submit(|| 1), runtime.submit(|| 2), runtime.submit(|| 3)];
        assert_eq!(runtime.gather(items).await, vec![1, 2, 3]);
    }
}
