use super::Deferred;
use super::Runtime;
use futures::channel::oneshot;
use futures::FutureExt;

/// Runs each `submit`ted closure on rayon's global thread pool, bridging the
/// result back into an async `Deferred` over a one-shot channel. `gather`
/// fans every item's completion out to `futures::future::join_all`, so
/// independent fields genuinely execute in parallel.
///
/// Per the design note on thread-pool safety: this runtime never assumes a
/// resolver-returned collection is safe to mutate in place from another
/// thread — each submitted closure owns the data it touches.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPoolRuntime;

impl Runtime for ThreadPoolRuntime {
    fn submit<T, F>(&self, f: F) -> Deferred<'static, T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        rayon::spawn(move || {
            let _ = tx.send(f());
        });
        async move { rx.await.expect("rayon task dropped its result sender without sending") }.boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn submit_runs_on_worker_thread() {
        let runtime = ThreadPoolRuntime;
        let result = runtime.submit(|| 1 + 1).await;
        assert_eq!(result, 2);
    }

    #[tokio::test]
    async fn gather_runs_concurrently() {
        let runtime = ThreadPoolRuntime;
        let items = (0..8).map(|i| runtime.submit(move || i * i)).collect();
        let results = runtime.gather(items).await;
        assert_eq!(results, vec![0, 1, 4, 9, 16, 25, 36, 49]);
    }
}
