use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::sync::OnceCell;

/// Holder for at most one in-flight operation whose result is shared by every
/// caller that asks for it while it runs.
///
/// The slot is empty or holds the cell of the running operation. The caller
/// that installs the cell runs the operation; everyone else awaits the same
/// cell. The slot is emptied before the cell is filled, so once any waiter
/// resumes the next call starts a fresh operation.
pub struct SingleFlight<T> {
    slot: Mutex<Option<Arc<OnceCell<T>>>>,
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<T: Clone> SingleFlight<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `operation` unless one is already in flight, in which case its
    /// result is awaited instead. `operation` is not called by followers.
    pub async fn run<F, Fut>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let flight = self.join();
        let handle = &flight;
        let value = flight
            .get_or_init(|| async move {
                let value = operation().await;
                self.settle(handle);
                value
            })
            .await;
        value.clone()
    }

    /// True while an operation is running.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn join(&self) -> Arc<OnceCell<T>> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    fn settle(&self, flight: &Arc<OnceCell<T>>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, flight))
        {
            slot.take();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[tokio::test]
    async fn concurrent_callers_share_one_run() {
        let flight = Arc::new(SingleFlight::<usize>::new());
        let runs = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());

        let mut handles = Vec::new();
        for _ in 0..5 {
            let flight = flight.clone();
            let runs = runs.clone();
            let release = release.clone();
            handles.push(tokio::spawn(async move {
                flight
                    .run(|| async move {
                        release.notified().await;
                        runs.fetch_add(1, Ordering::SeqCst) + 1
                    })
                    .await
            }));
        }

        while !flight.in_flight() {
            tokio::task::yield_now().await;
        }
        // let every task reach the shared cell before releasing the leader
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        release.notify_one();

        for handle in handles {
            assert_eq!(handle.await.ok(), Some(1));
        }
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!flight.in_flight());
    }

    #[tokio::test]
    async fn settled_slot_starts_fresh_run() {
        let flight = SingleFlight::<u32>::new();

        let first = flight.run(|| async { 1 }).await;
        assert!(!flight.in_flight());
        let second = flight.run(|| async { 2 }).await;

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn failures_are_shared_and_cleared() {
        let flight = SingleFlight::<Result<u32, String>>::new();

        let failed = flight.run(|| async { Err("boom".to_string()) }).await;
        assert_eq!(failed, Err("boom".to_string()));
        assert!(!flight.in_flight());

        let recovered = flight.run(|| async { Ok(7) }).await;
        assert_eq!(recovered, Ok(7));
    }
}
