//! Requests bound to the lifetime of the component that issued them
//!
//! A page creates one [`Lifetime`], runs its requests through it and calls
//! [`Lifetime::end`] from `on_cleanup`. Futures still in flight at that
//! point are aborted and resolve to `None`, so their results never reach
//! disposed signals.
//!
//! Loads that restart when a route parameter changes go through a
//! [`LifetimeSlot`]: each restart ends the previous child, so a slow
//! response for the old parameter never lands after the new one.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable};

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Default)]
struct Scope {
    ended: AtomicBool,
    handles: Mutex<Vec<(u64, AbortHandle)>>,
}

impl Scope {
    fn handles(&self) -> MutexGuard<'_, Vec<(u64, AbortHandle)>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn end(&self) {
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }
        for (_, handle) in std::mem::take(&mut *self.handles()) {
            handle.abort();
        }
    }

    fn is_ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }
}

/// Cancellation scope for a component's requests
#[derive(Clone, Default)]
pub struct Lifetime {
    own: Arc<Scope>,
    /// Enclosing scopes; ending any of them ends this one too
    ancestors: Vec<Arc<Scope>>,
}

impl std::fmt::Debug for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifetime")
            .field("ended", &self.is_ended())
            .field("depth", &self.ancestors.len())
            .finish()
    }
}

impl Lifetime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nested lifetime that ends with `self` but can also be ended alone
    pub fn child(&self) -> Lifetime {
        let mut ancestors = Vec::with_capacity(self.ancestors.len() + 1);
        ancestors.push(self.own.clone());
        ancestors.extend(self.ancestors.iter().cloned());
        Lifetime {
            own: Arc::default(),
            ancestors,
        }
    }

    /// Run `fut` unless the lifetime ends first
    ///
    /// Returns `None` when the lifetime ended before or while the future was
    /// running.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_ended() {
            return None;
        }

        let (handle, registration) = AbortHandle::new_pair();
        let _registered = Registered::new(self, handle);
        // end() may have raced the registration above
        if self.is_ended() {
            return None;
        }

        Abortable::new(fut, registration).await.ok()
    }

    /// End the lifetime and abort everything in flight
    ///
    /// Enclosing lifetimes are not affected.
    pub fn end(&self) {
        self.own.end();
    }

    pub fn is_ended(&self) -> bool {
        self.scopes().any(|scope| scope.is_ended())
    }

    fn scopes(&self) -> impl Iterator<Item = &Arc<Scope>> {
        std::iter::once(&self.own).chain(self.ancestors.iter())
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.own.handles().len()
    }
}

/// Abort handle registered with every scope of a lifetime for one run
///
/// Dropped when the run finishes, whichever way it ends.
struct Registered<'a> {
    lifetime: &'a Lifetime,
    id: u64,
}

impl<'a> Registered<'a> {
    fn new(lifetime: &'a Lifetime, handle: AbortHandle) -> Self {
        let id = NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed);
        for scope in lifetime.scopes() {
            scope.handles().push((id, handle.clone()));
        }
        Self { lifetime, id }
    }
}

impl Drop for Registered<'_> {
    fn drop(&mut self) {
        for scope in self.lifetime.scopes() {
            scope.handles().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Holder for the latest child of a lifetime
///
/// [`LifetimeSlot::renew`] ends the previous child before handing out a
/// new one.
#[derive(Clone)]
pub struct LifetimeSlot {
    parent: Lifetime,
    current: Arc<Mutex<Option<Lifetime>>>,
}

impl LifetimeSlot {
    pub fn new(parent: &Lifetime) -> Self {
        Self {
            parent: parent.clone(),
            current: Arc::default(),
        }
    }

    pub fn renew(&self) -> Lifetime {
        let next = self.parent.child();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(next.clone());
        if let Some(previous) = previous {
            previous.end();
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;

    #[tokio::test]
    async fn test_run_completes_while_alive() {
        let lifetime = Lifetime::new();
        assert_eq!(lifetime.run(async { 5 }).await, Some(5));
    }

    #[tokio::test]
    async fn test_run_after_end_yields_none() {
        let lifetime = Lifetime::new();
        lifetime.end();

        assert_eq!(lifetime.run(async { 5 }).await, None);
        assert!(lifetime.is_ended());
    }

    #[tokio::test]
    async fn test_end_aborts_in_flight_future() {
        let lifetime = Lifetime::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let task = {
            let lifetime = lifetime.clone();
            tokio::spawn(async move { lifetime.run(rx).await })
        };
        tokio::task::yield_now().await;

        lifetime.end();
        let _ = tx.send(1);

        assert_eq!(task.await.unwrap(), None);
    }

    #[test]
    fn test_end_is_idempotent() {
        let lifetime = Lifetime::new();
        lifetime.end();
        lifetime.end();
        assert!(lifetime.is_ended());
    }

    #[tokio::test]
    async fn test_completed_runs_release_their_handles() {
        let lifetime = Lifetime::new();
        for i in 0..10 {
            assert_eq!(lifetime.run(async move { i }).await, Some(i));
        }
        assert_eq!(lifetime.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_pending_run_is_tracked_until_it_finishes() {
        let lifetime = Lifetime::new();
        let (tx, rx) = oneshot::channel::<u32>();

        let task = {
            let lifetime = lifetime.clone();
            tokio::spawn(async move { lifetime.run(rx).await })
        };
        tokio::task::yield_now().await;
        assert_eq!(lifetime.in_flight(), 1);

        tx.send(7).unwrap();
        assert_eq!(task.await.unwrap(), Some(Ok(7)));
        assert_eq!(lifetime.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_ending_parent_aborts_child_runs() {
        let parent = Lifetime::new();
        let child = parent.child();
        let (tx, rx) = oneshot::channel::<u32>();

        let task = {
            let child = child.clone();
            tokio::spawn(async move { child.run(rx).await })
        };
        tokio::task::yield_now().await;

        parent.end();
        let _ = tx.send(1);

        assert_eq!(task.await.unwrap(), None);
        assert!(child.is_ended());
    }

    #[tokio::test]
    async fn test_ending_child_leaves_parent_alive() {
        let parent = Lifetime::new();
        let child = parent.child();

        child.end();

        assert!(!parent.is_ended());
        assert_eq!(parent.run(async { 1 }).await, Some(1));
        assert_eq!(child.run(async { 1 }).await, None);
    }

    #[tokio::test]
    async fn test_renewed_slot_drops_the_stale_response() {
        let page = Lifetime::new();
        let loads = LifetimeSlot::new(&page);
        let (first_tx, first_rx) = oneshot::channel::<&str>();
        let (second_tx, second_rx) = oneshot::channel::<&str>();

        let first = {
            let load = loads.renew();
            tokio::spawn(async move { load.run(first_rx).await })
        };
        tokio::task::yield_now().await;
        let second = {
            let load = loads.renew();
            tokio::spawn(async move { load.run(second_rx).await })
        };
        tokio::task::yield_now().await;

        second_tx.send("article 2").unwrap();
        let _ = first_tx.send("article 1");

        assert_eq!(second.await.unwrap(), Some(Ok("article 2")));
        assert_eq!(first.await.unwrap(), None);
        assert!(!page.is_ended());
    }
}
