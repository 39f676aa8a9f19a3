//! Testing utilities for Waypost.
//!
//! Deterministic stand-ins for the collaborators an outlet needs, so
//! navigation scenarios can be driven step by step.
//!
//! # Features
//!
//! - [`StaticView`] and [`view_type`]: Named views with no behaviour
//! - [`RecordingMount`]: A mount point that records what it shows
//! - [`ManualSpawner`]: A spawner that only runs futures when asked
//! - [`DeferredAction`]: A lazy action whose loads are settled by the test

use futures::{
    FutureExt,
    channel::oneshot,
    future::BoxFuture,
    task::noop_waker_ref,
};
use parking_lot::Mutex;
use std::{
    collections::VecDeque,
    sync::Arc,
    task::{Context, Poll},
};
use waypost_core::{BoxError, MountPoint, RouteAction, Spawn, View, ViewModule, ViewType};

// ============================================================================
// Views
// ============================================================================

/// A view that is nothing but its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticView {
    name: Arc<str>,
}

impl StaticView {
    /// Creates a view named `name`.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }
}

impl View for StaticView {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A view type constructing [`StaticView`]s named `name`.
pub fn view_type(name: &str) -> ViewType {
    let name: Arc<str> = name.into();
    ViewType::new(Arc::clone(&name), move || StaticView {
        name: Arc::clone(&name),
    })
}

// ============================================================================
// Recording Mount
// ============================================================================

#[derive(Default)]
struct MountLog {
    children: Vec<String>,
    clears: usize,
    appends: usize,
}

/// A mount point that records the names of its children.
///
/// Clones share the same record, so keep one and hand the other to the
/// outlet.
///
/// # Example
///
/// ```rust,ignore
/// let mount = RecordingMount::new();
/// let outlet = ViewOutlet::new(mount.clone(), spawner);
///
/// outlet.bind(&navigation);
/// assert_eq!(mount.children(), ["HomeView"]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingMount {
    log: Arc<Mutex<MountLog>>,
}

impl RecordingMount {
    /// Create an empty mount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the current children, in order.
    pub fn children(&self) -> Vec<String> {
        self.log.lock().children.clone()
    }

    /// How many times the mount was cleared.
    pub fn clear_count(&self) -> usize {
        self.log.lock().clears
    }

    /// How many views were appended in total.
    pub fn append_count(&self) -> usize {
        self.log.lock().appends
    }
}

impl MountPoint for RecordingMount {
    fn clear(&self) {
        let mut log = self.log.lock();
        log.children.clear();
        log.clears += 1;
    }

    fn append(&self, view: Box<dyn View>) {
        let mut log = self.log.lock();
        log.children.push(view.name().to_owned());
        log.appends += 1;
    }
}

// ============================================================================
// Manual Spawner
// ============================================================================

/// A spawner that queues futures until [`run_until_stalled`] is called.
///
/// [`run_until_stalled`]: ManualSpawner::run_until_stalled
#[derive(Clone, Default)]
pub struct ManualSpawner {
    queue: Arc<Mutex<Vec<BoxFuture<'static, ()>>>>,
}

impl ManualSpawner {
    /// Create a spawner with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of futures that have not completed yet.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Polls queued futures until none of them can make progress.
    ///
    /// Futures spawned while running are polled too. Returns how many
    /// futures completed.
    pub fn run_until_stalled(&self) -> usize {
        let mut cx = Context::from_waker(noop_waker_ref());
        let mut completed = 0;

        loop {
            let batch = std::mem::take(&mut *self.queue.lock());
            if batch.is_empty() {
                return completed;
            }

            let mut stalled = Vec::new();
            let mut progressed = false;
            for mut future in batch {
                match future.poll_unpin(&mut cx) {
                    Poll::Ready(()) => {
                        completed += 1;
                        progressed = true;
                    }
                    Poll::Pending => stalled.push(future),
                }
            }

            let mut queue = self.queue.lock();
            let spawned = !queue.is_empty();
            stalled.append(&mut *queue);
            *queue = stalled;
            if !progressed && !spawned {
                return completed;
            }
        }
    }
}

impl Spawn for ManualSpawner {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self.queue.lock().push(future);
    }
}

// ============================================================================
// Deferred Action
// ============================================================================

type Pending = oneshot::Sender<Result<ViewModule, BoxError>>;

/// A lazy route action whose loads stay pending until the test settles them.
///
/// Each invocation of the action queues one load; [`resolve_next`] and
/// [`reject_next`] settle them oldest first.
///
/// [`resolve_next`]: DeferredAction::resolve_next
/// [`reject_next`]: DeferredAction::reject_next
#[derive(Clone, Default)]
pub struct DeferredAction {
    pending: Arc<Mutex<VecDeque<Pending>>>,
}

impl DeferredAction {
    /// Create an action with no pending loads.
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`RouteAction::Lazy`] feeding this queue.
    pub fn action(&self) -> RouteAction {
        let pending = Arc::clone(&self.pending);
        RouteAction::lazy(move || {
            let (tx, rx) = oneshot::channel();
            pending.lock().push_back(tx);
            rx.map(|settled| settled.unwrap_or_else(|canceled| Err(canceled.into())))
        })
    }

    /// Number of loads not yet settled.
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Completes the oldest load with `module`. Returns `false` if nothing
    /// was pending or the load was abandoned.
    pub fn resolve_next(&self, module: ViewModule) -> bool {
        self.settle(Ok(module))
    }

    /// Fails the oldest load with `error`.
    pub fn reject_next(&self, error: impl Into<BoxError>) -> bool {
        self.settle(Err(error.into()))
    }

    fn settle(&self, result: Result<ViewModule, BoxError>) -> bool {
        let next = self.pending.lock().pop_front();
        next.is_some_and(|tx| tx.send(result).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_mount() {
        let mount = RecordingMount::new();
        mount.append(Box::new(StaticView::new("A")));
        mount.append(view_type("B").construct());
        assert_eq!(mount.children(), ["A", "B"]);

        mount.clear();
        assert!(mount.children().is_empty());
        assert_eq!(mount.clear_count(), 1);
        assert_eq!(mount.append_count(), 2);
    }

    #[test]
    fn test_manual_spawner_runs_ready_futures() {
        let spawner = ManualSpawner::new();
        let hits = Arc::new(Mutex::new(0));
        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            spawner.spawn(async move { *hits.lock() += 1 }.boxed());
        }

        assert_eq!(spawner.pending(), 3);
        assert_eq!(spawner.run_until_stalled(), 3);
        assert_eq!(*hits.lock(), 3);
        assert_eq!(spawner.pending(), 0);
    }

    #[test]
    fn test_deferred_action_waits_for_settlement() {
        let deferred = DeferredAction::new();
        let RouteAction::Lazy(loader) = deferred.action() else {
            panic!("expected a lazy action");
        };

        let spawner = ManualSpawner::new();
        let loaded = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&loaded);
        let load = loader();
        spawner.spawn(
            async move {
                *sink.lock() = Some(load.await.map(|module| module.len()).is_ok());
            }
            .boxed(),
        );

        assert_eq!(spawner.run_until_stalled(), 0);
        assert_eq!(deferred.pending(), 1);

        assert!(deferred.resolve_next(ViewModule::new()));
        assert_eq!(spawner.run_until_stalled(), 1);
        assert_eq!(*loaded.lock(), Some(true));
        assert!(!deferred.reject_next("nothing pending"));
    }
}
