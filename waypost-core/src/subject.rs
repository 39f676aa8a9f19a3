//! Hot publish/subscribe primitives.
//!
//! - [`Subject`] fans each value out to the current subscribers and forgets it.
//! - [`ReplaySubject`] additionally caches the latest value and replays it to
//!   late subscribers, so a viewer that joins after the first navigation
//!   never sees "nothing".
//!
//! Fan-out snapshots the subscriber list and releases the lock before running
//! callbacks, so a callback may subscribe, unsubscribe, or publish again. A
//! subscription cancelled mid fan-out is not invoked afterwards.

use crate::message::Message;
use futures::{Stream, StreamExt, channel::mpsc};
use parking_lot::Mutex;
use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    sync::{
        Arc, Weak,
        atomic::{AtomicBool, Ordering},
    },
    task::{Context, Poll},
};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

struct Slots<T> {
    next_id: u64,
    slots: Vec<Slot<T>>,
}

/// A handle to a live subscription.
///
/// Dropping the handle unsubscribes. Call [`Subscription::forget`] to keep the
/// subscription alive for the lifetime of its source instead.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a subscription that runs `teardown` once when cancelled.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Creates an already-closed subscription.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Cancels the subscription.
    pub fn unsubscribe(mut self) {
        self.close();
    }

    /// Returns whether the subscription has been cancelled.
    pub fn is_closed(&self) -> bool {
        self.teardown.is_none()
    }

    /// Detaches the handle without cancelling.
    pub fn forget(mut self) {
        self.teardown = None;
    }

    fn close(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A hot multicast subject without replay.
pub struct Subject<T> {
    shared: Arc<Mutex<Slots<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Message> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message> Subject<T> {
    /// Creates a subject with no subscribers.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Slots {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// Publishes a value to every current subscriber, in subscription order.
    pub fn next(&self, value: &T) {
        let snapshot: Vec<(Arc<AtomicBool>, Callback<T>)> = self
            .shared
            .lock()
            .slots
            .iter()
            .map(|slot| (Arc::clone(&slot.active), Arc::clone(&slot.callback)))
            .collect();

        for (active, callback) in snapshot {
            if active.load(Ordering::Acquire) {
                callback(value);
            }
        }
    }

    /// Subscribes to future values.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.attach(Arc::new(callback)).1
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().slots.len()
    }

    fn attach(&self, callback: Callback<T>) -> (Arc<AtomicBool>, Subscription) {
        let active = Arc::new(AtomicBool::new(true));
        let id = {
            let mut shared = self.shared.lock();
            let id = shared.next_id;
            shared.next_id += 1;
            shared.slots.push(Slot {
                id,
                active: Arc::clone(&active),
                callback,
            });
            id
        };

        let weak: Weak<Mutex<Slots<T>>> = Arc::downgrade(&self.shared);
        let flag = Arc::clone(&active);
        let subscription = Subscription::new(move || {
            flag.store(false, Ordering::Release);
            if let Some(shared) = weak.upgrade() {
                shared.lock().slots.retain(|slot| slot.id != id);
            }
        });

        (active, subscription)
    }
}

struct Replay<T> {
    latest: Option<T>,
    emitting: bool,
    pending: VecDeque<T>,
}

/// A hot subject that replays its latest value to new subscribers.
///
/// Publishing from inside a callback does not nest: the value becomes the
/// latest at once but is delivered after the current fan-out finishes, so
/// every subscriber sees values in publish order.
pub struct ReplaySubject<T> {
    subject: Subject<T>,
    state: Arc<Mutex<Replay<T>>>,
}

impl<T> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Message + Clone> Default for ReplaySubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Message + Clone> ReplaySubject<T> {
    /// Creates an empty subject. Subscribers see nothing until the first value.
    pub fn new() -> Self {
        Self::with_latest(None)
    }

    /// Creates a subject that starts with `value`.
    pub fn seeded(value: T) -> Self {
        Self::with_latest(Some(value))
    }

    fn with_latest(latest: Option<T>) -> Self {
        Self {
            subject: Subject::new(),
            state: Arc::new(Mutex::new(Replay {
                latest,
                emitting: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Stores `value` as the latest and publishes it.
    ///
    /// If a fan-out is already running (a callback publishing again, or
    /// another thread), `value` is queued and delivered by that fan-out once
    /// the values ahead of it are done.
    pub fn next(&self, mut value: T) {
        {
            let mut state = self.state.lock();
            state.latest = Some(value.clone());
            if state.emitting {
                state.pending.push_back(value);
                return;
            }
            state.emitting = true;
        }

        loop {
            self.subject.next(&value);

            let mut state = self.state.lock();
            match state.pending.pop_front() {
                Some(queued) => value = queued,
                None => {
                    state.emitting = false;
                    return;
                }
            }
        }
    }

    /// Returns a clone of the latest value.
    pub fn latest(&self) -> Option<T> {
        self.state.lock().latest.clone()
    }

    /// Subscribes, receiving the latest value (if any) immediately.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (active, subscription) = self.subject.attach(Arc::clone(&callback));

        let replay = self.latest();
        if let Some(value) = replay {
            if active.load(Ordering::Acquire) {
                callback(&value);
            }
        }

        subscription
    }

    /// Returns the number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }

    /// Turns the subject into a [`Stream`] of values, starting with the latest.
    ///
    /// The stream stays subscribed until it is dropped.
    pub fn stream(&self) -> SubjectStream<T> {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = self.subscribe(move |value: &T| {
            let _ = sender.unbounded_send(value.clone());
        });
        SubjectStream {
            receiver,
            _subscription: subscription,
        }
    }
}

/// A [`Stream`] view over a [`ReplaySubject`]. See [`ReplaySubject::stream`].
pub struct SubjectStream<T> {
    receiver: mpsc::UnboundedReceiver<T>,
    _subscription: Subscription,
}

impl<T> Stream for SubjectStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_next_unpin(cx)
    }
}
