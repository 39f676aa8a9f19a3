//! Collaborators of the view outlet: where views go, and who drives lazy loads.

use crate::view::View;
use futures::future::BoxFuture;
use std::sync::Arc;

/// An opaque UI container the outlet mounts views into.
pub trait MountPoint: Send + Sync + 'static {
    /// Removes all mounted content.
    fn clear(&self);

    /// Appends a view after the existing content.
    fn append(&self, view: Box<dyn View>);
}

impl<M: MountPoint> MountPoint for Arc<M> {
    fn clear(&self) {
        (**self).clear();
    }

    fn append(&self, view: Box<dyn View>) {
        (**self).append(view);
    }
}

/// Runs a detached future to completion.
///
/// Lazy route loads are the only suspension point of the engine; the outlet
/// hands them to a spawner instead of owning an executor.
pub trait Spawn: Send + Sync + 'static {
    /// Spawns `future`.
    fn spawn(&self, future: BoxFuture<'static, ()>);
}

impl<F> Spawn for F
where
    F: Fn(BoxFuture<'static, ()>) + Send + Sync + 'static,
{
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        (self)(future)
    }
}
