//! Message trait for values carried by subjects.

use std::collections::BTreeMap;

/// A marker trait for values published through a [`Subject`] or
/// [`ReplaySubject`].
///
/// Messages must be `Send + Sync + 'static` so they can cross into spawned
/// view loads and host callbacks.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Breadcrumb { label: String }
///
/// impl Message for Breadcrumb {}
/// ```
///
/// [`Subject`]: crate::Subject
/// [`ReplaySubject`]: crate::ReplaySubject
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Values published through a subject must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for bool {}
impl Message for u64 {}
impl Message for String {}
impl Message for &'static str {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
impl<K: Message, V: Message> Message for BTreeMap<K, V> {}
