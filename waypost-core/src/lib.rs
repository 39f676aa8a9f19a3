//! # waypost-core
//!
//! Core types for the Waypost client-side navigation engine.
//!
//! This crate holds the vocabulary shared by the engine and by host bindings:
//! it performs no navigation itself. The moving parts live in `waypost-std`.
//!
//! # Building Blocks
//!
//! ## Routes ([`Route`], [`RouteTable`])
//!
//! A route is a regular-expression [`RoutePattern`] plus an optional
//! [`RouteAction`]. The table is ordered; the first pattern that matches a
//! path wins, and the route whose pattern is [`NOT_FOUND_PATTERN`] catches
//! everything else. Matching produces a [`MatchedRoute`] carrying the named
//! group captures as [`RouteParams`].
//!
//! ## Streams ([`ReplaySubject`])
//!
//! Navigation results are published on hot subjects. A [`ReplaySubject`]
//! hands its latest value to late subscribers; every subscription is an
//! owned [`Subscription`] handle that unsubscribes on drop.
//!
//! ## Host ([`BrowserHost`])
//!
//! Location, history, and click/popstate events come from an injected
//! capability rather than global browser state.
//!
//! ## Views ([`View`], [`ViewType`], [`ViewModule`], [`MountPoint`])
//!
//! Actions produce constructible [`ViewType`]s (eager) or [`ViewModule`]s
//! (lazy). Outlets mount constructed views into an opaque [`MountPoint`] and
//! drive lazy loads through a [`Spawn`] implementation.
//!
//! # Error Types
//!
//! - [`WaypostError`] - Top-level error type
//! - [`ConfigurationError`] - Unusable route tables
//! - [`NavigationError`] - Rejected programmatic navigation
//! - [`ResolutionError`] - Failed view loads

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod host;
mod matched;
mod message;
mod mount;
mod pattern;
mod route;
mod subject;
mod table;
mod view;

// Re-exports
pub use error::{BoxError, ConfigurationError, NavigationError, ResolutionError, WaypostError};
pub use host::{
    Anchor, BrowserHost, ClickEvent, ClickListener, EventTarget, Location, Modifiers,
    MouseButton, NavigationCause, PopStateEvent, PopStateListener,
};
pub use matched::{MatchedRoute, RouteParams};
pub use message::Message;
pub use mount::{MountPoint, Spawn};
pub use pattern::{NOT_FOUND_PATTERN, PatternMatch, RoutePattern};
pub use route::{EagerFactory, LazyLoader, Route, RouteAction, RouteData};
pub use subject::{ReplaySubject, Subject, SubjectStream, Subscription};
pub use table::RouteTable;
pub use view::{View, ViewType, ViewModule};

pub use url::Url;
