//! # waypost - Client-Side Navigation
//!
//! `waypost` routes in-app navigation for single-page applications: it
//! intercepts same-origin link clicks, matches the location against an
//! ordered table of regular-expression routes, publishes the result on
//! replaying streams, and renders the matched route's views into an outlet.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypost::prelude::*;
//!
//! let navigation = NavigationService::new(host);
//! navigation.register([
//!     Route::new("Home", r"^/$")?.eager(|| Ok(ViewType::of::<HomeView>())),
//!     Route::new("Product", r"/products/(?<productId>[0-9]+)$")?
//!         .lazy(|| async { load_product_module().await }),
//!     Route::new("Not found", NOT_FOUND_PATTERN)?,
//! ])?;
//!
//! let outlet = ViewOutlet::new(mount, TokioSpawner::current()?);
//! outlet.bind(&navigation);
//!
//! navigation.navigate("/products/42", None)?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use waypost_core::{
    // Host
    Anchor,
    // Error types
    BoxError,
    BrowserHost,
    ClickEvent,
    ClickListener,
    ConfigurationError,
    // Routes
    EagerFactory,
    EventTarget,
    LazyLoader,
    Location,
    MatchedRoute,
    // Message
    Message,
    Modifiers,
    // Views
    MountPoint,
    MouseButton,
    NOT_FOUND_PATTERN,
    NavigationCause,
    NavigationError,
    PatternMatch,
    PopStateEvent,
    PopStateListener,
    // Streams
    ReplaySubject,
    ResolutionError,
    Route,
    RouteAction,
    RouteData,
    RouteParams,
    RoutePattern,
    RouteTable,
    Spawn,
    Subject,
    SubjectStream,
    Subscription,
    Url,
    View,
    ViewModule,
    ViewType,
    WaypostError,
};

pub use waypost_std::{
    HistoryEntry, Ignored, LinkInterceptor, MemoryHost, NavigationService,
    NavigationServiceBuilder, ViewOutlet,
};

#[cfg(feature = "tokio")]
pub use waypost_std::TokioSpawner;

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::testing::*;
}

/// Prelude module - common imports for Waypost.
///
/// # Usage
///
/// ```rust,ignore
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Host
        BrowserHost,
        // Errors
        ConfigurationError,
        MatchedRoute,
        MountPoint,
        NOT_FOUND_PATTERN,
        NavigationError,
        // Engine
        NavigationService,
        Route,
        RouteAction,
        RouteParams,
        Spawn,
        Subscription,
        // Views
        View,
        ViewModule,
        ViewOutlet,
        ViewType,
    };

    #[cfg(feature = "tokio")]
    pub use crate::TokioSpawner;
}
