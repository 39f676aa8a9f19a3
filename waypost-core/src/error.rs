//! Error types for Waypost.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WaypostError`] - Top-level error type for all Waypost operations
//! - [`ConfigurationError`] - Route table problems detected at setup time
//! - [`NavigationError`] - Programmatic navigation failures
//! - [`ResolutionError`] - A route's action failed to produce a view

use thiserror::Error;

/// A boxed error type for failures raised by user-supplied route actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Waypost operations.
#[derive(Error, Debug)]
pub enum WaypostError {
    /// The route table is unusable.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A programmatic navigation was rejected.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// A route's view could not be produced.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),
}

/// Fatal errors in the route table. The application must fix its routes.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// No route uses the not-found pattern.
    #[error("no not-found route defined (expected a route with pattern `{0}`)")]
    MissingNotFound(String),

    /// More than one route uses the not-found pattern.
    #[error("{count} routes use the not-found pattern `{pattern}`, exactly one is allowed")]
    DuplicateNotFound {
        /// The not-found pattern.
        pattern: String,
        /// How many routes used it.
        count: usize,
    },

    /// A route pattern is not a valid regular expression.
    #[error("invalid route pattern `{pattern}`")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}

/// Errors returned by programmatic navigation.
#[derive(Error, Debug)]
pub enum NavigationError {
    /// `navigate` was called before any routes were registered.
    #[error("no routes registered")]
    NotRegistered,

    /// The navigation target could not be resolved against the current location.
    #[error("invalid navigation target `{path}`")]
    InvalidPath {
        /// The requested path.
        path: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The navigation target lives on another origin; history cannot hold it.
    #[error("navigation target `{0}` is not same-origin")]
    CrossOrigin(String),
}

/// Recoverable failures while turning a route into mounted views.
///
/// These are logged by the outlet and never reach the route streams.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The route's action factory failed, or its lazy load was rejected.
    #[error("unable to load view for route `{route}`")]
    Action {
        /// Name of the route whose action failed.
        route: String,
        /// The action's error.
        #[source]
        source: BoxError,
    },
}
