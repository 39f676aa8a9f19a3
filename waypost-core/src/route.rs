//! Route definitions.
//!
//! A [`Route`] pairs a [`RoutePattern`] with an optional [`RouteAction`] that
//! produces its views. Actions declare up front whether they are eager
//! (return a [`ViewType`] synchronously) or lazy (resolve a [`ViewModule`]
//! asynchronously), so nothing has to be sniffed at runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! let routes = vec![
//!     Route::new("Route one", r"/one$")?.lazy(|| async { load_one().await }),
//!     Route::new("Route two", r"/two$")?.eager(|| Ok(ViewType::of::<TwoView>())),
//!     Route::new("Product", r"/products/(?<productId>[0-9]+)$")?
//!         .eager(|| Ok(ViewType::of::<ProductView>())),
//!     Route::new("Not found", NOT_FOUND_PATTERN)?,
//! ];
//! ```

use crate::{
    error::{BoxError, ConfigurationError},
    message::Message,
    pattern::RoutePattern,
    view::{ViewModule, ViewType},
};
use futures::future::{BoxFuture, FutureExt};
use std::{collections::BTreeMap, fmt, future::Future, sync::Arc};

/// Opaque metadata attached to a route. Never used for matching.
pub type RouteData = BTreeMap<String, String>;

/// Factory of an eagerly loaded route.
pub type EagerFactory = Arc<dyn Fn() -> Result<ViewType, BoxError> + Send + Sync>;

/// Loader of a lazily loaded route.
pub type LazyLoader =
    Arc<dyn Fn() -> BoxFuture<'static, Result<ViewModule, BoxError>> + Send + Sync>;

/// How a route produces its views.
#[derive(Clone)]
pub enum RouteAction {
    /// Returns one constructible view type synchronously.
    Eager(EagerFactory),
    /// Loads a module asynchronously; every export is mounted.
    Lazy(LazyLoader),
}

impl RouteAction {
    /// Creates an eager action.
    pub fn eager<F>(factory: F) -> Self
    where
        F: Fn() -> Result<ViewType, BoxError> + Send + Sync + 'static,
    {
        Self::Eager(Arc::new(factory))
    }

    /// Creates a lazy action.
    pub fn lazy<F, Fut>(loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ViewModule, BoxError>> + Send + 'static,
    {
        Self::Lazy(Arc::new(move || loader().boxed()))
    }

    /// Returns whether the action loads asynchronously.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Self::Lazy(_))
    }
}

impl fmt::Debug for RouteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(_) => f.write_str("Eager"),
            Self::Lazy(_) => f.write_str("Lazy"),
        }
    }
}

#[derive(Clone)]
struct RouteDef {
    name: String,
    pattern: RoutePattern,
    action: Option<RouteAction>,
    data: RouteData,
}

/// A single route definition.
///
/// Routes are immutable once registered and cheap to clone. Two routes are
/// equal when they are clones of the same definition.
#[derive(Clone)]
pub struct Route {
    def: Arc<RouteDef>,
}

impl Route {
    /// Creates a route with no action.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigurationError> {
        Ok(Self {
            def: Arc::new(RouteDef {
                name: name.into(),
                pattern: RoutePattern::new(pattern)?,
                action: None,
                data: RouteData::new(),
            }),
        })
    }

    /// Sets the route's action.
    pub fn with_action(mut self, action: RouteAction) -> Self {
        Arc::make_mut(&mut self.def).action = Some(action);
        self
    }

    /// Sets an eager action.
    pub fn eager<F>(self, factory: F) -> Self
    where
        F: Fn() -> Result<ViewType, BoxError> + Send + Sync + 'static,
    {
        self.with_action(RouteAction::eager(factory))
    }

    /// Sets a lazy action.
    pub fn lazy<F, Fut>(self, loader: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ViewModule, BoxError>> + Send + 'static,
    {
        self.with_action(RouteAction::lazy(loader))
    }

    /// Adds a metadata entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.def)
            .data
            .insert(key.into(), value.into());
        self
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Returns the pattern.
    pub fn pattern(&self) -> &RoutePattern {
        &self.def.pattern
    }

    /// Returns the action, if any.
    pub fn action(&self) -> Option<&RouteAction> {
        self.def.action.as_ref()
    }

    /// Returns the metadata bag.
    pub fn data(&self) -> &RouteData {
        &self.def.data
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.def.name)
            .field("pattern", &self.def.pattern)
            .field("action", &self.def.action)
            .field("data", &self.def.data)
            .finish()
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.def, &other.def)
    }
}

impl Eq for Route {}

impl Message for Route {}
