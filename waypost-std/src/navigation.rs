//! The navigation service.
//!
//! Owns the route table, resolves locations against it, publishes the result
//! on two replaying streams, and writes programmatic navigation into history.
//!
//! # Example
//!
//! ```rust,ignore
//! use waypost::prelude::*;
//!
//! let navigation = NavigationService::new(host);
//! navigation.register([
//!     Route::new("Route one", r"/one$")?.lazy(|| async { load_one().await }),
//!     Route::new("Route two", r"/two$")?.eager(|| Ok(ViewType::of::<TwoView>())),
//!     Route::new("Not found", NOT_FOUND_PATTERN)?,
//! ])?;
//!
//! let _sub = navigation.current_route().subscribe(|route| println!("{}", route.name()));
//! navigation.navigate("/two", None)?;
//! ```

use crate::{interceptor::LinkInterceptor, log::nav_debug};
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{Arc, Weak},
};
use waypost_core::{
    BrowserHost, ConfigurationError, Location, MatchedRoute, NOT_FOUND_PATTERN, NavigationError,
    ReplaySubject, Route, RouteParams, RouteTable,
};

struct Inner {
    host: Arc<dyn BrowserHost>,
    not_found_pattern: String,
    intercept_links: bool,
    table: Mutex<Option<RouteTable>>,
    current: Mutex<Option<MatchedRoute>>,
    route_subject: ReplaySubject<Route>,
    params_subject: ReplaySubject<Option<RouteParams>>,
    interceptor: Mutex<Option<LinkInterceptor>>,
}

impl Inner {
    /// Matches `location` and publishes the result. `None` before `register`.
    fn publish(&self, location: &Location) -> Option<MatchedRoute> {
        let matched = self.table.lock().as_ref()?.match_path(location.pathname());
        nav_debug!(
            "navigated to {} -> route `{}`",
            location.pathname(),
            matched.route.name()
        );

        *self.current.lock() = Some(matched.clone());
        // Params first, so route subscribers reading the params stream see
        // the values that belong to the route they were handed.
        self.params_subject.next(matched.params.clone());
        self.route_subject.next(matched.route.clone());
        Some(matched)
    }
}

/// Client-side navigation over an injected [`BrowserHost`].
///
/// Cloning yields another handle to the same service, so several outlets can
/// share one route table.
#[derive(Clone)]
pub struct NavigationService {
    inner: Arc<Inner>,
}

impl NavigationService {
    /// Creates a service with default settings.
    pub fn new<H: BrowserHost>(host: H) -> Self {
        Self::builder(host).build()
    }

    /// Starts configuring a service.
    pub fn builder<H: BrowserHost>(host: H) -> NavigationServiceBuilder {
        NavigationServiceBuilder::new(Arc::new(host))
    }

    /// Replaces the route table and publishes the route for the current
    /// location.
    ///
    /// The first call also installs link interception; its initial callback
    /// is that publish, so each call emits exactly once. Later calls keep the
    /// installed interceptor.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the table has no (or more than
    /// one) not-found route. Nothing is published and the previous table
    /// stays active.
    pub fn register<I>(&self, routes: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = Route>,
    {
        let table = RouteTable::with_not_found_pattern(routes, &self.inner.not_found_pattern)?;
        nav_debug!("registered {} routes", table.len());
        *self.inner.table.lock() = Some(table);

        let installed = self.inner.interceptor.lock().is_some();
        if installed || !self.inner.intercept_links {
            self.inner.publish(&self.inner.host.location());
            return Ok(());
        }

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let interceptor = LinkInterceptor::install(Arc::clone(&self.inner.host), move |location, _| {
            if let Some(inner) = weak.upgrade() {
                inner.publish(location);
            }
        });
        *self.inner.interceptor.lock() = Some(interceptor);
        Ok(())
    }

    /// Navigates programmatically.
    ///
    /// Resolves `path` against the current location, pushes one history entry
    /// carrying `state`, then matches and publishes.
    ///
    /// # Errors
    ///
    /// - [`NavigationError::NotRegistered`] before [`register`](Self::register)
    /// - [`NavigationError::InvalidPath`] if `path` cannot be resolved
    /// - [`NavigationError::CrossOrigin`] if `path` names another origin
    pub fn navigate(&self, path: &str, state: Option<&str>) -> Result<MatchedRoute, NavigationError> {
        if self.inner.table.lock().is_none() {
            return Err(NavigationError::NotRegistered);
        }

        let location = self.inner.host.location();
        let target = location
            .join(path)
            .map_err(|source| NavigationError::InvalidPath {
                path: path.to_owned(),
                source,
            })?;
        if !location.is_same_origin(&target) {
            return Err(NavigationError::CrossOrigin(target.into()));
        }

        self.inner.host.push_state(&target, state);
        self.inner
            .publish(&self.inner.host.location())
            .ok_or(NavigationError::NotRegistered)
    }

    /// Matches `path` against the active table without publishing.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotRegistered`] before
    /// [`register`](Self::register).
    pub fn match_path(&self, path: &str) -> Result<MatchedRoute, NavigationError> {
        self.inner
            .table
            .lock()
            .as_ref()
            .map(|table| table.match_path(path))
            .ok_or(NavigationError::NotRegistered)
    }

    /// The current-route stream. Replays the latest route to new subscribers.
    pub fn current_route(&self) -> &ReplaySubject<Route> {
        &self.inner.route_subject
    }

    /// The route-params stream. Starts out holding `None`.
    pub fn route_params(&self) -> &ReplaySubject<Option<RouteParams>> {
        &self.inner.params_subject
    }

    /// The latest matched route, if anything has been published.
    pub fn current(&self) -> Option<MatchedRoute> {
        self.inner.current.lock().clone()
    }

    /// The active routes in priority order. Empty before `register`.
    pub fn routes(&self) -> Vec<Route> {
        self.inner
            .table
            .lock()
            .as_ref()
            .map(|table| table.routes().to_vec())
            .unwrap_or_default()
    }

    /// Returns whether link interception is installed.
    pub fn is_intercepting(&self) -> bool {
        self.inner.interceptor.lock().is_some()
    }

    /// Returns whether `other` is a handle to the same service.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for NavigationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationService")
            .field("routes_count", &self.routes().len())
            .field("not_found_pattern", &self.inner.not_found_pattern)
            .field("intercepting", &self.is_intercepting())
            .finish()
    }
}

/// Configures a [`NavigationService`].
pub struct NavigationServiceBuilder {
    host: Arc<dyn BrowserHost>,
    not_found_pattern: String,
    intercept_links: bool,
}

impl NavigationServiceBuilder {
    fn new(host: Arc<dyn BrowserHost>) -> Self {
        Self {
            host,
            not_found_pattern: NOT_FOUND_PATTERN.to_owned(),
            intercept_links: true,
        }
    }

    /// Sets the pattern that marks the not-found route. Defaults to `/404`.
    pub fn not_found_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.not_found_pattern = pattern.into();
        self
    }

    /// Whether `register` installs link interception. Defaults to `true`.
    ///
    /// Without it only programmatic navigation is routed.
    pub fn intercept_links(mut self, enabled: bool) -> Self {
        self.intercept_links = enabled;
        self
    }

    /// Builds the service.
    pub fn build(self) -> NavigationService {
        NavigationService {
            inner: Arc::new(Inner {
                host: self.host,
                not_found_pattern: self.not_found_pattern,
                intercept_links: self.intercept_links,
                table: Mutex::new(None),
                current: Mutex::new(None),
                route_subject: ReplaySubject::new(),
                params_subject: ReplaySubject::seeded(None),
                interceptor: Mutex::new(None),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn routes() -> Vec<Route> {
        vec![
            Route::new("one", r"/one$").unwrap(),
            Route::new("two", r"/two$").unwrap(),
            Route::new("product", r"/products/(?<productId>[0-9]+)$").unwrap(),
            Route::new("not found", "/404").unwrap(),
        ]
    }

    #[test]
    fn test_register_publishes_current_location() {
        let host = MemoryHost::new("https://app.example/products/42").unwrap();
        let navigation = NavigationService::new(host);
        navigation.register(routes()).unwrap();

        assert_eq!(navigation.current_route().latest().unwrap().name(), "product");
        let params = navigation.route_params().latest().flatten().unwrap();
        assert_eq!(params["productId"], "42");
        assert!(navigation.is_intercepting());
    }

    #[test]
    fn test_register_emits_once() {
        let host = MemoryHost::new("https://app.example/one").unwrap();
        let navigation = NavigationService::new(host);
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        let _sub = navigation.current_route().subscribe(move |_| *counter.lock() += 1);

        navigation.register(routes()).unwrap();
        assert_eq!(*count.lock(), 1);

        navigation.register(routes()).unwrap();
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_register_without_not_found_keeps_old_table() {
        let host = MemoryHost::new("https://app.example/one").unwrap();
        let navigation = NavigationService::new(host);
        navigation.register(routes()).unwrap();

        let err = navigation
            .register([Route::new("only", "/only").unwrap()])
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingNotFound(_)));
        assert_eq!(navigation.routes().len(), 4);
    }

    #[test]
    fn test_navigate_before_register() {
        let host = MemoryHost::new("https://app.example/").unwrap();
        let navigation = NavigationService::new(host.clone());
        assert!(matches!(
            navigation.navigate("/two", None),
            Err(NavigationError::NotRegistered)
        ));
        assert_eq!(host.history_len(), 1);
    }

    #[test]
    fn test_navigate_pushes_once_with_state() {
        let host = MemoryHost::new("https://app.example/one").unwrap();
        let navigation = NavigationService::new(host.clone());
        navigation.register(routes()).unwrap();

        let matched = navigation.navigate("/two", Some("from-test")).unwrap();
        assert_eq!(matched.route.name(), "two");
        assert_eq!(host.history_len(), 2);

        let entry = host.current_entry();
        assert_eq!(entry.url.path(), "/two");
        assert_eq!(entry.state.as_deref(), Some("from-test"));
    }

    #[test]
    fn test_navigate_rejects_other_origin() {
        let host = MemoryHost::new("https://app.example/one").unwrap();
        let navigation = NavigationService::new(host.clone());
        navigation.register(routes()).unwrap();

        let err = navigation
            .navigate("https://elsewhere.example/two", None)
            .unwrap_err();
        assert!(matches!(err, NavigationError::CrossOrigin(_)));
        assert_eq!(host.history_len(), 1);
    }

    #[test]
    fn test_custom_not_found_pattern_without_interception() {
        let host = MemoryHost::new("https://app.example/nowhere").unwrap();
        let navigation = NavigationService::builder(host)
            .not_found_pattern("/missing")
            .intercept_links(false)
            .build();
        navigation
            .register([
                Route::new("one", r"/one$").unwrap(),
                Route::new("missing", "/missing").unwrap(),
            ])
            .unwrap();

        assert_eq!(navigation.current().unwrap().route.name(), "missing");
        assert!(!navigation.is_intercepting());
    }

    #[test]
    fn test_match_path_does_not_publish() {
        let host = MemoryHost::new("https://app.example/one").unwrap();
        let navigation = NavigationService::new(host);
        navigation.register(routes()).unwrap();

        let matched = navigation.match_path("/two").unwrap();
        assert_eq!(matched.route.name(), "two");
        assert_eq!(navigation.current().unwrap().route.name(), "one");
    }
}
