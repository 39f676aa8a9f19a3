//! Ordered route table and the first-match-wins algorithm.

use crate::{
    error::ConfigurationError,
    matched::MatchedRoute,
    pattern::NOT_FOUND_PATTERN,
    route::Route,
};

/// An ordered route table. Order is match priority.
///
/// A table always holds exactly one not-found route, so matching never fails.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    not_found: usize,
}

impl RouteTable {
    /// Builds a table using [`NOT_FOUND_PATTERN`] as the fallback marker.
    ///
    /// # Errors
    ///
    /// See [`RouteTable::with_not_found_pattern`].
    pub fn new<I>(routes: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Route>,
    {
        Self::with_not_found_pattern(routes, NOT_FOUND_PATTERN)
    }

    /// Builds a table whose fallback is the route with pattern `marker`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingNotFound`] if no route uses the
    /// marker and [`ConfigurationError::DuplicateNotFound`] if several do.
    pub fn with_not_found_pattern<I>(routes: I, marker: &str) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Route>,
    {
        let routes: Vec<Route> = routes.into_iter().collect();
        let mut candidates = routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.pattern().is_marker(marker))
            .map(|(index, _)| index);

        let Some(not_found) = candidates.next() else {
            return Err(ConfigurationError::MissingNotFound(marker.to_owned()));
        };
        let extra = candidates.count();
        if extra > 0 {
            return Err(ConfigurationError::DuplicateNotFound {
                pattern: marker.to_owned(),
                count: extra + 1,
            });
        }

        Ok(Self { routes, not_found })
    }

    /// Resolves a path.
    ///
    /// The first route, in table order, whose pattern matches wins. Without a
    /// match the not-found route is returned with no params. Matching the same
    /// path twice yields equal results.
    pub fn match_path(&self, path: &str) -> MatchedRoute {
        self.routes
            .iter()
            .find_map(|route| {
                route.pattern().matches(path).map(|found| MatchedRoute {
                    route: route.clone(),
                    params: found.params,
                })
            })
            .unwrap_or_else(|| MatchedRoute {
                route: self.not_found().clone(),
                params: None,
            })
    }

    /// Returns the routes in priority order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the not-found route.
    pub fn not_found(&self) -> &Route {
        &self.routes[self.not_found]
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether the table is empty. A valid table never is.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
