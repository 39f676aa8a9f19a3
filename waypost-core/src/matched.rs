//! The result of resolving a location against a route table.

use crate::{message::Message, route::Route};
use std::collections::BTreeMap;

/// Parameters captured by a pattern's named groups.
pub type RouteParams = BTreeMap<String, String>;

/// A matched route with extracted parameters.
///
/// Produced fresh on every navigation and superseded by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    /// The matched route.
    pub route: Route,
    /// Named-group captures, `None` if the pattern has none or the
    /// not-found fallback was selected.
    pub params: Option<RouteParams>,
}

impl MatchedRoute {
    /// Returns a single parameter value.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.as_ref()?.get(name).map(String::as_str)
    }
}

impl Message for MatchedRoute {}
