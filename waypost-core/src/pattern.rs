//! Regular-expression route patterns.
//!
//! Patterns are searched, not anchored: `/two$` matches `/any/two`, exactly as
//! a browser `RegExp` would. Named capture groups become route parameters.

use crate::{error::ConfigurationError, matched::RouteParams};
use regex::Regex;
use std::fmt;

/// The pattern source that marks a table's not-found route.
pub const NOT_FOUND_PATTERN: &str = "/404";

/// A compiled route pattern.
#[derive(Clone)]
pub struct RoutePattern {
    regex: Regex,
    named: bool,
}

/// The outcome of a successful pattern search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Values captured by named groups, `None` when the pattern has none.
    pub params: Option<RouteParams>,
}

impl RoutePattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidPattern`] if `pattern` is not a
    /// valid regular expression.
    pub fn new(pattern: &str) -> Result<Self, ConfigurationError> {
        let regex = Regex::new(pattern).map_err(|source| ConfigurationError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        let named = regex.capture_names().flatten().next().is_some();
        Ok(Self { regex, named })
    }

    /// Returns the pattern source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns whether the pattern defines named capture groups.
    pub fn has_named_groups(&self) -> bool {
        self.named
    }

    /// Returns whether the pattern finds a match anywhere in `path`.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Searches `path`, extracting named groups on success.
    ///
    /// Unnamed groups are discarded. Named groups that did not take part in
    /// the match are left out of the params.
    pub fn matches(&self, path: &str) -> Option<PatternMatch> {
        if !self.named {
            return self
                .regex
                .is_match(path)
                .then_some(PatternMatch { params: None });
        }

        let captures = self.regex.captures(path)?;
        let params = self
            .regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|value| (name.to_owned(), value.as_str().to_owned()))
            })
            .collect();

        Some(PatternMatch {
            params: Some(params),
        })
    }

    /// Returns whether this pattern is the given not-found marker.
    ///
    /// `\/` is read as `/`, so `\/404` and `/404` denote the same marker.
    pub fn is_marker(&self, marker: &str) -> bool {
        let source = self.as_str();
        source == marker || source.replace("\\/", "/") == marker
    }
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoutePattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for RoutePattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for RoutePattern {}
