//! The browser capability consumed by the navigation engine.
//!
//! Nothing in Waypost touches a global `window`. Location, history, and the
//! click/popstate event sources are reached through a [`BrowserHost`], so the
//! engine runs the same against a real page binding or an in-memory host.

use crate::{message::Message, subject::Subscription};
use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};
use url::Url;

/// The current page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    /// Wraps an absolute URL.
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parses an absolute URL.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        Url::parse(input).map(Self::new)
    }

    /// The full URL.
    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// The serialized origin, e.g. `https://example.com`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// The path component, the only part routes are matched against.
    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// The underlying URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolves a possibly relative reference against this location.
    pub fn join(&self, reference: &str) -> Result<Url, url::ParseError> {
        self.url.join(reference)
    }

    /// Returns whether `url` shares this location's origin.
    pub fn is_same_origin(&self, url: &Url) -> bool {
        self.url.origin() == url.origin()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}

/// Mouse button of a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// Usually the left button.
    #[default]
    Primary,
    /// Usually the wheel button.
    Auxiliary,
    /// Usually the right button.
    Secondary,
    /// Any other button, by DOM button number.
    Other(i16),
}

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Meta / command key.
    pub meta: bool,
    /// Control key.
    pub ctrl: bool,
    /// Shift key.
    pub shift: bool,
    /// Alt / option key.
    pub alt: bool,
}

/// An anchor element on a click's dispatch path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    /// The `href` attribute, absolute or relative.
    pub href: String,
    /// The `target` attribute.
    pub target: Option<String>,
    /// Whether a `download` attribute is present.
    pub download: bool,
    /// The `rel` attribute.
    pub rel: Option<String>,
}

impl Anchor {
    /// Creates an anchor with only an `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    /// Sets `target`.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the `download` attribute.
    pub fn download(mut self) -> Self {
        self.download = true;
        self
    }

    /// Sets `rel`.
    pub fn rel(mut self, rel: impl Into<String>) -> Self {
        self.rel = Some(rel.into());
        self
    }
}

/// A node on a click's composed dispatch path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget {
    /// An `<a>` element.
    Anchor(Anchor),
    /// Any other element, by tag name.
    Element(String),
}

/// A click delivered by the host.
#[derive(Debug, Default)]
pub struct ClickEvent {
    button: MouseButton,
    modifiers: Modifiers,
    path: Vec<EventTarget>,
    default_prevented: AtomicBool,
}

impl ClickEvent {
    /// Creates a primary-button click with the given composed path,
    /// innermost target first.
    pub fn new(path: Vec<EventTarget>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Creates a click on an anchor nested in `<body>`.
    pub fn on_anchor(anchor: Anchor) -> Self {
        Self::new(vec![
            EventTarget::Anchor(anchor),
            EventTarget::Element("body".into()),
        ])
    }

    /// Sets the button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Sets the held modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The button pressed.
    pub fn button(&self) -> MouseButton {
        self.button
    }

    /// The modifiers held.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The composed dispatch path, innermost first.
    pub fn composed_path(&self) -> &[EventTarget] {
        &self.path
    }

    /// The nearest anchor on the dispatch path.
    pub fn anchor(&self) -> Option<&Anchor> {
        self.path.iter().find_map(|target| match target {
            EventTarget::Anchor(anchor) => Some(anchor),
            EventTarget::Element(_) => None,
        })
    }

    /// Cancels the host's default action (a full page load).
    pub fn prevent_default(&self) {
        self.default_prevented.store(true, Ordering::Release);
    }

    /// Returns whether some handler already cancelled the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.load(Ordering::Acquire)
    }
}

impl Message for ClickEvent {}

/// A back/forward traversal delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopStateEvent {
    /// The state stored with the entry being restored.
    pub state: Option<String>,
}

impl Message for PopStateEvent {}

/// Why a navigation callback fired.
#[derive(Debug, Clone, Copy)]
pub enum NavigationCause<'a> {
    /// A qualifying anchor click.
    Click(&'a ClickEvent),
    /// A history traversal.
    PopState(&'a PopStateEvent),
}

/// Listener for host click events.
pub type ClickListener = Box<dyn Fn(&ClickEvent) + Send + Sync>;

/// Listener for host popstate events.
pub type PopStateListener = Box<dyn Fn(&PopStateEvent) + Send + Sync>;

/// Location, history, and navigation events of a page.
pub trait BrowserHost: Send + Sync + 'static {
    /// Returns the current location.
    fn location(&self) -> Location;

    /// Pushes a history entry and makes it current.
    fn push_state(&self, url: &Url, state: Option<&str>);

    /// Overwrites the current history entry.
    fn replace_state(&self, url: &Url, state: Option<&str>);

    /// Listens for clicks anywhere in the document.
    fn on_click(&self, listener: ClickListener) -> Subscription;

    /// Listens for history traversals.
    fn on_popstate(&self, listener: PopStateListener) -> Subscription;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parts() {
        let location = Location::parse("https://app.example/products/42?tab=specs").unwrap();
        assert_eq!(location.origin(), "https://app.example");
        assert_eq!(location.pathname(), "/products/42");
        assert_eq!(location.href(), "https://app.example/products/42?tab=specs");
    }

    #[test]
    fn test_location_join_and_origin() {
        let location = Location::parse("https://app.example/a/b").unwrap();
        let relative = location.join("c").unwrap();
        assert_eq!(relative.as_str(), "https://app.example/a/c");
        assert!(location.is_same_origin(&relative));

        let foreign = location.join("https://other.example/").unwrap();
        assert!(!location.is_same_origin(&foreign));

        let other_port = location.join("https://app.example:8443/").unwrap();
        assert!(!location.is_same_origin(&other_port));
    }

    #[test]
    fn test_click_finds_nearest_anchor() {
        let event = ClickEvent::new(vec![
            EventTarget::Element("span".into()),
            EventTarget::Anchor(Anchor::new("/inner")),
            EventTarget::Anchor(Anchor::new("/outer")),
        ]);
        assert_eq!(event.anchor().map(|a| a.href.as_str()), Some("/inner"));
    }

    #[test]
    fn test_prevent_default() {
        let event = ClickEvent::on_anchor(Anchor::new("/two"));
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
