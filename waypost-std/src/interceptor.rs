//! Link interception.
//!
//! Turns same-origin anchor clicks and history traversals into a single
//! navigation callback, so in-app links never trigger a full page load.
//!
//! # Example
//!
//! ```rust,ignore
//! let interceptor = LinkInterceptor::install(host, |location, cause| {
//!     println!("navigated to {location} ({cause:?})");
//! });
//! // Dropping `interceptor` removes both listeners.
//! ```

use crate::log::nav_trace;
use std::sync::Arc;
use url::Url;
use waypost_core::{
    BrowserHost, ClickEvent, Location, MouseButton, NavigationCause, PopStateEvent, Subscription,
};

type NavigateCallback = dyn Fn(&Location, Option<NavigationCause<'_>>) + Send + Sync;

/// Why a click was left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Another handler already called `prevent_default`.
    DefaultPrevented,
    /// Not the primary button.
    Button,
    /// Meta, ctrl, or shift was held.
    Modifier,
    /// No anchor on the dispatch path.
    NoAnchor,
    /// The anchor has a `target`, `download`, or `rel="external"`.
    AnchorOptOut,
    /// Empty or `mailto:` href.
    Href,
    /// The link leaves the current origin.
    CrossOrigin,
}

/// Installed click and popstate listeners.
///
/// Owns both host subscriptions; dropping it (or calling
/// [`LinkInterceptor::uninstall`]) removes them.
#[derive(Debug)]
pub struct LinkInterceptor {
    click: Subscription,
    popstate: Subscription,
}

impl LinkInterceptor {
    /// Installs the listeners and immediately reports the current location
    /// with no cause, so the initial page load counts as a navigation.
    pub fn install<F>(host: Arc<dyn BrowserHost>, on_navigate: F) -> Self
    where
        F: Fn(&Location, Option<NavigationCause<'_>>) + Send + Sync + 'static,
    {
        let on_navigate: Arc<NavigateCallback> = Arc::new(on_navigate);

        let click = {
            let listener_host = Arc::clone(&host);
            let on_navigate = Arc::clone(&on_navigate);
            host.on_click(Box::new(move |event: &ClickEvent| {
                handle_click(listener_host.as_ref(), event, on_navigate.as_ref());
            }))
        };

        let popstate = {
            let listener_host = Arc::clone(&host);
            let on_navigate = Arc::clone(&on_navigate);
            host.on_popstate(Box::new(move |event: &PopStateEvent| {
                on_navigate(
                    &listener_host.location(),
                    Some(NavigationCause::PopState(event)),
                );
            }))
        };

        on_navigate(&host.location(), None);

        Self { click, popstate }
    }

    /// Removes both listeners.
    pub fn uninstall(self) {
        self.click.unsubscribe();
        self.popstate.unsubscribe();
    }

    /// Decides whether a click is an in-app navigation.
    ///
    /// Returns the resolved target URL, or why the click belongs to the host.
    /// This never mutates the event.
    pub fn intercept(location: &Location, event: &ClickEvent) -> Result<Url, Ignored> {
        if event.default_prevented() {
            return Err(Ignored::DefaultPrevented);
        }
        if event.button() != MouseButton::Primary {
            return Err(Ignored::Button);
        }
        let modifiers = event.modifiers();
        if modifiers.meta || modifiers.ctrl || modifiers.shift {
            return Err(Ignored::Modifier);
        }

        let anchor = event.anchor().ok_or(Ignored::NoAnchor)?;
        let has_target = anchor.target.as_deref().is_some_and(|t| !t.is_empty());
        if has_target || anchor.download || anchor.rel.as_deref() == Some("external") {
            return Err(Ignored::AnchorOptOut);
        }
        if anchor.href.is_empty() || anchor.href.contains("mailto:") {
            return Err(Ignored::Href);
        }

        let target = location.join(&anchor.href).map_err(|_| Ignored::Href)?;
        if !location.is_same_origin(&target) {
            return Err(Ignored::CrossOrigin);
        }
        Ok(target)
    }
}

fn handle_click(host: &dyn BrowserHost, event: &ClickEvent, on_navigate: &NavigateCallback) {
    let location = host.location();
    let target = match LinkInterceptor::intercept(&location, event) {
        Ok(target) => target,
        Err(reason) => {
            nav_trace!("click left to host: {:?}", reason);
            return;
        }
    };

    event.prevent_default();
    if target.as_str() == location.href() {
        nav_trace!("click on current location {}, nothing to do", target);
        return;
    }

    host.push_state(&target, None);
    on_navigate(&host.location(), Some(NavigationCause::Click(event)));
}
