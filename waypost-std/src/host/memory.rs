//! In-memory browser host.
//!
//! Keeps a history stack and event listeners in process. Useful for tests,
//! native shells, and anywhere without a real page.

use parking_lot::Mutex;
use std::sync::Arc;
use url::Url;
use waypost_core::{
    BrowserHost, ClickEvent, ClickListener, Location, PopStateEvent, PopStateListener, Subject,
    Subscription,
};

/// One entry of the history stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The entry's URL.
    pub url: Url,
    /// The state label stored with the entry.
    pub state: Option<String>,
}

struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl History {
    fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }
}

/// A [`BrowserHost`] backed by an in-memory history stack.
///
/// Cloning yields another handle to the same host.
///
/// # Example
///
/// ```rust,ignore
/// let host = MemoryHost::new("https://app.example/")?;
/// let navigation = NavigationService::new(host.clone());
/// navigation.register(routes)?;
///
/// host.click(&ClickEvent::on_anchor(Anchor::new("/two")));
/// host.back();
/// ```
#[derive(Clone)]
pub struct MemoryHost {
    history: Arc<Mutex<History>>,
    clicks: Subject<ClickEvent>,
    popstates: Subject<PopStateEvent>,
}

impl MemoryHost {
    /// Creates a host whose history holds one entry for `initial`.
    pub fn new(initial: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(initial)?;
        Ok(Self {
            history: Arc::new(Mutex::new(History {
                entries: vec![HistoryEntry { url, state: None }],
                index: 0,
            })),
            clicks: Subject::new(),
            popstates: Subject::new(),
        })
    }

    /// Dispatches a click to the document listeners.
    ///
    /// Returns whether the default action was prevented. A click that is not
    /// prevented on an anchor would have been a full page load; the host
    /// leaves its history untouched in that case.
    pub fn click(&self, event: &ClickEvent) -> bool {
        self.clicks.next(event);
        event.default_prevented()
    }

    /// Steps back one entry, firing popstate. Returns `false` at the start.
    pub fn back(&self) -> bool {
        self.go(-1)
    }

    /// Steps forward one entry, firing popstate. Returns `false` at the end.
    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Moves `delta` entries through history, firing popstate when it moves.
    pub fn go(&self, delta: isize) -> bool {
        let state = {
            let mut history = self.history.lock();
            let Some(index) = history.index.checked_add_signed(delta) else {
                return false;
            };
            if index >= history.entries.len() || index == history.index {
                return false;
            }
            history.index = index;
            history.current().state.clone()
        };

        self.popstates.next(&PopStateEvent { state });
        true
    }

    /// All entries, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.lock().entries.clone()
    }

    /// Number of entries on the stack.
    pub fn history_len(&self) -> usize {
        self.history.lock().entries.len()
    }

    /// The entry the host is currently showing.
    pub fn current_entry(&self) -> HistoryEntry {
        self.history.lock().current().clone()
    }

    /// Number of installed click listeners.
    pub fn click_listener_count(&self) -> usize {
        self.clicks.subscriber_count()
    }

    /// Number of installed popstate listeners.
    pub fn popstate_listener_count(&self) -> usize {
        self.popstates.subscriber_count()
    }
}

impl BrowserHost for MemoryHost {
    fn location(&self) -> Location {
        Location::new(self.history.lock().current().url.clone())
    }

    fn push_state(&self, url: &Url, state: Option<&str>) {
        let mut history = self.history.lock();
        let next = history.index + 1;
        history.entries.truncate(next);
        history.entries.push(HistoryEntry {
            url: url.clone(),
            state: state.map(str::to_owned),
        });
        history.index = next;
    }

    fn replace_state(&self, url: &Url, state: Option<&str>) {
        let mut history = self.history.lock();
        let index = history.index;
        history.entries[index] = HistoryEntry {
            url: url.clone(),
            state: state.map(str::to_owned),
        };
    }

    fn on_click(&self, listener: ClickListener) -> Subscription {
        self.clicks.subscribe(listener)
    }

    fn on_popstate(&self, listener: PopStateListener) -> Subscription {
        self.popstates.subscribe(listener)
    }
}
