//! The view outlet.
//!
//! Subscribes to a [`NavigationService`]'s current-route stream and keeps a
//! [`MountPoint`] showing the views of the latest route.
//!
//! Every emission takes a fresh navigation token. Lazy loads remember the
//! token they were started with and only mount if it is still the newest
//! when they finish, so the last navigation wins without any cancellation.

use crate::{
    log::{nav_debug, nav_error, nav_trace},
    navigation::NavigationService,
};
use futures::FutureExt;
use parking_lot::Mutex;
use std::{
    fmt,
    sync::{Arc, Weak},
};
use waypost_core::{
    BoxError, MountPoint, ResolutionError, Route, RouteAction, Spawn, Subscription, ViewType,
};

#[derive(Default)]
struct State {
    token: u64,
    mounted: Vec<String>,
}

struct Shared {
    mount: Arc<dyn MountPoint>,
    spawner: Arc<dyn Spawn>,
    state: Mutex<State>,
}

impl Shared {
    fn next_token(&self) -> u64 {
        let mut state = self.state.lock();
        state.token += 1;
        state.token
    }

    fn is_current(&self, token: u64) -> bool {
        self.state.lock().token == token
    }

    fn resolve(self: &Arc<Self>, route: &Route) {
        let token = self.next_token();

        match route.action() {
            None => {
                nav_trace!("route `{}` has no action, clearing outlet", route.name());
                self.replace(token, Vec::new());
            }
            Some(RouteAction::Eager(factory)) => match factory() {
                Ok(view_type) => {
                    self.replace(token, vec![view_type]);
                }
                Err(source) => report(route, source),
            },
            Some(RouteAction::Lazy(loader)) => {
                let load = loader();
                let shared = Arc::downgrade(self);
                let route = route.clone();
                self.spawner.spawn(
                    async move {
                        let result = load.await;
                        let Some(shared) = shared.upgrade() else {
                            return;
                        };
                        match result {
                            Ok(module) => {
                                shared.replace(token, module.into_view_types());
                            }
                            Err(source) if shared.is_current(token) => report(&route, source),
                            Err(_) => {
                                nav_trace!("discarding failed stale load of `{}`", route.name());
                            }
                        }
                    }
                    .boxed(),
                );
            }
        }
    }

    /// Mounts one instance of each view type if `token` is still current.
    ///
    /// The token check and the mount mutation happen under the state lock,
    /// so a newer resolution cannot slip in between them.
    fn replace(&self, token: u64, view_types: Vec<ViewType>) -> bool {
        let views: Vec<_> = view_types.iter().map(ViewType::construct).collect();
        let names: Vec<String> = views.iter().map(|view| view.name().to_owned()).collect();

        let mut state = self.state.lock();
        if state.token != token {
            nav_trace!("discarding stale resolution (token {})", token);
            return false;
        }

        self.mount.clear();
        for view in views {
            self.mount.append(view);
        }
        nav_debug!("mounted {:?}", names);
        state.mounted = names;
        true
    }
}

fn report(route: &Route, source: BoxError) {
    let detail = source.to_string();
    let error = ResolutionError::Action {
        route: route.name().to_owned(),
        source,
    };
    nav_error!("{}: {}", error, detail);
}

struct Binding {
    service: NavigationService,
    _subscription: Subscription,
}

/// Renders the current route's views into a [`MountPoint`].
///
/// # Example
///
/// ```rust,ignore
/// let outlet = ViewOutlet::new(mount, TokioSpawner::current()?);
/// outlet.bind(&navigation);
///
/// navigation.navigate("/two", None)?;
/// assert_eq!(outlet.mounted(), ["TwoView"]);
/// ```
pub struct ViewOutlet {
    shared: Arc<Shared>,
    binding: Mutex<Option<Binding>>,
}

impl ViewOutlet {
    /// Creates an unbound outlet.
    ///
    /// `mount` is called with the outlet's state locked; it must not call
    /// back into the outlet.
    pub fn new<M, S>(mount: M, spawner: S) -> Self
    where
        M: MountPoint,
        S: Spawn,
    {
        Self {
            shared: Arc::new(Shared {
                mount: Arc::new(mount),
                spawner: Arc::new(spawner),
                state: Mutex::new(State::default()),
            }),
            binding: Mutex::new(None),
        }
    }

    /// Subscribes to `service`'s current-route stream.
    ///
    /// Any previous binding is released first. If the service has already
    /// published a route it is resolved immediately.
    pub fn bind(&self, service: &NavigationService) {
        self.unbind();

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let subscription = service.current_route().subscribe(move |route: &Route| {
            if let Some(shared) = shared.upgrade() {
                shared.resolve(route);
            }
        });

        *self.binding.lock() = Some(Binding {
            service: service.clone(),
            _subscription: subscription,
        });
    }

    /// Releases the binding. In-flight lazy loads will not mount.
    ///
    /// Mounted views stay where they are.
    pub fn unbind(&self) {
        let binding = self.binding.lock().take();
        if binding.is_some() {
            self.shared.next_token();
        }
        drop(binding);
    }

    /// Returns whether the outlet is bound to a service.
    pub fn is_bound(&self) -> bool {
        self.binding.lock().is_some()
    }

    /// The bound service, if any.
    pub fn navigation_service(&self) -> Option<NavigationService> {
        self.binding
            .lock()
            .as_ref()
            .map(|binding| binding.service.clone())
    }

    /// Names of the views currently mounted, in mount order.
    pub fn mounted(&self) -> Vec<String> {
        self.shared.state.lock().mounted.clone()
    }
}

impl Drop for ViewOutlet {
    fn drop(&mut self) {
        self.unbind();
    }
}

impl fmt::Debug for ViewOutlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewOutlet")
            .field("bound", &self.is_bound())
            .field("mounted", &self.mounted())
            .finish()
    }
}
