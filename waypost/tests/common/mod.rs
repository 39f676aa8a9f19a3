#![allow(dead_code)]

use waypost::{
    Anchor, ClickEvent, MemoryHost, NavigationService, Route,
    testing::{DeferredAction, ManualSpawner, RecordingMount, view_type},
};

pub const ORIGIN: &str = "https://app.example";

// ============================================================================
// Route Tables
// ============================================================================

/// The table most scenarios use.
///
/// `/one` loads lazily through `deferred`; `/two` mounts `TwoView`
/// eagerly; `/broken` always fails.
pub fn routes(deferred: &DeferredAction) -> Vec<Route> {
    vec![
        Route::new("Route one", r"/one$")
            .unwrap()
            .with_action(deferred.action()),
        Route::new("Route two", r"/two$")
            .unwrap()
            .eager(|| Ok(view_type("TwoView"))),
        Route::new("Product", r"/products/(?<productId>[0-9]+)$")
            .unwrap()
            .eager(|| Ok(view_type("ProductView"))),
        Route::new("Broken", r"/broken$")
            .unwrap()
            .eager(|| Err("view factory exploded".into())),
        Route::new("Not found", "/404")
            .unwrap()
            .eager(|| Ok(view_type("NotFoundView"))),
    ]
}

// ============================================================================
// Fixture
// ============================================================================

pub struct App {
    pub host: MemoryHost,
    pub navigation: NavigationService,
    pub deferred: DeferredAction,
    pub mount: RecordingMount,
    pub spawner: ManualSpawner,
}

/// A registered service whose host starts at `path`.
pub fn app(path: &str) -> App {
    let host = MemoryHost::new(&format!("{ORIGIN}{path}")).unwrap();
    let deferred = DeferredAction::new();
    let navigation = NavigationService::new(host.clone());
    navigation.register(routes(&deferred)).unwrap();

    App {
        host,
        navigation,
        deferred,
        mount: RecordingMount::new(),
        spawner: ManualSpawner::new(),
    }
}

/// An unmodified primary-button click on a link to `href`.
pub fn click(href: &str) -> ClickEvent {
    ClickEvent::on_anchor(Anchor::new(href))
}
