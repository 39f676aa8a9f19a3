mod common;

use common::{ORIGIN, app, routes};
use futures::StreamExt;
use parking_lot::Mutex;
use std::sync::Arc;
use waypost::{
    ConfigurationError, MemoryHost, NavigationService, Route, testing::DeferredAction,
};

fn route_names(navigation: &NavigationService) -> Arc<Mutex<Vec<String>>> {
    let names = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&names);
    navigation
        .current_route()
        .subscribe(move |route: &Route| sink.lock().push(route.name().to_owned()))
        .forget();
    names
}

#[test]
fn test_any_location_yields_a_route() {
    for path in ["/", "/one", "/two", "/products/42", "/products/abc", "/deep/nested/path"] {
        let app = app(path);
        assert!(
            app.navigation.current_route().latest().is_some(),
            "no route published for {path}"
        );
    }
}

#[test]
fn test_first_matching_route_wins() {
    let host = MemoryHost::new(&format!("{ORIGIN}/users/me")).unwrap();
    let navigation = NavigationService::new(host);
    navigation
        .register([
            Route::new("Me", r"/users/me$").unwrap(),
            Route::new("User", r"/users/(?<id>[^/]+)$").unwrap(),
            Route::new("Not found", "/404").unwrap(),
        ])
        .unwrap();

    let current = navigation.current().unwrap();
    assert_eq!(current.route.name(), "Me");
    assert_eq!(current.params, None);

    let matched = navigation.navigate("/users/ada", None).unwrap();
    assert_eq!(matched.route.name(), "User");
    assert_eq!(matched.param("id"), Some("ada"));
}

#[test]
fn test_named_groups_become_params() {
    let app = app("/products/42");

    assert_eq!(app.navigation.current_route().latest().unwrap().name(), "Product");
    let params = app.navigation.route_params().latest().flatten().unwrap();
    assert_eq!(params.len(), 1);
    assert_eq!(params["productId"], "42");
}

#[test]
fn test_unmatched_path_falls_back_to_not_found() {
    let app = app("/products/abc");

    let current = app.navigation.current().unwrap();
    assert_eq!(current.route.name(), "Not found");
    assert_eq!(current.params, None);
    assert_eq!(app.navigation.route_params().latest(), Some(None));
}

#[test]
fn test_navigate_pushes_once_and_emits_once() {
    let app = app("/one");
    let names = route_names(&app.navigation);
    assert_eq!(*names.lock(), ["Route one"]);

    app.navigation.navigate("/two", None).unwrap();

    assert_eq!(app.host.history_len(), 2);
    assert_eq!(app.host.current_entry().url.path(), "/two");
    assert_eq!(*names.lock(), ["Route one", "Route two"]);
}

#[test]
fn test_params_are_current_when_route_is_emitted() {
    let app = app("/one");
    let params = app.navigation.route_params().clone();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = app.navigation.current_route().subscribe(move |_: &Route| {
        let id = params
            .latest()
            .flatten()
            .and_then(|params| params.get("productId").cloned());
        sink.lock().push(id);
    });

    app.navigation.navigate("/products/7", None).unwrap();
    app.navigation.navigate("/two", None).unwrap();

    assert_eq!(*seen.lock(), [None, Some("7".to_owned()), None]);
}

#[test]
fn test_late_subscriber_receives_latest_route() {
    let app = app("/two");
    app.navigation.navigate("/products/1", None).unwrap();

    let names = route_names(&app.navigation);
    assert_eq!(*names.lock(), ["Product"]);
}

#[test]
fn test_back_republishes_previous_route() {
    let app = app("/one");
    app.navigation.navigate("/two", Some("second")).unwrap();
    let names = route_names(&app.navigation);

    assert!(app.host.back());
    assert_eq!(app.navigation.current().unwrap().route.name(), "Route one");

    assert!(app.host.forward());
    assert_eq!(*names.lock(), ["Route two", "Route one", "Route two"]);
    assert_eq!(app.host.current_entry().state.as_deref(), Some("second"));
}

#[test]
fn test_reregister_replaces_table() {
    let app = app("/two");
    let deferred = DeferredAction::new();
    let mut table = routes(&deferred);
    table.retain(|route| route.name() != "Route two");

    app.navigation.register(table).unwrap();
    assert_eq!(app.navigation.current().unwrap().route.name(), "Not found");
    assert_eq!(app.navigation.routes().len(), 4);
}

#[test]
fn test_duplicate_not_found_is_rejected() {
    let app = app("/two");
    let err = app
        .navigation
        .register([
            Route::new("a", "/404").unwrap(),
            Route::new("b", r"\/404").unwrap(),
        ])
        .unwrap_err();

    assert!(matches!(
        err,
        ConfigurationError::DuplicateNotFound { count: 2, .. }
    ));
    assert_eq!(app.navigation.current().unwrap().route.name(), "Route two");
}

#[tokio::test]
async fn test_route_stream_starts_with_latest() {
    let app = app("/one");
    let stream = app.navigation.current_route().stream();

    app.navigation.navigate("/two", None).unwrap();
    app.navigation.navigate("/nowhere", None).unwrap();

    let names: Vec<String> = stream
        .take(3)
        .map(|route| route.name().to_owned())
        .collect()
        .await;
    assert_eq!(names, ["Route one", "Route two", "Not found"]);
}
