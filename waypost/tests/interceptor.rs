mod common;

use common::{ORIGIN, app, click};
use parking_lot::Mutex;
use std::sync::Arc;
use waypost::{
    Anchor, BrowserHost, ClickEvent, EventTarget, LinkInterceptor, MemoryHost, Modifiers,
    MouseButton, NavigationCause,
};

#[test]
fn test_plain_click_pushes_and_navigates_once() {
    let app = app("/one");
    let emissions = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&emissions);
    let _sub = app
        .navigation
        .current_route()
        .subscribe(move |_| *counter.lock() += 1);

    let prevented = app.host.click(&click("/two"));

    assert!(prevented);
    assert_eq!(app.host.history_len(), 2);
    assert_eq!(app.navigation.current().unwrap().route.name(), "Route two");
    // One replay on subscribe, one for the click.
    assert_eq!(*emissions.lock(), 2);
}

#[test]
fn test_ctrl_click_is_left_to_host() {
    let app = app("/one");
    let event = click("/two").with_modifiers(Modifiers {
        ctrl: true,
        ..Modifiers::default()
    });

    assert!(!app.host.click(&event));
    assert_eq!(app.host.history_len(), 1);
    assert_eq!(app.navigation.current().unwrap().route.name(), "Route one");
}

#[test]
fn test_middle_click_is_left_to_host() {
    let app = app("/one");
    assert!(!app.host.click(&click("/two").with_button(MouseButton::Auxiliary)));
    assert_eq!(app.host.history_len(), 1);
}

#[test]
fn test_cross_origin_click_is_left_to_host() {
    let app = app("/one");

    assert!(!app.host.click(&click("https://elsewhere.example/two")));
    assert_eq!(app.host.history_len(), 1);
    assert_eq!(app.navigation.current().unwrap().route.name(), "Route one");
}

#[test]
fn test_click_on_current_location_is_swallowed() {
    let app = app("/one");
    let emissions = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&emissions);
    let _sub = app
        .navigation
        .current_route()
        .subscribe(move |_| *counter.lock() += 1);

    assert!(app.host.click(&click("/one")));
    assert_eq!(app.host.history_len(), 1);
    assert_eq!(*emissions.lock(), 1);
}

#[test]
fn test_anchor_found_through_composed_path() {
    let app = app("/one");
    let event = ClickEvent::new(vec![
        EventTarget::Element("span".into()),
        EventTarget::Anchor(Anchor::new("/products/9")),
        EventTarget::Element("nav".into()),
    ]);

    assert!(app.host.click(&event));
    assert_eq!(app.navigation.current().unwrap().param("productId"), Some("9"));
}

#[test]
fn test_opt_out_anchors_are_left_to_host() {
    let app = app("/one");
    for anchor in [
        Anchor::new("/two").target("_blank"),
        Anchor::new("/two").download(),
        Anchor::new("/two").rel("external"),
        Anchor::new("mailto:someone@app.example"),
    ] {
        assert!(!app.host.click(&ClickEvent::on_anchor(anchor)));
    }
    assert_eq!(app.host.history_len(), 1);
}

#[test]
fn test_install_reports_initial_location_then_causes() {
    let host = MemoryHost::new(&format!("{ORIGIN}/start")).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let shared: Arc<dyn BrowserHost> = Arc::new(host.clone());
    let interceptor = LinkInterceptor::install(shared, move |location, cause| {
        let kind = match cause {
            None => "initial",
            Some(NavigationCause::Click(_)) => "click",
            Some(NavigationCause::PopState(_)) => "popstate",
        };
        sink.lock().push(format!("{kind} {}", location.pathname()));
    });

    host.click(&click("/next"));
    host.back();

    assert_eq!(
        *seen.lock(),
        ["initial /start", "click /next", "popstate /start"]
    );

    interceptor.uninstall();
    assert_eq!(host.click_listener_count(), 0);
    assert_eq!(host.popstate_listener_count(), 0);
    assert!(!host.click(&click("/next")));
}

#[test]
fn test_dropping_service_releases_listeners() {
    let app = app("/one");
    assert_eq!(app.host.click_listener_count(), 1);

    drop(app.navigation);
    assert_eq!(app.host.click_listener_count(), 0);
    assert_eq!(app.host.popstate_listener_count(), 0);
}
