//! End-to-end behaviour of a small site on the headless backend.

use std::{cell::Cell, rc::Rc};

use waypoint::{
    engine::{ComponentInstance, Registry, Renderer},
    prelude::*,
};
use waypoint_headless::{HeadlessDocument, HeadlessHost, MemoryHistory, NodeRef};

// ============================================================================
// Test Infrastructure
// ============================================================================

const BASE: &str = "/dist/index.html";

fn heading(text: &'static str) -> ComponentDescriptor {
    ComponentDescriptor::new(move |_: &Props| h("h1", Props::new(), [text]))
}

fn site(with_not_found: bool) -> AppBuilder {
    let mut app = AppBuilder::new();
    app.define_component("Home", heading("Home Page"))
        .define_component("About", heading("About Page"))
        .define_component("Contact", heading("Contact Page"))
        .define_component(
            "Greeting",
            ComponentDescriptor::new(|props: &Props| {
                Element::new("p")
                    .child(interpolate("Hello, {{ name }}!", props))
                    .into()
            })
            .prop("name", TypeTag::String),
        )
        .register_route(BASE, "Home", Props::new())
        .register_route(format!("{BASE}/about"), "About", Props::new())
        .register_route(format!("{BASE}/contact"), "Contact", Props::new())
        .register_route(format!("{BASE}/hello"), "Greeting", props! { "name" => "world" })
        .register_route(format!("{BASE}/nameless"), "Greeting", Props::new())
        .register_route(format!("{BASE}/numeric"), "Greeting", props! { "name" => 42 });
    if with_not_found {
        app.define_component(NOT_FOUND, heading("404 - Page Not Found"));
    }
    app
}

struct Running {
    app: App<HeadlessDocument, MemoryHistory>,
    root: NodeRef,
    history: MemoryHistory,
}

fn launch(builder: AppBuilder, location: &str) -> (Running, Result<(), RenderError>) {
    let host = HeadlessHost::new(location);
    let root = host.root();
    let history = host.history();
    let (document, mount, router_history) = host.into_parts();
    let app = builder.build(document, mount, router_history);
    let result = app.init();
    (Running { app, root, history }, result)
}

fn text(running: &Running) -> String {
    running.root.text_content()
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn test_exact_match_and_fallback() {
    let (running, result) = launch(site(true), BASE);
    result.unwrap();
    assert_eq!(text(&running), "Home Page");

    running.app.navigate_to("/about").unwrap();
    assert_eq!(text(&running), "About Page");

    running.app.navigate_to("/c").unwrap();
    assert_eq!(text(&running), "404 - Page Not Found");
    assert_eq!(running.history.location(), "/dist/index.html/c");
}

#[test]
fn test_trailing_slash_is_a_different_path() {
    let (running, result) = launch(site(true), "/dist/index.html/about/");
    result.unwrap();
    assert_eq!(text(&running), "404 - Page Not Found");
}

#[test]
fn test_missing_not_found_fails_startup() {
    let (running, result) = launch(site(false), "/elsewhere");
    assert_eq!(
        result.unwrap_err(),
        RenderError::UnknownComponent {
            name: NOT_FOUND.into()
        }
    );
    assert!(running.root.children().is_empty());
}

#[test]
fn test_html_output() {
    let (running, result) = launch(site(true), BASE);
    result.unwrap();
    assert_eq!(
        running.root.to_html(),
        r#"<div id="root"><div><h1>Home Page</h1></div></div>"#
    );
}

#[test]
fn test_back_and_forward_rerender() {
    let (running, result) = launch(site(true), BASE);
    result.unwrap();
    running.app.navigate_to("/about").unwrap();
    running.app.navigate_to("/contact").unwrap();

    assert!(running.history.back().unwrap());
    assert_eq!(text(&running), "About Page");
    assert!(running.history.back().unwrap());
    assert_eq!(text(&running), "Home Page");
    assert!(!running.history.back().unwrap());
    assert!(running.history.forward().unwrap());
    assert_eq!(text(&running), "About Page");
}

#[test]
fn test_last_route_registration_wins() {
    let mut builder = site(true);
    builder.register_route(BASE, "Contact", Props::new());
    let (running, result) = launch(builder, BASE);
    result.unwrap();
    assert_eq!(text(&running), "Contact Page");
    assert_eq!(running.app.router().registry().routes().len(), 6);
}

#[test]
fn test_last_component_definition_wins() {
    let mut builder = site(true);
    builder.define_component("Home", heading("Welcome"));
    let (running, result) = launch(builder, BASE);
    result.unwrap();
    assert_eq!(text(&running), "Welcome");
}

// ============================================================================
// Prop Validation
// ============================================================================

#[test]
fn test_declared_prop_present() {
    let (running, result) = launch(site(true), "/dist/index.html/hello");
    result.unwrap();
    assert_eq!(text(&running), "Hello, world!");
}

#[test]
fn test_declared_prop_missing() {
    let (running, result) = launch(site(true), BASE);
    result.unwrap();
    let err = running.app.navigate_to("/nameless").unwrap_err();
    assert_eq!(
        err,
        RenderError::MissingProp {
            component: "Greeting".into(),
            prop: "name".into(),
        }
    );
    // Teardown happened before the failure.
    assert!(running.root.children().is_empty());
    assert!(running.app.router().current().is_none());
}

#[test]
fn test_declared_prop_wrong_type() {
    let (running, result) = launch(site(true), "/dist/index.html/numeric");
    let err = result.unwrap_err();
    assert!(matches!(
        err,
        RenderError::PropType { ref expected, ref received, .. }
            if *expected == TypeTag::String && *received == TypeTag::Number
    ));
    assert!(running.root.children().is_empty());
}

// ============================================================================
// Children
// ============================================================================

#[test]
fn test_nested_children_render_in_order() {
    let mut builder = site(true);
    builder
        .define_component(
            "Layout",
            ComponentDescriptor::new(|_: &Props| h("header", Props::new(), ["Site"])),
        )
        .register_route(
            format!("{BASE}/layout"),
            "Layout",
            props! {
                "children" => Value::list([
                    child("Greeting", props! { "name" => "nested" }),
                    Value::from("plain text"),
                    child("About", Props::new()),
                ]),
            },
        );
    let (running, result) = launch(builder, "/dist/index.html/layout");
    result.unwrap();

    assert_eq!(
        running.root.to_html(),
        concat!(
            r#"<div id="root"><div><header>Site</header>"#,
            "<div><p>Hello, nested!</p></div>",
            "<div>plain text</div>",
            "<div><h1>About Page</h1></div>",
            "</div></div>"
        )
    );
    let router = running.app.router();
    let mounted = router.current().unwrap();
    assert_eq!(mounted.len(), 3);
    assert_eq!(mounted.children().len(), 2);
    assert_eq!(mounted.children()[0].instance().name(), "Greeting");
}

#[test]
fn test_invalid_nested_child_fails_whole_render() {
    let mut builder = site(true);
    builder
        .define_component(
            "Layout",
            ComponentDescriptor::new(|_: &Props| h("header", Props::new(), ["Site"])),
        )
        .register_route(
            format!("{BASE}/layout"),
            "Layout",
            props! { "children" => Value::list([child("Greeting", Props::new())]) },
        );
    let (running, result) = launch(builder, "/dist/index.html/layout");
    assert!(matches!(result, Err(RenderError::MissingProp { .. })));
    assert!(running.root.children().is_empty());
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_click_handler_navigates() {
    let mut builder = site(true);
    let navigator = builder.navigator();
    builder.define_component(
        "Home",
        ComponentDescriptor::new(move |_: &Props| {
            let navigator = navigator.clone();
            Element::new("button")
                .style("backgroundColor", "blue")
                .on("click", move |_| {
                    navigator.navigate_to("/contact").unwrap();
                })
                .child("Contact us")
                .into()
        }),
    );
    let (running, result) = launch(builder, BASE);
    result.unwrap();

    let button = running.root.find("button").unwrap();
    assert_eq!(button.style_property("background-color").as_deref(), Some("blue"));
    assert_eq!(button.dispatch(&Event::new("click")), 1);
    assert_eq!(text(&running), "Contact Page");
    assert_eq!(running.history.location(), "/dist/index.html/contact");
}

// ============================================================================
// Instance Lifecycle
// ============================================================================

#[test]
fn test_instance_dirty_check() {
    let renders = Rc::new(Cell::new(0));
    let counter = renders.clone();
    let descriptor = Rc::new(ComponentDescriptor::new(move |_: &Props| {
        counter.set(counter.get() + 1);
        h("span", Props::new(), ["tick"])
    }));

    let mut document = HeadlessDocument::new();
    let container = NodeRef::element("div");
    let mut instance = ComponentInstance::new("Ticker", descriptor, Props::new(), container.clone());

    assert!(instance.display(&mut document).unwrap());
    assert!(!instance.display(&mut document).unwrap());
    assert_eq!(renders.get(), 1);

    instance.set_props(props! { "count" => 1 });
    assert!(instance.display(&mut document).unwrap());
    assert_eq!(renders.get(), 2);
    assert_eq!(container.children().len(), 1);

    // Removing a key is not a change.
    instance.set_props(Props::new());
    assert!(!instance.display(&mut document).unwrap());
    assert_eq!(renders.get(), 2);
}

#[test]
fn test_renderer_without_router() {
    let mut builder = Registry::builder();
    builder.define_component("Home", heading("Home Page"));
    let renderer = Renderer::new(Rc::new(builder.build()));

    let mut document = HeadlessDocument::new();
    let root = NodeRef::element("main");
    let mounted = renderer
        .render(&mut document, "Home", &Props::new(), &root)
        .unwrap();
    assert_eq!(mounted.len(), 1);
    assert_eq!(root.to_html(), "<main><div><h1>Home Page</h1></div></main>");

    let err = renderer
        .render(&mut document, "Ghost", &Props::new(), &root)
        .unwrap_err();
    assert_eq!(err.to_string(), "Component 'Ghost' is not defined.");
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn test_lookup_interpolate_and_type_checks() {
    let data = props! {
        "foo" => props! { "bar" => props! { "baz" => "x" } },
    };
    assert_eq!(lookup(&data, "foo.bar.baz").and_then(Value::as_str), Some("x"));
    assert!(lookup(&Props::new(), "a.b").is_none());
    assert!(lookup(&data, "foo.nope.baz").is_none());

    let animal = props! { "type" => props! { "name" => "dog" } };
    assert_eq!(interpolate("Type: {{ type.name }}", &animal), "Type: dog");

    assert!(is_type(&Value::from("Hello"), "string"));
    assert!(is_type(&Value::from(42), "number"));
    assert!(!is_type(&Value::from("Hello"), "number"));
}
