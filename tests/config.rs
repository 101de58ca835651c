//! Applications assembled from configuration files.

use waypoint::prelude::*;
use waypoint_headless::HeadlessHost;

fn heading(text: &'static str) -> ComponentDescriptor {
    ComponentDescriptor::new(move |_: &Props| h("h1", Props::new(), [text]))
}

#[test]
fn test_load_demo_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demo/waypoint.toml");
    let config = AppConfig::load(path).unwrap();
    assert_eq!(config.base_path, "/dist/index.html");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.routes.len(), 1);
}

#[test]
fn test_configured_routes_render() {
    let config = AppConfig::from_toml_str(
        r#"
        base_path = "/site"
        root_id = "app"

        [[routes]]
        path = "/site/hello"
        component = "Greeting"
        props = { name = "config" }
        "#,
    )
    .unwrap();

    let mut builder = AppBuilder::from_config(config);
    builder
        .define_component(
            "Greeting",
            ComponentDescriptor::new(|props: &Props| {
                h("p", Props::new(), [interpolate("Hi {{name}}", props)])
            })
            .prop("name", TypeTag::String),
        )
        .define_component("Home", heading("Home"))
        .define_component(NOT_FOUND, heading("404"))
        .register_route("/site", "Home", Props::new());

    let host = HeadlessHost::with_root_id(&builder.config().root_id, "/site");
    let root = host.root();
    let (document, mount, history) = host.into_parts();
    let app = builder.build(document, mount, history);
    app.init().unwrap();
    assert_eq!(root.to_html(), r#"<div id="app"><div><h1>Home</h1></div></div>"#);

    app.navigate_to("/hello").unwrap();
    assert_eq!(root.text_content(), "Hi config");
}

#[test]
fn test_code_route_overrides_configured_route() {
    let config = AppConfig::from_toml_str(
        r#"
        [[routes]]
        path = "/dist/index.html"
        component = "Old"
        "#,
    )
    .unwrap();

    let mut builder = AppBuilder::from_config(config);
    builder
        .define_component("New", heading("New"))
        .define_component(NOT_FOUND, heading("404"))
        .register_route("/dist/index.html", "New", Props::new());

    let host = HeadlessHost::new("/dist/index.html");
    let root = host.root();
    let (document, mount, history) = host.into_parts();
    builder.build(document, mount, history).init().unwrap();
    assert_eq!(root.text_content(), "New");
}

#[test]
fn test_invalid_config_reports_context() {
    let err = AppConfig::from_toml_str("base_path = 3").unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse application config"));
}
