//! The demo site: four pages routed under `/dist/index.html`.

use waypoint::prelude::*;

/// Base path the demo site is served from.
pub const BASE_PATH: &str = "/dist/index.html";

fn page(title: &'static str) -> ComponentDescriptor {
    ComponentDescriptor::new(move |_: &Props| h("h1", Props::new(), [title]))
}

/// Defines the demo pages and routes on `app`.
pub fn install(app: &mut AppBuilder) {
    app.define_component("Home", page("Home Page"))
        .define_component("About", page("About Page"))
        .define_component("Contact", page("Contact Page"))
        .define_component(NOT_FOUND, page("404 - Page Not Found"))
        .register_route(BASE_PATH, "Home", Props::new())
        .register_route(format!("{BASE_PATH}/about"), "About", Props::new())
        .register_route(format!("{BASE_PATH}/contact"), "Contact", Props::new())
        .register_route(format!("{BASE_PATH}/notfound"), NOT_FOUND, Props::new());
}

/// A builder with the demo site installed.
#[must_use]
pub fn site() -> AppBuilder {
    let mut app = AppBuilder::new();
    install(&mut app);
    app
}
