use wasm_bindgen::prelude::*;
use waypoint::{App, AppBuilder};

use crate::{dom::DomRoot, dom::DomSink, error::WebError, history::BrowserHistory};

/// Entry point for running a Waypoint application inside the browser.
#[wasm_bindgen]
#[derive(Debug)]
pub struct WebApp {
    app: App<DomSink, BrowserHistory>,
}

impl WebApp {
    /// Mounts `builder` into the element named by its configured `root_id` and renders the
    /// current location.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM or the root element is unavailable, or the initial render
    /// fails.
    pub fn launch(builder: AppBuilder) -> Result<Self, WebError> {
        console_error_panic_hook::set_once();

        let root = DomRoot::new(&builder.config().root_id)?;
        let sink = DomSink::new(root.document().clone());
        let history = BrowserHistory::new(root.window().clone());
        let mount: web_sys::Node = root.element().clone().into();

        let app = builder.build(sink, mount, history);
        app.init()?;
        Ok(Self { app })
    }

    /// The underlying application.
    #[must_use]
    pub const fn app(&self) -> &App<DomSink, BrowserHistory> {
        &self.app
    }
}

#[wasm_bindgen]
impl WebApp {
    /// Navigates to `path`, relative to the configured base path.
    ///
    /// # Errors
    ///
    /// Returns an error if the history update or the render fails.
    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&self, path: &str) -> Result<(), WebError> {
        self.app.navigate_to(path)?;
        Ok(())
    }

    /// The current location path.
    #[wasm_bindgen]
    #[must_use]
    pub fn location(&self) -> String {
        use waypoint::History;
        self.app.router().history().location()
    }
}
