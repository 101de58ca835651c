use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use waypoint_core::SinkError;
use waypoint_router::{History, Listener};
use web_sys::Window;

use crate::error::sink_error;

/// Session history backed by `window.history` and `popstate`.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    /// Wraps the history of `window`.
    #[must_use]
    pub const fn new(window: Window) -> Self {
        Self { window }
    }
}

impl History for BrowserHistory {
    fn location(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn push(&mut self, path: &str) -> Result<(), SinkError> {
        let history = self.window.history().map_err(|e| sink_error(&e))?;
        history
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| sink_error(&e))
    }

    fn subscribe(&mut self, mut listener: Listener) {
        let callback = Closure::<dyn FnMut()>::new(move || {
            if let Err(err) = listener() {
                tracing::error!(error = %err, "render after popstate failed");
                wasm_bindgen::throw_str(&err.to_string());
            }
        });
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref())
        {
            tracing::error!(error = ?err, "failed to subscribe to popstate");
            return;
        }
        callback.forget();
    }
}
