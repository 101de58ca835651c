use thiserror::Error;
use waypoint_core::{RenderError, SinkError};

/// Error type produced by the web backend.
#[derive(Debug, Clone, Error)]
pub enum WebError {
    /// The DOM APIs are not accessible (e.g., when executed outside of a browser).
    #[error("DOM is not available")]
    DomUnavailable,
    /// The requested mounting node cannot be located.
    #[error("Failed to find DOM element with id `{0}`")]
    RootNotFound(String),
    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
    /// Rendering the application failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<WebError> for wasm_bindgen::JsValue {
    fn from(value: WebError) -> Self {
        Self::from(value.to_string())
    }
}

/// Converts a JavaScript exception raised by a DOM call into a sink failure.
pub(crate) fn sink_error(value: &wasm_bindgen::JsValue) -> SinkError {
    SinkError::new(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
