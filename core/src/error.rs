//! Error taxonomy of the render pipeline.
//!
//! None of these errors are caught inside the framework. They propagate out of the render call
//! chain to whoever triggered the navigation.

use waypoint_value::TypeTag;

/// Errors raised while rendering a component tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// No descriptor is registered under the requested name.
    #[error("Component '{name}' is not defined.")]
    UnknownComponent {
        /// The requested component name.
        name: String,
    },
    /// A declared prop is absent from the supplied props.
    #[error("Missing prop '{prop}' in component '{component}'.")]
    MissingProp {
        /// The component being rendered.
        component: String,
        /// The declared prop that was not supplied.
        prop: String,
    },
    /// A declared prop is present but carries the wrong primitive type.
    #[error(
        "Invalid prop '{prop}' in component '{component}'. Expected '{expected}', but received '{received}'."
    )]
    PropType {
        /// The component being rendered.
        component: String,
        /// The offending prop.
        prop: String,
        /// The declared type.
        expected: TypeTag,
        /// The type actually supplied.
        received: TypeTag,
    },
    /// The host element sink failed.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl RenderError {
    pub(crate) fn unknown_component(name: impl Into<String>) -> Self {
        Self::UnknownComponent { name: name.into() }
    }
}

/// Failure reported by a host [`ElementSink`](crate::ElementSink).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element sink failure: {message}")]
pub struct SinkError {
    message: String,
}

impl SinkError {
    /// Creates a sink error with a host-provided message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the host-provided message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
