//! Component descriptors.

use alloc::rc::Rc;
use core::{any::type_name, fmt};

use waypoint_value::{Props, TypeTag};

use crate::{error::RenderError, node::VisualNode};

/// Render behaviour of a component.
///
/// Every `Fn(&Props) -> VisualNode` closure is a component.
pub trait Component: 'static {
    /// Produces the visual output for the given props.
    fn render(&self, props: &Props) -> VisualNode;
}

impl<F> Component for F
where
    F: Fn(&Props) -> VisualNode + 'static,
{
    fn render(&self, props: &Props) -> VisualNode {
        self(props)
    }
}

/// Immutable registration record for a component.
///
/// A descriptor pairs a render function with an optional declared prop shape. The shape is
/// checked shallowly before every render: each declared prop must be present and carry the
/// declared primitive [`TypeTag`].
#[derive(Clone)]
#[must_use]
pub struct ComponentDescriptor {
    render: Rc<dyn Component>,
    prop_types: Option<Vec<(String, TypeTag)>>,
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("prop_types", &self.prop_types)
            .finish_non_exhaustive()
    }
}

impl ComponentDescriptor {
    /// Creates a descriptor without a declared prop shape.
    pub fn new(component: impl Component) -> Self {
        Self {
            render: Rc::new(component),
            prop_types: None,
        }
    }

    /// Declares a required prop. Declaring the same name again replaces its type.
    pub fn prop(mut self, name: impl Into<String>, tag: TypeTag) -> Self {
        let name = name.into();
        let shape = self.prop_types.get_or_insert_with(Vec::new);
        match shape.iter_mut().find(|(declared, _)| *declared == name) {
            Some(entry) => entry.1 = tag,
            None => shape.push((name, tag)),
        }
        self
    }

    /// Returns the declared prop shape in declaration order, if any.
    #[must_use]
    pub fn prop_types(&self) -> Option<&[(String, TypeTag)]> {
        self.prop_types.as_deref()
    }

    /// Invokes the render function.
    #[must_use]
    pub fn render(&self, props: &Props) -> VisualNode {
        self.render.render(props)
    }

    /// Checks `props` against the declared shape of the component registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProp`] for the first declared prop that is absent and
    /// [`RenderError::PropType`] for the first one whose type tag differs.
    pub fn validate(&self, name: &str, props: &Props) -> Result<(), RenderError> {
        let Some(shape) = &self.prop_types else {
            return Ok(());
        };
        for (prop, expected) in shape {
            let Some(value) = props.get(prop) else {
                return Err(RenderError::MissingProp {
                    component: name.to_owned(),
                    prop: prop.clone(),
                });
            };
            let received = value.type_tag();
            if received != *expected {
                return Err(RenderError::PropType {
                    component: name.to_owned(),
                    prop: prop.clone(),
                    expected: *expected,
                    received,
                });
            }
        }
        Ok(())
    }
}
