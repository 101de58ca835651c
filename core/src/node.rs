//! Abstract visual nodes and the host element sink capability.
//!
//! Components describe their output as a [`VisualNode`] tree. The tree is only turned into
//! host-visible elements when it is handed to an [`ElementSink`] through [`materialize`].

use alloc::rc::Rc;

use waypoint_value::{Event, EventHandler, Props, Value};

use crate::error::SinkError;

/// An abstract element produced by a component's render function.
#[derive(Debug, Clone)]
pub enum VisualNode {
    /// A tagged container.
    Element(Element),
    /// A text leaf.
    Text(String),
}

impl VisualNode {
    /// Creates a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }
}

impl From<Element> for VisualNode {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for VisualNode {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for VisualNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A tagged container with attributes and ordered children.
///
/// Two attribute keys are reserved: `style` holding a mapping of style properties, and
/// `on<Event>` keys holding [`Value::Function`] listeners.
#[derive(Debug, Clone)]
#[must_use]
pub struct Element {
    tag: String,
    attributes: Props,
    children: Vec<VisualNode>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Props::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Sets a single style property, keeping previously set ones.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut style = match self.attributes.remove("style") {
            Some(Value::Map(style)) => Rc::unwrap_or_clone(style),
            _ => Props::new(),
        };
        style.insert(property, value);
        self.attributes.insert("style", style);
        self
    }

    /// Registers a listener for `event`, e.g. `"click"`.
    pub fn on(self, event: &str, callback: impl Fn(&Event) + 'static) -> Self {
        self.attr(format!("on{event}"), EventHandler::new(callback))
    }

    /// Appends a child.
    pub fn child(mut self, child: impl Into<VisualNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children in order.
    pub fn children<C: Into<VisualNode>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the attribute mapping.
    #[must_use]
    pub const fn attributes(&self) -> &Props {
        &self.attributes
    }

    /// Returns the ordered children.
    #[must_use]
    pub fn child_nodes(&self) -> &[VisualNode] {
        &self.children
    }
}

/// Creates an element node from a tag, attributes and children in one call.
///
/// ```
/// use waypoint_core::{VisualNode, h, props};
///
/// let node = h("h1", props! { "class" => "title" }, ["Home Page"]);
/// assert_eq!(node.as_element().map(|e| e.tag()), Some("h1"));
/// ```
pub fn h<C: Into<VisualNode>>(
    tag: &str,
    attributes: Props,
    children: impl IntoIterator<Item = C>,
) -> VisualNode {
    let mut element = Element::new(tag).children(children);
    element.attributes = attributes;
    element.into()
}

/// A child handed to [`ElementSink::create_element`].
#[derive(Debug, Clone)]
pub enum HostChild<N> {
    /// Text that the sink turns into a text leaf.
    Text(String),
    /// An already created host node.
    Node(N),
}

/// How a single attribute entry has to be applied by a host.
#[derive(Debug)]
pub enum Attribute<'a> {
    /// Style properties, names already converted to CSS kebab-case.
    Style(Vec<(String, String)>),
    /// An event listener for the lower-cased event name.
    Listener {
        /// Lower-cased event name, e.g. `click`.
        event: String,
        /// The registered callback.
        handler: &'a EventHandler,
    },
    /// A plain string attribute.
    Plain {
        /// Attribute name.
        name: &'a str,
        /// Stringified value.
        value: String,
    },
}

impl<'a> Attribute<'a> {
    /// Classifies every entry of an attribute mapping.
    pub fn classify(attributes: &'a Props) -> impl Iterator<Item = Self> + 'a {
        attributes.iter().map(|(name, value)| match (name, value) {
            ("style", Value::Map(style)) => Self::Style(
                style
                    .iter()
                    .map(|(property, value)| (css_property_name(property), value.to_string()))
                    .collect(),
            ),
            (name, Value::Function(handler)) if name.starts_with("on") => Self::Listener {
                event: name[2..].to_lowercase(),
                handler,
            },
            (name, value) => Self::Plain {
                name,
                value: value.to_string(),
            },
        })
    }
}

/// Converts a camelCase style property name to CSS kebab-case.
///
/// Names that are already kebab-case pass through unchanged.
#[must_use]
pub fn css_property_name(name: &str) -> String {
    let mut css = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            css.push('-');
            css.push(ch.to_ascii_lowercase());
        } else {
            css.push(ch);
        }
    }
    css
}

/// A host capability that creates and arranges host-visible nodes.
///
/// Implementations apply attributes following [`Attribute::classify`].
pub trait ElementSink {
    /// Handle to a host node.
    type Node: Clone;

    /// Creates an element with the given attributes and children.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses to create or populate the element.
    fn create_element(
        &mut self,
        tag: &str,
        attributes: &Props,
        children: Vec<HostChild<Self::Node>>,
    ) -> Result<Self::Node, SinkError>;

    /// Creates a standalone text leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot create the node.
    fn create_text(&mut self, text: &str) -> Result<Self::Node, SinkError>;

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the insertion.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), SinkError>;

    /// Replaces `old` under `parent` with `new`, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns an error if `old` is not a child of `parent` or the host rejects the change.
    fn replace_child(
        &mut self,
        parent: &Self::Node,
        old: &Self::Node,
        new: &Self::Node,
    ) -> Result<(), SinkError>;

    /// Removes every child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects the removal.
    fn clear(&mut self, parent: &Self::Node) -> Result<(), SinkError>;
}

/// Turns an abstract node tree into host nodes, children first.
///
/// # Errors
///
/// Propagates the first failure reported by the sink.
pub fn materialize<S: ElementSink + ?Sized>(
    sink: &mut S,
    node: &VisualNode,
) -> Result<S::Node, SinkError> {
    match node {
        VisualNode::Text(text) => sink.create_text(text),
        VisualNode::Element(element) => {
            let children = element
                .children
                .iter()
                .map(|child| match child {
                    VisualNode::Text(text) => Ok(HostChild::Text(text.clone())),
                    VisualNode::Element(_) => materialize(sink, child).map(HostChild::Node),
                })
                .collect::<Result<Vec<_>, _>>()?;
            sink.create_element(&element.tag, &element.attributes, children)
        }
    }
}
