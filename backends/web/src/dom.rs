use wasm_bindgen::{JsCast, closure::Closure};
use waypoint_core::{Attribute, ElementSink, Event, EventHandler, HostChild, Props, SinkError};
use web_sys::{Document, Element, HtmlElement, Node, Window};

use crate::error::{WebError, sink_error};

/// The element the application renders into.
#[derive(Debug, Clone)]
pub struct DomRoot {
    window: Window,
    document: Document,
    element: Element,
}

impl DomRoot {
    /// Creates a [`DomRoot`] pointing at the element with id `root_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no document or no element with that id.
    pub fn new(root_id: &str) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::DomUnavailable)?;
        let document = window.document().ok_or(WebError::DomUnavailable)?;
        let element = document
            .get_element_by_id(root_id)
            .ok_or_else(|| WebError::RootNotFound(root_id.to_string()))?;
        Ok(Self {
            window,
            document,
            element,
        })
    }

    /// Returns the DOM element representing the mounting point.
    #[must_use]
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Returns the owning document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the browser window.
    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }
}

/// A DOM event listener that unregisters itself when dropped.
#[derive(Debug)]
struct BoundListener {
    target: Element,
    event: String,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl BoundListener {
    fn attach(target: &Element, event: &str, handler: &EventHandler) -> Result<Self, SinkError> {
        let handler = handler.clone();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |dom_event: web_sys::Event| {
            handler.call(&Event::new(dom_event.type_()));
        });
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| sink_error(&e))?;
        Ok(Self {
            target: target.clone(),
            event: event.to_owned(),
            callback,
        })
    }

    /// Returns `true` once clearing `cleared` detaches the listener's element, or if the
    /// element never made it into the page.
    fn is_stale(&self, cleared: &Node) -> bool {
        let target: &Node = self.target.as_ref();
        stale_after_clear(
            target.is_same_node(Some(cleared)),
            cleared.contains(Some(target)),
            target.is_connected(),
        )
    }
}

const fn stale_after_clear(is_cleared: bool, inside_cleared: bool, connected: bool) -> bool {
    !is_cleared && (inside_cleared || !connected)
}

impl Drop for BoundListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(&self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// An [`ElementSink`] creating real DOM nodes.
///
/// The sink owns every event listener it registers. Clearing a node drops the listeners of
/// its former descendants, together with those of nodes that never made it into the page.
#[derive(Debug)]
pub struct DomSink {
    document: Document,
    listeners: Vec<BoundListener>,
}

impl DomSink {
    /// Creates a sink building nodes in `document`.
    #[must_use]
    pub const fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Vec::new(),
        }
    }

    /// Number of event listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn apply(&mut self, element: &Element, attributes: &Props) -> Result<(), SinkError> {
        for attribute in Attribute::classify(attributes) {
            match attribute {
                Attribute::Style(properties) => {
                    let Some(html) = element.dyn_ref::<HtmlElement>() else {
                        continue;
                    };
                    let style = html.style();
                    for (name, value) in properties {
                        style
                            .set_property(&name, &value)
                            .map_err(|e| sink_error(&e))?;
                    }
                }
                Attribute::Listener { event, handler } => {
                    self.listeners
                        .push(BoundListener::attach(element, &event, handler)?);
                }
                Attribute::Plain { name, value } => element
                    .set_attribute(name, &value)
                    .map_err(|e| sink_error(&e))?,
            }
        }
        Ok(())
    }
}

impl ElementSink for DomSink {
    type Node = Node;

    fn create_element(
        &mut self,
        tag: &str,
        attributes: &Props,
        children: Vec<HostChild<Node>>,
    ) -> Result<Node, SinkError> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|e| sink_error(&e))?;
        self.apply(&element, attributes)?;
        for child in children {
            let child = match child {
                HostChild::Text(text) => self.document.create_text_node(&text).into(),
                HostChild::Node(node) => node,
            };
            element.append_child(&child).map_err(|e| sink_error(&e))?;
        }
        Ok(element.into())
    }

    fn create_text(&mut self, text: &str) -> Result<Node, SinkError> {
        Ok(self.document.create_text_node(text).into())
    }

    fn append_child(&mut self, parent: &Node, child: &Node) -> Result<(), SinkError> {
        parent.append_child(child).map_err(|e| sink_error(&e))?;
        Ok(())
    }

    fn replace_child(&mut self, parent: &Node, old: &Node, new: &Node) -> Result<(), SinkError> {
        parent.replace_child(new, old).map_err(|e| sink_error(&e))?;
        Ok(())
    }

    fn clear(&mut self, parent: &Node) -> Result<(), SinkError> {
        self.listeners.retain(|listener| !listener.is_stale(parent));
        while let Some(child) = parent.first_child() {
            parent.remove_child(&child).map_err(|e| sink_error(&e))?;
        }
        Ok(())
    }
}
