use std::{cell::RefCell, collections::BTreeMap, fmt, rc::Rc};

use waypoint_core::{Attribute, ElementSink, Event, EventHandler, HostChild, Props, SinkError};

enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        style: Vec<(String, String)>,
        listeners: Vec<(String, EventHandler)>,
    },
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    children: Vec<NodeRef>,
}

/// Shared handle to a node of the in-memory element tree.
#[derive(Clone)]
pub struct NodeRef(Rc<RefCell<NodeData>>);

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl NodeRef {
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            children: Vec::new(),
        })))
    }

    /// Creates a detached element without attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            style: Vec::new(),
            listeners: Vec::new(),
        })
    }

    /// Creates a detached text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Returns `true` if both handles point at the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Tag name, `None` for text leaves.
    #[must_use]
    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Value of a plain attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).cloned(),
            NodeKind::Text(_) => None,
        }
    }

    /// Sets a plain attribute on an element. Text leaves are left untouched.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        if let NodeKind::Element { attributes, .. } = &mut self.0.borrow_mut().kind {
            attributes.insert(name.into(), value.into());
        }
    }

    /// Value of a style property, by its CSS name.
    #[must_use]
    pub fn style_property(&self, property: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { style, .. } => style
                .iter()
                .find(|(name, _)| name == property)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    /// Snapshot of the child handles.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        self.0.borrow().children.clone()
    }

    /// Concatenated text of all descendant text leaves.
    #[must_use]
    pub fn text_content(&self) -> String {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { .. } => data.children.iter().map(Self::text_content).collect(),
        }
    }

    /// First descendant element (depth-first, self included) with the given tag.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<Self> {
        if self.tag().as_deref() == Some(tag) {
            return Some(self.clone());
        }
        self.children().iter().find_map(|child| child.find(tag))
    }

    /// Invokes the listeners registered on this node for `event`.
    ///
    /// Returns the number of listeners called. Listeners run with the tree unborrowed, so
    /// they may navigate and rebuild it.
    pub fn dispatch(&self, event: &Event) -> usize {
        let handlers: Vec<EventHandler> = match &self.0.borrow().kind {
            NodeKind::Element { listeners, .. } => listeners
                .iter()
                .filter(|(kind, _)| kind == event.kind())
                .map(|(_, handler)| handler.clone())
                .collect(),
            NodeKind::Text(_) => Vec::new(),
        };
        for handler in &handlers {
            handler.call(event);
        }
        handlers.len()
    }

    /// Serialises the subtree as HTML. Listeners are not serialised.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape(text)),
            NodeKind::Element {
                tag,
                attributes,
                style,
                ..
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {name}=\"{}\"", escape(value)));
                }
                if !style.is_empty() {
                    let css: Vec<String> =
                        style.iter().map(|(name, value)| format!("{name}: {value}")).collect();
                    out.push_str(&format!(" style=\"{}\"", escape(&css.join("; "))));
                }
                out.push('>');
                for child in &data.children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    fn apply(&self, attributes: &Props) {
        let mut data = self.0.borrow_mut();
        let NodeKind::Element {
            attributes: plain,
            style,
            listeners,
            ..
        } = &mut data.kind
        else {
            return;
        };
        for attribute in Attribute::classify(attributes) {
            match attribute {
                Attribute::Style(properties) => {
                    for (name, value) in properties {
                        match style.iter_mut().find(|(existing, _)| *existing == name) {
                            Some(entry) => entry.1 = value,
                            None => style.push((name, value)),
                        }
                    }
                }
                Attribute::Listener { event, handler } => listeners.push((event, handler.clone())),
                Attribute::Plain { name, value } => {
                    plain.insert(name.to_owned(), value);
                }
            }
        }
    }

    fn append(&self, child: Self) {
        self.0.borrow_mut().children.push(child);
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// An [`ElementSink`] building an in-memory element tree.
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    created: usize,
}

impl HeadlessDocument {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self { created: 0 }
    }

    /// Number of elements created so far.
    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }
}

impl ElementSink for HeadlessDocument {
    type Node = NodeRef;

    fn create_element(
        &mut self,
        tag: &str,
        attributes: &Props,
        children: Vec<HostChild<NodeRef>>,
    ) -> Result<NodeRef, SinkError> {
        let element = NodeRef::element(tag);
        element.apply(attributes);
        for child in children {
            element.append(match child {
                HostChild::Text(text) => NodeRef::text(text),
                HostChild::Node(node) => node,
            });
        }
        self.created += 1;
        Ok(element)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeRef, SinkError> {
        Ok(NodeRef::text(text))
    }

    fn append_child(&mut self, parent: &NodeRef, child: &NodeRef) -> Result<(), SinkError> {
        if parent.ptr_eq(child) {
            return Err(SinkError::new("a node cannot be appended to itself"));
        }
        parent.append(child.clone());
        Ok(())
    }

    fn replace_child(
        &mut self,
        parent: &NodeRef,
        old: &NodeRef,
        new: &NodeRef,
    ) -> Result<(), SinkError> {
        let mut data = parent.0.borrow_mut();
        let slot = data
            .children
            .iter_mut()
            .find(|child| child.ptr_eq(old))
            .ok_or_else(|| SinkError::new("the node to be replaced is not a child of this node"))?;
        *slot = new.clone();
        Ok(())
    }

    fn clear(&mut self, parent: &NodeRef) -> Result<(), SinkError> {
        parent.0.borrow_mut().children.clear();
        Ok(())
    }
}
