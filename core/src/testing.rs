//! Shared test infrastructure for the core crate.

use core::fmt::Write;

use waypoint_value::{Event, EventHandler, Props};

use crate::{
    error::SinkError,
    node::{Attribute, ElementSink, HostChild},
};

#[derive(Debug)]
enum MockKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        listeners: Vec<(String, EventHandler)>,
    },
    Text(String),
}

#[derive(Debug)]
struct MockNode {
    kind: MockKind,
    children: Vec<usize>,
}

/// An arena-backed sink whose node handles are indices.
#[derive(Debug, Default)]
pub struct RecordingSink {
    nodes: Vec<MockNode>,
    /// Number of `create_element` calls.
    pub created: usize,
    /// When set, `create_element` fails for this tag.
    pub fail_on_tag: Option<String>,
}

impl RecordingSink {
    fn push(&mut self, kind: MockKind) -> usize {
        self.nodes.push(MockNode {
            kind,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Creates a sink whose `create_element` fails for `tag`.
    pub fn failing_on(tag: &str) -> Self {
        Self {
            fail_on_tag: Some(tag.to_owned()),
            ..Self::default()
        }
    }

    /// Creates a detached root container.
    pub fn root(&mut self) -> usize {
        self.push(MockKind::Element {
            tag: "main".into(),
            attributes: Vec::new(),
            listeners: Vec::new(),
        })
    }

    /// Children of a node.
    pub fn children_of(&self, node: usize) -> &[usize] {
        &self.nodes[node].children
    }

    /// Serialises a subtree to compact markup.
    pub fn describe(&self, node: usize) -> String {
        let mut out = String::new();
        self.describe_into(node, &mut out);
        out
    }

    fn describe_into(&self, node: usize, out: &mut String) {
        let node = &self.nodes[node];
        match &node.kind {
            MockKind::Text(text) => out.push_str(text),
            MockKind::Element {
                tag, attributes, ..
            } => {
                let _ = write!(out, "<{tag}");
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                out.push('>');
                for child in &node.children {
                    self.describe_into(*child, out);
                }
                let _ = write!(out, "</{tag}>");
            }
        }
    }

    /// Invokes every listener registered on `node` for the event kind.
    pub fn dispatch(&self, node: usize, event: &Event) {
        if let MockKind::Element { listeners, .. } = &self.nodes[node].kind {
            for (kind, handler) in listeners {
                if kind == event.kind() {
                    handler.call(event);
                }
            }
        }
    }
}

impl ElementSink for RecordingSink {
    type Node = usize;

    fn create_element(
        &mut self,
        tag: &str,
        attributes: &Props,
        children: Vec<HostChild<usize>>,
    ) -> Result<usize, SinkError> {
        if self.fail_on_tag.as_deref() == Some(tag) {
            return Err(SinkError::new(format!("cannot create <{tag}>")));
        }
        self.created += 1;

        let mut plain = Vec::new();
        let mut listeners = Vec::new();
        for attribute in Attribute::classify(attributes) {
            match attribute {
                Attribute::Style(properties) => {
                    let style = properties
                        .iter()
                        .map(|(property, value)| format!("{property}: {value}"))
                        .collect::<Vec<_>>()
                        .join("; ");
                    plain.push(("style".to_owned(), style));
                }
                Attribute::Listener { event, handler } => listeners.push((event, handler.clone())),
                Attribute::Plain { name, value } => plain.push((name.to_owned(), value)),
            }
        }

        let element = self.push(MockKind::Element {
            tag: tag.to_owned(),
            attributes: plain,
            listeners,
        });
        for child in children {
            let child = match child {
                HostChild::Text(text) => self.push(MockKind::Text(text)),
                HostChild::Node(node) => node,
            };
            self.nodes[element].children.push(child);
        }
        Ok(element)
    }

    fn create_text(&mut self, text: &str) -> Result<usize, SinkError> {
        Ok(self.push(MockKind::Text(text.to_owned())))
    }

    fn append_child(&mut self, parent: &usize, child: &usize) -> Result<(), SinkError> {
        self.nodes[*parent].children.push(*child);
        Ok(())
    }

    fn replace_child(&mut self, parent: &usize, old: &usize, new: &usize) -> Result<(), SinkError> {
        let children = &mut self.nodes[*parent].children;
        let slot = children
            .iter_mut()
            .find(|child| **child == *old)
            .ok_or_else(|| SinkError::new("node is not a child of the parent"))?;
        *slot = *new;
        Ok(())
    }

    fn clear(&mut self, parent: &usize) -> Result<(), SinkError> {
        self.nodes[*parent].children.clear();
        Ok(())
    }
}
