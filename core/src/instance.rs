//! Component instances and the conditional regeneration protocol.

use alloc::rc::Rc;

use waypoint_value::Props;

use crate::{
    component::ComponentDescriptor,
    error::RenderError,
    node::{ElementSink, materialize},
};

/// Whether the instance output reflects its current props.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// No output has been generated yet.
    #[default]
    Stale,
    /// The output was generated from the props snapshot.
    Fresh,
}

/// A live component: its props, the snapshot it last rendered from, and its host output.
///
/// Regeneration is guarded by a shallow dirty check. On each [`display`](Self::display) tick
/// every key of the current props is compared with the snapshot using
/// [`Value::strict_eq`](waypoint_value::Value::strict_eq); a key missing from the snapshot
/// counts as changed. Keys removed from the current props are not noticed.
#[derive(Debug)]
pub struct ComponentInstance<N> {
    name: String,
    descriptor: Rc<ComponentDescriptor>,
    props: Props,
    previous: Props,
    freshness: Freshness,
    container: N,
    output: Option<N>,
    regenerations: usize,
}

impl<N: Clone> ComponentInstance<N> {
    /// Creates a stale instance whose output will be attached under `container`.
    pub fn new(
        name: impl Into<String>,
        descriptor: Rc<ComponentDescriptor>,
        props: Props,
        container: N,
    ) -> Self {
        Self {
            name: name.into(),
            descriptor,
            props,
            previous: Props::new(),
            freshness: Freshness::Stale,
            container,
            output: None,
            regenerations: 0,
        }
    }

    /// Returns `true` if any current prop differs from the last rendered snapshot.
    #[must_use]
    pub fn should_update(&self) -> bool {
        self.props.iter().any(|(key, value)| {
            self.previous
                .get(key)
                .is_none_or(|previous| !value.strict_eq(previous))
        })
    }

    /// Runs one lifecycle tick, regenerating the output when the instance is dirty.
    ///
    /// The first tick always regenerates. Returns whether regeneration happened.
    ///
    /// The props snapshot is taken before the new output is built. If a regeneration of a
    /// fresh instance fails, the snapshot already matches the current props: later ticks are
    /// no-ops until the props change again, and the previous output stays attached. A failed
    /// first tick leaves the instance stale, so the next tick retries.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to materialise or attach the new output.
    pub fn display<S>(&mut self, sink: &mut S) -> Result<bool, RenderError>
    where
        S: ElementSink<Node = N> + ?Sized,
    {
        if self.freshness == Freshness::Fresh && !self.should_update() {
            return Ok(false);
        }

        self.previous = self.props.clone();
        let node = self.descriptor.render(&self.props);
        let host = materialize(sink, &node)?;
        match &self.output {
            Some(old) => sink.replace_child(&self.container, old, &host)?,
            None => sink.append_child(&self.container, &host)?,
        }
        self.output = Some(host);
        self.freshness = Freshness::Fresh;
        self.regenerations += 1;
        tracing::trace!(component = %self.name, regenerations = self.regenerations, "regenerated");
        Ok(true)
    }

    /// Replaces the current props. Takes effect on the next tick.
    pub fn set_props(&mut self, props: Props) {
        self.props = props;
    }

    /// The name the component was rendered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current props.
    #[must_use]
    pub const fn props(&self) -> &Props {
        &self.props
    }

    /// Snapshot of the props at the last regeneration; empty before the first one.
    #[must_use]
    pub const fn previous_props(&self) -> &Props {
        &self.previous
    }

    /// Current freshness.
    #[must_use]
    pub const fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// The generic container the output is attached under.
    #[must_use]
    pub const fn container(&self) -> &N {
        &self.container
    }

    /// The attached output, present only after the first regeneration.
    #[must_use]
    pub const fn output(&self) -> Option<&N> {
        self.output.as_ref()
    }

    /// Number of regenerations so far.
    #[must_use]
    pub const fn regenerations(&self) -> usize {
        self.regenerations
    }
}
