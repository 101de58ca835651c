//! The renderer: validates, instantiates and attaches component trees.

use alloc::rc::Rc;

use waypoint_value::{Props, TypeTag, Value, props};

use crate::{
    error::RenderError,
    instance::ComponentInstance,
    node::{ElementSink, HostChild},
    registry::Registry,
};

/// Tag of the generic containers the renderer creates.
const CONTAINER_TAG: &str = "div";

/// A rendered component together with the components rendered from its `children` prop.
#[derive(Debug)]
pub struct Mounted<N> {
    instance: ComponentInstance<N>,
    children: Vec<Mounted<N>>,
}

impl<N> Mounted<N> {
    /// The component instance.
    #[must_use]
    pub const fn instance(&self) -> &ComponentInstance<N> {
        &self.instance
    }

    /// Mutable access to the instance, e.g. to run further ticks.
    #[must_use]
    pub const fn instance_mut(&mut self) -> &mut ComponentInstance<N> {
        &mut self.instance
    }

    /// Nested components, in `children` order. Text children are not listed.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

impl<N: Clone> Mounted<N> {
    /// Total number of component instances in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always `false`: a mounted tree holds at least its root instance.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Builds a nested render request for a `children` list.
///
/// ```
/// use waypoint_core::{Value, child, props};
///
/// let children = Value::list([child("Greeting", props! { "name" => "x" }), Value::from("text")]);
/// ```
#[must_use]
pub fn child(component: &str, props: Props) -> Value {
    Value::map(props! { "component" => component, "props" => props })
}

/// Renders components registered in a [`Registry`] into an [`ElementSink`].
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: Rc<Registry>,
}

impl Renderer {
    /// Creates a renderer reading from `registry`.
    #[must_use]
    pub const fn new(registry: Rc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry this renderer reads from.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders `name` with `props` and appends the result to `parent`.
    ///
    /// The component's output lives inside a fresh container created here. Entries of the
    /// `children` prop follow in order. Entries tagged `object` (mappings, lists and `null`)
    /// are rendered recursively as `{ component, props }` requests; a request without a
    /// component name asks for `undefined`. Strings, numbers, booleans and functions become a
    /// text leaf in their own container. The container is attached to `parent` last.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownComponent`] for unregistered names,
    /// [`RenderError::MissingProp`] or [`RenderError::PropType`] when validation fails, and
    /// [`RenderError::Sink`] when the host rejects an operation. Nothing is attached to
    /// `parent` when an error occurs, although nested output may already have been built.
    pub fn render<S: ElementSink + ?Sized>(
        &self,
        sink: &mut S,
        name: &str,
        props: &Props,
        parent: &S::Node,
    ) -> Result<Mounted<S::Node>, RenderError> {
        let descriptor = self
            .registry
            .component(name)
            .ok_or_else(|| RenderError::unknown_component(name))?;
        descriptor.validate(name, props)?;
        tracing::debug!(component = %name, "rendering component");

        let container = sink.create_element(CONTAINER_TAG, &Props::new(), Vec::new())?;
        let mut instance = ComponentInstance::new(name, descriptor.clone(), props.clone(), container);
        instance.display(sink)?;

        let mut children = Vec::new();
        for entry in props.children().unwrap_or_default() {
            match entry {
                request if request.type_tag() == TypeTag::Object => {
                    let fields = request.as_map();
                    let component = fields
                        .and_then(|fields| fields.get("component"))
                        .and_then(Value::as_str);
                    let nested = fields
                        .and_then(|fields| fields.get("props"))
                        .and_then(Value::as_map)
                        .cloned()
                        .unwrap_or_default();
                    let mounted = self.render(
                        sink,
                        component.unwrap_or("undefined"),
                        &nested,
                        instance.container(),
                    )?;
                    children.push(mounted);
                }
                text => {
                    let wrapper = sink.create_element(
                        CONTAINER_TAG,
                        &Props::new(),
                        vec![HostChild::Text(text.to_string())],
                    )?;
                    sink.append_child(instance.container(), &wrapper)?;
                }
            }
        }

        sink.append_child(parent, instance.container())?;
        Ok(Mounted { instance, children })
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::{
        component::ComponentDescriptor,
        node::{Element, VisualNode},
        registry::RegistryBuilder,
        testing::RecordingSink,
    };

    // ============================================================================
    // Test Infrastructure
    // ============================================================================

    fn heading(text: &'static str) -> ComponentDescriptor {
        ComponentDescriptor::new(move |_: &Props| Element::new("h1").child(text).into())
    }

    fn registry(configure: impl FnOnce(&mut RegistryBuilder)) -> Renderer {
        let mut builder = Registry::builder();
        builder
            .define_component("Home", heading("Home Page"))
            .define_component(
                "Greeting",
                ComponentDescriptor::new(|props: &Props| {
                    Element::new("p").child(format!("Hello, {}!", props["name"])).into()
                })
                .prop("name", TypeTag::String),
            )
            .define_component(
                "Layout",
                ComponentDescriptor::new(|_: &Props| Element::new("header").into()),
            );
        configure(&mut builder);
        Renderer::new(Rc::new(builder.build()))
    }

    // ============================================================================
    // Tests
    // ============================================================================

    #[test]
    fn test_render_attaches_container_with_output() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();

        let mounted = renderer.render(&mut sink, "Home", &Props::new(), &root).unwrap();
        assert_eq!(sink.describe(root), "<main><div><h1>Home Page</h1></div></main>");
        assert_eq!(mounted.instance().name(), "Home");
        assert_eq!(mounted.instance().regenerations(), 1);
        assert_eq!(mounted.len(), 1);
    }

    #[test]
    fn test_render_unknown_component() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();

        let err = renderer.render(&mut sink, "Nope", &Props::new(), &root).unwrap_err();
        assert_eq!(err, RenderError::UnknownComponent { name: "Nope".into() });
        assert!(sink.children_of(root).is_empty());
    }

    #[test]
    fn test_render_validates_props() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();

        assert!(matches!(
            renderer.render(&mut sink, "Greeting", &Props::new(), &root),
            Err(RenderError::MissingProp { .. })
        ));
        assert!(matches!(
            renderer.render(&mut sink, "Greeting", &props! { "name" => 42 }, &root),
            Err(RenderError::PropType { .. })
        ));
        assert_eq!(sink.created, 0);

        renderer
            .render(&mut sink, "Greeting", &props! { "name" => "x" }, &root)
            .unwrap();
        assert_eq!(sink.describe(root), "<main><div><p>Hello, x!</p></div></main>");
    }

    #[test]
    fn test_render_children_in_order() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let props = props! {
            "children" => Value::list([
                child("Greeting", props! { "name" => "a" }),
                Value::from("plain"),
                child("Home", Props::new()),
                Value::from(7),
            ]),
        };

        let mounted = renderer.render(&mut sink, "Layout", &props, &root).unwrap();
        assert_eq!(
            sink.describe(root),
            "<main><div><header></header>\
             <div><p>Hello, a!</p></div>\
             <div>plain</div>\
             <div><h1>Home Page</h1></div>\
             <div>7</div></div></main>"
        );
        let names: Vec<_> = mounted.children().iter().map(|c| c.instance().name()).collect();
        assert_eq!(names, vec!["Greeting", "Home"]);
        assert_eq!(mounted.len(), 3);
    }

    #[test]
    fn test_render_nested_children_recursively() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let inner = props! { "children" => Value::list(["deep"]) };
        let props = props! { "children" => Value::list([child("Layout", inner)]) };

        renderer.render(&mut sink, "Layout", &props, &root).unwrap();
        assert_eq!(
            sink.describe(root),
            "<main><div><header></header><div><header></header><div>deep</div></div></div></main>"
        );
    }

    #[test]
    fn test_child_without_props_gets_empty_props() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let request = Value::map(props! { "component" => "Home" });
        let props = props! { "children" => Value::list([request]) };

        let mounted = renderer.render(&mut sink, "Layout", &props, &root).unwrap();
        assert!(mounted.children()[0].instance().props().is_empty());
    }

    #[test]
    fn test_child_without_component_is_unknown() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let props = props! { "children" => Value::list([Value::map(Props::new())]) };

        let err = renderer.render(&mut sink, "Layout", &props, &root).unwrap_err();
        assert_eq!(err, RenderError::UnknownComponent { name: "undefined".into() });
        assert!(sink.children_of(root).is_empty());
    }

    #[test]
    fn test_list_and_null_children_are_requests() {
        let renderer = registry(|_| {});
        for entry in [Value::list(["a", "b"]), Value::Null] {
            let mut sink = RecordingSink::default();
            let root = sink.root();
            let props = props! { "children" => Value::list([entry]) };

            let err = renderer.render(&mut sink, "Layout", &props, &root).unwrap_err();
            assert_eq!(err, RenderError::UnknownComponent { name: "undefined".into() });
            assert!(sink.children_of(root).is_empty());
        }
    }

    #[test]
    fn test_scalar_children_are_text() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let props = props! {
            "children" => Value::list([Value::from(true), Value::function(|_| {})]),
        };

        let mounted = renderer.render(&mut sink, "Layout", &props, &root).unwrap();
        assert_eq!(
            sink.describe(root),
            "<main><div><header></header><div>true</div><div>function</div></div></main>"
        );
        assert!(mounted.children().is_empty());
    }

    #[test]
    fn test_child_validation_failure_propagates() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let props = props! { "children" => Value::list([child("Greeting", Props::new())]) };

        assert!(matches!(
            renderer.render(&mut sink, "Layout", &props, &root),
            Err(RenderError::MissingProp { component, .. }) if component == "Greeting"
        ));
    }

    #[test]
    fn test_each_render_creates_a_fresh_instance() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let renderer = registry(move |builder| {
            builder.define_component(
                "Counted",
                ComponentDescriptor::new(move |_: &Props| {
                    counter.set(counter.get() + 1);
                    VisualNode::text("counted")
                }),
            );
        });
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let props = props! { "same" => 1 };

        renderer.render(&mut sink, "Counted", &props, &root).unwrap();
        renderer.render(&mut sink, "Counted", &props, &root).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_sink_errors_propagate() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::failing_on("h1");
        let root = sink.root();
        assert!(matches!(
            renderer.render(&mut sink, "Home", &Props::new(), &root),
            Err(RenderError::Sink(_))
        ));
    }

    #[test]
    fn test_props_from_json() {
        let renderer = registry(|_| {});
        let mut sink = RecordingSink::default();
        let root = sink.root();
        let props: Props = serde_json::from_str(
            r#"{"children": [{"component": "Greeting", "props": {"name": "json"}}, "tail"]}"#,
        )
        .unwrap();

        renderer.render(&mut sink, "Layout", &props, &root).unwrap();
        assert_eq!(
            sink.describe(root),
            "<main><div><header></header><div><p>Hello, json!</p></div><div>tail</div></div></main>"
        );
    }
}
