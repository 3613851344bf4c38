//! Component registry and island hydrator
//!
//! Maps CSS selectors to component constructors and mounts a component
//! instance into every matching container once the page has loaded. The
//! registry is an explicit object built at startup, not process-wide state,
//! so registration and mounting can be tested independently.

use std::rc::Rc;

use leptos::prelude::{AnyView, IntoAny};
use serde_json::Value;

/// JSON-derived input for an auto-loaded component, already camelized.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonProps {
    pub json: Value,
}

type Constructor = Rc<dyn Fn(Option<JsonProps>) -> AnyView>;

struct Entry {
    selector: String,
    constructor: Constructor,
}

/// Registry of auto-loadable components.
///
/// A selector is registered by at most one constructor; re-registering a
/// selector overwrites the previous constructor (last write wins). Multiple
/// containers may match the same selector and each receives an independent
/// mounted instance.
#[derive(Default)]
pub struct ComponentRegistry {
    entries: Vec<Entry>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component to be mounted into every container matching
    /// `selector`. The constructor receives the container's embedded JSON
    /// payload when one is referenced, `None` otherwise.
    pub fn register<V: IntoAny + 'static>(
        &mut self,
        selector: impl Into<String>,
        constructor: impl Fn(Option<JsonProps>) -> V + 'static,
    ) {
        let selector = selector.into();
        let constructor: Constructor = Rc::new(move |props| constructor(props).into_any());
        match self.entries.iter_mut().find(|e| e.selector == selector) {
            Some(entry) => entry.constructor = constructor,
            None => self.entries.push(Entry {
                selector,
                constructor,
            }),
        }
    }

    /// Registers a component that takes no input.
    pub fn register_plain<V: IntoAny + 'static>(
        &mut self,
        selector: impl Into<String>,
        constructor: impl Fn() -> V + 'static,
    ) {
        self.register(selector, move |_| constructor());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_registered(&self, selector: &str) -> bool {
        self.iter().any(|(registered, _)| registered == selector)
    }

    /// The constructor currently registered for `selector`.
    pub fn constructor_for(&self, selector: &str) -> Option<Rc<dyn Fn(Option<JsonProps>) -> AnyView>> {
        self.entries
            .iter()
            .find(|e| e.selector == selector)
            .map(|e| Rc::clone(&e.constructor))
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &Constructor)> {
        self.entries
            .iter()
            .map(|e| (e.selector.as_str(), &e.constructor))
    }
}

#[cfg(feature = "hydrate")]
pub use hydrator::start;

#[cfg(feature = "hydrate")]
mod hydrator {
    use austral_casing::camelize_value;
    use leptos::context::provide_context;
    use leptos::mount::mount_to;
    use serde_json::Value;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    use super::{ComponentRegistry, JsonProps};
    use crate::context::BackendContext;
    use crate::error::{Error, Result};

    /// Attribute naming the element that holds a container's JSON payload.
    pub const PROPS_SOURCE_ATTR: &str = "data-props-source-id";

    /// Mounts every registered component into its matching containers.
    ///
    /// Must be called once, after the DOM has fully parsed. A present but
    /// unparsable payload aborts the whole call; components mount eagerly
    /// and fail loud.
    pub fn start(
        registry: &ComponentRegistry,
        document: &Document,
        context: Option<BackendContext>,
    ) -> Result<()> {
        for (selector, constructor) in registry.iter() {
            let containers = document
                .query_selector_all(selector)
                .map_err(|e| Error::dom(format!("{e:?}")))?;
            for index in 0..containers.length() {
                let Some(node) = containers.get(index) else {
                    continue;
                };
                let container: HtmlElement = node.unchecked_into();
                let props = embedded_props(document, &container)?;

                let constructor = std::rc::Rc::clone(constructor);
                let context = context.clone();
                mount_to(container, move || {
                    if let Some(context) = context {
                        provide_context(context);
                    }
                    constructor(props)
                })
                .forget();
            }
        }
        Ok(())
    }

    /// Reads the JSON payload referenced by a container, if any.
    ///
    /// A missing reference attribute or a missing payload element means the
    /// component takes no input; only a parse failure of present JSON is an
    /// error.
    fn embedded_props(document: &Document, container: &Element) -> Result<Option<JsonProps>> {
        let Some(source_id) = container.get_attribute(PROPS_SOURCE_ATTR) else {
            return Ok(None);
        };
        let Some(json) = document
            .get_element_by_id(&source_id)
            .and_then(|element| element.text_content())
        else {
            return Ok(None);
        };
        if json.trim().is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(&json)?;
        Ok(Some(JsonProps {
            json: camelize_value(value),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn register_stores_each_selector_once() {
        let mut registry = ComponentRegistry::new();
        registry.register_plain(".a", || ());
        registry.register_plain(".b", || ());
        assert_eq!(registry.len(), 2);
        assert!(registry.is_registered(".a"));
        assert!(registry.is_registered(".b"));
        assert!(!registry.is_registered(".c"));
    }

    #[test]
    fn reregistering_a_selector_overwrites() {
        let active = Rc::new(Cell::new(0));

        let mut registry = ComponentRegistry::new();
        let first = Rc::clone(&active);
        registry.register(".widget", move |_| first.set(1));
        let second = Rc::clone(&active);
        registry.register(".widget", move |_| second.set(2));

        assert_eq!(registry.len(), 1);
        let constructor = registry.constructor_for(".widget").unwrap();
        let _ = constructor(None);
        assert_eq!(active.get(), 2);
    }

    #[test]
    fn constructor_receives_absent_props_as_none() {
        let seen_none = Rc::new(Cell::new(false));

        let mut registry = ComponentRegistry::new();
        let seen = Rc::clone(&seen_none);
        registry.register(".widget", move |props| seen.set(props.is_none()));

        let constructor = registry.constructor_for(".widget").unwrap();
        let _ = constructor(None);
        assert!(seen_none.get());
    }

    #[test]
    fn constructor_receives_registered_props() {
        let received = Rc::new(Cell::new(None));

        let mut registry = ComponentRegistry::new();
        let slot = Rc::clone(&received);
        registry.register(".widget", move |props| {
            slot.set(props.map(|p| p.json));
        });

        let constructor = registry.constructor_for(".widget").unwrap();
        let _ = constructor(Some(JsonProps {
            json: serde_json::json!({"userId": 1}),
        }));
        assert_eq!(received.take(), Some(serde_json::json!({"userId": 1})));
    }
}
