//! DOM helpers shared by the widgets and behaviors

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

use crate::error::{Error, Result};

/// The browsing context's document.
pub fn document() -> Result<web_sys::Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| Error::dom("no document in scope"))
}

/// Gets the element's closest ancestor (the element itself included) that
/// matches `selector`. Returns `None` if there isn't any.
pub fn closest_parent(element: &Element, selector: &str) -> Option<Element> {
    let mut current = Some(element.clone());
    while let Some(candidate) = current {
        if candidate.matches(selector).unwrap_or(false) {
            return Some(candidate);
        }
        current = candidate.parent_element();
    }
    None
}

/// Registers a page-lifetime event handler.
///
/// The closure is leaked on purpose; listeners installed at page load are
/// never removed before the page itself goes away.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|e| Error::dom(format!("failed to listen for {event}: {e:?}")))?;
    callback.forget();
    Ok(())
}

/// Dispatches a bubbling event, as if the user had triggered it natively.
pub fn dispatch_bubbling(target: &EventTarget, event: &str) -> Result<()> {
    let init = web_sys::EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict(event, &init)
        .map_err(|e| Error::dom(format!("failed to build event: {e:?}")))?;
    target
        .dispatch_event(&event)
        .map_err(|e| Error::dom(format!("failed to dispatch event: {e:?}")))?;
    Ok(())
}
