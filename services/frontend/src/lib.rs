//! Austral frontend - main entry bundle
//!
//! Client-side asset layer for the server-rendered Austral pages: mounts
//! isolated islands of interactivity into backend-rendered containers,
//! enhances selection controls, and wires the page-load behaviors.

pub mod behaviors;
pub mod bootstrap;
pub mod components;
pub mod context;
#[cfg(feature = "hydrate")]
pub mod dom;
pub mod error;
pub mod registry;
pub mod select;

pub use context::BackendContext;
pub use error::{Error, Result};

/// Hydration entry point for the WASM client.
///
/// Safe to call at any point after the script loads: wiring is deferred
/// until the DOM has fully parsed.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() -> std::result::Result<(), wasm_bindgen::JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let document = dom::document().map_err(to_js)?;
    if document.ready_state() == web_sys::DocumentReadyState::Loading {
        let deferred = document.clone();
        dom::listen(document.as_ref(), "DOMContentLoaded", move |_| {
            if let Err(e) = run_page(&deferred) {
                log::error!("Page initialization failed: {e}");
            }
        })
        .map_err(to_js)?;
    } else {
        run_page(&document).map_err(to_js)?;
    }
    Ok(())
}

#[cfg(feature = "hydrate")]
fn run_page(document: &web_sys::Document) -> Result<()> {
    use wasm_bindgen::JsCast;

    let lang = document
        .document_element()
        .and_then(|root| root.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|root| root.lang())
        .unwrap_or_default();
    let locale = select::Locale::from_document_lang(&lang);

    select::widget::init_all(document, locale)?;
    behaviors::regions::init(document, locale)?;
    behaviors::rut::init(document)?;
    bootstrap::init_alerts(document)?;
    bootstrap::init_forms(document)?;

    // Pages that render no context block mount context-free islands; a
    // present but malformed context is a configuration error and fails loud.
    let context = match context::load(document) {
        Ok(context) => Some(context),
        Err(Error::MissingContext) => None,
        Err(e) => return Err(e),
    };

    let mut registry = registry::ComponentRegistry::new();
    components::register_defaults(&mut registry);
    registry::start(&registry, document, context)?;

    log::debug!("Page behaviors initialized");
    Ok(())
}

#[cfg(feature = "hydrate")]
fn to_js(error: Error) -> wasm_bindgen::JsValue {
    wasm_bindgen::JsValue::from_str(&error.to_string())
}
