//! Example auto-loadable component
//!
//! A small island that accepts a JSON payload serialized by the backend next
//! to its container. Components with no payload work too; see the registry
//! for the loading rules.

use leptos::prelude::*;
use serde::Deserialize;

use crate::context::BackendContext;
use crate::registry::{ComponentRegistry, JsonProps};

/// Selector of the containers this component mounts into.
pub const EXAMPLE_CARD_SELECTOR: &str = ".example-card-container";

/// Payload shape rendered by the card, camelized from the backend JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCardData {
    #[serde(default)]
    pub backend_parameter1: String,
    #[serde(default)]
    pub backend_parameter2: String,
}

#[component]
pub fn ExampleCard(data: ExampleCardData) -> impl IntoView {
    let (count, set_count) = signal(0u32);
    let greeting = use_context::<BackendContext>()
        .and_then(|context| context.user)
        .map(|user| format!("Signed in as {} {}", user.first_name, user.last_name));

    view! {
        <div class="example-card d-inline-block p-3 shadow-sm border rounded">
            <p>
                "This island reads "
                <span class="badge bg-success">{data.backend_parameter1}</span>
            </p>
            {greeting.map(|text| view! { <p class="text-muted">{text}</p> })}
            <button
                type="button"
                class="btn btn-primary"
                on:click=move |_| set_count.update(|count| *count += 1)
            >
                {data.backend_parameter2}
                " "
                <span class="badge bg-secondary ml-5">{count}</span>
            </button>
        </div>
    }
}

/// Registers the components shipped with this bundle.
pub fn register_defaults(registry: &mut ComponentRegistry) {
    registry.register(EXAMPLE_CARD_SELECTOR, |props: Option<JsonProps>| {
        let data = match props {
            Some(props) => match serde_json::from_value(props.json) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("Example card payload has an unexpected shape: {e}");
                    ExampleCardData::default()
                }
            },
            None => ExampleCardData::default(),
        };
        view! { <ExampleCard data /> }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_register_the_example_card() {
        let mut registry = ComponentRegistry::new();
        register_defaults(&mut registry);
        assert!(registry.is_registered(EXAMPLE_CARD_SELECTOR));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn payload_deserializes_from_camelized_json() {
        let data: ExampleCardData = serde_json::from_value(serde_json::json!({
            "backendParameter1": "a",
            "backendParameter2": "b"
        }))
        .unwrap();
        assert_eq!(data.backend_parameter1, "a");
        assert_eq!(data.backend_parameter2, "b");
    }
}
