//! Host-side tests for the loading pipeline: registration bookkeeping plus
//! payload camelization, exercised without a live document.

use std::cell::RefCell;
use std::rc::Rc;

use austral_casing::camelize_value;
use austral_frontend::registry::{ComponentRegistry, JsonProps};

#[test]
fn last_registration_per_selector_wins() {
    let mounted = Rc::new(RefCell::new(Vec::new()));

    let mut registry = ComponentRegistry::new();
    let log = Rc::clone(&mounted);
    registry.register(".island", move |_| log.borrow_mut().push("first"));
    let log = Rc::clone(&mounted);
    registry.register(".island", move |_| log.borrow_mut().push("second"));

    assert_eq!(registry.len(), 1);
    let constructor = registry.constructor_for(".island").unwrap();
    let _ = constructor(None);
    assert_eq!(*mounted.borrow(), vec!["second"]);
}

#[test]
fn camelized_payload_reaches_the_constructor() {
    let received = Rc::new(RefCell::new(None));

    let mut registry = ComponentRegistry::new();
    let slot = Rc::clone(&received);
    registry.register(".island", move |props: Option<JsonProps>| {
        *slot.borrow_mut() = props.map(|p| p.json);
    });

    // The hydrator camelizes embedded JSON before handing it over.
    let raw: serde_json::Value =
        serde_json::from_str(r#"{"backend_parameter_1": "a", "nested-key": {"first_name": "b"}}"#)
            .unwrap();
    let constructor = registry.constructor_for(".island").unwrap();
    let _ = constructor(Some(JsonProps {
        json: camelize_value(raw),
    }));

    let json = received.borrow_mut().take().unwrap();
    assert_eq!(json["backendParameter1"], "a");
    assert_eq!(json["nestedKey"]["firstName"], "b");
}

#[test]
fn components_without_payload_reference_mount_with_no_input() {
    let saw_input = Rc::new(RefCell::new(Some(true)));

    let mut registry = ComponentRegistry::new();
    let slot = Rc::clone(&saw_input);
    registry.register(".island", move |props: Option<JsonProps>| {
        *slot.borrow_mut() = Some(props.is_some());
    });

    let constructor = registry.constructor_for(".island").unwrap();
    let _ = constructor(None);
    assert_eq!(*saw_input.borrow(), Some(false));
}
