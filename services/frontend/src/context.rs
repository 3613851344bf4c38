//! Backend page context
//!
//! The backend serializes a small read-only snapshot (static path, current
//! user) into a `json_script`-style element once per page render. It is
//! parsed once, camelized, and shared with every mounted island through
//! `provide_context`. There is exactly one context per page and it is never
//! refreshed.

use austral_casing::camelize_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Id of the element holding the serialized context in the page body.
pub const CONTEXT_ELEMENT_ID: &str = "backend-context-data";

/// The authenticated user, when the page was rendered for one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Backend data as exposed to mounted components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendContext {
    pub static_path: String,
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

/// Parses a serialized backend context.
///
/// The payload must be an object carrying a non-empty `static_path`; anything
/// else is a page-configuration error, not a runtime condition.
pub fn parse(json: &str) -> Result<BackendContext> {
    let raw: Value = serde_json::from_str(json)?;
    if raw.is_null() {
        return Err(Error::MissingContext);
    }

    let value = camelize_value(raw);
    let has_static_path = value
        .get("staticPath")
        .and_then(Value::as_str)
        .is_some_and(|path| !path.is_empty());
    if !has_static_path {
        return Err(Error::MissingStaticPath);
    }

    Ok(serde_json::from_value(value)?)
}

/// Parses the context from an optional payload source.
///
/// `None` models an absent context element and is fatal: views that mount
/// context-requiring components must always render the payload.
pub fn from_source(source: Option<&str>) -> Result<BackendContext> {
    match source {
        None => Err(Error::MissingContext),
        Some(json) => parse(json),
    }
}

/// Locates and parses the single context payload embedded in the document.
#[cfg(feature = "hydrate")]
pub fn load(document: &web_sys::Document) -> Result<BackendContext> {
    let source = document
        .get_element_by_id(CONTEXT_ELEMENT_ID)
        .and_then(|element| element.text_content());
    from_source(source.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_converts_keys_to_camel_case() {
        let context = parse(
            r#"{"static_path": "/static/", "user": {"id": 3, "email": "a@b.cl", "first_name": "Ada", "last_name": "Lovelace"}}"#,
        )
        .unwrap();
        assert_eq!(context.static_path, "/static/");
        let user = context.user.unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");
    }

    #[test]
    fn parse_accepts_anonymous_user() {
        let context = parse(r#"{"static_path": "/static/", "user": null}"#).unwrap();
        assert!(context.user.is_none());
    }

    #[test]
    fn parse_rejects_missing_static_path() {
        let err = parse(r#"{"user": null}"#).unwrap_err();
        assert!(matches!(err, Error::MissingStaticPath));
    }

    #[test]
    fn parse_rejects_empty_static_path() {
        let err = parse(r#"{"static_path": "", "user": null}"#).unwrap_err();
        assert!(matches!(err, Error::MissingStaticPath));
    }

    #[test]
    fn parse_rejects_null_payload() {
        let err = parse("null").unwrap_err();
        assert!(matches!(err, Error::MissingContext));
    }

    #[test]
    fn from_source_rejects_absent_payload() {
        let err = from_source(None).unwrap_err();
        assert!(matches!(err, Error::MissingContext));
    }

    #[test]
    fn from_source_propagates_parse_errors() {
        let err = from_source(Some("not json")).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
