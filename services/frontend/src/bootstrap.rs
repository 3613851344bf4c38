//! Page-load wiring: alert highlighting and dismissal, submit-button
//! disabling, loading indicators.

/// Milliseconds before the alerts in the main alert region are dismissed.
pub const ALERT_DISMISS_MS: u32 = 10_000;
/// Milliseconds before the highlight class gives way to the dim class.
pub const HIGHLIGHT_SWAP_MS: u32 = 15;
/// Milliseconds before the residual dim class is removed.
pub const HIGHLIGHT_CLEAR_MS: u32 = 1_010;

/// Submit controls carrying this class are left enabled on submit.
pub const KEEP_ENABLED_CLASS: &str = "js-do-not-disable-on-submit";

/// Whether a form control gets disabled after its form is submitted.
///
/// Only controls with an explicit `type="submit"` attribute qualify, and the
/// opt-out class ([`KEEP_ENABLED_CLASS`]) exempts a control regardless of
/// type.
pub fn should_disable_on_submit(type_attr: Option<&str>, opted_out: bool) -> bool {
    type_attr == Some("submit") && !opted_out
}

/// Rounds and formats a number with `.` as the thousands separator.
pub fn thousand_separator(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    let offset = digits.len() % 3;
    for (index, c) in digits.chars().enumerate() {
        if index != 0 && (index + 3 - offset) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(feature = "hydrate")]
pub use wiring::{hide_loading, highlight, init_alerts, init_forms, show_loading};

#[cfg(feature = "hydrate")]
mod wiring {
    use gloo_timers::callback::Timeout;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

    use super::{
        should_disable_on_submit, ALERT_DISMISS_MS, HIGHLIGHT_CLEAR_MS, HIGHLIGHT_SWAP_MS,
        KEEP_ENABLED_CLASS,
    };
    use crate::dom;
    use crate::error::{Error, Result};

    /// Applies the transient highlight: `highlight` now, swapped for `dim`
    /// after a short delay, with the residual `dim` removed later.
    pub fn highlight(element: &Element) {
        let _ = element.class_list().add_1("highlight");

        let swapped = element.clone();
        Timeout::new(HIGHLIGHT_SWAP_MS, move || {
            let _ = swapped.class_list().add_1("dim");
            let _ = swapped.class_list().remove_1("highlight");
        })
        .forget();

        let cleared = element.clone();
        Timeout::new(HIGHLIGHT_CLEAR_MS, move || {
            let _ = cleared.class_list().remove_1("dim");
        })
        .forget();
    }

    /// Marks the page as busy and attaches a spinner to `element` unless it
    /// already carries one.
    pub fn show_loading(document: &Document, element: &Element) {
        if let Some(body) = document.body() {
            let _ = body.class_list().add_1("wait");
        }
        if element.query_selector(".loading-icon").ok().flatten().is_none() {
            let _ = element.insert_adjacent_html(
                "beforeend",
                "<span class=\"fas fa-spinner fa-spin loading-icon\" aria-hidden=\"true\"></span>",
            );
        }
    }

    /// Clears the page-level busy marker.
    pub fn hide_loading(document: &Document) {
        if let Some(body) = document.body() {
            let _ = body.class_list().remove_1("wait");
        }
    }

    /// Highlights every alert on the page and schedules the dismissal of the
    /// alerts inside the main alert region.
    ///
    /// Dismissal is idempotent: an alert removed earlier (e.g. by the user)
    /// no longer matches the query and is simply skipped.
    pub fn init_alerts(document: &Document) -> Result<()> {
        let alerts = document
            .query_selector_all(".alert")
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        for index in 0..alerts.length() {
            if let Some(alert) = alerts.get(index) {
                highlight(alert.unchecked_ref());
            }
        }

        let document = document.clone();
        Timeout::new(ALERT_DISMISS_MS, move || {
            let Ok(main_alerts) = document.query_selector_all(".main-alert .alert") else {
                return;
            };
            for index in 0..main_alerts.length() {
                if let Some(alert) = main_alerts.get(index) {
                    let alert: &Element = alert.unchecked_ref();
                    alert.remove();
                }
            }
        })
        .forget();

        Ok(())
    }

    /// Disables submit controls once their form is submitted, to prevent
    /// duplicate submissions. Native submit handling proceeds untouched.
    pub fn init_forms(document: &Document) -> Result<()> {
        let forms = document
            .query_selector_all("form")
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        for index in 0..forms.length() {
            let Some(node) = forms.get(index) else {
                continue;
            };
            let form: web_sys::HtmlFormElement = node.unchecked_into();
            let document = document.clone();
            let controls = form.elements();
            dom::listen(form.as_ref(), "submit", move |_| {
                for control in 0..controls.length() {
                    let Some(element) = controls.item(control) else {
                        continue;
                    };
                    let type_attr = element.get_attribute("type");
                    let opted_out = element.class_list().contains(KEEP_ENABLED_CLASS);
                    if !should_disable_on_submit(type_attr.as_deref(), opted_out) {
                        continue;
                    }
                    // Disable after submit so submit inputs with values still
                    // make it into the request.
                    if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
                        button.set_disabled(true);
                    } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                        input.set_disabled(true);
                    }
                    show_loading(&document, &element);
                }
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousand_separator_groups_by_three() {
        assert_eq!(thousand_separator(1_234_567.0), "1.234.567");
        assert_eq!(thousand_separator(999.0), "999");
        assert_eq!(thousand_separator(1_000.0), "1.000");
    }

    #[test]
    fn thousand_separator_rounds_first() {
        assert_eq!(thousand_separator(1_234.6), "1.235");
    }

    #[test]
    fn thousand_separator_handles_negatives_and_zero() {
        assert_eq!(thousand_separator(0.0), "0");
        assert_eq!(thousand_separator(-1_234_567.0), "-1.234.567");
    }

    #[test]
    fn submit_controls_are_disabled_after_submit() {
        assert!(should_disable_on_submit(Some("submit"), false));
    }

    #[test]
    fn opted_out_submit_controls_stay_enabled() {
        assert!(!should_disable_on_submit(Some("submit"), true));
    }

    #[test]
    fn non_submit_controls_are_never_disabled() {
        assert!(!should_disable_on_submit(Some("text"), false));
        assert!(!should_disable_on_submit(Some("button"), false));
        assert!(!should_disable_on_submit(None, false));
        assert!(!should_disable_on_submit(None, true));
    }
}
