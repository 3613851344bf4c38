//! Dependent region/commune selection
//!
//! Two controls: an independent region selector and a commune selector whose
//! option list cascades from the region's current value. Every region change
//! re-fetches and fully replaces the commune options. Failures of any kind
//! degrade to an empty commune list; the page never surfaces an error.

#[cfg(feature = "hydrate")]
use crate::select::ChoiceOption;

/// Fixed element id of the region control.
pub const REGION_SELECT_SELECTOR: &str = "#id_region";
/// Fixed element id of the commune control.
pub const COMMUNE_SELECT_SELECTOR: &str = "#id_commune";

/// Attribute remembering the commune placeholder text. The widget clears the
/// inline placeholder option on every option replacement, so the text has to
/// survive outside the option list.
pub const PLACEHOLDER_ATTR: &str = "data-placeholder";

/// A region id is a non-empty string of ASCII digits.
pub fn is_valid_region_id(region_id: &str) -> bool {
    !region_id.is_empty() && region_id.bytes().all(|b| b.is_ascii_digit())
}

/// The commune search URL for a region, or `None` when the id does not
/// validate; no request is issued at all in that case.
pub fn commune_search_url(region_id: &str) -> Option<String> {
    is_valid_region_id(region_id)
        .then(|| format!("/regions/communes/search/?regionId={region_id}"))
}

/// Fetches the communes for a region.
///
/// An invalid id, a network failure, a non-2xx status, or a malformed body
/// all resolve to an empty list.
#[cfg(feature = "hydrate")]
pub async fn fetch_communes(region_id: &str) -> Vec<ChoiceOption> {
    let Some(url) = commune_search_url(region_id) else {
        log::debug!("Skipping commune fetch for non-integer region id {region_id:?}");
        return Vec::new();
    };

    let response = match gloo_net::http::Request::get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Commune fetch failed: {e}");
            return Vec::new();
        }
    };
    if !response.ok() {
        log::warn!("Commune fetch returned status {}", response.status());
        return Vec::new();
    }
    match response.json::<Vec<ChoiceOption>>().await {
        Ok(communes) => communes,
        Err(e) => {
            log::warn!("Malformed commune response: {e}");
            Vec::new()
        }
    }
}

#[cfg(feature = "hydrate")]
pub use wiring::init;

#[cfg(feature = "hydrate")]
mod wiring {
    use web_sys::{Document, HtmlSelectElement};

    use super::{fetch_communes, COMMUNE_SELECT_SELECTOR, PLACEHOLDER_ATTR, REGION_SELECT_SELECTOR};
    use crate::error::{Error, Result};
    use crate::select::widget::EnhancedSelect;
    use crate::select::{with_placeholder, Locale};

    /// Wires the dependent selection when both controls are on the page.
    pub fn init(document: &Document, locale: Locale) -> Result<()> {
        let region = query_select(document, REGION_SELECT_SELECTOR)?;
        let commune = query_select(document, COMMUNE_SELECT_SELECTOR)?;
        let (Some(region), Some(commune)) = (region, commune) else {
            return Ok(());
        };

        let region_widget = EnhancedSelect::attach(document, region, locale)?;
        // Capture the placeholder before the widget takes over the options.
        let commune_widget = EnhancedSelect::attach_with(document, commune, locale, |widget| {
            let native = widget.native();
            if let Some(placeholder) = native
                .query_selector("option[value='']")
                .ok()
                .flatten()
                .and_then(|option| option.text_content())
            {
                let _ = native.set_attribute(PLACEHOLDER_ATTR, &placeholder);
            }
        })?;

        refresh_communes(commune_widget.clone(), region_widget.value());

        region_widget.on_change(move |region_id| {
            refresh_communes(commune_widget.clone(), region_id.to_string());
        });

        Ok(())
    }

    /// Replaces the commune options for `region_id`.
    ///
    /// Each call is an independent in-flight task; there is no cancellation
    /// or generation guard, so the last response to resolve wins.
    fn refresh_communes(commune: EnhancedSelect, region_id: String) {
        commune.begin_loading();
        wasm_bindgen_futures::spawn_local(async move {
            let communes = fetch_communes(&region_id).await;
            let placeholder = commune.native().get_attribute(PLACEHOLDER_ATTR);
            let options = with_placeholder(communes, placeholder.as_deref());
            if let Err(e) = commune.set_choices(options) {
                log::warn!("Failed to replace commune options: {e}");
            }
        });
    }

    fn query_select(document: &Document, selector: &str) -> Result<Option<HtmlSelectElement>> {
        use wasm_bindgen::JsCast;
        let element = document
            .query_selector(selector)
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        Ok(element.map(|element| element.unchecked_into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{with_placeholder, ChoiceOption, OptionId};

    #[test]
    fn region_id_must_be_all_digits() {
        assert!(is_valid_region_id("12"));
        assert!(is_valid_region_id("0"));
        assert!(!is_valid_region_id("abc"));
        assert!(!is_valid_region_id("12a"));
        assert!(!is_valid_region_id("-1"));
        assert!(!is_valid_region_id(""));
        assert!(!is_valid_region_id("1 2"));
    }

    #[test]
    fn invalid_region_id_yields_no_url() {
        assert_eq!(commune_search_url("abc"), None);
        assert_eq!(commune_search_url(""), None);
    }

    #[test]
    fn valid_region_id_builds_search_url() {
        assert_eq!(
            commune_search_url("12").as_deref(),
            Some("/regions/communes/search/?regionId=12")
        );
    }

    #[test]
    fn placeholder_is_prepended_selected_before_fetched_communes() {
        let fetched = vec![ChoiceOption::new(1, "Alpha")];
        let options = with_placeholder(fetched, Some("Select a commune"));
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, OptionId::placeholder());
        assert_eq!(options[0].text, "Select a commune");
        assert!(options[0].selected);
        assert_eq!(options[1].id, OptionId::Number(1));
        assert_eq!(options[1].text, "Alpha");
    }
}
