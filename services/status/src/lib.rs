//! Status page bundle
//!
//! Standalone diagnostics entry: verifies that the deployment serves a
//! favicon and a social-preview image of acceptable dimensions, and reveals
//! the matching result rows on the status page.

/// Minimum acceptable width of the social-preview image; it must also be
/// square.
pub const MIN_PREVIEW_WIDTH: u32 = 1080;

/// Outcome of the social-preview dimension check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAssessment {
    Ok,
    TooSmall,
    NotSquare,
}

/// Checks loaded image dimensions against the static thresholds.
pub fn assess_preview(width: u32, height: u32) -> PreviewAssessment {
    if width < MIN_PREVIEW_WIDTH {
        PreviewAssessment::TooSmall
    } else if width != height {
        PreviewAssessment::NotSquare
    } else {
        PreviewAssessment::Ok
    }
}

/// Entry point for the WASM client.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::error!("No document in scope; status checks skipped");
        return;
    };

    if document.ready_state() == web_sys::DocumentReadyState::Loading {
        use wasm_bindgen::JsCast;
        let deferred = document.clone();
        let callback = wasm_bindgen::prelude::Closure::<dyn FnMut(web_sys::Event)>::new(
            move |_| page::run(&deferred),
        );
        if document
            .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("Failed to defer status checks to page load");
        }
        callback.forget();
    } else {
        page::run(&document);
    }
}

#[cfg(feature = "hydrate")]
mod page {
    use wasm_bindgen::prelude::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlImageElement, HtmlLinkElement, HtmlMetaElement};

    use super::{assess_preview, PreviewAssessment};

    pub fn run(document: &Document) {
        check_favicon(document);
        check_preview_image(document);
    }

    fn check_favicon(document: &Document) {
        let favicon = document
            .query_selector("[rel=icon]")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlLinkElement>().ok());
        match favicon {
            Some(link) if !link.href().is_empty() => {
                reveal(document, ".favicon-ok");
                set_text(document, ".favicon-href", &link.href());
            }
            _ => reveal(document, ".favicon-not-ok"),
        }
    }

    fn check_preview_image(document: &Document) {
        let meta = document
            .query_selector("meta[name=\"og:image\"]")
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlMetaElement>().ok());
        let content = match meta {
            Some(meta) if !meta.content().is_empty() => meta.content(),
            _ => {
                reveal(document, ".ogImage-not-ok");
                return;
            }
        };

        let Ok(image) = HtmlImageElement::new() else {
            reveal(document, ".ogImage-not-ok");
            return;
        };

        let doc = document.clone();
        let loaded = image.clone();
        let shown = content.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            conceal(&doc, ".ogImage-not-ok");
            match assess_preview(loaded.width(), loaded.height()) {
                PreviewAssessment::Ok => {
                    reveal(&doc, ".ogImage-ok");
                    set_text(&doc, ".ogImage-content", &shown);
                }
                PreviewAssessment::TooSmall | PreviewAssessment::NotSquare => {
                    reveal(&doc, ".ogImage-warning");
                }
            }
        });
        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
        image.set_src(&content);

        // Reads as failed until the load settles; the onload handler clears
        // it when the image actually arrives.
        reveal(document, ".ogImage-not-ok");
    }

    fn reveal(document: &Document, selector: &str) {
        if let Ok(Some(element)) = document.query_selector(selector) {
            let _ = element.class_list().remove_1("d-none");
        }
    }

    fn conceal(document: &Document, selector: &str) {
        if let Ok(Some(element)) = document.query_selector(selector) {
            let _ = element.class_list().add_1("d-none");
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Ok(Some(element)) = document.query_selector(selector) {
            element.set_text_content(Some(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn large_square_preview_is_ok() {
        assert_eq!(assess_preview(1080, 1080), PreviewAssessment::Ok);
        assert_eq!(assess_preview(2048, 2048), PreviewAssessment::Ok);
    }

    #[test]
    fn narrow_preview_is_too_small() {
        assert_eq!(assess_preview(1079, 1079), PreviewAssessment::TooSmall);
        assert_eq!(assess_preview(600, 1200), PreviewAssessment::TooSmall);
    }

    #[test]
    fn non_square_preview_is_flagged() {
        assert_eq!(assess_preview(1920, 1080), PreviewAssessment::NotSquare);
    }
}
