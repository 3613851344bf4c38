//! RUT input formatting
//!
//! Reformats Chilean RUT fields as the user types (`12345678K` becomes
//! `12.345.678-K`) and marks the field valid or invalid against the modulo-11
//! verifier digit once it loses focus.

/// Inputs opted into the behavior.
pub const RUT_INPUT_SELECTOR: &str = "input.js-rut";

/// Strips everything but digits and a verifier `K`, uppercased.
pub fn clean_rut(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Computes the modulo-11 verifier digit for a RUT body.
pub fn verifier_digit(body: &str) -> Option<char> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut factor = 2u32;
    let mut sum = 0u32;
    for digit in body.bytes().rev() {
        sum += u32::from(digit - b'0') * factor;
        factor = if factor == 7 { 2 } else { factor + 1 };
    }
    Some(match 11 - (sum % 11) {
        11 => '0',
        10 => 'K',
        n => char::from_digit(n, 10).unwrap_or('0'),
    })
}

/// Formats a raw value as `NN.NNN.NNN-V`. Values too short to carry a
/// verifier digit are returned cleaned but unformatted.
pub fn format_rut(input: &str) -> String {
    let cleaned = clean_rut(input);
    if cleaned.len() < 2 {
        return cleaned;
    }
    let (body, verifier) = cleaned.split_at(cleaned.len() - 1);

    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);
    let offset = body.len() % 3;
    for (index, c) in body.chars().enumerate() {
        if index != 0 && (index + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{grouped}-{verifier}")
}

/// Whether the value carries a correct verifier digit.
pub fn is_valid_rut(input: &str) -> bool {
    let cleaned = clean_rut(input);
    if cleaned.len() < 2 {
        return false;
    }
    let (body, verifier) = cleaned.split_at(cleaned.len() - 1);
    verifier_digit(body) == verifier.chars().next()
}

#[cfg(feature = "hydrate")]
pub use wiring::init;

#[cfg(feature = "hydrate")]
mod wiring {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlInputElement};

    use super::{format_rut, is_valid_rut, RUT_INPUT_SELECTOR};
    use crate::dom;
    use crate::error::{Error, Result};

    /// Wires reformat-on-input and validate-on-blur for every RUT field.
    pub fn init(document: &Document) -> Result<()> {
        let nodes = document
            .query_selector_all(RUT_INPUT_SELECTOR)
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        for index in 0..nodes.length() {
            let Some(node) = nodes.get(index) else {
                continue;
            };
            let input: HtmlInputElement = node.unchecked_into();

            let field = input.clone();
            dom::listen(input.as_ref(), "input", move |_| {
                field.set_value(&format_rut(&field.value()));
            })?;

            let field = input.clone();
            dom::listen(input.as_ref(), "blur", move |_| {
                let class_list = field.class_list();
                if field.value().is_empty() {
                    let _ = class_list.remove_1("is-valid");
                    let _ = class_list.remove_1("is-invalid");
                } else if is_valid_rut(&field.value()) {
                    let _ = class_list.add_1("is-valid");
                    let _ = class_list.remove_1("is-invalid");
                } else {
                    let _ = class_list.add_1("is-invalid");
                    let _ = class_list.remove_1("is-valid");
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
    fn clean_strips_formatting() {
        assert_eq!(clean_rut("12.345.678-5"), "123456785");
        assert_eq!(clean_rut("9.876.543-k"), "9876543K");
        assert_eq!(clean_rut("abc"), "");
    }

    #[test]
    fn verifier_digit_known_values() {
        assert_eq!(verifier_digit("12345678"), Some('5'));
        assert_eq!(verifier_digit("7775777"), Some('5'));
        assert_eq!(verifier_digit(""), None);
        assert_eq!(verifier_digit("12a"), None);
    }

    #[test]
    fn format_groups_thousands_and_dashes_verifier() {
        assert_eq!(format_rut("123456785"), "12.345.678-5");
        assert_eq!(format_rut("12345678-5"), "12.345.678-5");
        assert_eq!(format_rut("1"), "1");
        assert_eq!(format_rut(""), "");
        assert_eq!(format_rut("19"), "1-9");
    }

    #[test]
    fn validity_checks_the_verifier() {
        assert!(is_valid_rut("12.345.678-5"));
        assert!(!is_valid_rut("12.345.678-6"));
        assert!(!is_valid_rut("x"));
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_rut("123456785");
        assert_eq!(format_rut(&once), once);
    }
}
