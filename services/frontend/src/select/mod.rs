//! Enhanced selection controls
//!
//! A searchable dropdown widget layered over a native `<select>`, keeping the
//! native control as the data source. This module holds the DOM-free parts
//! (option model, localization, validation-state decision, search filtering)
//! so they can be exercised without a live document; the widget itself lives
//! in [`widget`].

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "hydrate")]
pub mod widget;

/// Upper bound on rendered search results.
pub const SEARCH_RESULT_LIMIT: usize = 100;

/// Class marking a pre-validated valid control.
pub const SELECT_VALID_CLASS: &str = "is-valid";
/// Class marking a pre-validated invalid control.
pub const SELECT_INVALID_CLASS: &str = "is-invalid";
/// Ancestor marker for a form under live validation.
pub const VALIDATED_FORM_SELECTOR: &str = ".was-validated";

/// Option identifier: a backend integer id, or the empty-string sentinel
/// reserved for the client-injected placeholder option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    Number(i64),
    Text(String),
}

impl OptionId {
    /// The synthetic empty-id sentinel.
    pub fn placeholder() -> Self {
        OptionId::Text(String::new())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, OptionId::Text(text) if text.is_empty())
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionId::Number(id) => write!(f, "{id}"),
            OptionId::Text(text) => f.write_str(text),
        }
    }
}

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: OptionId,
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

impl ChoiceOption {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        ChoiceOption {
            id: OptionId::Number(id),
            text: text.into(),
            selected: false,
        }
    }
}

/// Prepends the selected placeholder option when a placeholder text is known.
pub fn with_placeholder(options: Vec<ChoiceOption>, placeholder: Option<&str>) -> Vec<ChoiceOption> {
    match placeholder {
        None => options,
        Some(text) => {
            let mut all = Vec::with_capacity(options.len() + 1);
            all.push(ChoiceOption {
                id: OptionId::placeholder(),
                text: text.to_string(),
                selected: true,
            });
            all.extend(options);
            all
        }
    }
}

/// Filters options by a case-insensitive substring match on the label.
///
/// Option order is preserved (the widget never re-sorts). A non-empty query
/// caps the result list at [`SEARCH_RESULT_LIMIT`].
pub fn search_filter<'a>(options: &'a [ChoiceOption], query: &str) -> Vec<&'a ChoiceOption> {
    if query.is_empty() {
        return options.iter().collect();
    }
    let needle = query.to_lowercase();
    options
        .iter()
        .filter(|option| option.text.to_lowercase().contains(&needle))
        .take(SEARCH_RESULT_LIMIT)
        .collect()
}

/// Widget display language, derived from the document's `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Unknown or absent languages fall back to English.
    pub fn from_document_lang(lang: &str) -> Self {
        match lang.split(['-', '_']).next().unwrap_or_default() {
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }

    pub fn loading_text(&self) -> &'static str {
        match self {
            Locale::En => "Loading...",
            Locale::Es => "Cargando...",
        }
    }

    pub fn no_results_text(&self) -> &'static str {
        match self {
            Locale::En => "No results found",
            Locale::Es => "No se encontraron resultados",
        }
    }

    pub fn no_choices_text(&self) -> &'static str {
        match self {
            Locale::En => "No choices to choose from",
            Locale::Es => "No hay opciones para elegir",
        }
    }

    pub fn item_select_text(&self) -> &'static str {
        ""
    }

    pub fn search_placeholder(&self) -> &'static str {
        match self {
            Locale::En => "Search",
            Locale::Es => "Buscar",
        }
    }

    /// Parameterized prompt shown when a typed value can be added as an item.
    pub fn add_item_text(&self, value: &str) -> String {
        match self {
            Locale::En => format!("Press Enter to add \"{value}\""),
            Locale::Es => format!("Presione Enter para agregar \"{value}\""),
        }
    }

    /// Parameterized notice shown when the selection limit is reached.
    pub fn max_item_text(&self, max_item_count: usize) -> String {
        match self {
            Locale::En => format!("Only {max_item_count} values can be added"),
            Locale::Es => format!("Sólo se pueden agregar {max_item_count} valores"),
        }
    }
}

/// Visual validation marker applied to the widget's outer container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMarker {
    Valid,
    Invalid,
}

impl ValidationMarker {
    pub fn class(&self) -> &'static str {
        match self {
            ValidationMarker::Valid => SELECT_VALID_CLASS,
            ValidationMarker::Invalid => SELECT_INVALID_CLASS,
        }
    }
}

/// Observed validation state of the native control at initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationInputs {
    /// The control carries the invalid marker class.
    pub has_invalid_class: bool,
    /// The control carries the valid marker class.
    pub has_valid_class: bool,
    /// Native constraint validation reports the control invalid.
    pub is_invalid: bool,
    /// Native constraint validation reports the control valid.
    pub is_valid: bool,
    /// The control sits inside a form under live validation.
    pub in_validated_form: bool,
}

/// Decides which marker, if any, the widget container should carry.
///
/// A pre-applied marker class wins; otherwise native validity only counts
/// inside a form under live validation.
pub fn validation_marker(inputs: ValidationInputs) -> Option<ValidationMarker> {
    if inputs.has_invalid_class || (inputs.in_validated_form && inputs.is_invalid) {
        Some(ValidationMarker::Invalid)
    } else if inputs.has_valid_class || (inputs.in_validated_form && inputs.is_valid) {
        Some(ValidationMarker::Valid)
    } else {
        None
    }
}
