//! Searchable dropdown widget over a native `<select>`
//!
//! The widget replaces the control's visible affordance while keeping the
//! native select as the data source: every selection change is written back
//! to the native options and re-dispatched as a bubbling `change` event, so
//! forms and validation keep working unchanged.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, HtmlOptionElement, HtmlSelectElement};

use crate::dom;
use crate::error::{Error, Result};

use super::{
    search_filter, validation_marker, ChoiceOption, Locale, OptionId, ValidationInputs,
    SELECT_INVALID_CLASS, SELECT_VALID_CLASS, VALIDATED_FORM_SELECTOR,
};

/// Selects picked up by the page-wide auto-enhancement. The region and
/// commune controls are wired separately by the dependent-region behavior.
pub const AUTO_ENHANCE_SELECTOR: &str =
    "select:not(.js-not-choices):not(#id_region):not(#id_commune)";

const OUTER_CLASS: &str = "choices";
const OPEN_CLASS: &str = "is-open";
const PLACEHOLDER_HIDDEN_CLASS: &str = "choices__input--placeholder-hidden";
const CHOICE_ID_ATTR: &str = "data-choice-id";

/// Handle to an enhanced selection control.
///
/// Cheap to clone; all clones drive the same widget. The widget's lifecycle
/// is bound to the native control's presence in the document.
#[derive(Clone)]
pub struct EnhancedSelect {
    inner: Rc<Inner>,
}

struct Inner {
    document: Document,
    select: HtmlSelectElement,
    outer: Element,
    selected_list: Element,
    search_input: HtmlInputElement,
    dropdown: Element,
    locale: Locale,
    multiple: bool,
    placeholder: Option<String>,
    options: RefCell<Vec<ChoiceOption>>,
    change_handlers: RefCell<Vec<Rc<dyn Fn(&str)>>>,
}

impl EnhancedSelect {
    /// Builds the widget around `select` and initializes its state from the
    /// control's current options.
    pub fn attach(document: &Document, select: HtmlSelectElement, locale: Locale) -> Result<Self> {
        Self::attach_with(document, select, locale, |_| {})
    }

    /// Like [`attach`](Self::attach), with an explicit initialization
    /// callback receiving the constructed handle.
    pub fn attach_with(
        document: &Document,
        select: HtmlSelectElement,
        locale: Locale,
        on_init: impl FnOnce(&EnhancedSelect),
    ) -> Result<Self> {
        let multiple = select.multiple();
        let placeholder = select
            .query_selector("option[value='']")
            .ok()
            .flatten()
            .and_then(|option| option.text_content());
        let options = read_native_options(&select);

        let outer = create_div(document, OUTER_CLASS)?;
        outer
            .set_attribute(
                "data-type",
                if multiple { "select-multiple" } else { "select-one" },
            )
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        let inner_el = create_div(document, "choices__inner")?;
        let selected_list = create_div(
            document,
            if multiple {
                "choices__list choices__list--multiple"
            } else {
                "choices__list choices__list--single"
            },
        )?;
        let search_input: HtmlInputElement = document
            .create_element("input")
            .map_err(|e| Error::dom(format!("{e:?}")))?
            .unchecked_into();
        search_input.set_class_name("choices__input");
        search_input
            .set_attribute("type", "search")
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        // For multi-selects the placeholder option doubles as the search
        // input's placeholder; its visibility is managed on every change.
        match (&placeholder, multiple) {
            (Some(text), true) => search_input.set_placeholder(text),
            _ => search_input.set_placeholder(locale.search_placeholder()),
        }
        let dropdown = create_div(document, "choices__list choices__list--dropdown")?;

        select
            .insert_adjacent_element("beforebegin", &outer)
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        append(&outer, &inner_el)?;
        append(&inner_el, &select)?;
        append(&inner_el, &selected_list)?;
        append(&inner_el, &search_input)?;
        append(&outer, &dropdown)?;

        select
            .class_list()
            .add_1("choices__select--hidden")
            .map_err(|e| Error::dom(format!("{e:?}")))?;
        select
            .set_attribute("tabindex", "-1")
            .map_err(|e| Error::dom(format!("{e:?}")))?;

        let widget = EnhancedSelect {
            inner: Rc::new(Inner {
                document: document.clone(),
                select,
                outer,
                selected_list,
                search_input,
                dropdown,
                locale,
                multiple,
                placeholder,
                options: RefCell::new(options),
                change_handlers: RefCell::new(Vec::new()),
            }),
        };

        widget.wire_listeners()?;
        widget.apply_initial_validation()?;
        widget.update_placeholder_visibility();
        widget.render_selected();
        widget.render_dropdown();

        on_init(&widget);
        Ok(widget)
    }

    /// The native control's current value.
    pub fn value(&self) -> String {
        self.inner.select.value()
    }

    /// Ids of all selected options, placeholder excluded.
    pub fn values(&self) -> Vec<String> {
        self.inner
            .options
            .borrow()
            .iter()
            .filter(|option| option.selected && !option.id.is_placeholder())
            .map(|option| option.id.to_string())
            .collect()
    }

    /// The widget's search input element.
    pub fn search_input(&self) -> HtmlInputElement {
        self.inner.search_input.clone()
    }

    /// The wrapped native control.
    pub fn native(&self) -> HtmlSelectElement {
        self.inner.select.clone()
    }

    /// Replaces the full option list, rebuilding the native options.
    pub fn set_choices(&self, options: Vec<ChoiceOption>) -> Result<()> {
        *self.inner.options.borrow_mut() = options;
        self.sync_native()?;
        self.update_placeholder_visibility();
        self.render_selected();
        self.render_dropdown();
        Ok(())
    }

    /// Shows a localized loading notice in the dropdown until the next
    /// option-list replacement.
    pub fn begin_loading(&self) {
        self.render_notice(self.inner.locale.loading_text());
    }

    /// Registers a handler invoked with the control's new value after every
    /// widget-driven selection change.
    pub fn on_change(&self, handler: impl Fn(&str) + 'static) {
        self.inner
            .change_handlers
            .borrow_mut()
            .push(Rc::new(handler));
    }

    fn wire_listeners(&self) -> Result<()> {
        let search_target: &web_sys::EventTarget = self.inner.search_input.as_ref();
        let this = self.clone();
        dom::listen(search_target, "input", move |_| this.render_dropdown())?;

        let this = self.clone();
        dom::listen(search_target, "focus", move |_| {
            let _ = this.inner.outer.class_list().add_1(OPEN_CLASS);
            this.render_dropdown();
        })?;

        let this = self.clone();
        dom::listen(self.inner.dropdown.as_ref(), "click", move |event| {
            if let Some(id) = choice_id_from_event(&event, ".choices__item") {
                this.choose(&id);
            }
        })?;

        let this = self.clone();
        dom::listen(self.inner.selected_list.as_ref(), "click", move |event| {
            let target = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok());
            let Some(target) = target else { return };
            if dom::closest_parent(&target, ".choices__button").is_some() {
                if let Some(id) = choice_id_from_event(&event, ".choices__item") {
                    this.unselect(&id);
                }
            }
        })?;

        Ok(())
    }

    fn choose(&self, id: &str) {
        {
            let mut options = self.inner.options.borrow_mut();
            if self.inner.multiple {
                if let Some(option) = options.iter_mut().find(|o| o.id.to_string() == id) {
                    option.selected = true;
                }
            } else {
                for option in options.iter_mut() {
                    option.selected = option.id.to_string() == id;
                }
            }
        }
        if let Err(e) = self.sync_native() {
            log::warn!("Failed to sync native select: {e}");
        }
        if !self.inner.multiple {
            let _ = self.inner.outer.class_list().remove_1(OPEN_CLASS);
            self.inner.search_input.set_value("");
        }
        self.after_selection_change();
    }

    fn unselect(&self, id: &str) {
        {
            let mut options = self.inner.options.borrow_mut();
            if let Some(option) = options.iter_mut().find(|o| o.id.to_string() == id) {
                option.selected = false;
            }
        }
        if let Err(e) = self.sync_native() {
            log::warn!("Failed to sync native select: {e}");
        }
        self.after_selection_change();
    }

    fn after_selection_change(&self) {
        self.update_placeholder_visibility();
        self.render_selected();
        self.render_dropdown();
        if let Err(e) = dom::dispatch_bubbling(self.inner.select.as_ref(), "change") {
            log::warn!("Failed to dispatch change event: {e}");
        }
        let value = self.value();
        let handlers: Vec<_> = self.inner.change_handlers.borrow().clone();
        for handler in handlers {
            handler(&value);
        }
    }

    /// Rebuilds the native option elements from the widget's option list.
    /// Labels always land as text content, never as markup.
    fn sync_native(&self) -> Result<()> {
        let select = &self.inner.select;
        select.set_inner_html("");
        for option in self.inner.options.borrow().iter() {
            let element: HtmlOptionElement = self
                .inner
                .document
                .create_element("option")
                .map_err(|e| Error::dom(format!("{e:?}")))?
                .unchecked_into();
            element.set_value(&option.id.to_string());
            element.set_text_content(Some(&option.text));
            element.set_default_selected(option.selected);
            element.set_selected(option.selected);
            append(select, &element)?;
        }
        Ok(())
    }

    fn render_selected(&self) {
        let list = &self.inner.selected_list;
        list.set_inner_html("");
        let options = self.inner.options.borrow();
        for option in options.iter().filter(|o| o.selected) {
            // Multi-select items render with a per-item remove affordance;
            // the single-select item is the visible current value (which may
            // be the placeholder).
            if self.inner.multiple && option.id.is_placeholder() {
                continue;
            }
            let Ok(item) = create_div(&self.inner.document, "choices__item") else {
                continue;
            };
            let _ = item.set_attribute(CHOICE_ID_ATTR, &option.id.to_string());
            item.set_text_content(Some(&option.text));
            if self.inner.multiple {
                if let Ok(button) = self.inner.document.create_element("button") {
                    button.set_class_name("choices__button");
                    let _ = button.set_attribute("type", "button");
                    button.set_text_content(Some("Remove item"));
                    let _ = item.append_child(&button);
                }
            }
            let _ = list.append_child(&item);
        }
    }

    fn render_dropdown(&self) {
        let options = self.inner.options.borrow();
        if options.is_empty() {
            self.render_notice(self.inner.locale.no_choices_text());
            return;
        }
        let query = self.inner.search_input.value();
        let hits = search_filter(&options, &query);
        if hits.is_empty() {
            self.render_notice(self.inner.locale.no_results_text());
            return;
        }
        self.inner.dropdown.set_inner_html("");
        for hit in hits {
            let Ok(item) = create_div(&self.inner.document, "choices__item choices__item--choice")
            else {
                continue;
            };
            let _ = item.set_attribute(CHOICE_ID_ATTR, &hit.id.to_string());
            item.set_text_content(Some(&hit.text));
            let _ = self.inner.dropdown.append_child(&item);
        }
    }

    fn render_notice(&self, text: &str) {
        self.inner.dropdown.set_inner_html("");
        if let Ok(notice) = create_div(&self.inner.document, "choices__notice") {
            notice.set_text_content(Some(text));
            let _ = self.inner.dropdown.append_child(&notice);
        }
    }

    /// Hides the multi-select placeholder once anything is selected and
    /// restores it when the selection empties again.
    fn update_placeholder_visibility(&self) {
        if !self.inner.multiple || self.inner.placeholder.is_none() {
            return;
        }
        let class_list = self.inner.search_input.class_list();
        if self.values().is_empty() {
            let _ = class_list.remove_1(PLACEHOLDER_HIDDEN_CLASS);
        } else {
            let _ = class_list.add_1(PLACEHOLDER_HIDDEN_CLASS);
        }
    }

    fn apply_initial_validation(&self) -> Result<()> {
        let select = &self.inner.select;
        let inputs = ValidationInputs {
            has_invalid_class: select.class_list().contains(SELECT_INVALID_CLASS),
            has_valid_class: select.class_list().contains(SELECT_VALID_CLASS),
            is_invalid: select.matches(":invalid").unwrap_or(false),
            is_valid: select.matches(":valid").unwrap_or(false),
            in_validated_form: dom::closest_parent(&self.inner.outer, VALIDATED_FORM_SELECTOR)
                .is_some(),
        };

        if let Some(marker) = validation_marker(inputs) {
            self.inner
                .outer
                .class_list()
                .add_1(marker.class())
                .map_err(|e| Error::dom(format!("{e:?}")))?;
        }

        // Under live form validation the marker follows native validity on
        // every value change.
        if inputs.in_validated_form {
            let this = self.clone();
            dom::listen(select.as_ref(), "change", move |_| this.revalidate())?;
        }
        Ok(())
    }

    fn revalidate(&self) {
        let class_list = self.inner.outer.class_list();
        if self.inner.select.matches(":invalid").unwrap_or(false) {
            let _ = class_list.add_1(SELECT_INVALID_CLASS);
            let _ = class_list.remove_1(SELECT_VALID_CLASS);
        } else {
            let _ = class_list.add_1(SELECT_VALID_CLASS);
            let _ = class_list.remove_1(SELECT_INVALID_CLASS);
        }
    }
}

/// Enhances every select on the page not excluded from auto-enhancement.
pub fn init_all(document: &Document, locale: Locale) -> Result<Vec<EnhancedSelect>> {
    let nodes = document
        .query_selector_all(AUTO_ENHANCE_SELECTOR)
        .map_err(|e| Error::dom(format!("{e:?}")))?;
    let mut widgets = Vec::with_capacity(nodes.length() as usize);
    for index in 0..nodes.length() {
        let Some(node) = nodes.get(index) else {
            continue;
        };
        let select: HtmlSelectElement = node.unchecked_into();
        widgets.push(EnhancedSelect::attach(document, select, locale)?);
    }
    Ok(widgets)
}

fn read_native_options(select: &HtmlSelectElement) -> Vec<ChoiceOption> {
    let collection = select.options();
    let mut options = Vec::with_capacity(collection.length() as usize);
    for index in 0..collection.length() {
        let Some(element) = collection.item(index) else {
            continue;
        };
        let element: HtmlOptionElement = element.unchecked_into();
        let value = element.value();
        let id = match value.parse::<i64>() {
            Ok(number) => OptionId::Number(number),
            Err(_) => OptionId::Text(value),
        };
        options.push(ChoiceOption {
            id,
            text: element.text(),
            selected: element.selected(),
        });
    }
    options
}

fn choice_id_from_event(event: &web_sys::Event, item_selector: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let item = dom::closest_parent(&target, item_selector)?;
    item.get_attribute(CHOICE_ID_ATTR)
}

fn create_div(document: &Document, class: &str) -> Result<Element> {
    let element = document
        .create_element("div")
        .map_err(|e| Error::dom(format!("{e:?}")))?;
    element.set_class_name(class);
    Ok(element)
}

fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map_err(|e| Error::dom(format!("{e:?}")))?;
    Ok(())
}
