use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, Node, ScrollBehavior, ScrollIntoViewOptions,
    ScrollToOptions, Window,
};

use crate::error::SiteError;

pub fn window() -> Result<Window, SiteError> {
    web_sys::window().ok_or_else(|| SiteError::Js("missing window".to_string()))
}

pub fn document(window: &Window) -> Result<Document, SiteError> {
    window
        .document()
        .ok_or_else(|| SiteError::Js("missing document".to_string()))
}

pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, SiteError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SiteError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| SiteError::Js(format!("#{} has an unexpected element type", id)))
}

pub fn element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, SiteError> {
    let el = document
        .create_element(tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::Js(format!("<{}> is not an HtmlElement", tag)))?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub fn text_element(
    document: &Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<HtmlElement, SiteError> {
    let el = element(document, tag, class)?;
    el.set_text_content(Some(text));
    Ok(el)
}

pub fn append<P: AsRef<Node>, C: AsRef<Node>>(parent: &P, child: &C) -> Result<(), SiteError> {
    parent.as_ref().append_child(child.as_ref())?;
    Ok(())
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn set_hidden(el: &Element, hidden: bool) {
    let _ = if hidden {
        el.set_attribute("hidden", "")
    } else {
        el.remove_attribute("hidden")
    };
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn smooth_scroll_into_view(document: &Document, selector: &str) {
    let Ok(Some(target)) = document.query_selector(selector) else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

pub fn smooth_scroll_to_top(window: &Window) {
    let options = ScrollToOptions::new();
    options.set_top(0.0);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

/// Reports a lifecycle event on the console and on `<html data-last-event>`.
pub fn log_event(document: &Document, event: &str) {
    if let Some(el) = document.document_element() {
        let _ = el.set_attribute("data-last-event", event);
    }
    web_sys::console::log_1(&JsValue::from_str(event));
}

pub fn set_status(document: &Document, status: &str) {
    if let Some(el) = document.document_element() {
        let _ = el.set_attribute("data-render-status", status);
    }
}

/// An event listener that is removed when dropped.
pub struct EventBinding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventBinding {
    pub fn listen(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, SiteError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
