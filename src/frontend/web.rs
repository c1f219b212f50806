use gloo_timers::callback::Timeout;
use js_sys::{Array, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Storage,
};

use crate::{
    dom::{ElementHandle, Observation, VisibilityOptions},
    theme::PreferenceStore,
    timer::Scheduler,
};

pub fn document() -> Option<Document> {
    window()?.document()
}

/// Exposes `value` as `window[name]` so inline markup handlers can call it.
pub fn set_global(name: &str, value: &JsValue) {
    if let Some(window) = window() {
        let _ = Reflect::set(&window, &JsValue::from_str(name), value);
    }
}

pub fn clear_global(name: &str) {
    if let Some(window) = window() {
        let _ = Reflect::delete_property(&window, &JsValue::from_str(name));
    }
}

pub fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

#[derive(Clone)]
pub struct WebElement(pub HtmlElement);

impl WebElement {
    pub fn by_id(id: &str) -> Option<Self> {
        document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self)
    }

    pub fn query(selector: &str) -> Option<Self> {
        document()?
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self)
    }

    pub fn query_all(selector: &str) -> Vec<Self> {
        let Some(nodes) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(Self)
            .collect()
    }

    pub fn root() -> Option<Self> {
        document()?
            .document_element()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self)
    }

    pub fn body() -> Option<Self> {
        document()?.body().map(Self)
    }

    pub fn target(&self) -> &EventTarget {
        self.0.as_ref()
    }
}

impl ElementHandle for WebElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) {
        let _ = self.0.class_list().toggle(class);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn style(&self, property: &str) -> String {
        self.0
            .style()
            .get_property_value(property)
            .unwrap_or_default()
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.0.style().set_property(property, value);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn offset_top(&self) -> f64 {
        f64::from(self.0.offset_top())
    }

    fn client_height(&self) -> f64 {
        f64::from(self.0.client_height())
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.0
            .next_element_sibling()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self)
    }
}

/// Browser local storage; silently empty when storage is unavailable.
pub struct LocalStorage(Option<Storage>);

impl LocalStorage {
    pub fn open() -> Self {
        Self(window().and_then(|w| w.local_storage().ok().flatten()))
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = &self.0 {
            let _ = storage.set_item(key, value);
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

/// Attaches `handler` for the life of the page.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    if target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .is_ok()
    {
        callback.forget();
    }
}

/// Calls `on_visible` for each observed element as it enters the viewport.
/// The observer and its callback live for the rest of the page.
pub fn observe_visibility(
    elements: &[WebElement],
    options: VisibilityOptions,
    mut on_visible: impl FnMut(&WebElement) -> Observation + 'static,
) {
    if elements.is_empty() {
        return;
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                let Ok(element) = target.clone().dyn_into::<HtmlElement>() else {
                    continue;
                };
                if on_visible(&WebElement(element)) == Observation::Release {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    if let Some(margin) = options.root_margin {
        init.set_root_margin(margin);
    }

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
    else {
        return;
    };
    callback.forget();

    for element in elements {
        observer.observe(&element.0);
    }
}
