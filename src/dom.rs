/// Handle to one element of the page.
///
/// Components only ever touch the page through this trait. The browser
/// implementation wraps `web_sys::HtmlElement`; tests use an in-memory fake.
/// Mutations are fire-and-forget: a host that fails to apply one simply
/// leaves the element unchanged.
pub trait ElementHandle: Clone + 'static {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn toggle_class(&self, class: &str);

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    /// Inline style value, empty when unset.
    fn style(&self, property: &str) -> String;
    fn set_style(&self, property: &str, value: &str);

    fn set_text(&self, text: &str);

    /// Distance from the top of the document, in CSS pixels.
    fn offset_top(&self) -> f64;
    fn client_height(&self) -> f64;

    fn next_element_sibling(&self) -> Option<Self>;
}

/// What a visibility callback wants done with the element it was called for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Continue,
    Release,
}

/// Parameters for a visibility observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityOptions {
    pub threshold: f64,
    pub root_margin: Option<&'static str>,
}

impl VisibilityOptions {
    pub const DEFAULT: Self = Self {
        threshold: 0.0,
        root_margin: None,
    };
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}
