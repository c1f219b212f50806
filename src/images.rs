use crate::dom::{ElementHandle, Observation, VisibilityOptions};

pub const DEFERRED_IMAGE_SELECTOR: &str = "img[data-src]";
pub const DEFERRED_SOURCE_ATTRIBUTE: &str = "data-src";
pub const LAZY_CLASS: &str = "lazy";
pub const PLACEHOLDER_CLASS: &str = "profile-placeholder";
pub const LAZY_VISIBILITY: VisibilityOptions = VisibilityOptions::DEFAULT;

/// Copies the deferred source into `src` the first time the image is seen.
pub fn load_deferred<E: ElementHandle>(image: &E) -> Observation {
    if let Some(source) = image.attribute(DEFERRED_SOURCE_ATTRIBUTE) {
        image.set_attribute("src", &source);
    }
    image.remove_class(LAZY_CLASS);
    Observation::Release
}

/// Hides a broken image and shows its placeholder.
///
/// The placeholder must be the image's next element sibling and carry
/// [`PLACEHOLDER_CLASS`]; anything else is left untouched.
pub fn apply_fallback<E: ElementHandle>(image: &E) {
    image.set_style("display", "none");

    if let Some(placeholder) = image
        .next_element_sibling()
        .filter(|sibling| sibling.has_class(PLACEHOLDER_CLASS))
    {
        placeholder.set_style("display", "flex");
    }
}
