use crate::dom::{ElementHandle, Observation, VisibilityOptions};

pub const ANIMATED_SELECTOR: &str =
    ".skill-item, .project-card, .experience-item, .highlight-item, .publication-item";
pub const REVEAL_VISIBILITY: VisibilityOptions = VisibilityOptions {
    threshold: 0.1,
    root_margin: Some("0px 0px -50px 0px"),
};
pub const SCROLL_HINT_SELECTOR: &str = ".scroll-indicator";

const FADE_IN_CLASS: &str = "fade-in";
const VISIBLE_CLASS: &str = "visible";

pub fn prepare<E: ElementHandle>(element: &E) {
    element.add_class(FADE_IN_CLASS);
}

/// Elements stay observed; re-adding the class is harmless.
pub fn on_visible<E: ElementHandle>(element: &E) -> Observation {
    element.add_class(VISIBLE_CLASS);
    Observation::Continue
}

/// Fades the "scroll down" hint once the page has moved past a threshold.
pub struct ScrollHint<E> {
    element: E,
    threshold_px: f64,
}

impl<E: ElementHandle> ScrollHint<E> {
    pub fn new(element: E, threshold_px: f64) -> Self {
        Self {
            element,
            threshold_px,
        }
    }

    pub fn on_scroll(&self, scroll_y: f64) {
        let opacity = if scroll_y > self.threshold_px { "0" } else { "1" };
        self.element.set_style("opacity", opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    #[test]
    fn reveal_adds_classes_idempotently() {
        let card = FakeElement::new().with_class("project-card");
        prepare(&card);

        assert_eq!(on_visible(&card), Observation::Continue);
        assert_eq!(on_visible(&card), Observation::Continue);
        assert_eq!(card.classes(), ["project-card", "fade-in", "visible"]);
    }

    #[test]
    fn hint_fades_past_threshold_and_returns() {
        let hint = FakeElement::new();
        let scroll_hint = ScrollHint::new(hint.clone(), 100.0);

        scroll_hint.on_scroll(100.0);
        assert_eq!(hint.style("opacity"), "1");

        scroll_hint.on_scroll(100.5);
        assert_eq!(hint.style("opacity"), "0");

        scroll_hint.on_scroll(20.0);
        assert_eq!(hint.style("opacity"), "1");
    }
}
