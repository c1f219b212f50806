use crate::{
    dom::{ElementHandle, Observation, VisibilityOptions},
    timer::Scheduler,
};

pub const BAR_SELECTOR: &str = ".proficiency-fill";
pub const BAR_VISIBILITY: VisibilityOptions = VisibilityOptions {
    threshold: 0.5,
    root_margin: None,
};

const TARGET_WIDTH_ATTRIBUTE: &str = "data-target-width";
const ANIMATED_ATTRIBUTE: &str = "data-bar-animated";

/// Grows skill bars from zero to their authored width, once per bar.
#[derive(Clone)]
pub struct ProficiencyBars<S> {
    scheduler: S,
    grow_delay_ms: u32,
}

impl<S: Scheduler> ProficiencyBars<S> {
    pub fn new(scheduler: S, grow_delay_ms: u32) -> Self {
        Self {
            scheduler,
            grow_delay_ms,
        }
    }

    /// Remembers the inline width the markup gave the bar.
    pub fn register<E: ElementHandle>(&self, bar: &E) {
        if bar.attribute(TARGET_WIDTH_ATTRIBUTE).is_none() {
            bar.set_attribute(TARGET_WIDTH_ATTRIBUTE, &bar.style("width"));
        }
    }

    pub fn on_visible<E: ElementHandle>(&self, bar: &E) -> Observation {
        if bar.attribute(ANIMATED_ATTRIBUTE).is_some() {
            return Observation::Release;
        }
        bar.set_attribute(ANIMATED_ATTRIBUTE, "");

        let target = bar
            .attribute(TARGET_WIDTH_ATTRIBUTE)
            .unwrap_or_else(|| bar.style("width"));
        if target.is_empty() {
            return Observation::Release;
        }

        bar.set_style("width", "0%");
        let bar = bar.clone();
        self.scheduler.schedule(
            self.grow_delay_ms,
            Box::new(move || bar.set_style("width", &target)),
        );

        Observation::Release
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, ManualScheduler};

    #[test]
    fn bar_grows_after_delay() {
        let scheduler = ManualScheduler::new();
        let bars = ProficiencyBars::new(scheduler.clone(), 300);
        let bar = FakeElement::new().with_style("width", "85%");
        bars.register(&bar);

        assert_eq!(bars.on_visible(&bar), Observation::Release);
        assert_eq!(bar.style("width"), "0%");

        scheduler.advance(299);
        assert_eq!(bar.style("width"), "0%");

        scheduler.advance(1);
        assert_eq!(bar.style("width"), "85%");
    }

    #[test]
    fn repeated_visibility_never_rezeroes() {
        let scheduler = ManualScheduler::new();
        let bars = ProficiencyBars::new(scheduler.clone(), 300);
        let bar = FakeElement::new().with_style("width", "60%");
        bars.register(&bar);

        bars.on_visible(&bar);
        scheduler.advance(300);
        assert_eq!(bars.on_visible(&bar), Observation::Release);

        assert_eq!(bar.style("width"), "60%");
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn duplicate_event_before_growth_keeps_single_restore() {
        let scheduler = ManualScheduler::new();
        let bars = ProficiencyBars::new(scheduler.clone(), 300);
        let bar = FakeElement::new().with_style("width", "40%");
        bars.register(&bar);

        bars.on_visible(&bar);
        bars.on_visible(&bar);
        assert_eq!(scheduler.pending(), 1);

        scheduler.advance(300);
        assert_eq!(bar.style("width"), "40%");
    }

    #[test]
    fn bar_without_width_is_left_alone() {
        let scheduler = ManualScheduler::new();
        let bars = ProficiencyBars::new(scheduler.clone(), 300);
        let bar = FakeElement::new();
        bars.register(&bar);

        assert_eq!(bars.on_visible(&bar), Observation::Release);
        assert_eq!(bar.style("width"), "");
        assert_eq!(scheduler.pending(), 0);
    }
}
