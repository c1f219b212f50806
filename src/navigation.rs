use crate::dom::ElementHandle;

pub const NAVBAR_ID: &str = "navbar";
pub const MENU_TOGGLE_ID: &str = "nav-toggle";
pub const MENU_PANEL_ID: &str = "nav-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const SECTION_SELECTOR: &str = "section[id]";

const ACTIVE_CLASS: &str = "active";
const NAVBAR_BACKGROUND: &str = "rgba(15, 23, 42, 0.9)";
const NAVBAR_BACKDROP_FILTER: &str = "blur(10px)";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBox {
    pub top: f64,
    pub height: f64,
}

/// Index of the section the reader is in: the last one, in document order,
/// whose `[top - offset, top - offset + height)` band contains `scroll_y`.
pub fn active_section_index(sections: &[SectionBox], scroll_y: f64, offset: f64) -> Option<usize> {
    sections
        .iter()
        .enumerate()
        .filter(|(_, section)| {
            let start = section.top - offset;
            scroll_y >= start && scroll_y < start + section.height
        })
        .map(|(index, _)| index)
        .last()
}

/// In-page anchor target of a link href (`#about` -> `about`).
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub struct MobileMenu<E> {
    pub toggle: E,
    pub panel: E,
}

pub struct Section<E> {
    pub id: String,
    pub element: E,
}

pub struct NavLink<E> {
    pub element: E,
    /// Element the link scrolls to; `None` when the target is missing.
    pub target: Option<E>,
}

impl<E: ElementHandle> NavLink<E> {
    fn anchor(&self) -> Option<String> {
        self.element
            .attribute("href")
            .and_then(|href| anchor_target(&href).map(str::to_string))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkAction {
    pub prevent_default: bool,
    pub scroll_to: Option<f64>,
}

pub struct Navigation<E> {
    navbar: E,
    menu: Option<MobileMenu<E>>,
    links: Vec<NavLink<E>>,
    sections: Vec<Section<E>>,
    header_offset_px: f64,
    activation_offset_px: f64,
}

impl<E: ElementHandle> Navigation<E> {
    pub fn new(
        navbar: E,
        menu: Option<MobileMenu<E>>,
        links: Vec<NavLink<E>>,
        sections: Vec<Section<E>>,
        header_offset_px: f64,
        activation_offset_px: f64,
    ) -> Self {
        Self {
            navbar,
            menu,
            links,
            sections,
            header_offset_px,
            activation_offset_px,
        }
    }

    pub fn toggle_menu(&self) {
        if let Some(menu) = &self.menu {
            menu.panel.toggle_class(ACTIVE_CLASS);
            menu.toggle.toggle_class(ACTIVE_CLASS);
        }
    }

    pub fn close_menu(&self) {
        if let Some(menu) = &self.menu {
            menu.panel.remove_class(ACTIVE_CLASS);
            menu.toggle.remove_class(ACTIVE_CLASS);
        }
    }

    /// Closes the menu and, for in-page anchors, works out where to scroll.
    /// Links to other pages are left to the browser.
    pub fn on_link_click(&self, index: usize) -> LinkAction {
        self.close_menu();

        let Some(link) = self.links.get(index) else {
            return LinkAction {
                prevent_default: false,
                scroll_to: None,
            };
        };

        if link.anchor().is_none() {
            return LinkAction {
                prevent_default: false,
                scroll_to: None,
            };
        }

        LinkAction {
            prevent_default: true,
            scroll_to: link
                .target
                .as_ref()
                .map(|target| target.offset_top() - self.header_offset_px),
        }
    }

    /// Restyles the navbar and moves the active marker. Returns the id of the
    /// active section, if any.
    pub fn on_scroll(&self, scroll_y: f64) -> Option<&str> {
        self.navbar.set_style("background", NAVBAR_BACKGROUND);
        self.navbar
            .set_style("backdrop-filter", NAVBAR_BACKDROP_FILTER);

        let boxes = self
            .sections
            .iter()
            .map(|section| SectionBox {
                top: section.element.offset_top(),
                height: section.element.client_height(),
            })
            .collect::<Vec<_>>();
        let active = active_section_index(&boxes, scroll_y, self.activation_offset_px)
            .map(|index| self.sections[index].id.as_str());

        for link in &self.links {
            link.element.remove_class(ACTIVE_CLASS);
            if active.is_some() && link.anchor().as_deref() == active {
                link.element.add_class(ACTIVE_CLASS);
            }
        }

        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeElement;

    fn section(id: &str, top: f64, height: f64) -> Section<FakeElement> {
        Section {
            id: id.to_string(),
            element: FakeElement::new()
                .with_attribute("id", id)
                .with_layout(top, height),
        }
    }

    fn link(href: &str, target: Option<&Section<FakeElement>>) -> NavLink<FakeElement> {
        NavLink {
            element: FakeElement::new()
                .with_class("nav-link")
                .with_attribute("href", href),
            target: target.map(|section| section.element.clone()),
        }
    }

    fn page() -> (Navigation<FakeElement>, MobileMenu<FakeElement>) {
        let home = section("home", 100.0, 300.0);
        let about = section("about", 400.0, 400.0);
        let links = vec![link("#home", Some(&home)), link("#about", Some(&about))];
        let toggle = FakeElement::new();
        let panel = FakeElement::new();
        let menu = MobileMenu {
            toggle: toggle.clone(),
            panel: panel.clone(),
        };

        (
            Navigation::new(FakeElement::new(), Some(menu), links, vec![home, about], 80.0, 100.0),
            MobileMenu { toggle, panel },
        )
    }

    #[test]
    fn active_band_is_half_open() {
        let sections = [
            SectionBox { top: 100.0, height: 300.0 },
            SectionBox { top: 400.0, height: 400.0 },
        ];

        assert_eq!(active_section_index(&sections, 0.0, 100.0), Some(0));
        assert_eq!(active_section_index(&sections, 299.9, 100.0), Some(0));
        assert_eq!(active_section_index(&sections, 300.0, 100.0), Some(1));
        assert_eq!(active_section_index(&sections, 450.0, 100.0), Some(1));
        assert_eq!(active_section_index(&sections, 700.0, 100.0), None);
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let sections = [
            SectionBox { top: 100.0, height: 500.0 },
            SectionBox { top: 300.0, height: 100.0 },
        ];

        assert_eq!(active_section_index(&sections, 250.0, 100.0), Some(1));
    }

    #[test]
    fn scroll_marks_exactly_one_link() {
        let (navigation, _) = page();

        assert_eq!(navigation.on_scroll(450.0), Some("about"));
        assert!(!navigation.links[0].element.has_class("active"));
        assert!(navigation.links[1].element.has_class("active"));

        assert_eq!(navigation.on_scroll(10.0), Some("home"));
        assert!(navigation.links[0].element.has_class("active"));
        assert!(!navigation.links[1].element.has_class("active"));
    }

    #[test]
    fn scroll_past_every_section_clears_all_links() {
        let (navigation, _) = page();
        navigation.on_scroll(450.0);

        assert_eq!(navigation.on_scroll(5_000.0), None);
        assert!(navigation.links.iter().all(|link| !link.element.has_class("active")));
    }

    #[test]
    fn scroll_always_restyles_navbar() {
        let (navigation, _) = page();
        navigation.on_scroll(0.0);

        assert_eq!(navigation.navbar.style("background"), "rgba(15, 23, 42, 0.9)");
        assert_eq!(navigation.navbar.style("backdrop-filter"), "blur(10px)");
    }

    #[test]
    fn toggle_flips_both_menu_elements() {
        let (navigation, menu) = page();

        navigation.toggle_menu();
        assert!(menu.panel.has_class("active"));
        assert!(menu.toggle.has_class("active"));

        navigation.toggle_menu();
        assert!(!menu.panel.has_class("active"));
        assert!(!menu.toggle.has_class("active"));
    }

    #[test]
    fn link_click_closes_menu_and_scrolls_below_header() {
        let (navigation, menu) = page();
        navigation.toggle_menu();

        let action = navigation.on_link_click(1);

        assert_eq!(
            action,
            LinkAction {
                prevent_default: true,
                scroll_to: Some(320.0),
            }
        );
        assert!(!menu.panel.has_class("active"));
        assert!(!menu.toggle.has_class("active"));
    }

    #[test]
    fn anchor_without_target_only_prevents_jump() {
        let links = vec![link("#missing", None), link("https://github.com", None)];
        let navigation = Navigation::new(FakeElement::new(), None, links, Vec::new(), 80.0, 100.0);

        assert_eq!(
            navigation.on_link_click(0),
            LinkAction {
                prevent_default: true,
                scroll_to: None,
            }
        );
        assert_eq!(
            navigation.on_link_click(1),
            LinkAction {
                prevent_default: false,
                scroll_to: None,
            }
        );
    }

    #[test]
    fn anchor_target_requires_fragment() {
        assert_eq!(anchor_target("#projects"), Some("projects"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/resume.pdf"), None);
    }
}
