//! Browser bindings: finds the page's elements, hands them to the
//! components, and routes DOM events into them.

mod modal;
mod web;

use std::rc::Rc;

use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Event, HtmlImageElement, ScrollBehavior, ScrollToOptions};

use self::web::{
    document, listen, observe_visibility, scroll_y, set_global, LocalStorage, TimeoutScheduler,
    WebElement,
};
use crate::{
    config::{SiteConfig, CONFIG_ELEMENT_ID},
    content::ContentCatalog,
    dom::ElementHandle,
    images::{self, DEFERRED_IMAGE_SELECTOR, LAZY_VISIBILITY},
    navigation::{
        anchor_target, MobileMenu, NavLink, Navigation, Section, MENU_PANEL_ID, MENU_TOGGLE_ID,
        NAVBAR_ID, NAV_LINK_SELECTOR, SECTION_SELECTOR,
    },
    preload,
    proficiency::{ProficiencyBars, BAR_SELECTOR, BAR_VISIBILITY},
    reveal::{self, ScrollHint, ANIMATED_SELECTOR, REVEAL_VISIBILITY, SCROLL_HINT_SELECTOR},
    telemetry::{self, log_event, LogLevel},
    theme,
    typing::{self, ROLE_SELECTOR},
};

pub fn run() {
    when_parsed(|| {
        let config = load_config();
        telemetry::set_min_level(config.log_level);

        initialize_theme();
        initialize_navigation(&config);
        initialize_scroll_animations();
        initialize_scroll_hint(&config);
        initialize_typing(&config);
        initialize_proficiency_bars(&config);
        initialize_modal(&config);
        install_page_hooks();
        register_image_fallbacks();

        let preload = config.preload.clone();
        when_loaded(move || {
            initialize_lazy_images();
            append_preload_hints(&preload);
        });

        log_event(LogLevel::Debug, "page_initialized", json!({}));
    });
}

fn skipped(component: &str, missing: &str) {
    log_event(
        LogLevel::Debug,
        "init_skipped",
        json!({ "component": component, "missing": missing }),
    );
}

/// Runs `task` once the document is parsed.
fn when_parsed(task: impl FnOnce() + 'static) {
    let Some(document) = document() else {
        return;
    };

    if document.ready_state() != "loading" {
        task();
        return;
    }

    let mut task = Some(task);
    listen(&document, "DOMContentLoaded", move |_| {
        if let Some(task) = task.take() {
            task();
        }
    });
}

/// Runs `task` once the page and its subresources have loaded.
fn when_loaded(task: impl FnOnce() + 'static) {
    let (Some(window), Some(document)) = (window(), document()) else {
        return;
    };

    if document.ready_state() == "complete" {
        task();
        return;
    }

    let mut task = Some(task);
    listen(&window, "load", move |_| {
        if let Some(task) = task.take() {
            task();
        }
    });
}

fn load_config() -> SiteConfig {
    let Some(raw) = document()
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
    else {
        return SiteConfig::default();
    };

    SiteConfig::from_json(&raw).unwrap_or_else(|reason| {
        log_event(
            LogLevel::Warn,
            "config_rejected",
            json!({ "reason": reason }),
        );
        SiteConfig::default()
    })
}

fn initialize_theme() {
    let Some(root) = WebElement::root() else {
        skipped("theme", "document element");
        return;
    };

    let theme = theme::initialize(&LocalStorage::open(), &root);
    log_event(
        LogLevel::Debug,
        "theme_applied",
        json!({ "theme": theme.as_str() }),
    );
}

fn smooth_scroll_to(top: f64) {
    let Some(window) = window() else {
        return;
    };

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn initialize_navigation(config: &SiteConfig) {
    let Some(navbar) = WebElement::by_id(NAVBAR_ID) else {
        skipped("navigation", NAVBAR_ID);
        return;
    };

    let menu = match (
        WebElement::by_id(MENU_TOGGLE_ID),
        WebElement::by_id(MENU_PANEL_ID),
    ) {
        (Some(toggle), Some(panel)) => Some(MobileMenu { toggle, panel }),
        _ => None,
    };
    let toggle = menu.as_ref().map(|menu| menu.toggle.clone());

    let links = WebElement::query_all(NAV_LINK_SELECTOR)
        .into_iter()
        .map(|element| {
            let target = element
                .attribute("href")
                .as_deref()
                .and_then(anchor_target)
                .and_then(WebElement::by_id);
            NavLink { element, target }
        })
        .collect::<Vec<_>>();
    let link_elements = links
        .iter()
        .map(|link| link.element.clone())
        .collect::<Vec<_>>();

    let sections = WebElement::query_all(SECTION_SELECTOR)
        .into_iter()
        .filter_map(|element| {
            let id = element.attribute("id")?;
            Some(Section { id, element })
        })
        .collect::<Vec<_>>();

    let navigation = Rc::new(Navigation::new(
        navbar,
        menu,
        links,
        sections,
        config.header_offset_px,
        config.section_activation_offset_px,
    ));

    if let Some(toggle) = toggle {
        let navigation = Rc::clone(&navigation);
        listen(toggle.target(), "click", move |_| navigation.toggle_menu());
    }

    for (index, link) in link_elements.iter().enumerate() {
        let navigation = Rc::clone(&navigation);
        listen(link.target(), "click", move |event: Event| {
            let action = navigation.on_link_click(index);
            if action.prevent_default {
                event.prevent_default();
            }
            if let Some(top) = action.scroll_to {
                smooth_scroll_to(top);
            }
        });
    }

    if let Some(window) = window() {
        listen(&window, "scroll", move |_| {
            navigation.on_scroll(scroll_y());
        });
    }
}

fn initialize_scroll_animations() {
    let elements = WebElement::query_all(ANIMATED_SELECTOR);
    for element in &elements {
        reveal::prepare(element);
    }

    observe_visibility(&elements, REVEAL_VISIBILITY, |element| {
        reveal::on_visible(element)
    });
}

fn initialize_scroll_hint(config: &SiteConfig) {
    let (Some(window), Some(hint)) = (window(), WebElement::query(SCROLL_HINT_SELECTOR)) else {
        skipped("scroll_hint", SCROLL_HINT_SELECTOR);
        return;
    };

    let hint = ScrollHint::new(hint, config.scroll_hint_threshold_px);
    listen(&window, "scroll", move |_| hint.on_scroll(scroll_y()));
}

fn initialize_typing(config: &SiteConfig) {
    let started = typing::start(
        WebElement::query(ROLE_SELECTOR),
        &config.roles,
        config.typing,
        TimeoutScheduler,
    );

    if started.is_none() {
        skipped("typing", ROLE_SELECTOR);
    }
}

fn initialize_proficiency_bars(config: &SiteConfig) {
    let bars = WebElement::query_all(BAR_SELECTOR);
    let animator = ProficiencyBars::new(TimeoutScheduler, config.bar_grow_delay_ms);
    for bar in &bars {
        animator.register(bar);
    }

    observe_visibility(&bars, BAR_VISIBILITY, move |bar| animator.on_visible(bar));
}

fn initialize_modal(config: &SiteConfig) {
    let catalog = ContentCatalog::bundled().unwrap_or_else(|reason| {
        log_event(
            LogLevel::Warn,
            "bundled_catalog_rejected",
            json!({ "reason": reason }),
        );
        ContentCatalog::default()
    });

    if !modal::mount(Rc::new(catalog), config.content_url.clone()) {
        skipped("modal", crate::modal::MODAL_ROOT_ID);
    }
}

fn js_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_default()
}

/// Contact form and analytics hooks the markup calls by name.
fn install_page_hooks() {
    let contact = Closure::<dyn FnMut(JsValue)>::new(|event: JsValue| {
        if let Some(event) = event.dyn_ref::<Event>() {
            event.prevent_default();
        }
        telemetry::record_contact_submission();
    });
    set_global("handleContactForm", contact.as_ref());
    contact.forget();

    let track = Closure::<dyn FnMut(JsValue, JsValue, JsValue)>::new(
        |category: JsValue, action: JsValue, label: JsValue| {
            telemetry::track_event(&js_text(&category), &js_text(&action), &js_text(&label));
        },
    );
    set_global("trackEvent", track.as_ref());
    track.forget();
}

fn already_failed(image: &WebElement) -> bool {
    let Some(element) = image.0.dyn_ref::<HtmlImageElement>() else {
        return false;
    };

    element
        .get_attribute("src")
        .is_some_and(|src| !src.is_empty())
        && element.complete()
        && element.natural_width() == 0
}

/// Gives every image its own error subscription.
fn register_image_fallbacks() {
    for image in WebElement::query_all("img") {
        let failed = image.clone();
        listen(image.target(), "error", move |_| images::apply_fallback(&failed));

        if already_failed(&image) {
            images::apply_fallback(&image);
        }
    }
}

fn initialize_lazy_images() {
    let deferred = WebElement::query_all(DEFERRED_IMAGE_SELECTOR);
    observe_visibility(&deferred, LAZY_VISIBILITY, |image| images::load_deferred(image));
}

fn append_preload_hints(paths: &[String]) {
    let Some(document) = document() else {
        return;
    };
    let Some(head) = document.head() else {
        return;
    };

    for hint in preload::hints(paths) {
        let Ok(link) = document.create_element("link") else {
            continue;
        };
        let _ = link.set_attribute("rel", "preload");
        let _ = link.set_attribute("href", &hint.href);
        let _ = link.set_attribute("as", hint.kind);
        let _ = head.append_child(&link);
    }
}
