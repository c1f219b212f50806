use crate::dom::ElementHandle;

pub const THEME_KEY: &str = "theme";
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Persistent string key-value storage (browser local storage).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Stored theme, `Light` when nothing (or nothing recognisable) is stored.
/// Only `light` and `dark` ever reach the `data-theme` attribute; any other
/// stored string is dropped instead of being applied verbatim.
pub fn resolve_theme(store: &impl PreferenceStore) -> Theme {
    store
        .get(THEME_KEY)
        .and_then(|value| Theme::from_str(value.trim()))
        .unwrap_or_default()
}

pub fn apply_theme<E: ElementHandle>(root: &E, theme: Theme) {
    root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
}

/// Write path for a future theme control. Nothing on the page calls it yet.
pub fn persist_theme<E: ElementHandle>(store: &impl PreferenceStore, root: &E, theme: Theme) {
    apply_theme(root, theme);
    store.set(THEME_KEY, theme.as_str());
}

pub fn initialize<E: ElementHandle>(store: &impl PreferenceStore, root: &E) -> Theme {
    let theme = resolve_theme(store);
    apply_theme(root, theme);
    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, MemoryStore};

    #[test]
    fn missing_preference_applies_light() {
        let root = FakeElement::new();
        let theme = initialize(&MemoryStore::default(), &root);

        assert_eq!(theme, Theme::Light);
        assert_eq!(root.attribute(THEME_ATTRIBUTE).as_deref(), Some("light"));
    }

    #[test]
    fn stored_dark_is_applied() {
        let root = FakeElement::new();
        initialize(&MemoryStore::with(THEME_KEY, "dark"), &root);

        assert_eq!(root.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
    }

    #[test]
    fn unrecognised_value_falls_back_to_light() {
        let root = FakeElement::new();
        initialize(&MemoryStore::with(THEME_KEY, "sepia"), &root);

        assert_eq!(root.attribute(THEME_ATTRIBUTE).as_deref(), Some("light"));
    }

    #[test]
    fn persisted_toggle_survives_reinitialization() {
        let store = MemoryStore::default();
        let root = FakeElement::new();
        let next = initialize(&store, &root).toggled();
        persist_theme(&store, &root, next);

        let reloaded = FakeElement::new();
        assert_eq!(initialize(&store, &reloaded), Theme::Dark);
        assert_eq!(reloaded.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
    }
}
