use std::rc::Rc;

use serde_json::json;

use crate::{
    content::{ContentCatalog, ContentKind, ContentRecord},
    telemetry::{log_event, LogLevel},
};

pub const MODAL_ROOT_ID: &str = "modal-root";

/// Body `overflow` value: scrolling is locked while the dialog is up.
pub fn body_overflow(open: bool) -> &'static str {
    if open {
        "hidden"
    } else {
        "auto"
    }
}

/// New body `overflow` to write after the dialog's open flag settles, or
/// `None` when the page's own value should be left alone. Only a lock this
/// dialog took is ever released.
pub fn scroll_lock_change(open: bool, was_locked: bool) -> Option<&'static str> {
    (open || was_locked).then(|| body_overflow(open))
}

/// A click closes the dialog only when it lands on the backdrop itself,
/// not on anything inside the content panel.
pub fn is_backdrop_click<T: PartialEq>(target: Option<&T>, backdrop: Option<&T>) -> bool {
    target.is_some() && target == backdrop
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        kind: ContentKind,
        id: String,
        record: ContentRecord,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn overlay_display(&self) -> &'static str {
        if self.is_open() {
            "block"
        } else {
            "none"
        }
    }

    pub fn body_overflow(&self) -> &'static str {
        body_overflow(self.is_open())
    }

    pub fn record(&self) -> Option<&ContentRecord> {
        match self {
            Self::Open { record, .. } => Some(record),
            Self::Closed => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ModalAction {
    Show { kind: ContentKind, id: String },
    Close,
    ReplaceCatalog(Rc<ContentCatalog>),
}

impl ModalAction {
    pub fn show(kind: ContentKind, id: impl Into<String>) -> Self {
        Self::Show {
            kind,
            id: id.into(),
        }
    }

    /// Keyboard shortcut mapping: Escape closes, every other key is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        (key == "Escape").then_some(Self::Close)
    }
}

/// Dialog state plus the catalog it draws from.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalStore {
    pub state: ModalState,
    pub catalog: Rc<ContentCatalog>,
}

impl ModalStore {
    pub fn new(catalog: Rc<ContentCatalog>) -> Self {
        Self {
            state: ModalState::Closed,
            catalog,
        }
    }

    /// Next store, or `None` when the action changes nothing.
    pub fn apply(&self, action: ModalAction) -> Option<Self> {
        match action {
            ModalAction::Show { kind, id } => {
                let Some(record) = self.catalog.lookup(kind, &id).cloned() else {
                    log_event(
                        LogLevel::Debug,
                        "modal_unknown_content",
                        json!({ "kind": kind.as_str(), "id": id }),
                    );
                    return None;
                };

                let next = ModalState::Open { kind, id, record };
                (next != self.state).then(|| Self {
                    state: next,
                    catalog: Rc::clone(&self.catalog),
                })
            }
            ModalAction::Close => self.state.is_open().then(|| Self {
                state: ModalState::Closed,
                catalog: Rc::clone(&self.catalog),
            }),
            ModalAction::ReplaceCatalog(catalog) => {
                if catalog.is_empty() {
                    log_event(LogLevel::Warn, "modal_empty_catalog_ignored", json!({}));
                    return None;
                }

                Some(Self {
                    state: self.state.clone(),
                    catalog,
                })
            }
        }
    }

    /// Applies an action in place.
    pub fn dispatch(&mut self, action: ModalAction) {
        if let Some(next) = self.apply(action) {
            *self = next;
        }
    }
}
