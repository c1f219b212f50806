use std::rc::Rc;

use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use super::web::{clear_global, document, set_global, WebElement};
use crate::{
    content::{ContentCatalog, ContentKind},
    dom::ElementHandle,
    modal::{
        body_overflow, is_backdrop_click, scroll_lock_change, ModalAction, ModalStore,
        MODAL_ROOT_ID,
    },
    telemetry::{log_event, LogLevel},
};

const SHOW_PROJECT_GLOBAL: &str = "showProjectDetails";
const SHOW_PUBLICATION_GLOBAL: &str = "showPublicationDetails";
const CLOSE_GLOBAL: &str = "closeModal";

impl Reducible for ModalStore {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match self.apply(action) {
            Some(next) => Rc::new(next),
            None => self,
        }
    }
}

fn set_body_overflow(value: &str) {
    if let Some(body) = WebElement::body() {
        body.set_style("overflow", value);
    }
}

/// The `window` functions inline markup handlers call, plus the Escape
/// listener. Everything is detached again on drop.
struct EntryPoints {
    _show_project: Closure<dyn FnMut(JsValue)>,
    _show_publication: Closure<dyn FnMut(JsValue)>,
    _close: Closure<dyn FnMut()>,
    escape: Closure<dyn FnMut(KeyboardEvent)>,
}

impl EntryPoints {
    fn install(dispatcher: UseReducerDispatcher<ModalStore>) -> Self {
        let show = |kind: ContentKind| {
            let dispatcher = dispatcher.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |id: JsValue| {
                if let Some(id) = id.as_string() {
                    dispatcher.dispatch(ModalAction::show(kind, id));
                }
            })
        };
        let show_project = show(ContentKind::Project);
        let show_publication = show(ContentKind::Publication);

        let close = {
            let dispatcher = dispatcher.clone();
            Closure::<dyn FnMut()>::new(move || {
                dispatcher.dispatch(ModalAction::Close);
                set_body_overflow(body_overflow(false));
            })
        };

        let escape = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if let Some(action) = ModalAction::from_key(&event.key()) {
                dispatcher.dispatch(action);
            }
        });

        set_global(SHOW_PROJECT_GLOBAL, show_project.as_ref());
        set_global(SHOW_PUBLICATION_GLOBAL, show_publication.as_ref());
        set_global(CLOSE_GLOBAL, close.as_ref());
        if let Some(document) = document() {
            let _ = document
                .add_event_listener_with_callback("keydown", escape.as_ref().unchecked_ref());
        }

        Self {
            _show_project: show_project,
            _show_publication: show_publication,
            _close: close,
            escape,
        }
    }
}

impl Drop for EntryPoints {
    fn drop(&mut self) {
        clear_global(SHOW_PROJECT_GLOBAL);
        clear_global(SHOW_PUBLICATION_GLOBAL);
        clear_global(CLOSE_GLOBAL);
        if let Some(document) = document() {
            let _ = document
                .remove_event_listener_with_callback("keydown", self.escape.as_ref().unchecked_ref());
        }
    }
}

async fn fetch_catalog(url: &str) -> Result<ContentCatalog, &'static str> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|_| "request_failed")?;

    if !response.ok() {
        return Err("unexpected_status");
    }

    let raw = response.text().await.map_err(|_| "unreadable_body")?;
    ContentCatalog::from_json(&raw)
}

#[derive(Properties, PartialEq)]
pub struct ContentModalProps {
    pub catalog: Rc<ContentCatalog>,
    #[prop_or_default]
    pub content_url: Option<AttrValue>,
}

#[function_component(ContentModal)]
pub fn content_modal(props: &ContentModalProps) -> Html {
    let store = {
        let catalog = Rc::clone(&props.catalog);
        use_reducer(move || ModalStore::new(catalog))
    };
    let overlay_ref = use_node_ref();
    let scroll_locked = use_mut_ref(|| false);

    {
        let open = store.state.is_open();
        use_effect_with(open, move |open| {
            let was_locked = *scroll_locked.borrow();
            if let Some(overflow) = scroll_lock_change(*open, was_locked) {
                set_body_overflow(overflow);
            }
            *scroll_locked.borrow_mut() = *open;
            || ()
        });
    }

    {
        let dispatcher = store.dispatcher();
        use_effect_with((), move |_| {
            let entry_points = EntryPoints::install(dispatcher);
            move || drop(entry_points)
        });
    }

    {
        let dispatcher = store.dispatcher();
        use_effect_with(props.content_url.clone(), move |content_url| {
            if let Some(url) = content_url.clone() {
                spawn_local(async move {
                    match fetch_catalog(&url).await {
                        Ok(catalog) => {
                            log_event(
                                LogLevel::Info,
                                "content_catalog_replaced",
                                json!({
                                    "url": url.as_str(),
                                    "projects": catalog.len(ContentKind::Project),
                                    "publications": catalog.len(ContentKind::Publication),
                                }),
                            );
                            dispatcher.dispatch(ModalAction::ReplaceCatalog(Rc::new(catalog)));
                        }
                        Err(reason) => log_event(
                            LogLevel::Warn,
                            "content_fetch_failed",
                            json!({ "url": url.as_str(), "reason": reason }),
                        ),
                    }
                });
            }
            || ()
        });
    }

    let on_backdrop = {
        let dispatcher = store.dispatcher();
        let overlay_ref = overlay_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let clicked = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok());
            if is_backdrop_click(clicked.as_ref(), overlay_ref.cast::<Element>().as_ref()) {
                dispatcher.dispatch(ModalAction::Close);
            }
        })
    };

    let on_close = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(ModalAction::Close))
    };

    let open = store.state.is_open();
    let record = store.state.record();
    let title = record
        .map(|record| record.title.clone())
        .unwrap_or_default();
    let body = record
        .map(|record| Html::from_html_unchecked(AttrValue::from(record.body.clone())))
        .unwrap_or_default();

    html! {
        <div
            id="project-modal"
            class={classes!("modal", open.then_some("is-open"))}
            ref={overlay_ref}
            style={format!("display: {};", store.state.overlay_display())}
            role="dialog"
            aria-modal="true"
            aria-hidden={(!open).to_string()}
            aria-labelledby="modal-title"
            onclick={on_backdrop}
        >
            <div class="modal-content">
                <button class="close" type="button" aria-label="Close details" onclick={on_close}>
                    <span aria-hidden="true">{"×"}</span>
                </button>
                <h2 id="modal-title">{title}</h2>
                <div id="modal-body">{body}</div>
            </div>
        </div>
    }
}

/// Renders the dialog into `#modal-root`. Returns `false` when the page has
/// no mount point.
pub fn mount(catalog: Rc<ContentCatalog>, content_url: Option<String>) -> bool {
    let Some(root) = document().and_then(|d| d.get_element_by_id(MODAL_ROOT_ID)) else {
        return false;
    };

    yew::Renderer::<ContentModal>::with_root_and_props(
        root,
        ContentModalProps {
            catalog,
            content_url: content_url.map(AttrValue::from),
        },
    )
    .render();
    true
}
