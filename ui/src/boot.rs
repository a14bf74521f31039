//! Page startup wiring for the browser build: construct the page-scoped
//! localization manager, run init, and arm the widgets. Everything here is
//! fire-and-forget; failures degrade to untranslated content, never to a
//! broken page.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use crate::components::{consent_notice, menu};
use crate::i18n::dom::{WebDocument, MOBILE_SELECTOR_ID, SELECTOR_ID};
use crate::i18n::prefs::LocalStorage;
use crate::i18n::source::FetchSource;
use crate::i18n::I18n;

/// Boot the page. Called once from the wasm entry point.
pub fn boot() {
    let _ = console_log::init_with_level(log::Level::Debug);

    let i18n = Rc::new(I18n::new(
        Box::new(FetchSource::new("translations")),
        Box::new(LocalStorage),
        Box::new(WebDocument),
    ));
    let locale = web_sys::window().and_then(|w| w.navigator().language());

    spawn_local(async move {
        i18n.init(locale.as_deref()).await;

        menu::install();
        menu::stamp_footer_year();
        wire_selector(&i18n, SELECTOR_ID);
        wire_selector(&i18n, MOBILE_SELECTOR_ID);
        consent_notice::install(&i18n, locale.as_deref());
    });
}

/// Forward `change` events on a selector control to the manager. Missing
/// controls are fine; not every page carries both variants.
fn wire_selector(i18n: &Rc<I18n>, id: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(element) = document.get_element_by_id(id) else {
        log::debug!("[i18n] selector #{id} not present, not wiring");
        return;
    };

    let on_change = {
        let i18n = i18n.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let Some(select) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            else {
                return;
            };
            let value = select.value();
            let i18n = i18n.clone();
            spawn_local(async move {
                if let Err(err) = i18n.change_language(&value).await {
                    log::error!("[i18n] {err}");
                }
            });
        })
    };
    if element
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("[i18n] could not attach change listener to #{id}");
    }
    on_change.forget();
}
