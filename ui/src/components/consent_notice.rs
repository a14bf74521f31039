//! Local-storage consent notice.
//!
//! A small banner informing visitors that the site keeps preferences in local
//! storage. The accepted flag is itself a preference; once set the banner
//! never returns. Copy comes from the localization manager when the active
//! table carries the `storage_notice` keys, otherwise from built-in copy
//! picked by the browser locale, so the banner reads correctly even before
//! (or without) any table load.

use crate::i18n::{I18n, Language, PreferenceStore};

/// Persisted-preference key for the accepted flag.
pub const CONSENT_KEY: &str = "storageConsentAccepted";

/// Element ID of the injected banner.
pub const NOTICE_ID: &str = "storage-notice";

/// Delay before the banner slides in, so it does not compete with page load.
pub const SHOW_DELAY_MS: u32 = 500;

/// The durable half of the notice: has the visitor accepted, and accepting.
pub struct ConsentState {
    prefs: Box<dyn PreferenceStore>,
}

impl ConsentState {
    pub fn new(prefs: Box<dyn PreferenceStore>) -> ConsentState {
        ConsentState { prefs }
    }

    pub fn has_accepted(&self) -> bool {
        self.prefs.get(CONSENT_KEY).as_deref() == Some("true")
    }

    pub fn accept(&self) {
        self.prefs.set(CONSENT_KEY, "true");
    }
}

/// Banner body text: manager first, built-in fallback second.
pub fn notice_message(i18n: &I18n, locale: Option<&str>) -> String {
    i18n.lookup_in_current("storage_notice.message")
        .unwrap_or_else(|| fallback_message(locale).to_string())
}

/// Accept-button label: manager first, built-in fallback second.
pub fn accept_label(i18n: &I18n, locale: Option<&str>) -> String {
    i18n.lookup_in_current("storage_notice.accept")
        .unwrap_or_else(|| fallback_accept_label(locale).to_string())
}

fn fallback_message(locale: Option<&str>) -> &'static str {
    match locale.and_then(Language::from_locale) {
        Some(Language::Sk) => {
            "Táto webová stránka používa lokálne úložisko na zlepšenie vašich skúseností, \
             napríklad na zapamätanie jazyka a statusu návštevníka."
        }
        Some(Language::Hu) => {
            "Ez a weboldal helyi tárolót használ a felhasználói élmény javítására, \
             például a nyelvi beállítás megjegyzésére."
        }
        _ => {
            "This website uses local storage to improve your experience, such as remembering \
             your language preference and visitor status."
        }
    }
}

fn fallback_accept_label(locale: Option<&str>) -> &'static str {
    match locale.and_then(Language::from_locale) {
        Some(Language::Sk) => "Prijať",
        Some(Language::Hu) => "Elfogadás",
        _ => "Accept",
    }
}

/// Build and arm the banner in the live document. No-op when already
/// accepted.
#[cfg(target_arch = "wasm32")]
pub fn install(i18n: &std::rc::Rc<I18n>, locale: Option<&str>) {
    use std::rc::Rc;

    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    use crate::i18n::dom::KEY_ATTR;

    let state = Rc::new(ConsentState::new(Box::new(crate::i18n::prefs::LocalStorage)));
    if state.has_accepted() {
        return;
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::debug!("[consent] no document, notice skipped");
        return;
    };
    let Some(body) = document.body() else {
        log::debug!("[consent] no body, notice skipped");
        return;
    };

    let build = || -> Result<web_sys::Element, wasm_bindgen::JsValue> {
        let notice = document.create_element("div")?;
        notice.set_id(NOTICE_ID);
        notice.set_class_name("storage-notice");
        notice.set_attribute("style", "display:none")?;

        let content = document.create_element("div")?;
        content.set_class_name("storage-notice__content");

        let message = document.create_element("p")?;
        message.set_class_name("storage-notice__message");
        message.set_attribute(KEY_ATTR, "storage_notice.message")?;
        message.set_text_content(Some(&notice_message(i18n, locale)));

        let accept = document.create_element("button")?;
        accept.set_class_name("storage-notice__accept");
        accept.set_attribute(KEY_ATTR, "storage_notice.accept")?;
        accept.set_text_content(Some(&accept_label(i18n, locale)));

        content.append_child(&message)?;
        content.append_child(&accept)?;
        notice.append_child(&content)?;
        body.append_child(&notice)?;

        let on_accept = {
            let state = state.clone();
            let notice = notice.clone();
            Closure::<dyn FnMut()>::new(move || {
                state.accept();
                let _ = notice.set_attribute("style", "display:none");
            })
        };
        accept
            .add_event_listener_with_callback("click", on_accept.as_ref().unchecked_ref())?;
        on_accept.forget();

        Ok(notice)
    };

    match build() {
        Ok(notice) => {
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(SHOW_DELAY_MS).await;
                let _ = notice.remove_attribute("style");
            });
        }
        Err(err) => log::warn!("[consent] could not build notice: {err:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::dom::DetachedDocument;
    use crate::i18n::prefs::MemoryStore;
    use crate::i18n::source::RetrievalError;
    use crate::i18n::{TranslationSource, TranslationTable};

    use futures::executor::block_on;
    use futures::future::LocalBoxFuture;

    struct OfflineSource;

    impl TranslationSource for OfflineSource {
        fn fetch(
            &self,
            _lang: Language,
        ) -> LocalBoxFuture<'_, Result<TranslationTable, RetrievalError>> {
            Box::pin(async {
                Err(RetrievalError::Request {
                    url: "translations".into(),
                    reason: "offline".into(),
                })
            })
        }
    }

    #[test]
    fn accept_round_trips_through_the_store() {
        let state = ConsentState::new(Box::new(MemoryStore::default()));
        assert!(!state.has_accepted());
        state.accept();
        assert!(state.has_accepted());
    }

    #[test]
    fn copy_prefers_the_loaded_table() {
        let i18n = I18n::new(
            Box::new(OfflineSource),
            Box::new(MemoryStore::default()),
            Box::new(DetachedDocument),
        );
        // Nothing loaded yet: built-in fallback by locale.
        assert!(notice_message(&i18n, Some("sk-SK")).starts_with("Táto"));
        assert_eq!(accept_label(&i18n, Some("sk-SK")), "Prijať");
        assert!(notice_message(&i18n, Some("hu-HU")).starts_with("Ez a weboldal"));
        assert_eq!(accept_label(&i18n, Some("hu-HU")), "Elfogadás");
        assert_eq!(accept_label(&i18n, Some("de-DE")), "Accept");

        // Once the (embedded) table is resident the manager copy wins.
        block_on(i18n.init(None));
        assert_eq!(
            notice_message(&i18n, None),
            i18n.translate("storage_notice.message")
        );
        assert_eq!(accept_label(&i18n, None), "Accept");
    }
}
