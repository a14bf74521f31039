//! The document seam: how resolved translations land on the page.
//!
//! Elements opt in with the `data-i18n` marker attribute holding a dot-path
//! key; `data-i18n-attr` redirects the resolved string into a named attribute
//! (`alt`, `placeholder`, ...) instead of the text content.

use std::rc::Rc;

/// Marker attribute carrying the dot-path key.
pub const KEY_ATTR: &str = "data-i18n";
/// Optional marker naming the attribute that receives the translation.
pub const TARGET_ATTR: &str = "data-i18n-attr";
/// Fixed IDs of the two optional language selector controls.
pub const SELECTOR_ID: &str = "language-selector";
pub const MOBILE_SELECTOR_ID: &str = "mobile-language-selector";

/// A live document the manager can retranslate. Implementations are expected
/// to tolerate absent elements silently; every apply pass is a full re-scan.
pub trait DocumentBinding {
    /// Visit every marked element, hand its key to `resolve`, and write the
    /// returned string to the element's text content or to the attribute
    /// named by its target marker.
    fn apply_translations(&self, resolve: &mut dyn FnMut(&str) -> String);

    /// Point both selector controls (where present) at `tag`.
    fn sync_selectors(&self, tag: &str);
}

impl<D: DocumentBinding + ?Sized> DocumentBinding for Rc<D> {
    fn apply_translations(&self, resolve: &mut dyn FnMut(&str) -> String) {
        (**self).apply_translations(resolve)
    }

    fn sync_selectors(&self, tag: &str) {
        (**self).sync_selectors(tag)
    }
}

/// Binding that ignores the document entirely. For headless contexts where
/// only `translate` and the persisted preference matter.
#[derive(Debug, Default)]
pub struct DetachedDocument;

impl DocumentBinding for DetachedDocument {
    fn apply_translations(&self, _resolve: &mut dyn FnMut(&str) -> String) {}

    fn sync_selectors(&self, _tag: &str) {}
}

/// The real browser DOM.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct WebDocument;

#[cfg(target_arch = "wasm32")]
impl DocumentBinding for WebDocument {
    fn apply_translations(&self, resolve: &mut dyn FnMut(&str) -> String) {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::debug!("[i18n] no document to translate");
            return;
        };
        let Ok(nodes) = document.query_selector_all(&format!("[{KEY_ATTR}]")) else {
            return;
        };
        for index in 0..nodes.length() {
            let Some(node) = nodes.item(index) else {
                continue;
            };
            let Some(element) = node.dyn_ref::<web_sys::Element>() else {
                continue;
            };
            let Some(key) = element.get_attribute(KEY_ATTR) else {
                continue;
            };
            let translation = resolve(&key);
            match element.get_attribute(TARGET_ATTR) {
                Some(target) => {
                    if element.set_attribute(&target, &translation).is_err() {
                        log::warn!("[i18n] could not set `{target}` for key `{key}`");
                    }
                }
                None => element.set_text_content(Some(&translation)),
            }
        }
    }

    fn sync_selectors(&self, tag: &str) {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in [SELECTOR_ID, MOBILE_SELECTOR_ID] {
            match document.get_element_by_id(id) {
                Some(element) => match element.dyn_ref::<web_sys::HtmlSelectElement>() {
                    Some(select) => select.set_value(tag),
                    None => log::debug!("[i18n] #{id} is not a select element"),
                },
                // Selectors are optional per page.
                None => log::debug!("[i18n] selector #{id} not present"),
            }
        }
    }
}
