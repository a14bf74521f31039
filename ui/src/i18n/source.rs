//! The two translation tiers: a remote source fetched per language, and the
//! embedded tables compiled into the binary for environments where the remote
//! source is unreachable (e.g. the page opened straight from disk).

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use rust_embed::RustEmbed;
use thiserror::Error;

use super::language::Language;
use super::table::TranslationTable;

/// Why a remote retrieval produced no table. Always absorbed by the load
/// protocol (logged, then recovered through the fallback chain); never
/// propagated past the manager.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("malformed translation table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Remote tier: one table per language, addressed by language tag.
pub trait TranslationSource {
    fn fetch(&self, lang: Language) -> LocalBoxFuture<'_, Result<TranslationTable, RetrievalError>>;
}

impl<S: TranslationSource + ?Sized> TranslationSource for Rc<S> {
    fn fetch(&self, lang: Language) -> LocalBoxFuture<'_, Result<TranslationTable, RetrievalError>> {
        (**self).fetch(lang)
    }
}

/// Fallback tier: the same JSON files the server publishes, embedded at
/// compile time.
#[derive(RustEmbed)]
#[folder = "../site/translations/"]
struct EmbeddedTranslations;

pub struct EmbeddedCatalog;

impl EmbeddedCatalog {
    /// The embedded table for `lang`, if one was bundled and parses.
    pub fn table(lang: Language) -> Option<TranslationTable> {
        let file = format!("{}.json", lang.tag());
        let content = EmbeddedTranslations::get(&file)?;
        let text = String::from_utf8_lossy(content.data.as_ref());
        match TranslationTable::from_json_str(&text) {
            Ok(table) => Some(table),
            Err(err) => {
                log::error!("[i18n] embedded table for {lang} is malformed: {err}");
                None
            }
        }
    }
}

/// Remote tier over the browser's `fetch`, reading
/// `<base>/<lang>.json` relative to the page origin.
#[cfg(target_arch = "wasm32")]
pub struct FetchSource {
    base: String,
}

#[cfg(target_arch = "wasm32")]
impl FetchSource {
    pub fn new(base: impl Into<String>) -> FetchSource {
        FetchSource { base: base.into() }
    }
}

#[cfg(target_arch = "wasm32")]
impl TranslationSource for FetchSource {
    fn fetch(&self, lang: Language) -> LocalBoxFuture<'_, Result<TranslationTable, RetrievalError>> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;

        let url = format!("{}/{}.json", self.base, lang.tag());
        Box::pin(async move {
            let request_err = |reason: String| RetrievalError::Request {
                url: url.clone(),
                reason,
            };

            let window = web_sys::window().ok_or_else(|| request_err("no window".into()))?;
            let response = JsFuture::from(window.fetch_with_str(&url))
                .await
                .map_err(|err| request_err(format!("{err:?}")))?;
            let response: web_sys::Response = response
                .dyn_into()
                .map_err(|_| request_err("fetch did not yield a Response".into()))?;
            if !response.ok() {
                return Err(RetrievalError::Status {
                    url: url.clone(),
                    status: response.status(),
                });
            }
            let text = JsFuture::from(
                response
                    .text()
                    .map_err(|err| request_err(format!("{err:?}")))?,
            )
            .await
            .map_err(|err| request_err(format!("{err:?}")))?;
            let text = text.as_string().unwrap_or_default();
            Ok(TranslationTable::from_json_str(&text)?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_language_has_an_embedded_table() {
        for lang in Language::ALL {
            let table = EmbeddedCatalog::table(*lang)
                .unwrap_or_else(|| panic!("no embedded table for {lang}"));
            assert!(!table.is_empty(), "embedded table for {lang} is empty");
        }
    }

    #[test]
    fn embedded_default_language_covers_the_navigation() {
        let table = EmbeddedCatalog::table(Language::En).expect("embedded en table");
        assert!(matches!(
            table.lookup("nav.home"),
            super::super::table::Lookup::Leaf("Home")
        ));
    }
}
