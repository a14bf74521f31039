//! Localization for the site: language state, lazily loaded translation
//! tables, dot-path lookup, page-wide application, and change notification.
//!
//! One [`I18n`] instance is constructed per page and handed to every
//! collaborator that needs localized strings. The page is single-threaded and
//! cooperative, so the manager uses interior mutability instead of locks; no
//! method holds a borrow across an await point.
//!
//! Failure policy: retrieval problems are absorbed by the fallback chain
//! (remote table, then embedded table, then the default language), missing
//! keys echo the key text back into the page, and absent DOM targets are
//! skipped. Only an unsupported language tag surfaces as an `Err`, and the
//! event wiring logs it.

pub mod dom;
pub mod language;
pub mod prefs;
pub mod source;
pub mod table;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use futures_channel::oneshot;
use thiserror::Error;

pub use dom::DocumentBinding;
pub use language::Language;
pub use prefs::PreferenceStore;
pub use source::{EmbeddedCatalog, TranslationSource};
pub use table::{Lookup, TranslationTable};

/// Persisted-preference key for the chosen language.
pub const USER_LANGUAGE_KEY: &str = "userLanguage";

/// Fallback of last resort.
pub const DEFAULT_LANGUAGE: Language = Language::En;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("language `{0}` is not supported")]
    UnsupportedLanguage(String),
}

/// Handle returned by [`I18n::on_language_change`]; pass it to
/// [`I18n::unsubscribe`] to deregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Rc<dyn Fn(Language)>;

/// The page-scoped localization manager.
pub struct I18n {
    current: Cell<Language>,
    default_language: Language,
    tables: RefCell<HashMap<Language, TranslationTable>>,
    /// Languages with a retrieval in flight, each with the callers waiting on
    /// it. Overlapping loads for one language collapse into one retrieval.
    pending: RefCell<HashMap<Language, Vec<oneshot::Sender<()>>>>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: Cell<u64>,
    source: Box<dyn TranslationSource>,
    prefs: Box<dyn PreferenceStore>,
    document: Box<dyn DocumentBinding>,
}

impl I18n {
    pub fn new(
        source: Box<dyn TranslationSource>,
        prefs: Box<dyn PreferenceStore>,
        document: Box<dyn DocumentBinding>,
    ) -> I18n {
        I18n {
            current: Cell::new(DEFAULT_LANGUAGE),
            default_language: DEFAULT_LANGUAGE,
            tables: RefCell::new(HashMap::new()),
            pending: RefCell::new(HashMap::new()),
            subscribers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            source,
            prefs,
            document,
        }
    }

    pub fn current_language(&self) -> Language {
        self.current.get()
    }

    /// Whether a table for `lang` is already resident. Collaborators use this
    /// to decide between [`I18n::translate`] and their own built-in copy.
    pub fn has_table(&self, lang: Language) -> bool {
        self.tables.borrow().contains_key(&lang)
    }

    /// Resolve the active language and bring the page into it: persisted
    /// preference first, then the primary subtag of `locale` (the browser
    /// locale signal), then the default. Completes only after the load, the
    /// apply pass, and selector sync have all run.
    pub async fn init(&self, locale: Option<&str>) {
        let persisted = self
            .prefs
            .get(USER_LANGUAGE_KEY)
            .as_deref()
            .and_then(Language::from_tag);
        let lang = persisted
            .or_else(|| locale.and_then(Language::from_locale))
            .unwrap_or(self.default_language);
        self.current.set(lang);
        self.load_language(lang).await;
        self.apply_translations();
        self.sync_selectors();
        log::info!("[i18n] initialized with language {lang}");
    }

    /// Make the table for `lang` resident. Idempotent: a resident table is
    /// never re-fetched, and a load already in flight is awaited rather than
    /// repeated. Retrieval failures are absorbed here through the fallback
    /// chain; at worst the table stays absent and lookups echo their keys.
    pub async fn load_language(&self, lang: Language) {
        if self.has_table(lang) {
            return;
        }

        let wait = {
            let mut pending = self.pending.borrow_mut();
            match pending.get_mut(&lang) {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    pending.insert(lang, Vec::new());
                    None
                }
            }
        };
        if let Some(rx) = wait {
            let _ = rx.await;
            return;
        }

        let loaded = self.retrieve(lang).await;
        if !loaded && lang != self.default_language {
            log::info!("[i18n] falling back to {}", self.default_language);
            self.retrieve(self.default_language).await;
        }

        let waiters = self.pending.borrow_mut().remove(&lang).unwrap_or_default();
        for tx in waiters {
            let _ = tx.send(());
        }
    }

    /// One fallback step: remote tier, then the embedded table. Returns
    /// whether a table for `lang` ended up resident.
    async fn retrieve(&self, lang: Language) -> bool {
        if self.has_table(lang) {
            return true;
        }
        match self.source.fetch(lang).await {
            Ok(table) => {
                log::info!("[i18n] loaded translations for {lang}");
                self.tables.borrow_mut().insert(lang, table);
                true
            }
            Err(err) => {
                log::error!("[i18n] error loading translations for {lang}: {err}");
                match EmbeddedCatalog::table(lang) {
                    Some(table) => {
                        log::info!("[i18n] using embedded translations for {lang}");
                        self.tables.borrow_mut().insert(lang, table);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Switch the page to `tag`: load if needed, update state, persist the
    /// choice, retranslate the document, sync selectors, then notify
    /// subscribers in registration order. An unsupported tag changes nothing,
    /// including the persisted preference.
    pub async fn change_language(&self, tag: &str) -> Result<(), I18nError> {
        let lang =
            Language::from_tag(tag).ok_or_else(|| I18nError::UnsupportedLanguage(tag.into()))?;
        self.load_language(lang).await;
        self.current.set(lang);
        self.prefs.set(USER_LANGUAGE_KEY, lang.tag());
        self.apply_translations();
        self.sync_selectors();
        self.notify_subscribers(lang);
        log::info!("[i18n] changed language to {lang}");
        Ok(())
    }

    /// Resolve a dot-path key against the active table. Never fails: a
    /// missing key (or a key resolving to a subtree) comes back as the key
    /// text itself, which keeps the page rendering and makes untranslated
    /// spots visible.
    pub fn translate(&self, key: &str) -> String {
        let tables = self.tables.borrow();
        let Some(table) = tables.get(&self.current.get()) else {
            log::warn!("[i18n] no table loaded for {}", self.current.get());
            return key.to_string();
        };
        match table.lookup(key) {
            Lookup::Leaf(text) => text.to_string(),
            Lookup::Subtree(_) => {
                log::warn!("[i18n] translation key `{key}` names a subtree, not a string");
                key.to_string()
            }
            Lookup::Missing => {
                log::warn!("[i18n] translation key not found: {key}");
                key.to_string()
            }
        }
    }

    /// Typed lookup against the active table, for collaborators that need to
    /// distinguish a missing key from a subtree.
    pub fn lookup_in_current(&self, key: &str) -> Option<String> {
        let tables = self.tables.borrow();
        match tables.get(&self.current.get())?.lookup(key) {
            Lookup::Leaf(text) => Some(text.to_string()),
            _ => None,
        }
    }

    /// Full re-scan of the document: every marked element gets its key
    /// re-resolved. No diffing; the pages are small and this is not hot.
    pub fn apply_translations(&self) {
        self.document.apply_translations(&mut |key| self.translate(key));
    }

    /// Point the selector controls at the current language.
    pub fn sync_selectors(&self) {
        self.document.sync_selectors(self.current.get().tag());
    }

    /// Register `callback` to run after every successful language change, in
    /// registration order.
    pub fn on_language_change(
        &self,
        callback: impl Fn(Language) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Deregister a subscriber. Returns whether it was still registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sub_id, _)| *sub_id != id);
        subscribers.len() != before
    }

    fn notify_subscribers(&self, lang: Language) {
        // Snapshot first: a subscriber may register or deregister while the
        // pass runs, and one panicking subscriber must not starve the rest.
        let snapshot: Vec<(SubscriptionId, Subscriber)> =
            self.subscribers.borrow().iter().cloned().collect();
        for (id, callback) in snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| callback(lang))).is_err() {
                log::error!("[i18n] language-change subscriber {id:?} panicked");
            }
        }
    }
}
