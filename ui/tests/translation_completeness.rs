//! Translation completeness test.
//!
//! Ensures every non-default locale provides *at least* the dot-paths present
//! in the default (`en`) translation file, and that no file defines an empty
//! string. The JSON sources are embedded at compile time; if you add a locale,
//! register its file here and in `ui::i18n::Language`.

use std::collections::BTreeSet;

use ui::i18n::TranslationTable;

const EN: &str = include_str!("../../site/translations/en.json");
const SK: &str = include_str!("../../site/translations/sk.json");
const HU: &str = include_str!("../../site/translations/hu.json");

fn leaf_paths(name: &str, src: &str) -> BTreeSet<String> {
    let table = TranslationTable::from_json_str(src)
        .unwrap_or_else(|err| panic!("{name}.json does not parse: {err}"));
    table.leaf_paths().into_iter().collect()
}

#[test]
fn all_locales_have_all_default_keys() {
    let fallback = leaf_paths("en", EN);
    assert!(!fallback.is_empty(), "default locale (en) contains no keys");

    let locales: &[(&str, &str)] = &[
        ("sk", SK),
        ("hu", HU),
        // Add new locales here.
    ];

    let mut failures = Vec::new();
    for (locale, src) in locales {
        let keys = leaf_paths(locale, src);
        let missing: Vec<&String> = fallback.difference(&keys).collect();
        if !missing.is_empty() {
            failures.push(format!(
                "locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing
                    .iter()
                    .map(|k| k.as_str())
                    .collect::<Vec<_>>()
                    .join("\n  ")
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en.json, then translate.",
        failures.join("\n\n")
    );
}

#[test]
fn no_locale_defines_an_empty_string() {
    for (locale, src) in [("en", EN), ("sk", SK), ("hu", HU)] {
        let table = TranslationTable::from_json_str(src).expect("locale parses");
        for path in table.leaf_paths() {
            match table.lookup(&path) {
                ui::i18n::Lookup::Leaf(text) => {
                    assert!(
                        !text.trim().is_empty(),
                        "{locale}.json has an empty value at {path}"
                    );
                }
                other => panic!("{locale}.json: {path} is not a leaf ({other:?})"),
            }
        }
    }
}

#[test]
fn consent_copy_is_present_in_every_locale() {
    // The consent notice marks its elements with these keys; language changes
    // re-resolve them through the apply pass.
    for (locale, src) in [("en", EN), ("sk", SK), ("hu", HU)] {
        let keys = leaf_paths(locale, src);
        assert!(keys.contains("storage_notice.message"), "{locale} lacks message");
        assert!(keys.contains("storage_notice.accept"), "{locale} lacks accept");
    }
}
