//! The closed set of display languages the site ships translations for.

use std::fmt;

use unic_langid::LanguageIdentifier;

/// A supported display language. The supported set is configuration, not user
/// input: anything outside this enum is rejected at the string boundary by
/// [`Language::from_tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Sk,
    Hu,
}

impl Language {
    pub const ALL: &'static [Language] = &[Language::En, Language::Sk, Language::Hu];

    /// The BCP 47 primary subtag, also the translation file stem.
    pub fn tag(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Sk => "sk",
            Language::Hu => "hu",
        }
    }

    /// Native-language name, for selector option labels.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Sk => "Slovenčina",
            Language::Hu => "Magyar",
        }
    }

    /// Exact tag match (`"sk"` but not `"sk-SK"`).
    pub fn from_tag(tag: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|lang| lang.tag() == tag)
    }

    /// Primary-subtag match for full locale strings such as `sk-SK` or
    /// `en-US`, the shape `navigator.language` reports.
    pub fn from_locale(locale: &str) -> Option<Language> {
        let id: LanguageIdentifier = locale.trim().parse().ok()?;
        Language::from_tag(id.language.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trips() {
        for lang in Language::ALL {
            assert_eq!(Language::from_tag(lang.tag()), Some(*lang));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::from_tag("sk-SK"), None);
        assert_eq!(Language::from_tag(""), None);
    }

    #[test]
    fn locale_matches_on_primary_subtag() {
        assert_eq!(Language::from_locale("sk-SK"), Some(Language::Sk));
        assert_eq!(Language::from_locale("en-US"), Some(Language::En));
        assert_eq!(Language::from_locale("hu"), Some(Language::Hu));
        assert_eq!(Language::from_locale("de-AT"), None);
        assert_eq!(Language::from_locale("not a locale"), None);
    }
}
