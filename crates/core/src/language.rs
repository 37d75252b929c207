//! Supported content languages and multilingual text resolution.
//!
//! Every learner-facing string in Kalvi is stored per language. Display
//! resolution walks a fixed fallback chain: the requested language first,
//! then English, then Tamil, then Sinhala.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// A content language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    Ta,
    #[default]
    En,
    Si,
}

/// Fallback order applied after the requested language.
const FALLBACK_ORDER: [Language; 3] = [Language::En, Language::Ta, Language::Si];

impl Language {
    pub const ALL: [Language; 3] = [Language::Ta, Language::En, Language::Si];

    /// Two-letter code used in JSON keys and `?lang=` query parameters.
    pub fn code(self) -> &'static str {
        match self {
            Language::Ta => "ta",
            Language::En => "en",
            Language::Si => "si",
        }
    }

    /// The languages to try, in order, when resolving text for `self`.
    pub fn fallback_chain(self) -> Vec<Language> {
        let mut chain = Vec::with_capacity(FALLBACK_ORDER.len() + 1);
        chain.push(self);
        for lang in FALLBACK_ORDER {
            if lang != self {
                chain.push(lang);
            }
        }
        chain
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language '{0}'. Must be one of: ta, en, si")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ta" => Ok(Language::Ta),
            "en" => Ok(Language::En),
            "si" => Ok(Language::Si),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

/// Anything with a learner-facing name.
pub trait DisplayName {
    fn display_name(&self) -> MultilingualText;
}

/// A string stored in up to three languages.
///
/// Blank values are treated as missing during resolution, so an editor that
/// clears a field falls back to another language instead of showing nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MultilingualText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub ta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub si: Option<String>,
}

impl MultilingualText {
    pub fn new(ta: Option<String>, en: Option<String>, si: Option<String>) -> Self {
        Self { ta, en, si }
    }

    /// Text in English only. Mostly useful in tests and templates.
    pub fn en(text: impl Into<String>) -> Self {
        Self::default().with(Language::En, text)
    }

    /// Builder-style setter for one language.
    pub fn with(mut self, lang: Language, text: impl Into<String>) -> Self {
        *self.slot_mut(lang) = Some(text.into());
        self
    }

    /// Raw value stored for `lang`, blank or not.
    pub fn get(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::Ta => self.ta.as_deref(),
            Language::En => self.en.as_deref(),
            Language::Si => self.si.as_deref(),
        }
    }

    fn slot_mut(&mut self, lang: Language) -> &mut Option<String> {
        match lang {
            Language::Ta => &mut self.ta,
            Language::En => &mut self.en,
            Language::Si => &mut self.si,
        }
    }

    /// Resolve to a display string following the fallback chain.
    pub fn resolve(&self, requested: Language) -> Option<&str> {
        requested
            .fallback_chain()
            .into_iter()
            .filter_map(|lang| self.get(lang))
            .find(|text| !text.trim().is_empty())
    }

    /// Like [`resolve`](Self::resolve) but yields an empty string when no
    /// language has text.
    pub fn display(&self, requested: Language) -> &str {
        self.resolve(requested).unwrap_or("")
    }

    /// `true` when no language carries non-blank text.
    pub fn is_empty(&self) -> bool {
        Language::ALL
            .iter()
            .all(|lang| self.get(*lang).map_or(true, |t| t.trim().is_empty()))
    }

    /// Read a multilingual field from a flat DTO.
    ///
    /// Call sites disagree on casing, so for `prefix = "name"` and English
    /// this accepts `name_en`, `Name_en` and `nameEn`, preferring the
    /// snake-case key when more than one is present. Non-string values are
    /// ignored.
    pub fn from_flat_fields(obj: &Map<String, Value>, prefix: &str) -> Self {
        let mut text = Self::default();
        for lang in Language::ALL {
            let found = flat_key_candidates(prefix, lang)
                .iter()
                .find_map(|key| obj.get(key).and_then(Value::as_str));
            if let Some(value) = found {
                *text.slot_mut(lang) = Some(value.to_string());
            }
        }
        text
    }

    /// Write this text into a flat DTO using snake-case keys (`name_en`).
    /// Missing languages are written as `null`.
    pub fn to_flat_fields(&self, prefix: &str, obj: &mut Map<String, Value>) {
        for lang in Language::ALL {
            let value = self
                .get(lang)
                .map_or(Value::Null, |t| Value::String(t.to_string()));
            obj.insert(format!("{prefix}_{}", lang.code()), value);
        }
    }
}

/// Key spellings accepted for one language of a flat multilingual field.
fn flat_key_candidates(prefix: &str, lang: Language) -> [String; 3] {
    let code = lang.code();
    [
        format!("{prefix}_{code}"),
        format!("{}_{code}", capitalize(prefix)),
        format!("{prefix}{}", capitalize(code)),
    ]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
