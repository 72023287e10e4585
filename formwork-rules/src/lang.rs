//! Message languages
//!
//! A [`Lang`] selects which bundled language pack renders default messages.
//! Locale tags are matched on their language subtag only, so `ru-RU`,
//! `ru_RU` and `RU` all select Russian.

use crate::{Result, RuleError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of the default message templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lang {
    /// English (default)
    #[default]
    En,
    /// Russian
    Ru,
    /// German
    De,
    /// Spanish
    Es,
    /// French
    Fr,
    /// Italian
    It,
}

impl Lang {
    /// Every language with a bundled pack.
    pub const ALL: [Lang; 6] = [Lang::En, Lang::Ru, Lang::De, Lang::Es, Lang::Fr, Lang::It];

    /// Parse a BCP 47 style tag (`"fr"`, `"fr-CA"`, `"fr_FR"`).
    pub fn parse(tag: &str) -> Result<Self> {
        let language = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match language.as_str() {
            "en" => Ok(Lang::En),
            "ru" => Ok(Lang::Ru),
            "de" => Ok(Lang::De),
            "es" => Ok(Lang::Es),
            "fr" => Ok(Lang::Fr),
            "it" => Ok(Lang::It),
            _ => Err(RuleError::UnsupportedLocale(tag.to_string())),
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ru => "ru",
            Lang::De => "de",
            Lang::Es => "es",
            Lang::Fr => "fr",
            Lang::It => "it",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self> {
        Lang::parse(s)
    }
}

impl TryFrom<String> for Lang {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self> {
        Lang::parse(&value)
    }
}

impl From<Lang> for String {
    fn from(lang: Lang) -> Self {
        lang.code().to_string()
    }
}
