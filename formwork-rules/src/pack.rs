//! Bundled language packs
//!
//! Each pack is a JSON document compiled into the crate. Nested objects are
//! flattened into dotted keys, so `{"min": {"string": ".."}}` is looked up as
//! `min.string`.

use crate::Lang;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Default message templates for one language.
#[derive(Debug, Clone, Default)]
pub struct LanguagePack {
    messages: HashMap<String, String>,
}

impl LanguagePack {
    /// Parse a pack from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let data: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut messages = HashMap::new();

        for (key, value) in data {
            match value {
                serde_json::Value::String(template) => {
                    messages.insert(key, template);
                }
                serde_json::Value::Object(variants) => {
                    for (variant, template) in variants {
                        if let serde_json::Value::String(template) = template {
                            messages.insert(format!("{}.{}", key, variant), template);
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(Self { messages })
    }

    /// Template for a message key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }
}

static PACKS: Lazy<HashMap<Lang, LanguagePack>> = Lazy::new(|| {
    let sources = [
        (Lang::En, include_str!("../locales/en.json")),
        (Lang::Ru, include_str!("../locales/ru.json")),
        (Lang::De, include_str!("../locales/de.json")),
        (Lang::Es, include_str!("../locales/es.json")),
        (Lang::Fr, include_str!("../locales/fr.json")),
        (Lang::It, include_str!("../locales/it.json")),
    ];

    sources
        .into_iter()
        .map(|(lang, json)| {
            let pack = LanguagePack::from_json(json)
                .unwrap_or_else(|e| panic!("bundled {} language pack is malformed: {}", lang, e));
            (lang, pack)
        })
        .collect()
});

/// The bundled pack for `lang`.
pub fn pack(lang: Lang) -> &'static LanguagePack {
    &PACKS[&lang]
}

/// Template for `key` in `lang`, falling back to English.
pub fn template(lang: Lang, key: &str) -> Option<&'static str> {
    pack(lang).get(key).or_else(|| pack(Lang::En).get(key))
}
