//! Localized API messages
//!
//! Every user-facing message lives in `i18n/messages.toml`, keyed by
//! category and message name, with an English and a Spanish variant plus
//! the HTTP status the API responds with. The catalog is embedded at
//! compile time; a file at `i18n/messages.toml` relative to the working
//! directory overrides it for operational tweaks without a rebuild.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use ts_shared::types::Language;

/// One catalog entry: both translations and the associated HTTP status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub en: String,
    pub es: String,
    pub status: u16,
}

impl Message {
    /// The translation for the requested language
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::English => &self.en,
            Language::Spanish => &self.es,
        }
    }
}

/// The full message catalog, one map per category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCatalog {
    pub auth: HashMap<String, Message>,
    pub validation: HashMap<String, Message>,
    pub token: HashMap<String, Message>,
    pub general: HashMap<String, Message>,
    pub success: HashMap<String, Message>,
}

pub static MESSAGES: Lazy<MessageCatalog> =
    Lazy::new(|| load_catalog().expect("Failed to load message catalog"));

fn load_catalog() -> Result<MessageCatalog, Box<dyn std::error::Error>> {
    let override_path = Path::new("i18n/messages.toml");
    if override_path.exists() {
        let content = fs::read_to_string(override_path)?;
        return Ok(toml::from_str(&content)?);
    }
    Ok(toml::from_str(include_str!("../../i18n/messages.toml"))?)
}

/// Look up a message by category and key
pub fn get_message(category: &str, key: &str) -> Option<&'static Message> {
    let map = match category {
        "auth" => &MESSAGES.auth,
        "validation" => &MESSAGES.validation,
        "token" => &MESSAGES.token,
        "general" => &MESSAGES.general,
        "success" => &MESSAGES.success,
        _ => return None,
    };
    map.get(key)
}

/// Localize a message, falling back to a generic error for unknown keys
pub fn localized(category: &str, key: &str, language: Language) -> (u16, String) {
    match get_message(category, key) {
        Some(message) => (message.status, message.text(language).to_string()),
        None => {
            log::warn!("Missing message catalog entry: {}.{}", category, key);
            let fallback = &MESSAGES.general["internal_error"];
            (fallback.status, fallback.text(language).to_string())
        }
    }
}
