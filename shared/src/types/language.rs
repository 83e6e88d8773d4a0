//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language preference for localized messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// Extract language from an Accept-Language header value.
    ///
    /// Only the first (most-preferred) language tag is considered;
    /// anything other than Spanish falls back to English.
    pub fn from_accept_language(header: &str) -> Self {
        let first_tag = header
            .split(',')
            .next()
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        if matches!(first_tag.get(..2), Some(prefix) if prefix.eq_ignore_ascii_case("es")) {
            Language::Spanish
        } else {
            Language::English
        }
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Language::English),
            "es" | "spa" | "spanish" => Ok(Language::Spanish),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_from_header() {
        assert_eq!(Language::from_accept_language("en-US,en;q=0.9"), Language::English);
        assert_eq!(Language::from_accept_language("es-MX,es;q=0.9"), Language::Spanish);
        assert_eq!(Language::from_accept_language("fr-FR"), Language::English);
        assert_eq!(Language::from_accept_language("ES-ES"), Language::Spanish);
    }

    #[test]
    fn test_language_from_header_first_tag_wins() {
        assert_eq!(
            Language::from_accept_language("en-US,es;q=0.5"),
            Language::English
        );
        assert_eq!(
            Language::from_accept_language("es, en;q=0.8"),
            Language::Spanish
        );
        assert_eq!(Language::from_accept_language(""), Language::English);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("spanish".parse::<Language>().unwrap(), Language::Spanish);
        assert!("invalid".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::Spanish).unwrap(), "\"es\"");
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
    }
}
