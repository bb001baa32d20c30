//! Language detection based on character patterns and common words.
//!
//! Two-pass majority vote over fixed tables: indicator-word overlap first,
//! diacritic characters as a fallback when the word vote is inconclusive.
//! Detection always resolves to a concrete language so downstream prompt
//! directives never have to handle an "unknown" marker.

use serde::{Deserialize, Serialize};

/// Reply language attached to a request.
///
/// Detection covers English through Spanish; the remaining tags exist so
/// collaborator data and configuration can carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Unresolved sentinel used by configuration, never returned by detection.
    Auto,
    English,
    Turkish,
    Kurdish,
    German,
    French,
    Spanish,
    Italian,
    Portuguese,
    Russian,
    Arabic,
    Chinese,
    Japanese,
    Korean,
}

impl Language {
    /// Two-letter tag used in logs and collaborator payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Auto => "auto",
            Language::English => "en",
            Language::Turkish => "tr",
            Language::Kurdish => "ku",
            Language::German => "de",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Arabic => "ar",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
            Language::Korean => "ko",
        }
    }

    /// Human-readable name used in prompt directives.
    pub fn name(&self) -> &'static str {
        match self {
            Language::Auto => "English",
            Language::English => "English",
            Language::Turkish => "Turkish",
            Language::Kurdish => "Kurdish (Kurmancî)",
            Language::German => "German",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Arabic => "Arabic",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
        }
    }

    /// Parse a two-letter tag, for configuration values.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "auto" => Some(Language::Auto),
            "en" => Some(Language::English),
            "tr" => Some(Language::Turkish),
            "ku" => Some(Language::Kurdish),
            "de" => Some(Language::German),
            "fr" => Some(Language::French),
            "es" => Some(Language::Spanish),
            "it" => Some(Language::Italian),
            "pt" => Some(Language::Portuguese),
            "ru" => Some(Language::Russian),
            "ar" => Some(Language::Arabic),
            "zh" => Some(Language::Chinese),
            "ja" => Some(Language::Japanese),
            "ko" => Some(Language::Korean),
            _ => None,
        }
    }
}

// --- Indicator tables ---

const ENGLISH_WORDS: &[&str] = &[
    "the", "is", "are", "what", "which", "who", "how", "does", "do", "his",
    "her", "their", "and", "about", "can", "you", "tell", "me", "where",
    "did", "have", "with", "skills", "experience", "work",
];

const TURKISH_WORDS: &[&str] = &[
    "ne", "nedir", "nasıl", "hangi", "kim", "kimdir", "ve", "bir", "bu",
    "mi", "mı", "mu", "mü", "için", "hakkında", "var", "nerede", "neden",
    "çalıştı", "biliyor", "yetenekleri", "deneyimi", "projeleri", "bana",
];

const KURDISH_WORDS: &[&str] = &[
    "çi", "kî", "çawa", "çima", "kîjan", "ew", "ez", "em", "hûn", "ji",
    "li", "bo", "bi", "di", "dikare", "dizane", "jêhatî", "ezmûn",
    "proje", "navê", "wî",
];

const GERMAN_WORDS: &[&str] = &[
    "der", "die", "das", "ist", "sind", "und", "über", "kann", "seine",
    "ihre", "welche", "wer", "wie", "wo", "hat", "ein", "eine", "für",
    "mit", "nicht", "erfahrung", "kenntnisse", "spricht",
];

const FRENCH_WORDS: &[&str] = &[
    "le", "la", "les", "est", "sont", "quelle", "quelles", "quels",
    "comment", "pourquoi", "qui", "que", "quoi", "et", "des", "sur",
    "ses", "il", "elle", "peut", "parle", "compétences", "expérience",
    "projets",
];

const SPANISH_WORDS: &[&str] = &[
    "el", "los", "las", "es", "son", "cuál", "cuáles", "cómo", "qué",
    "quién", "y", "sobre", "sus", "puede", "tiene", "habla", "dónde",
    "trabajo", "experiencia", "proyectos", "habilidades",
];

fn turkish_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(*c, 'ç' | 'ğ' | 'ı' | 'ö' | 'ş' | 'ü'))
        .count()
}

fn kurdish_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(*c, 'ç' | 'ê' | 'î' | 'û' | 'ş'))
        .count()
}

fn german_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(*c, 'ä' | 'ö' | 'ü' | 'ß'))
        .count()
}

fn french_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| {
            matches!(
                *c,
                'é' | 'è' | 'ê' | 'ë' | 'à' | 'â' | 'ù' | 'û' | 'ô' | 'î' | 'ï' | 'ç' | 'œ'
            )
        })
        .count()
}

fn spanish_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| matches!(*c, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ñ' | '¿' | '¡'))
        .count()
}

/// Detects the query language from fixed indicator tables.
///
/// Pure function over the tables above; same input always yields the same
/// output.
pub struct LanguageDetector {
    default_language: Language,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    /// Create a detector that falls back to English.
    pub fn new() -> Self {
        Self {
            default_language: Language::English,
        }
    }

    /// Create a detector with a custom fallback language.
    pub fn with_default(default_language: Language) -> Self {
        Self { default_language }
    }

    /// Detect the language of `text`.
    ///
    /// Word vote first; if no language wins strictly, diacritic counts
    /// decide; if still tied (or nothing matched), the default language is
    /// returned. Empty input returns the default language.
    pub fn detect(&self, text: &str) -> Language {
        let text_lower = text.to_lowercase();

        let tokens: Vec<&str> = text_lower
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|word| !word.is_empty())
            .collect();

        if tokens.is_empty() {
            return self.default_language;
        }

        let word_scores = [
            (Language::English, word_overlap(&tokens, ENGLISH_WORDS)),
            (Language::Turkish, word_overlap(&tokens, TURKISH_WORDS)),
            (Language::Kurdish, word_overlap(&tokens, KURDISH_WORDS)),
            (Language::German, word_overlap(&tokens, GERMAN_WORDS)),
            (Language::French, word_overlap(&tokens, FRENCH_WORDS)),
            (Language::Spanish, word_overlap(&tokens, SPANISH_WORDS)),
        ];

        if let Some(language) = strict_winner(&word_scores) {
            return language;
        }

        let char_scores = [
            (Language::Turkish, turkish_chars(&text_lower)),
            (Language::Kurdish, kurdish_chars(&text_lower)),
            (Language::German, german_chars(&text_lower)),
            (Language::French, french_chars(&text_lower)),
            (Language::Spanish, spanish_chars(&text_lower)),
        ];

        if let Some(language) = strict_winner(&char_scores) {
            return language;
        }

        self.default_language
    }
}

/// Count how many vocabulary entries appear in the token list.
fn word_overlap(tokens: &[&str], vocabulary: &[&str]) -> usize {
    vocabulary
        .iter()
        .filter(|entry| tokens.iter().any(|token| token == *entry))
        .count()
}

/// The language with the strictly highest nonzero score, if any.
fn strict_winner(scores: &[(Language, usize)]) -> Option<Language> {
    let (best_language, best_score) = scores
        .iter()
        .max_by_key(|(_, score)| *score)
        .copied()?;

    if best_score == 0 {
        return None;
    }

    let tied = scores.iter().filter(|(_, score)| *score == best_score).count();
    if tied == 1 {
        Some(best_language)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_detection() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("What are his Python skills?"), Language::English);
    }

    #[test]
    fn test_turkish_detection() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("Hangi teknolojileri biliyor?"), Language::Turkish);
    }

    #[test]
    fn test_kurdish_detection() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("Ew çi dizane?"), Language::Kurdish);
    }

    #[test]
    fn test_german_detection() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("Welche Erfahrung hat er?"), Language::German);
    }

    #[test]
    fn test_french_detection() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("Quelles sont ses compétences?"), Language::French);
    }

    #[test]
    fn test_spanish_detection() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("¿Qué proyectos tiene?"), Language::Spanish);
    }

    #[test]
    fn test_diacritic_fallback() {
        // No indicator word matches, Turkish wins on characters alone.
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("özgeçmişini gönder"), Language::Turkish);
    }

    #[test]
    fn test_empty_input_returns_default() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect(""), Language::English);
        assert_eq!(detector.detect("   \t  "), Language::English);
    }

    #[test]
    fn test_no_match_returns_default() {
        let detector = LanguageDetector::new();
        assert_eq!(detector.detect("asdkjalksdj"), Language::English);
    }

    #[test]
    fn test_custom_default() {
        let detector = LanguageDetector::with_default(Language::Turkish);
        assert_eq!(detector.detect(""), Language::Turkish);
        assert_eq!(detector.detect("zzzz qqqq"), Language::Turkish);
    }

    #[test]
    fn test_determinism() {
        let detector = LanguageDetector::new();
        let first = detector.detect("Tell me about his work experience");
        for _ in 0..5 {
            assert_eq!(detector.detect("Tell me about his work experience"), first);
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for language in [
            Language::English,
            Language::Turkish,
            Language::Kurdish,
            Language::German,
            Language::French,
            Language::Spanish,
        ] {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code("xx"), None);
    }
}
