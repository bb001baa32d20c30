//! Intent classification for routing.
//!
//! Keyword matching with a strict priority order, not a weighted sum: an
//! out-of-scope hit short-circuits everything, then document beats
//! repository beats profile beats general. Pure table lookups, no model
//! call on the classification path.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keywords;
use super::language::Language;

/// Request category driving responder dispatch. Exactly one per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Skills, experience, education, background, contact info.
    ProfileInfo,
    /// Hosted repositories, code, tech stack.
    RepositoryInfo,
    /// CV/resume download requests.
    DocumentRequest,
    /// Motivation, vision, career-interest questions.
    GeneralQuestion,
    /// Off-topic, degenerate or unsafe requests.
    OutOfScope,
}

impl Intent {
    /// Returns the wire label for the intent, used in logs and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::ProfileInfo => "profile_info",
            Intent::RepositoryInfo => "repository_info",
            Intent::DocumentRequest => "document_request",
            Intent::GeneralQuestion => "general_question",
            Intent::OutOfScope => "out_of_scope",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classifies queries into one of the five intents.
///
/// Deterministic and total: every input, including the empty string, maps
/// to exactly one intent.
pub struct IntentDetector;

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect the intent of `text`.
    ///
    /// The language is carried for parity with the detection contract;
    /// the tables already mix languages so no per-language branch is
    /// needed today.
    pub fn detect(&self, text: &str, _language: Language) -> Intent {
        if text.trim().is_empty() {
            return Intent::OutOfScope;
        }

        // Off-domain hits win outright, even over on-topic keywords.
        if keywords::contains_any(text, keywords::OUT_OF_SCOPE_KEYWORDS) {
            return Intent::OutOfScope;
        }

        // Priority chain: a single document keyword outranks any number of
        // matches in the lower categories.
        if keywords::match_count(text, keywords::DOCUMENT_KEYWORDS) > 0 {
            return Intent::DocumentRequest;
        }

        if keywords::match_count(text, keywords::REPOSITORY_KEYWORDS) > 0 {
            return Intent::RepositoryInfo;
        }

        if keywords::match_count(text, keywords::PROFILE_KEYWORDS) > 0 {
            return Intent::ProfileInfo;
        }

        if keywords::match_count(text, keywords::GENERAL_KEYWORDS) > 0 {
            return Intent::GeneralQuestion;
        }

        // Most unclassified questions are about the subject's background.
        Intent::ProfileInfo
    }
}
