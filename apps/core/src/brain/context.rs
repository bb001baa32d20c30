//! Request context - the immutable per-request bundle.
//!
//! Built once by the orchestrator after detection; responders borrow it
//! read-only and it is dropped when the response is returned.

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use super::language::Language;

/// Everything a responder needs to know about one incoming query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Original user query, non-empty after trim.
    pub query: String,
    /// Target profile identifier.
    pub profile_id: i64,
    /// Language resolved before intent detection.
    pub language: Language,
    /// Routing category.
    pub intent: Intent,
    /// Pre-fetched retrieval context, when one was supplied.
    pub retrieved_context: Option<String>,
}

impl RequestContext {
    pub fn new(
        query: impl Into<String>,
        profile_id: i64,
        language: Language,
        intent: Intent,
    ) -> Self {
        Self {
            query: query.into(),
            profile_id,
            language,
            intent,
            retrieved_context: None,
        }
    }

    /// Produce a fresh context carrying pre-fetched retrieval text.
    /// The original value is consumed, never mutated in place.
    pub fn with_retrieved_context(self, context: impl Into<String>) -> Self {
        Self {
            retrieved_context: Some(context.into()),
            ..self
        }
    }

    /// Compact description for log lines.
    pub fn summary(&self) -> String {
        format!(
            "intent={} language={} profile_id={} query_len={}",
            self.intent.label(),
            self.language.code(),
            self.profile_id,
            self.query.len()
        )
    }
}
