//! Guardrail responder.
//!
//! Two total operations: `check_response` screens a draft answer for
//! over-refusal before it leaves the system, `handle_out_of_scope`
//! produces the polite boundary message. Both always return text; every
//! internal failure degrades to the safest available string.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::agents::prompts;
use crate::brain::keywords::{
    contains_any, match_count, ON_TOPIC_DOCUMENT_KEYWORDS, ON_TOPIC_PROFILE_KEYWORDS,
    ON_TOPIC_REPOSITORY_KEYWORDS, REFUSAL_PATTERNS,
};
use crate::brain::{Intent, RequestContext};
use crate::services::traits::GenerationService;

// --- Thresholds ---
const SHORT_RESPONSE_CHARS: usize = 20;
const LONG_RESPONSE_CHARS: usize = 100;
const SUSPICIOUS_THRESHOLD: usize = 2;
const DEGENERATE_QUERY_CHARS: usize = 3;

// --- Generation parameters ---
const VALIDATION_TEMPERATURE: f32 = 0.3;
const VALIDATION_MAX_TOKENS: u32 = 100;
const SCOPE_TEMPERATURE: f32 = 0.7;
const SCOPE_MAX_TOKENS: u32 = 200;

pub struct GuardrailResponder {
    llm: Arc<dyn GenerationService>,
}

impl GuardrailResponder {
    pub fn new(llm: Arc<dyn GenerationService>) -> Self {
        Self { llm }
    }

    /// Screens a draft response. Most responses pass on cheap checks; only
    /// a refusal-looking draft costs a validator call.
    pub async fn check_response(&self, response: String, context: &RequestContext) -> String {
        if response.chars().count() < SHORT_RESPONSE_CHARS {
            return response;
        }

        if Self::is_clearly_valid(&response, context) {
            debug!("Response passed quick validation");
            return response;
        }

        if Self::seems_suspicious(&response) {
            info!("Response flagged for validation");
            return self.validate_with_llm(response, context).await;
        }

        response
    }

    fn is_clearly_valid(response: &str, context: &RequestContext) -> bool {
        let on_topic = match context.intent {
            Intent::ProfileInfo => Some(ON_TOPIC_PROFILE_KEYWORDS),
            Intent::RepositoryInfo => Some(ON_TOPIC_REPOSITORY_KEYWORDS),
            Intent::DocumentRequest => Some(ON_TOPIC_DOCUMENT_KEYWORDS),
            _ => None,
        };

        if let Some(keywords) = on_topic {
            if contains_any(response, keywords) {
                return true;
            }
        }

        response.chars().count() > LONG_RESPONSE_CHARS
    }

    fn seems_suspicious(response: &str) -> bool {
        match_count(response, REFUSAL_PATTERNS) >= SUSPICIOUS_THRESHOLD
    }

    async fn validate_with_llm(&self, response: String, context: &RequestContext) -> String {
        let validation_prompt = format!(
            r#"You are a guardrail validator. Check if this response is appropriate.

USER QUESTION: {query}
INTENT: {intent}

AGENT RESPONSE:
{response}

TASK: Is this response appropriate and on-topic?

Guidelines:
- If the response answers the question about profile/skills/experience -> APPROVE
- If the response provides helpful CV-related information -> APPROVE
- If the response is overly restrictive or refuses valid requests -> REJECT
- If the response is completely off-topic -> REJECT
- If the response hallucinates or makes things up -> REJECT

Respond ONLY with:
- "APPROVE" if the response is good
- "REJECT: [brief reason]" if it should be blocked

Your response:"#,
            query = context.query,
            intent = context.intent.label(),
            response = response,
        );

        match self
            .llm
            .generate(
                validation_prompt,
                None,
                Some(VALIDATION_TEMPERATURE),
                Some(VALIDATION_MAX_TOKENS),
            )
            .await
        {
            Ok(verdict) => {
                if verdict.trim().starts_with("APPROVE") {
                    info!("Response approved by validation");
                    response
                } else {
                    warn!("Response rejected by validation: {}", verdict.trim());
                    self.handle_out_of_scope(context).await
                }
            }
            // Fail open on validator errors.
            Err(e) => {
                error!("Guardrail validation error: {}", e);
                response
            }
        }
    }

    /// Boundary message for off-topic requests. Degenerate queries get a
    /// fixed reply without a model call.
    pub async fn handle_out_of_scope(&self, context: &RequestContext) -> String {
        let query = context.query.trim();
        let degenerate = query.chars().count() < DEGENERATE_QUERY_CHARS
            || !query.chars().any(|c| c.is_alphabetic());
        if degenerate {
            return prompts::misunderstood_message(context.language).to_string();
        }

        let prompt = format!(
            r#"{system}

{instructions}

USER QUESTION: {query}
DETECTED LANGUAGE: {language}

This request is out of scope. Provide a polite response that:
1. Explains this system only handles profile/CV/repository questions
2. Suggests what the user CAN ask about instead
3. Is brief (2-3 sentences max)
4. Is in the SAME language as the user's question

{directive}

Your response:"#,
            system = prompts::GUARDRAIL_SYSTEM_PROMPT,
            instructions = prompts::GUARDRAIL_INSTRUCTIONS,
            query = context.query,
            language = context.language.code(),
            directive = prompts::language_directive(context.language),
        );

        match self
            .llm
            .generate(prompt, None, Some(SCOPE_TEMPERATURE), Some(SCOPE_MAX_TOKENS))
            .await
        {
            Ok(response) => response.trim().to_string(),
            Err(e) => {
                error!("Out-of-scope generation failed: {}", e);
                prompts::scope_fallback_message(context.language).to_string()
            }
        }
    }
}
