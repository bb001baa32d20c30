//! The responder set.
//!
//! ## Components
//! - `profile`: skills, experience and background answers
//! - `repository`: hosted-repository showcase
//! - `document`: CV download flow
//! - `guardrail`: response screening and scope boundaries
//! - `prompts`: shared prompt templates
//!
//! The three content responders implement [`Responder`]; the guardrail
//! exposes its own two operations and screens every other responder's
//! output.

use async_trait::async_trait;

use crate::brain::RequestContext;
use crate::error::AppError;

pub mod document;
pub mod guardrail;
pub mod profile;
pub mod prompts;
pub mod repository;

pub use document::DocumentResponder;
pub use guardrail::GuardrailResponder;
pub use profile::ProfileResponder;
pub use repository::RepositoryResponder;

/// A unit that turns one classified request into reply text.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn process(&self, context: &RequestContext) -> Result<String, AppError>;
}
