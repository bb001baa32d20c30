//! # Brain Module
//!
//! Fast, non-LLM analysis that runs before any collaborator call.
//! Resolves the request language and intent from fixed tables and builds
//! the immutable context the responders consume.
//!
//! ## Components
//! - `language`: language detection from indicator words and diacritics
//! - `intent`: intent classification with strict category priority
//! - `keywords`: the shared domain keyword tables
//! - `context`: the per-request context bundle

pub mod context;
pub mod intent;
pub mod keywords;
pub mod language;

pub use context::RequestContext;
pub use intent::{Intent, IntentDetector};
pub use language::{Language, LanguageDetector};
