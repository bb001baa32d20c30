//! Collaborator contracts.
//!
//! The routing core talks to every external system through these traits,
//! allowing different backends (remote APIs in production, mocks in tests)
//! to be used interchangeably. Implementations live beside the traits in
//! this module tree; the responders only ever see the trait objects.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{BasicInfo, Experience, Project, RepositoryRecord, Skill};

/// Text-generation service.
#[async_trait]
pub trait GenerationService: Send + Sync + 'static {
    /// Generates a completion for `prompt`. Absent parameters fall back to
    /// provider defaults. Failure here is fatal for the responder call
    /// that issued it.
    async fn generate(
        &self,
        prompt: String,
        system_prompt: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, AppError>;
}

/// Read-only access to the profile knowledge base.
///
/// Absence (None/empty) means "not available" and is never an error;
/// errors mean the store itself could not be reached.
#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    async fn get_basic_info(&self, profile_id: i64) -> Result<Option<BasicInfo>, AppError>;

    async fn get_summary(&self, profile_id: i64) -> Result<Option<String>, AppError>;

    async fn get_skills(&self, profile_id: i64) -> Result<Vec<Skill>, AppError>;

    async fn get_experiences(&self, profile_id: i64) -> Result<Vec<Experience>, AppError>;

    async fn get_projects(&self, profile_id: i64) -> Result<Vec<Project>, AppError>;
}

/// Listing of the subject's hosted repositories.
#[async_trait]
pub trait RepositoryHost: Send + Sync + 'static {
    /// Lists up to `max_count` repositories with at least `min_popularity`
    /// stars. Forks are only included when `include_forks` is set.
    async fn list_repositories(
        &self,
        profile_id: i64,
        max_count: usize,
        min_popularity: u32,
        include_forks: bool,
    ) -> Result<Vec<RepositoryRecord>, AppError>;
}

/// Similarity-search augmentation. Strictly best-effort: callers log and
/// swallow failures.
#[async_trait]
pub trait ContextRetriever: Send + Sync + 'static {
    async fn retrieve(
        &self,
        query: &str,
        profile_id: i64,
        top_k: usize,
        min_score: f32,
    ) -> Result<Option<String>, AppError>;
}

/// Builds user-facing links into the document download flow. No binary
/// I/O happens in this crate.
pub trait DocumentLinks: Send + Sync + 'static {
    fn build_download_url(&self, profile_id: i64) -> String;
}
