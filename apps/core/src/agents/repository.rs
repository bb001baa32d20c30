//! Repository responder.
//!
//! Presents the subject's hosted repositories: screens out noise (forks,
//! archives, stubs), ranks the rest by a popularity/recency score, and
//! hands the top of the list to the generation service with a
//! positive-framing directive.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, warn};

use crate::agents::prompts;
use crate::agents::Responder;
use crate::brain::keywords::{contains_any, FORK_REQUEST_KEYWORDS};
use crate::brain::RequestContext;
use crate::error::AppError;
use crate::models::RepositoryRecord;
use crate::services::traits::{GenerationService, ProfileStore, RepositoryHost};

// --- Generation parameters ---
const GENERATION_TEMPERATURE: f32 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 1000;

// --- Selection parameters ---
const MAX_REPOSITORIES: usize = 100;
const MIN_SIZE_KB: u32 = 10;
const DETAILED_COUNT: usize = 5;

// --- Score weights ---
const STAR_WEIGHT: f64 = 3.0;
const FORK_WEIGHT: f64 = 2.0;
const SIZE_DIVISOR: f64 = 100.0;
const RECENCY_MAX_BONUS: f64 = 30.0;
const RECENCY_WINDOW_DAYS: f64 = 180.0;
const DESCRIPTION_BONUS: f64 = 10.0;
const DESCRIPTION_MIN_LEN: usize = 20;
const TOPIC_BONUS: f64 = 5.0;

pub struct RepositoryResponder {
    llm: Arc<dyn GenerationService>,
    host: Arc<dyn RepositoryHost>,
    store: Arc<dyn ProfileStore>,
}

impl RepositoryResponder {
    pub fn new(
        llm: Arc<dyn GenerationService>,
        host: Arc<dyn RepositoryHost>,
        store: Arc<dyn ProfileStore>,
    ) -> Self {
        Self { llm, host, store }
    }

    /// Popularity/recency score. The recency bonus decays linearly from 30
    /// for a push today to zero at 180 days.
    fn score(repo: &RepositoryRecord) -> f64 {
        let mut score = f64::from(repo.stars) * STAR_WEIGHT
            + f64::from(repo.forks) * FORK_WEIGHT
            + f64::from(repo.size_kb) / SIZE_DIVISOR;

        if let Some(pushed_at) = repo.pushed_at {
            let days = (Utc::now() - pushed_at).num_days() as f64;
            if (0.0..RECENCY_WINDOW_DAYS).contains(&days) {
                score += RECENCY_MAX_BONUS * (1.0 - days / RECENCY_WINDOW_DAYS);
            }
        }

        let has_real_description = repo
            .description
            .as_ref()
            .map(|d| d.chars().count() > DESCRIPTION_MIN_LEN)
            .unwrap_or(false);
        if has_real_description {
            score += DESCRIPTION_BONUS;
        }

        if !repo.topics.is_empty() {
            score += TOPIC_BONUS;
        }

        score
    }

    /// Screens and ranks. Forks stay only when the query asked for them;
    /// archived and near-empty repositories never make the cut.
    fn select(repos: Vec<RepositoryRecord>, include_forks: bool) -> Vec<(RepositoryRecord, f64)> {
        let mut scored: Vec<(RepositoryRecord, f64)> = repos
            .into_iter()
            .filter(|repo| include_forks || !repo.is_fork)
            .filter(|repo| !repo.is_archived)
            .filter(|repo| repo.size_kb >= MIN_SIZE_KB)
            .map(|repo| {
                let score = Self::score(&repo);
                (repo, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored
    }

    fn format_repositories(scored: &[(RepositoryRecord, f64)]) -> String {
        let mut lines: Vec<String> = vec!["TOP REPOSITORIES:".to_string()];

        for (repo, _) in scored.iter().take(DETAILED_COUNT) {
            lines.push(format!("  - {}", repo.name));
            if let Some(description) = &repo.description {
                lines.push(format!("    {}", description));
            }
            if let Some(language) = &repo.language {
                lines.push(format!("    Language: {}", language));
            }
            if !repo.topics.is_empty() {
                lines.push(format!("    Topics: {}", repo.topics.join(", ")));
            }
            if let Some(url) = &repo.html_url {
                lines.push(format!("    URL: {}", url));
            }
            lines.push(format!("    Stars: {}, Forks: {}", repo.stars, repo.forks));
            lines.push(String::new());
        }

        let remainder: Vec<&RepositoryRecord> = scored
            .iter()
            .skip(DETAILED_COUNT)
            .map(|(repo, _)| repo)
            .collect();

        if !remainder.is_empty() {
            lines.push("OTHER REPOSITORIES BY LANGUAGE:".to_string());
            let mut by_language: BTreeMap<String, Vec<&str>> = BTreeMap::new();
            for repo in remainder {
                by_language
                    .entry(repo.language.clone().unwrap_or_else(|| "Other".to_string()))
                    .or_default()
                    .push(repo.name.as_str());
            }
            for (language, names) in by_language {
                lines.push(format!("  {}: {}", language, names.join(", ")));
            }
        }

        lines.join("\n")
    }

    fn build_prompt(
        &self,
        context: &RequestContext,
        subject: &str,
        profile_url: Option<&str>,
        data_block: &str,
    ) -> String {
        let mut parts = vec![
            prompts::repository_system_prompt(subject),
            String::new(),
            prompts::REPOSITORY_INSTRUCTIONS.to_string(),
            String::new(),
            prompts::language_directive(context.language),
            String::new(),
            format!("USER QUERY: {}", context.query),
            String::new(),
            "REPOSITORY DATA:".to_string(),
        ];
        if let Some(url) = profile_url {
            parts.push(format!("Profile: {}", url));
        }
        parts.push(data_block.to_string());
        parts.join("\n")
    }
}

#[async_trait]
impl Responder for RepositoryResponder {
    async fn process(&self, context: &RequestContext) -> Result<String, AppError> {
        let include_forks = contains_any(&context.query, FORK_REQUEST_KEYWORDS);

        let repos = match self
            .host
            .list_repositories(context.profile_id, MAX_REPOSITORIES, 0, include_forks)
            .await
        {
            Ok(repos) => repos,
            Err(e) => {
                error!("Repository listing failed: {}", e);
                return Ok(prompts::unavailable_message(context.language).to_string());
            }
        };

        let scored = Self::select(repos, include_forks);
        if scored.is_empty() {
            return Ok(prompts::unavailable_message(context.language).to_string());
        }

        // Name and profile link are cosmetic; a store hiccup here must not
        // cost the answer.
        let info = match self.store.get_basic_info(context.profile_id).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Basic info fetch failed: {}", e);
                None
            }
        };
        let subject = info
            .as_ref()
            .map(|record| record.name.as_str())
            .unwrap_or("the candidate");
        let profile_url = info
            .as_ref()
            .and_then(|record| record.github_username.as_deref())
            .map(|username| format!("https://github.com/{}", username));

        let data_block = Self::format_repositories(&scored);
        let prompt = self.build_prompt(context, subject, profile_url.as_deref(), &data_block);

        let response = self
            .llm
            .generate(
                prompt,
                None,
                Some(GENERATION_TEMPERATURE),
                Some(GENERATION_MAX_TOKENS),
            )
            .await?;

        Ok(response.trim().to_string())
    }
}
