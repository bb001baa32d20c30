//! Profile responder.
//!
//! Answers questions about the subject's skills, experience and background.
//! Sections of the knowledge base are fetched only when the query asks for
//! them; a default bundle covers open-ended questions.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::{error, warn};

use crate::agents::prompts;
use crate::agents::Responder;
use crate::brain::keywords::{
    contains_any, CONTACT_SECTION_KEYWORDS, EXPERIENCE_SECTION_KEYWORDS,
    PROJECT_SECTION_KEYWORDS, SKILL_SECTION_KEYWORDS, SUMMARY_SECTION_KEYWORDS,
};
use crate::brain::RequestContext;
use crate::error::AppError;
use crate::models::{BasicInfo, Experience, Project, Skill};
use crate::services::traits::{ContextRetriever, GenerationService, ProfileStore};

// --- Generation parameters ---
const GENERATION_TEMPERATURE: f32 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 1000;
const RETRIEVAL_TOP_K: usize = 3;
const RETRIEVAL_MIN_SCORE: f32 = 0.3;

// Internal grading wording stripped from every reply.
const PROFICIENCY_PATTERNS: [&str; 2] = [r"(?i)\bproficiency in\b", r"(?i)\bproficient in\b"];

const SECTION_RULE: &str = "========";

/// Data bundle assembled for one request; only the requested sections
/// are populated.
#[derive(Default)]
struct ProfileData {
    basic_info: Option<BasicInfo>,
    summary: Option<String>,
    skills: Vec<Skill>,
    experiences: Vec<Experience>,
    projects: Vec<Project>,
}

pub struct ProfileResponder {
    llm: Arc<dyn GenerationService>,
    store: Arc<dyn ProfileStore>,
    retriever: Arc<dyn ContextRetriever>,
}

impl ProfileResponder {
    pub fn new(
        llm: Arc<dyn GenerationService>,
        store: Arc<dyn ProfileStore>,
        retriever: Arc<dyn ContextRetriever>,
    ) -> Self {
        Self {
            llm,
            store,
            retriever,
        }
    }

    /// Fetches only the sections the query asks about. A query matching no
    /// section keyword gets the default bundle of identity, summary and
    /// skills.
    async fn gather_profile_data(&self, context: &RequestContext) -> Result<ProfileData, AppError> {
        let mut data = ProfileData::default();
        let mut matched = false;

        if contains_any(&context.query, CONTACT_SECTION_KEYWORDS) {
            data.basic_info = self.store.get_basic_info(context.profile_id).await?;
            matched = true;
        }
        if contains_any(&context.query, SKILL_SECTION_KEYWORDS) {
            data.skills = self.store.get_skills(context.profile_id).await?;
            matched = true;
        }
        if contains_any(&context.query, EXPERIENCE_SECTION_KEYWORDS) {
            data.experiences = self.store.get_experiences(context.profile_id).await?;
            matched = true;
        }
        if contains_any(&context.query, PROJECT_SECTION_KEYWORDS) {
            data.projects = self.store.get_projects(context.profile_id).await?;
            matched = true;
        }
        if contains_any(&context.query, SUMMARY_SECTION_KEYWORDS) {
            data.summary = self.store.get_summary(context.profile_id).await?;
            matched = true;
        }

        if !matched {
            data.basic_info = self.store.get_basic_info(context.profile_id).await?;
            data.summary = self.store.get_summary(context.profile_id).await?;
            data.skills = self.store.get_skills(context.profile_id).await?;
        }

        Ok(data)
    }

    /// Pre-fetched context on the request wins over a fresh retrieval.
    /// Retrieval failure only costs the augmentation, never the answer.
    async fn augmentation_context(&self, context: &RequestContext) -> Option<String> {
        if let Some(existing) = &context.retrieved_context {
            return Some(existing.clone());
        }

        match self
            .retriever
            .retrieve(
                &context.query,
                context.profile_id,
                RETRIEVAL_TOP_K,
                RETRIEVAL_MIN_SCORE,
            )
            .await
        {
            Ok(found) => found,
            Err(e) => {
                warn!("Context retrieval failed: {}", e);
                None
            }
        }
    }

    fn build_prompt(
        &self,
        context: &RequestContext,
        data: &ProfileData,
        augmentation: Option<&str>,
    ) -> String {
        let subject = data
            .basic_info
            .as_ref()
            .map(|info| info.name.as_str())
            .unwrap_or("the candidate");

        let mut parts: Vec<String> = vec![
            prompts::profile_system_prompt(subject),
            String::new(),
            prompts::PROFILE_INSTRUCTIONS.to_string(),
            String::new(),
            SECTION_RULE.to_string(),
            "USER'S QUESTION:".to_string(),
            format!("\"{}\"", context.query),
            String::new(),
            prompts::language_directive(context.language),
            SECTION_RULE.to_string(),
            String::new(),
        ];

        parts.push("PROFILE DATA:".to_string());

        if let Some(info) = &data.basic_info {
            parts.push(format!("Name: {}", info.name));
            if let Some(email) = &info.email {
                parts.push(format!("Email: {}", email));
            }
            if let Some(location) = &info.location {
                parts.push(format!("Location: {}", location));
            }
            if let Some(linkedin) = &info.linkedin_url {
                parts.push(format!("LinkedIn: {}", linkedin));
            }
            if let Some(username) = &info.github_username {
                parts.push(format!("GitHub: https://github.com/{}", username));
            }
            parts.push(String::new());
        }

        if let Some(summary) = &data.summary {
            parts.push("SUMMARY:".to_string());
            parts.push(summary.clone());
            parts.push(String::new());
        }

        if !data.skills.is_empty() {
            parts.push("SKILLS:".to_string());
            // Only name and category; the grading column stays internal.
            for skill in &data.skills {
                let category = skill.category.as_deref().unwrap_or("general");
                parts.push(format!("  - {} ({})", skill.name, category));
            }
            parts.push(String::new());
        }

        if !data.experiences.is_empty() {
            parts.push("WORK EXPERIENCE:".to_string());
            for exp in &data.experiences {
                parts.push(format!("  - {} at {}", exp.role, exp.company));
                parts.push(format!(
                    "    {} - {}",
                    exp.start_date.as_deref().unwrap_or("N/A"),
                    exp.end_date.as_deref().unwrap_or("Present")
                ));
                if let Some(description) = &exp.description {
                    parts.push(format!("    {}", description));
                }
                parts.push(String::new());
            }
        }

        if !data.projects.is_empty() {
            parts.push("PROJECTS:".to_string());
            for project in &data.projects {
                parts.push(format!("  - {}", project.title));
                if let Some(description) = &project.description {
                    parts.push(format!("    {}", description));
                }
                if !project.tech_stack.is_empty() {
                    parts.push(format!("    Technologies: {}", project.tech_stack.join(", ")));
                }
                parts.push(String::new());
            }
        }

        if let Some(augmentation) = augmentation {
            parts.push("ADDITIONAL CONTEXT:".to_string());
            parts.push(augmentation.to_string());
            parts.push(String::new());
        }

        parts.push(
            "REMINDER: Same language as question, no proficiency levels, include contact info if asked.".to_string(),
        );

        parts.join("\n")
    }

    /// Strips level-of-expertise wording and re-collapses whitespace.
    fn clean_response(response: &str) -> String {
        let mut cleaned = response.to_string();
        for pattern in PROFICIENCY_PATTERNS {
            if let Ok(re) = Regex::new(pattern) {
                cleaned = re.replace_all(&cleaned, "").into_owned();
            }
        }
        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[async_trait]
impl Responder for ProfileResponder {
    async fn process(&self, context: &RequestContext) -> Result<String, AppError> {
        let data = match self.gather_profile_data(context).await {
            Ok(data) => data,
            Err(e) => {
                error!("Profile data fetch failed: {}", e);
                return Ok(prompts::unavailable_message(context.language).to_string());
            }
        };

        let augmentation = self.augmentation_context(context).await;
        let prompt = self.build_prompt(context, &data, augmentation.as_deref());

        let response = self
            .llm
            .generate(
                prompt,
                None,
                Some(GENERATION_TEMPERATURE),
                Some(GENERATION_MAX_TOKENS),
            )
            .await?;

        Ok(Self::clean_response(response.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{Intent, Language};
    use crate::services::retrieval::DisabledRetriever;
    use std::sync::Mutex;

    struct ScriptedLlm {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(vec![]),
            }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedLlm {
        async fn generate(
            &self,
            prompt: String,
            _system_prompt: Option<String>,
            _temperature: Option<f32>,
            _max_tokens: Option<u32>,
        ) -> Result<String, AppError> {
            self.prompts.lock().unwrap().push(prompt);
            Ok(self.reply.clone())
        }
    }

    struct FixtureStore {
        fail: bool,
    }

    #[async_trait]
    impl ProfileStore for FixtureStore {
        async fn get_basic_info(&self, profile_id: i64) -> Result<Option<BasicInfo>, AppError> {
            if self.fail {
                return Err(AppError::DataUnavailable("store offline".to_string()));
            }
            Ok(Some(BasicInfo {
                id: profile_id,
                name: "Jane Doe".to_string(),
                email: Some("jane@example.com".to_string()),
                location: Some("Berlin".to_string()),
                linkedin_url: None,
                summary: None,
                github_username: Some("janedoe".to_string()),
            }))
        }

        async fn get_summary(&self, _profile_id: i64) -> Result<Option<String>, AppError> {
            if self.fail {
                return Err(AppError::DataUnavailable("store offline".to_string()));
            }
            Ok(Some("Backend engineer with a systems focus.".to_string()))
        }

        async fn get_skills(&self, _profile_id: i64) -> Result<Vec<Skill>, AppError> {
            if self.fail {
                return Err(AppError::DataUnavailable("store offline".to_string()));
            }
            Ok(vec![Skill {
                id: 1,
                name: "Python".to_string(),
                category: Some("Languages".to_string()),
                proficiency_level: Some("intermediate".to_string()),
            }])
        }

        async fn get_experiences(&self, _profile_id: i64) -> Result<Vec<Experience>, AppError> {
            Ok(vec![Experience {
                id: 1,
                company: "Acme".to_string(),
                role: "Engineer".to_string(),
                start_date: Some("2020-01-01".to_string()),
                end_date: None,
                description: Some("Built data pipelines.".to_string()),
                location: None,
            }])
        }

        async fn get_projects(&self, _profile_id: i64) -> Result<Vec<Project>, AppError> {
            Ok(vec![])
        }
    }

    struct PanickingRetriever;

    #[async_trait]
    impl ContextRetriever for PanickingRetriever {
        async fn retrieve(
            &self,
            _query: &str,
            _profile_id: i64,
            _top_k: usize,
            _min_score: f32,
        ) -> Result<Option<String>, AppError> {
            panic!("retriever must not be called when context is pre-fetched");
        }
    }

    struct FailingRetriever;

    #[async_trait]
    impl ContextRetriever for FailingRetriever {
        async fn retrieve(
            &self,
            _query: &str,
            _profile_id: i64,
            _top_k: usize,
            _min_score: f32,
        ) -> Result<Option<String>, AppError> {
            Err(AppError::RetrievalFailure("sidecar down".to_string()))
        }
    }

    fn context(query: &str) -> RequestContext {
        RequestContext::new(query, 1, Language::English, Intent::ProfileInfo)
    }

    #[tokio::test]
    async fn test_skills_question_fetches_skills_only() {
        let llm = Arc::new(ScriptedLlm::new("Jane works with Python."));
        let responder = ProfileResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: false }),
            Arc::new(DisabledRetriever),
        );

        let reply = responder
            .process(&context("What skills does she have?"))
            .await
            .unwrap();

        assert_eq!(reply, "Jane works with Python.");
        let prompt = llm.last_prompt();
        assert!(prompt.contains("SKILLS:"));
        assert!(prompt.contains("Python (Languages)"));
        assert!(!prompt.contains("WORK EXPERIENCE:"));
        // The grading column never reaches the prompt.
        assert!(!prompt.contains("intermediate"));
    }

    #[tokio::test]
    async fn test_unmatched_query_gets_default_bundle() {
        let llm = Arc::new(ScriptedLlm::new("ok"));
        let responder = ProfileResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: false }),
            Arc::new(DisabledRetriever),
        );

        responder
            .process(&context("Merhaba, nasılsın?"))
            .await
            .unwrap();

        let prompt = llm.last_prompt();
        assert!(prompt.contains("Name: Jane Doe"));
        assert!(prompt.contains("SUMMARY:"));
        assert!(prompt.contains("SKILLS:"));
    }

    #[tokio::test]
    async fn test_proficiency_wording_is_removed() {
        let llm = Arc::new(ScriptedLlm::new(
            "She is Proficient in Python and has proficiency in Rust.",
        ));
        let responder = ProfileResponder::new(
            llm,
            Arc::new(FixtureStore { fail: false }),
            Arc::new(DisabledRetriever),
        );

        let reply = responder
            .process(&context("What technology does she know?"))
            .await
            .unwrap();

        assert_eq!(reply, "She is Python and has Rust.");
    }

    #[tokio::test]
    async fn test_store_failure_returns_unavailable_message() {
        let llm = Arc::new(ScriptedLlm::new("should not be used"));
        let responder = ProfileResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: true }),
            Arc::new(DisabledRetriever),
        );

        let mut turkish = context("Yetenekleri neler?");
        turkish.language = Language::Turkish;
        let reply = responder.process(&turkish).await.unwrap();

        assert!(reply.starts_with("Profil verilerine"));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_prefetched_context_skips_retrieval() {
        let llm = Arc::new(ScriptedLlm::new("ok"));
        let responder = ProfileResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: false }),
            Arc::new(PanickingRetriever),
        );

        let ctx = context("What skills does she have?")
            .with_retrieved_context("Jane spoke at RustConf 2024.");
        responder.process(&ctx).await.unwrap();

        assert!(llm.last_prompt().contains("Jane spoke at RustConf 2024."));
    }

    #[tokio::test]
    async fn test_retrieval_failure_only_drops_augmentation() {
        let llm = Arc::new(ScriptedLlm::new("ok"));
        let responder = ProfileResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: false }),
            Arc::new(FailingRetriever),
        );

        let reply = responder
            .process(&context("What skills does she have?"))
            .await
            .unwrap();

        assert_eq!(reply, "ok");
        assert!(!llm.last_prompt().contains("ADDITIONAL CONTEXT:"));
    }
}
