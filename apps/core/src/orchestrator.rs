//! Central request router.
//!
//! One call runs the whole pipeline: validate, detect language, detect
//! intent, build the request context, dispatch to a responder, screen the
//! draft, return. No state survives between calls and nothing here talks
//! to a collaborator directly.

use tracing::{debug, info};
use uuid::Uuid;

use crate::agents::{
    DocumentResponder, GuardrailResponder, ProfileResponder, RepositoryResponder, Responder,
};
use crate::brain::{Intent, IntentDetector, Language, LanguageDetector, RequestContext};
use crate::error::AppError;

pub struct Orchestrator {
    language_detector: LanguageDetector,
    intent_detector: IntentDetector,
    profile: ProfileResponder,
    repository: RepositoryResponder,
    document: DocumentResponder,
    guardrail: GuardrailResponder,
}

impl Orchestrator {
    pub fn new(
        default_language: Language,
        profile: ProfileResponder,
        repository: RepositoryResponder,
        document: DocumentResponder,
        guardrail: GuardrailResponder,
    ) -> Self {
        Self {
            language_detector: LanguageDetector::with_default(default_language),
            intent_detector: IntentDetector::new(),
            profile,
            repository,
            document,
            guardrail,
        }
    }

    pub async fn process_request(&self, query: &str, profile_id: i64) -> Result<String, AppError> {
        self.process_with_context(query, profile_id, None).await
    }

    /// Same pipeline with retrieval context fetched ahead of routing, for
    /// callers that already ran a semantic search.
    pub async fn process_with_context(
        &self,
        query: &str,
        profile_id: i64,
        retrieved_context: Option<String>,
    ) -> Result<String, AppError> {
        if profile_id <= 0 {
            return Err(AppError::InvalidRequest(
                "profile id must be positive".to_string(),
            ));
        }
        if query.trim().is_empty() {
            return Err(AppError::InvalidRequest("query must not be empty".to_string()));
        }

        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, profile_id, stage = "received", "Processing request");

        // Language first; intent may use it.
        let language = self.language_detector.detect(query);
        debug!(request_id = %request_id, stage = "language_detected", language = language.code(), "Language detected");

        let intent = self.intent_detector.detect(query, language);
        debug!(request_id = %request_id, stage = "intent_detected", intent = intent.label(), "Intent detected");

        let mut context = RequestContext::new(query, profile_id, language, intent);
        if let Some(retrieved) = retrieved_context {
            context = context.with_retrieved_context(retrieved);
        }

        let draft = match intent {
            // Off-topic requests get the boundary message directly; the
            // screening pass applies to content responses only.
            Intent::OutOfScope => {
                let reply = self.guardrail.handle_out_of_scope(&context).await;
                info!(request_id = %request_id, stage = "returned", "Out-of-scope reply returned");
                return Ok(reply);
            }
            Intent::RepositoryInfo => {
                debug!(request_id = %request_id, stage = "dispatched", responder = "repository", "Routing");
                self.repository.process(&context).await?
            }
            Intent::DocumentRequest => {
                debug!(request_id = %request_id, stage = "dispatched", responder = "document", "Routing");
                self.document.process(&context).await?
            }
            Intent::ProfileInfo | Intent::GeneralQuestion => {
                debug!(request_id = %request_id, stage = "dispatched", responder = "profile", "Routing");
                self.profile.process(&context).await?
            }
        };

        let reply = self.guardrail.check_response(draft, &context).await;
        debug!(request_id = %request_id, stage = "guarded", "Response screened");

        info!(request_id = %request_id, stage = "returned", context = %context.summary(), "Request complete");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{BasicInfo, Experience, Project, RepositoryRecord, Skill};
    use crate::services::retrieval::DisabledRetriever;
    use crate::services::traits::{
        DocumentLinks, GenerationService, ProfileStore, RepositoryHost,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct ScriptedLlm {
        replies: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
                prompts: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
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
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                return Err(AppError::GenerationFailure("script exhausted".to_string()));
            }
            Ok(replies.remove(0))
        }
    }

    struct FixtureStore;

    #[async_trait]
    impl ProfileStore for FixtureStore {
        async fn get_basic_info(&self, profile_id: i64) -> Result<Option<BasicInfo>, AppError> {
            Ok(Some(BasicInfo {
                id: profile_id,
                name: "Jane Doe".to_string(),
                email: None,
                location: None,
                summary: None,
                linkedin_url: None,
                github_username: Some("janedoe".to_string()),
            }))
        }
        async fn get_summary(&self, _profile_id: i64) -> Result<Option<String>, AppError> {
            Ok(Some("Systems engineer.".to_string()))
        }
        async fn get_skills(&self, _profile_id: i64) -> Result<Vec<Skill>, AppError> {
            Ok(vec![Skill {
                id: 1,
                name: "Python".to_string(),
                category: Some("Languages".to_string()),
                proficiency_level: None,
            }])
        }
        async fn get_experiences(&self, _profile_id: i64) -> Result<Vec<Experience>, AppError> {
            Ok(vec![])
        }
        async fn get_projects(&self, _profile_id: i64) -> Result<Vec<Project>, AppError> {
            Ok(vec![])
        }
    }

    struct FixtureHost;

    #[async_trait]
    impl RepositoryHost for FixtureHost {
        async fn list_repositories(
            &self,
            _profile_id: i64,
            _max_count: usize,
            _min_popularity: u32,
            _include_forks: bool,
        ) -> Result<Vec<RepositoryRecord>, AppError> {
            Ok(vec![RepositoryRecord {
                name: "chat-router".to_string(),
                description: Some("Multi-agent request routing layer".to_string()),
                language: Some("Rust".to_string()),
                topics: vec!["routing".to_string()],
                stars: 12,
                forks: 2,
                size_kb: 300,
                is_fork: false,
                is_archived: false,
                pushed_at: None,
                html_url: None,
            }])
        }
    }

    struct FixedLinks;

    impl DocumentLinks for FixedLinks {
        fn build_download_url(&self, _profile_id: i64) -> String {
            "https://cv.example.com/download-cv".to_string()
        }
    }

    fn orchestrator(llm: Arc<ScriptedLlm>) -> Orchestrator {
        let store: Arc<dyn ProfileStore> = Arc::new(FixtureStore);
        let profile = ProfileResponder::new(
            llm.clone(),
            store.clone(),
            Arc::new(DisabledRetriever),
        );
        let repository =
            RepositoryResponder::new(llm.clone(), Arc::new(FixtureHost), store.clone());
        let document = DocumentResponder::new(llm.clone(), store, Arc::new(FixedLinks));
        let guardrail = GuardrailResponder::new(llm);
        Orchestrator::new(Language::English, profile, repository, document, guardrail)
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid_request() {
        let llm = ScriptedLlm::new(&[]);
        let orch = orchestrator(llm.clone());

        let result = orch.process_request("   ", 1).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_nonpositive_profile_id_is_invalid_request() {
        let llm = ScriptedLlm::new(&[]);
        let orch = orchestrator(llm.clone());

        assert!(matches!(
            orch.process_request("Hello", 0).await,
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            orch.process_request("Hello", -4).await,
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_repository_intent_routes_to_repository_responder() {
        let llm = ScriptedLlm::new(&["A showcase repository portfolio overview."]);
        let orch = orchestrator(llm.clone());

        let reply = orch
            .process_request("What are his best GitHub repositories?", 1)
            .await
            .unwrap();

        assert_eq!(reply, "A showcase repository portfolio overview.");
        assert!(llm.last_prompt().contains("REPOSITORY DATA:"));
    }

    #[tokio::test]
    async fn test_document_intent_routes_to_document_responder() {
        let llm = ScriptedLlm::new(&["You can download the CV at the link."]);
        let orch = orchestrator(llm.clone());

        let reply = orch.process_request("Can I download his CV?", 1).await.unwrap();

        assert!(reply.contains("download"));
        assert!(llm
            .last_prompt()
            .contains("CV DOWNLOAD LINK: https://cv.example.com/download-cv"));
    }

    #[tokio::test]
    async fn test_general_question_routes_to_profile_responder() {
        let llm = ScriptedLlm::new(&["Jane enjoys mentoring and systems work."]);
        let orch = orchestrator(llm.clone());

        orch.process_request("What motivates him in his career path?", 1)
            .await
            .unwrap();

        assert!(llm.last_prompt().contains("PROFILE DATA:"));
    }

    #[tokio::test]
    async fn test_out_of_scope_bypasses_response_screening() {
        // One scripted reply, shaped so that a screening pass would have to
        // spend a second call on it. Exactly one call proves the bypass.
        let boundary = "I cannot help with that here, it is out of scope and not allowed in this assistant.";
        let llm = ScriptedLlm::new(&[boundary]);
        let orch = orchestrator(llm.clone());

        let reply = orch
            .process_request("What's the weather like today?", 1)
            .await
            .unwrap();

        assert_eq!(reply, boundary);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test]
    async fn test_prefetched_context_reaches_the_responder() {
        let llm = ScriptedLlm::new(&["She has spoken about Python at conferences."]);
        let orch = orchestrator(llm.clone());

        orch.process_with_context(
            "What skills does she have?",
            1,
            Some("Jane spoke at RustConf 2024.".to_string()),
        )
        .await
        .unwrap();

        let prompt = llm.last_prompt();
        assert!(prompt.contains("ADDITIONAL CONTEXT:"));
        assert!(prompt.contains("Jane spoke at RustConf 2024."));
    }

    #[tokio::test]
    async fn test_generation_failure_propagates() {
        let llm = ScriptedLlm::new(&[]);
        let orch = orchestrator(llm);

        let result = orch.process_request("What skills does she have?", 1).await;
        assert!(matches!(result, Err(AppError::GenerationFailure(_))));
    }
}
