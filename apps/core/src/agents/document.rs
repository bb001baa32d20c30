//! Document responder.
//!
//! Points the user at the CV download flow. No file bytes move through
//! here; the reply only carries the link and what to expect behind it.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::agents::prompts;
use crate::agents::Responder;
use crate::brain::RequestContext;
use crate::error::AppError;
use crate::models::BasicInfo;
use crate::services::traits::{DocumentLinks, GenerationService, ProfileStore};

const GENERATION_TEMPERATURE: f32 = 0.7;
const GENERATION_MAX_TOKENS: u32 = 500;

const CV_CONTENTS: &str = "CV INCLUDES:
- Technical skills and expertise
- Work experience and professional projects
- Public repository portfolio
- Education background and certifications
- Contact information";

pub struct DocumentResponder {
    llm: Arc<dyn GenerationService>,
    store: Arc<dyn ProfileStore>,
    links: Arc<dyn DocumentLinks>,
}

impl DocumentResponder {
    pub fn new(
        llm: Arc<dyn GenerationService>,
        store: Arc<dyn ProfileStore>,
        links: Arc<dyn DocumentLinks>,
    ) -> Self {
        Self { llm, store, links }
    }

    fn build_prompt(
        &self,
        context: &RequestContext,
        info: Option<&BasicInfo>,
        download_url: &str,
    ) -> String {
        let subject = info.map(|record| record.name.as_str()).unwrap_or("the candidate");

        let mut parts = vec![
            prompts::document_system_prompt(subject),
            String::new(),
            prompts::DOCUMENT_INSTRUCTIONS.to_string(),
            String::new(),
            prompts::language_directive(context.language),
            String::new(),
            format!("USER QUERY: {}", context.query),
            String::new(),
            "CANDIDATE INFORMATION:".to_string(),
            format!("- Name: {}", subject),
        ];

        if let Some(record) = info {
            if let Some(location) = &record.location {
                parts.push(format!("- Location: {}", location));
            }
            if let Some(linkedin) = &record.linkedin_url {
                parts.push(format!("- LinkedIn: {}", linkedin));
            }
            if let Some(username) = &record.github_username {
                parts.push(format!("- GitHub: https://github.com/{}", username));
            }
        }

        parts.push(String::new());
        parts.push(CV_CONTENTS.to_string());
        parts.push(String::new());
        parts.push(format!("CV DOWNLOAD LINK: {}", download_url));

        parts.join("\n")
    }
}

#[async_trait]
impl Responder for DocumentResponder {
    async fn process(&self, context: &RequestContext) -> Result<String, AppError> {
        let info = match self.store.get_basic_info(context.profile_id).await {
            Ok(info) => info,
            Err(e) => {
                error!("Basic info fetch failed: {}", e);
                return Ok(prompts::unavailable_message(context.language).to_string());
            }
        };

        let download_url = self.links.build_download_url(context.profile_id);
        let prompt = self.build_prompt(context, info.as_ref(), &download_url);

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{Intent, Language};
    use crate::models::{Experience, Project, Skill};
    use std::sync::Mutex;

    struct ScriptedLlm {
        prompts: Mutex<Vec<String>>,
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
            Ok("  You can download the CV here.  ".to_string())
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
                email: None,
                location: Some("Berlin".to_string()),
                summary: None,
                linkedin_url: Some("https://linkedin.com/in/janedoe".to_string()),
                github_username: None,
            }))
        }
        async fn get_summary(&self, _profile_id: i64) -> Result<Option<String>, AppError> {
            Ok(None)
        }
        async fn get_skills(&self, _profile_id: i64) -> Result<Vec<Skill>, AppError> {
            Ok(vec![])
        }
        async fn get_experiences(&self, _profile_id: i64) -> Result<Vec<Experience>, AppError> {
            Ok(vec![])
        }
        async fn get_projects(&self, _profile_id: i64) -> Result<Vec<Project>, AppError> {
            Ok(vec![])
        }
    }

    struct FixedLinks;

    impl DocumentLinks for FixedLinks {
        fn build_download_url(&self, _profile_id: i64) -> String {
            "https://cv.example.com/download-cv".to_string()
        }
    }

    fn context(query: &str) -> RequestContext {
        RequestContext::new(query, 1, Language::English, Intent::DocumentRequest)
    }

    #[tokio::test]
    async fn test_prompt_carries_link_and_identity() {
        let llm = Arc::new(ScriptedLlm {
            prompts: Mutex::new(vec![]),
        });
        let responder = DocumentResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: false }),
            Arc::new(FixedLinks),
        );

        let reply = responder
            .process(&context("Can I download his CV?"))
            .await
            .unwrap();

        assert_eq!(reply, "You can download the CV here.");
        let prompt = llm.prompts.lock().unwrap().last().cloned().unwrap();
        assert!(prompt.contains("CV DOWNLOAD LINK: https://cv.example.com/download-cv"));
        assert!(prompt.contains("- Name: Jane Doe"));
        assert!(prompt.contains("- LinkedIn: https://linkedin.com/in/janedoe"));
        assert!(prompt.contains("CV INCLUDES:"));
    }

    #[tokio::test]
    async fn test_store_failure_returns_unavailable_message() {
        let llm = Arc::new(ScriptedLlm {
            prompts: Mutex::new(vec![]),
        });
        let responder = DocumentResponder::new(
            llm.clone(),
            Arc::new(FixtureStore { fail: true }),
            Arc::new(FixedLinks),
        );

        let reply = responder
            .process(&context("Send me the resume"))
            .await
            .unwrap();

        assert!(reply.starts_with("The profile data is not available"));
        assert!(llm.prompts.lock().unwrap().is_empty());
    }
}
