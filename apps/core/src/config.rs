use std::env;

use validator::Validate;

use crate::brain::language::Language;
use crate::error::AppError;

// --- Defaults ---
const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_DATABASE_URL: &str = "sqlite://cvchat.sqlite";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_LANGUAGE_CODE: &str = "en";
const DEFAULT_PROFILE_ID: i64 = 1;

/// Runtime configuration, read from the environment once at startup.
///
/// Every field except the API key has a working default so a bare
/// `.env` with only `LLM_API_KEY` boots the binary.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1, message = "LLM_API_KEY must not be empty"))]
    pub llm_api_key: String,
    #[validate(url(message = "LLM_BASE_URL must be a valid URL"))]
    pub llm_base_url: String,
    #[validate(length(min = 1, message = "LLM_MODEL must not be empty"))]
    pub llm_model: String,
    #[validate(length(min = 1, message = "DATABASE_URL must not be empty"))]
    pub database_url: String,
    /// Repository-hosting API endpoint. Unset falls back to records
    /// derived from the projects table.
    #[validate(url(message = "GITHUB_API_URL must be a valid URL"))]
    pub github_api_url: Option<String>,
    pub github_token: Option<String>,
    /// Retrieval sidecar endpoint. Unset disables augmentation.
    #[validate(url(message = "RETRIEVAL_URL must be a valid URL"))]
    pub retrieval_url: Option<String>,
    #[validate(url(message = "FRONTEND_URL must be a valid URL"))]
    pub frontend_url: String,
    /// Fallback when language detection finds no signal.
    pub default_language: Language,
    /// The profile every request is answered about.
    pub profile_id: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let llm_api_key = env::var("LLM_API_KEY")
            .map_err(|_| AppError::Configuration("LLM_API_KEY is required".to_string()))?;

        let language_code = env_or("DEFAULT_LANGUAGE", DEFAULT_LANGUAGE_CODE);
        let default_language = Language::from_code(&language_code).ok_or_else(|| {
            AppError::Configuration(format!("unknown DEFAULT_LANGUAGE code: {}", language_code))
        })?;

        let profile_id = env_or("PROFILE_ID", &DEFAULT_PROFILE_ID.to_string())
            .parse::<i64>()
            .map_err(|e| AppError::Configuration(format!("invalid PROFILE_ID: {}", e)))?;

        let config = Self {
            llm_api_key,
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_LLM_BASE_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            github_api_url: env_opt("GITHUB_API_URL"),
            github_token: env_opt("GITHUB_TOKEN"),
            retrieval_url: env_opt("RETRIEVAL_URL"),
            frontend_url: env_or("FRONTEND_URL", DEFAULT_FRONTEND_URL),
            default_language,
            profile_id,
        };

        config.validate()?;
        Ok(config)
    }
}

// Empty environment values read as unset, so `VAR=` falls back.
fn env_or(name: &str, default: &str) -> String {
    env_opt(name).unwrap_or_else(|| default.to_string())
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
