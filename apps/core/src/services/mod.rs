//! External collaborators behind trait seams.
//!
//! ## Components
//! - `traits`: the contracts responders depend on
//! - `llm`: chat-completions text generation client
//! - `github`: repository-hosting API client with a store-backed fallback
//! - `retrieval`: semantic-search sidecar client
//! - `documents`: CV download-link construction
//!
//! Responders hold these behind `Arc<dyn Trait>` so tests can swap in
//! scripted fakes without touching the network.

pub mod documents;
pub mod github;
pub mod llm;
pub mod retrieval;
pub mod traits;

pub use documents::StaticDocumentLinks;
pub use github::{GithubClient, StoreRepositoryHost};
pub use llm::ChatCompletionsClient;
pub use retrieval::{DisabledRetriever, HttpRetriever};
pub use traits::{
    ContextRetriever, DocumentLinks, GenerationService, ProfileStore, RepositoryHost,
};
