//! Semantic retrieval client.
//!
//! Talks to the vector-search sidecar over HTTP and folds the returned
//! chunks into a single context block for prompt assembly. Deployments
//! without a sidecar wire in `DisabledRetriever` instead.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::services::traits::ContextRetriever;

const SEARCH_PATH: &str = "/search";

#[derive(Debug, Deserialize)]
struct SearchReply {
    #[serde(default)]
    results: Vec<RetrievedChunk>,
}

#[derive(Debug, Deserialize)]
struct RetrievedChunk {
    text: String,
    #[serde(default)]
    source_type: Option<String>,
    #[allow(dead_code)]
    #[serde(default)]
    similarity_score: f32,
}

/// HTTP implementation of the retrieval contract.
pub struct HttpRetriever {
    client: Client,
    base_url: String,
}

impl HttpRetriever {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn format_context(chunks: &[RetrievedChunk]) -> String {
        chunks
            .iter()
            .map(|chunk| match &chunk.source_type {
                Some(source) => format!("[{}] {}", source, chunk.text),
                None => chunk.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait]
impl ContextRetriever for HttpRetriever {
    async fn retrieve(
        &self,
        query: &str,
        profile_id: i64,
        top_k: usize,
        min_score: f32,
    ) -> Result<Option<String>, AppError> {
        let endpoint = format!("{}{}", self.base_url, SEARCH_PATH);
        let payload = json!({
            "query": query,
            "profile_id": profile_id,
            "top_k": top_k,
            "min_score": min_score,
        });

        let response = self
            .client
            .post(&endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::RetrievalFailure(format!("search request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RetrievalFailure(format!(
                "search failed with status {}",
                status
            )));
        }

        let reply: SearchReply = response
            .json()
            .await
            .map_err(|e| AppError::RetrievalFailure(format!("search decode failed: {}", e)))?;

        debug!("Retrieved {} context chunks", reply.results.len());

        if reply.results.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::format_context(&reply.results)))
    }
}

/// No-op retriever for deployments without a vector-search sidecar.
pub struct DisabledRetriever;

#[async_trait]
impl ContextRetriever for DisabledRetriever {
    async fn retrieve(
        &self,
        _query: &str,
        _profile_id: i64,
        _top_k: usize,
        _min_score: f32,
    ) -> Result<Option<String>, AppError> {
        Ok(None)
    }
}
