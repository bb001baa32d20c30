// CVChat backend entry point.
// Wires the knowledge store, generation client and responders into the
// request orchestrator, then serves a line-oriented chat loop on stdin.

mod agents;
mod brain;
mod config;
mod database;
mod error;
mod models;
mod orchestrator;
mod services;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use agents::{DocumentResponder, GuardrailResponder, ProfileResponder, RepositoryResponder};
use config::AppConfig;
use database::SqliteProfileStore;
use orchestrator::Orchestrator;
use services::traits::{ContextRetriever, GenerationService, ProfileStore, RepositoryHost};
use services::{
    ChatCompletionsClient, DisabledRetriever, GithubClient, HttpRetriever, StaticDocumentLinks,
    StoreRepositoryHost,
};

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("cvchat-core".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing()?;

    let config = AppConfig::from_env().context("configuration error")?;
    info!(profile_id = config.profile_id, "Configuration loaded");

    let store: Arc<dyn ProfileStore> = Arc::new(
        SqliteProfileStore::connect(&config.database_url)
            .await
            .context("knowledge store initialization failed")?,
    );

    let llm: Arc<dyn GenerationService> = Arc::new(ChatCompletionsClient::new(
        &config.llm_base_url,
        &config.llm_api_key,
        &config.llm_model,
    ));

    let host: Arc<dyn RepositoryHost> = match &config.github_api_url {
        Some(api_url) => {
            info!("Repository host: hosting API at {}", api_url);
            Arc::new(GithubClient::new(
                api_url,
                config.github_token.clone(),
                store.clone(),
            ))
        }
        None => {
            info!("Repository host: project-table fallback");
            Arc::new(StoreRepositoryHost::new(store.clone()))
        }
    };

    let retriever: Arc<dyn ContextRetriever> = match &config.retrieval_url {
        Some(retrieval_url) => {
            info!("Context retrieval enabled at {}", retrieval_url);
            Arc::new(HttpRetriever::new(retrieval_url))
        }
        None => {
            info!("Context retrieval disabled");
            Arc::new(DisabledRetriever)
        }
    };

    let links = Arc::new(
        StaticDocumentLinks::new(&config.frontend_url)
            .context("invalid frontend URL for document links")?,
    );

    let orchestrator = Orchestrator::new(
        config.default_language,
        ProfileResponder::new(llm.clone(), store.clone(), retriever),
        RepositoryResponder::new(llm.clone(), host, store.clone()),
        DocumentResponder::new(llm.clone(), store, links),
        GuardrailResponder::new(llm),
    );

    info!("Ready. Type a question, one per line (Ctrl-D to quit).");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        match orchestrator.process_request(query, config.profile_id).await {
            Ok(reply) => println!("{}\n", reply),
            Err(e) => {
                warn!("Request failed: {}", e);
                println!("[error] {}\n", e);
            }
        }
    }

    info!("Shutting down");
    Ok(())
}
