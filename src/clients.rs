use crate::error::FetchError;
use crate::event::Fixture;
use crate::graphql::{self, EventMarkets, GraphQlRequest};
use crate::settings::Settings;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Longest slice of an error body echoed back into a transport error.
const ERROR_BODY_PREVIEW: usize = 200;

/// Source of fixtures and markets for the pipeline.
#[async_trait]
pub trait OddsProvider: Send + Sync {
    async fn fetch_fixtures(&self, tournament_slug: &str) -> Result<Vec<Fixture>, FetchError>;

    async fn fetch_markets(&self, event_id: &str) -> Result<EventMarkets, FetchError>;
}

// Stake GraphQL API client
#[derive(Clone)]
pub struct StakeClient {
    http_client: Client,
    endpoint: String,
}

impl StakeClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| FetchError::transport("client setup", e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: settings.endpoint.clone(),
        })
    }

    /// Send one operation and return the raw body of a successful response.
    async fn post(&self, request: &GraphQlRequest) -> Result<Vec<u8>, FetchError> {
        let operation = request.operation_name;

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::transport(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
            return Err(FetchError::transport(
                operation,
                format!("HTTP {} - {}", status, preview),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(operation, e.to_string()))?;

        debug!(operation, bytes = body.len(), "received response");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl OddsProvider for StakeClient {
    async fn fetch_fixtures(&self, tournament_slug: &str) -> Result<Vec<Fixture>, FetchError> {
        let body = self
            .post(&GraphQlRequest::tournament_fixtures(tournament_slug))
            .await?;
        graphql::decode_fixtures(&body)
    }

    async fn fetch_markets(&self, event_id: &str) -> Result<EventMarkets, FetchError> {
        let body = self.post(&GraphQlRequest::event_markets(event_id)).await?;
        graphql::decode_markets(&body)
    }
}
