//! External agent client
//!
//! The agent service takes the user's message plus a small venue context and
//! answers with JSON. One request per query, no retries.

use super::AgentError;
use crate::config::AgentConfig;
use crate::db::{Venue, VenueStatus};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Fixed instructions sent with every delegated query
pub const AGENT_INSTRUCTIONS: &str = "You are a Venue Assistant. Use the provided venues list to answer precisely and concisely. When the user asks about booking, instruct them to use the Book button with date and expected members.";

/// Reduced venue projection sent as agent context
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompactVenue {
    pub id: i64,
    pub name: String,
    pub capacity: i64,
    pub rent_per_day: f64,
    pub sell_price: f64,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: VenueStatus,
}

impl CompactVenue {
    /// Projection for the default context (no description)
    pub fn summary(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            capacity: venue.capacity,
            rent_per_day: venue.price_rent_per_day,
            sell_price: venue.price_sell,
            location: venue.location.clone(),
            description: None,
            status: venue.status,
        }
    }

    /// Projection for capacity matches, which keeps the description.
    ///
    /// Prices go out as `rent_per_day` and `sell_price` here too, not as the
    /// stored `price_rent_per_day` and `price_sell` column names, so agents
    /// see one field set whichever branch built the context.
    pub fn detailed(venue: &Venue) -> Self {
        Self {
            description: Some(venue.description.clone()),
            ..Self::summary(venue)
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentContext {
    pub venues: Vec<CompactVenue>,
    pub instructions: String,
}

/// Body of an agent invocation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentPayload {
    pub input: String,
    pub context: AgentContext,
}

/// Common interface for agent backends
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Send one payload and return the parsed JSON response
    async fn invoke(&self, payload: &AgentPayload) -> Result<Value, AgentError>;
}

/// HTTP client for the hosted agent service
pub struct HttpAgentClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl HttpAgentClient {
    /// Build a client when the configuration carries credentials
    pub fn from_config(config: &AgentConfig) -> Result<Option<Self>, AgentError> {
        let Some((api_key, agent_id)) = config.credentials() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Some(Self {
            client,
            api_key: api_key.to_string(),
            endpoint: format!(
                "{}/v1/agents/{agent_id}/invoke",
                config.base_url.trim_end_matches('/')
            ),
        }))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> AgentError {
        match status.as_u16() {
            401 | 403 => AgentError::auth(format!("Authentication failed: {body}")),
            429 => AgentError::rate_limit(format!("Rate limited: {body}")),
            500..=599 => AgentError::server_error(format!("Server error: {body}")),
            _ => AgentError::unknown(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    async fn invoke(&self, payload: &AgentPayload) -> Result<Value, AgentError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AgentError::timeout(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    AgentError::network(format!("Connection failed: {e}"))
                } else {
                    AgentError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AgentError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            AgentError::invalid_response(format!("Failed to parse response: {e} - body: {body}"))
        })
    }
}
