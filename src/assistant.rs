//! Venue assistant
//!
//! Answers free-text questions about venues. Without agent credentials the
//! answer comes from local rules over the venue snapshot; with credentials
//! the question is forwarded to the external agent together with a small
//! venue context. An agent failure is reported as such and never falls back
//! to the local rules.

mod agent;
mod error;
mod extract;
mod intent;
mod offline;
#[cfg(test)]
pub mod testing;

pub use agent::{AgentClient, AgentContext, AgentPayload, CompactVenue, HttpAgentClient};
pub use error::{AgentError, AssistantError};

use crate::db::{Database, Venue};
use agent::AGENT_INSTRUCTIONS;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Most venues included in the agent context
const CONTEXT_LIMIT: usize = 6;

/// Answer to an assistant query
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub reply: String,
    /// True when produced by the local rules rather than the agent
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub simulated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl AssistantReply {
    fn simulated(reply: String) -> Self {
        Self {
            reply,
            simulated: true,
            tokens_used: None,
            raw: None,
        }
    }
}

/// Stateless query resolver; the mode is fixed at construction
#[derive(Clone)]
pub struct Assistant {
    db: Database,
    agent: Option<Arc<dyn AgentClient>>,
}

impl Assistant {
    pub fn new(db: Database, agent: Option<Arc<dyn AgentClient>>) -> Self {
        Self { db, agent }
    }

    pub fn is_delegated(&self) -> bool {
        self.agent.is_some()
    }

    pub async fn query(&self, message: &str) -> Result<AssistantReply, AssistantError> {
        if message.trim().is_empty() {
            return Err(AssistantError::Validation("message required".to_string()));
        }

        let venues = self.db.list_venues(None)?;

        match &self.agent {
            None => Ok(AssistantReply::simulated(offline::respond(message, &venues))),
            Some(agent) => self.delegate(agent.as_ref(), message, &venues).await,
        }
    }

    async fn delegate(
        &self,
        agent: &dyn AgentClient,
        message: &str,
        venues: &[Venue],
    ) -> Result<AssistantReply, AssistantError> {
        let payload = AgentPayload {
            input: message.to_string(),
            context: AgentContext {
                venues: build_context(message, venues),
                instructions: AGENT_INSTRUCTIONS.to_string(),
            },
        };

        let start = Instant::now();
        let response = match agent.invoke(&payload).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    duration_ms = %start.elapsed().as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Agent request failed"
                );
                return Err(AssistantError::Proxy(e));
            }
        };

        let tokens_used = extract::extract_tokens_used(&response);
        tracing::info!(
            duration_ms = %start.elapsed().as_millis(),
            tokens_used,
            context_venues = payload.context.venues.len(),
            "Agent request completed"
        );

        if let Err(e) = self.db.record_token_usage(tokens_used, false) {
            tracing::warn!(error = %e, "Failed to record token usage");
        }

        Ok(AssistantReply {
            reply: extract::extract_reply(&response),
            simulated: false,
            tokens_used: Some(tokens_used),
            raw: Some(response),
        })
    }
}

/// Venues handed to the agent: capacity matches when the message asks for
/// a head count, otherwise the first few venues in registry order
fn build_context(message: &str, venues: &[Venue]) -> Vec<CompactVenue> {
    match intent::capacity_intent(message) {
        Some(guests) => intent::venues_fitting(venues, guests)
            .into_iter()
            .take(CONTEXT_LIMIT)
            .map(CompactVenue::detailed)
            .collect(),
        None => venues
            .iter()
            .take(CONTEXT_LIMIT)
            .map(CompactVenue::summary)
            .collect(),
    }
}
