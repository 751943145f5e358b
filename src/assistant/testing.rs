//! Mock agent client for testing
//!
//! Replays queued results and records every payload it receives.

use super::agent::{AgentClient, AgentPayload};
use super::AgentError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockAgentClient {
    responses: Mutex<VecDeque<Result<Value, AgentError>>>,
    payloads: Mutex<Vec<AgentPayload>>,
}

impl MockAgentClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: AgentError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded payloads
    pub fn recorded_payloads(&self) -> Vec<AgentPayload> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentClient for MockAgentClient {
    async fn invoke(&self, payload: &AgentPayload) -> Result<Value, AgentError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::network("No mock response queued")))
    }
}
