// Shared test doubles for the integration suites
#![allow(dead_code)]

use async_trait::async_trait;
use devrev_mcp::error::{DevRevMcpError, Result};
use devrev_mcp::http::{ApiNamespace, ApiResponse, DevRevClient};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// One recorded API call: where it went and what it carried.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub namespace: ApiNamespace,
    pub endpoint: String,
    pub payload: Value,
}

enum Scripted {
    Respond(ApiResponse),
    Disconnect(String),
}

/// Scripted stand-in for the DevRev API.
///
/// Responses are queued per endpoint and consumed in order, and every call
/// is recorded so tests can assert the exact payloads sent. Clones share
/// the same script and call log, which lets a test keep a handle after
/// moving a clone into the server.
#[derive(Clone)]
pub struct ScriptedClient {
    script: Arc<Mutex<HashMap<String, VecDeque<Scripted>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for the next call to `endpoint`.
    pub fn respond(self, endpoint: &str, status: u16, body: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(Scripted::Respond(ApiResponse::new(status, body)));
        self
    }

    /// Queue a transport-level failure for the next call to `endpoint`.
    pub fn disconnect(self, endpoint: &str, message: &str) -> Self {
        self.script
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(Scripted::Disconnect(message.to_string()));
        self
    }

    /// Everything posted so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The most recent payload posted to `endpoint`, if any.
    pub fn payload_sent_to(&self, endpoint: &str) -> Option<Value> {
        self.calls()
            .iter()
            .rev()
            .find(|call| call.endpoint == endpoint)
            .map(|call| call.payload.clone())
    }
}

impl Default for ScriptedClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DevRevClient for ScriptedClient {
    async fn post(
        &self,
        namespace: ApiNamespace,
        endpoint: &str,
        payload: Value,
    ) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            namespace,
            endpoint: endpoint.to_string(),
            payload,
        });

        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Disconnect(message)) => Err(DevRevMcpError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                message,
            ))),
            None => panic!("no scripted response for endpoint '{}'", endpoint),
        }
    }
}
