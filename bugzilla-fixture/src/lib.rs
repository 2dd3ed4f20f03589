//! # Bugzilla Fixture
//!
//! **INTERNAL USE ONLY**: This crate exists solely to provide an in-memory Bugzilla server for
//! integration testing `bugzilla-core`. It is not intended for production use.
//!
//! [`FakeBugzilla`] answers `Bugzilla.version` with a configurable release, returns canned
//! responses or faults for chosen commands, echoes the parameters of every other command, and
//! records every call it receives.
use bugzilla_core::{
    args::Params,
    transport::{Transport, TransportError},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;

/// A single call received by the fake server.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub command: String,
    pub params: Params,
}

#[derive(Debug, Default)]
pub struct FakeBugzilla {
    version: Option<String>,
    responses: HashMap<String, Value>,
    faults: HashMap<String, (i64, String)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeBugzilla {
    /// A server reporting `version` from `Bugzilla.version`.
    pub fn new(version: &str) -> Self {
        Self {
            version: Some(version.to_string()),
            ..Default::default()
        }
    }

    /// A server whose `Bugzilla.version` response carries no version at all.
    pub fn without_version() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, response: Value) -> Self {
        self.responses.insert(command.to_string(), response);
        self
    }

    pub fn fault(mut self, command: &str, code: i64, message: &str) -> Self {
        self.faults
            .insert(command.to_string(), (code, message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("fake server lock poisoned").clone()
    }

    /// Parameters of every call made to `command`, in order.
    pub fn calls_to(&self, command: &str) -> Vec<Params> {
        self.calls()
            .into_iter()
            .filter(|call| call.command == command)
            .map(|call| call.params)
            .collect()
    }

    /// Commands received, excluding version queries.
    pub fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.command)
            .filter(|command| command != "Bugzilla.version")
            .collect()
    }

    fn answer(&self, command: &str, params: Params) -> Result<Value, TransportError> {
        if let Some((code, message)) = self.faults.get(command) {
            return Err(TransportError::Fault {
                code: *code,
                message: message.clone(),
            });
        }

        if let Some(response) = self.responses.get(command) {
            return Ok(response.clone());
        }

        if command == "Bugzilla.version" {
            return Ok(match &self.version {
                Some(version) => json!({ "version": version }),
                None => json!({}),
            });
        }

        Ok(Value::Object(params))
    }
}

impl Transport for FakeBugzilla {
    async fn send(&self, command: &str, params: Params) -> Result<Value, TransportError> {
        self.calls
            .lock()
            .expect("fake server lock poisoned")
            .push(RecordedCall {
                command: command.to_string(),
                params: params.clone(),
            });

        self.answer(command, params)
    }
}
