use crate::error::Result;
use crate::types::DeviceId;
use serde::Serialize;
use serde_json::Value;

/// Every command on the control stream ends with CRLF
pub const TERMINATOR: &[u8] = b"\r\n";

/// A single method call sent to a bulb
#[derive(Debug, Clone, Serialize)]
pub struct Command {
    pub id: DeviceId,
    pub method: String,
    pub params: Vec<Value>,
}

impl Command {
    /// Create a command with no parameters
    pub fn new(id: DeviceId, method: impl Into<String>) -> Self {
        Self {
            id,
            method: method.into(),
            params: Vec::new(),
        }
    }

    /// Set the parameter list
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    /// Serialize to compact JSON followed by the line terminator
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut payload = serde_json::to_vec(self)?;
        payload.extend_from_slice(TERMINATOR);
        Ok(payload)
    }
}
