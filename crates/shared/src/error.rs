use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload PostgREST returns alongside a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl StoreErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw)
            .ok()
            .filter(|body| body.code.is_some() || body.message.is_some())
    }

    pub fn summary(&self) -> String {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown store error".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// Connect, TLS, timeout or body-read failure below HTTP semantics.
    #[error("transport error: {0}")]
    Transport(String),
    #[error("store returned {status}{}", describe_body(.body))]
    Status {
        status: u16,
        body: Option<StoreErrorBody>,
    },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("store not configured: {0}")]
    Unconfigured(String),
}

fn describe_body(body: &Option<StoreErrorBody>) -> String {
    body.as_ref()
        .map(|body| format!(": {}", body.summary()))
        .unwrap_or_default()
}

/// The single failure kind of a collection read.
#[derive(Debug, Clone, Error)]
#[error("fetch of '{collection}' failed: {failure}")]
pub struct FetchError {
    pub collection: String,
    pub failure: FetchFailure,
}

impl FetchError {
    pub fn new(collection: impl Into<String>, failure: FetchFailure) -> Self {
        Self {
            collection: collection.into(),
            failure,
        }
    }

    pub fn transport(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(collection, FetchFailure::Transport(message.into()))
    }

    pub fn decode(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(collection, FetchFailure::Decode(message.into()))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.failure, FetchFailure::Transport(_))
    }
}
