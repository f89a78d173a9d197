// src/message.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, MISSING_MESSAGE};

pub const DEFAULT_SESSION_ID: &str = "web-client-default";

/// Fields are kept as raw JSON: the web client is loose about types and the
/// webhook gets whatever it sent.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub lang: Option<Value>,
    /// `None` only when the key is absent; an explicit `null` is kept.
    #[serde(default, rename = "sessionId", deserialize_with = "present")]
    pub session_id: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Python truthiness of a decoded JSON value.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

impl ChatRequest {
    pub fn into_payload(self) -> Result<UpstreamPayload, AppError> {
        let text = match self.message {
            Some(m) if !is_blank(&m) => m,
            _ => return Err(AppError::BadRequest(MISSING_MESSAGE)),
        };

        Ok(UpstreamPayload {
            text,
            sessionid: self
                .session_id
                .unwrap_or_else(|| Value::from(DEFAULT_SESSION_ID)),
            lang: Lang::sanitize(self.lang.as_ref().and_then(Value::as_str)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    De,
    Tr,
}

impl Lang {
    /// Unknown or missing codes fall back to English.
    pub fn sanitize(code: Option<&str>) -> Self {
        match code {
            Some("de") => Lang::De,
            Some("tr") => Lang::Tr,
            _ => Lang::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::De => "de",
            Lang::Tr => "tr",
        }
    }
}

/// Body sent to the n8n webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamPayload {
    pub text: Value,
    pub sessionid: Value,
    pub lang: Lang,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
