use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as};

/// Message used when an error response carries nothing readable
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Object form of `detail`. Each field decodes on its own, so an odd `code`
/// or `errors` never hides a readable `message`.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StructuredDetail {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub code: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub message: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Structured(StructuredDetail),
    Message(String),
    Other(Value),
}

/// Error body returned by the backend. Only `detail.message` is canonical;
/// a flat `detail` string or top-level `message` are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiErrorPayload {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
    #[serde(default)]
    pub message: Option<Value>,
}

impl ApiErrorPayload {
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }

    /// Most specific non-empty message: `detail.message`, then `detail`
    /// as a string, then top-level `message`.
    pub fn message(&self) -> Option<&str> {
        let detail = match &self.detail {
            Some(ErrorDetail::Structured(detail)) => detail.message.as_deref(),
            Some(ErrorDetail::Message(message)) => Some(message.as_str()),
            _ => None,
        };
        detail
            .filter(|m| !m.is_empty())
            .or_else(|| {
                self.message
                    .as_ref()
                    .and_then(Value::as_str)
                    .filter(|m| !m.is_empty())
            })
    }

    pub fn code(&self) -> Option<&str> {
        match &self.detail {
            Some(ErrorDetail::Structured(detail)) => detail.code.as_deref(),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match &self.detail {
            Some(ErrorDetail::Structured(detail)) => &detail.errors,
            _ => &[],
        }
    }

    pub fn message_or_fallback(&self) -> String {
        self.message().unwrap_or(FALLBACK_ERROR_MESSAGE).to_string()
    }
}
