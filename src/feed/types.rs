use serde::Serialize;
use serde_json::Value;

/// Envelope returned by every vendor call. Failures are data, not `Err`:
/// callers forward the envelope as-is to whoever invoked the tool.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ApiUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            usage: None,
            error: None,
            details: None,
        }
    }

    pub fn failed(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            usage: None,
            error: Some(error.into()),
            details,
        }
    }

    pub fn with_usage(mut self, usage: ApiUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Quota counters the odds vendor reports in response headers.
/// Kept as the raw header text; the vendor sometimes sends floats.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ApiUsage {
    pub remaining: Option<String>,
    pub used: Option<String>,
}

impl ApiUsage {
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        Self {
            remaining: header_text(headers, "x-requests-remaining"),
            used: header_text(headers, "x-requests-used"),
        }
    }

    /// Remaining requests as a number, tolerating "14527.0".
    pub fn remaining_count(&self) -> Option<u64> {
        self.remaining
            .as_deref()
            .and_then(|v| v.parse::<f64>().ok())
            .map(|v| v as u64)
    }
}

fn header_text(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
