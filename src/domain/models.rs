use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// HTTP verb of a catalog entry, parsed from the `type` field.
///
/// Labels are matched case-insensitively. Anything else is kept verbatim as
/// `Unrecognized` so the verifier can skip it without failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum EndpointMethod {
    Get,
    Patch,
    Post,
    Unrecognized(String),
}

impl From<String> for EndpointMethod {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "get" => EndpointMethod::Get,
            "patch" => EndpointMethod::Patch,
            "post" => EndpointMethod::Post,
            _ => EndpointMethod::Unrecognized(raw),
        }
    }
}

impl From<EndpointMethod> for String {
    fn from(method: EndpointMethod) -> Self {
        match method {
            EndpointMethod::Get => "get".to_string(),
            EndpointMethod::Patch => "patch".to_string(),
            EndpointMethod::Post => "post".to_string(),
            EndpointMethod::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for EndpointMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointMethod::Get => f.write_str("GET"),
            EndpointMethod::Patch => f.write_str("PATCH"),
            EndpointMethod::Post => f.write_str("POST"),
            EndpointMethod::Unrecognized(raw) => f.write_str(&raw.to_ascii_uppercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EndpointDescriptor {
    pub url: String,
    #[serde(rename = "type")]
    pub method: EndpointMethod,
    /// Only sent for POST.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(rename = "expectedResultCode")]
    pub expected_status: u16,
}

/// Value for the `authorization` header of every endpoint request.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn bearer(access_token: &str) -> Self {
        AuthToken(format!("{}{}", super::constants::BEARER_SCHEME, access_token))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    FailFast,
    CollectAll,
}

impl FailureMode {
    pub fn from_flag(fail_fast: bool) -> Self {
        if fail_fast {
            FailureMode::FailFast
        } else {
            FailureMode::CollectAll
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationFailure {
    pub method: String,
    pub url: String,
    pub expected: u16,
    pub actual: u16,
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} method: {} (expected status code {} but got {})",
            self.method, self.url, self.expected, self.actual
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunVerdict {
    pub passed: bool,
    pub mode: FailureMode,
    pub checked: usize,
    pub skipped: usize,
    pub failures: Vec<VerificationFailure>,
}

#[derive(Serialize)]
pub struct TestReport {
    pub environment: String,
    pub catalog: String,
    pub verdict: RunVerdict,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JobItem {
    #[serde(default)]
    pub approval_request_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub job_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobList {
    pub items: Vec<JobItem>,
}

#[derive(Debug, Serialize)]
pub struct RollbackReport {
    pub workflow_id: String,
    pub approval_request_id: String,
    pub job_name: Option<String>,
    pub status: u16,
}
