//! Run configuration assembled from CLI flags and their env-var fallbacks.
//!
//! Secrets stay optional until a command needs them, so `rollback` does not
//! demand login credentials and `test` does not demand a workflow id.

use crate::cli::Cli;
use crate::error::SmokeError;
use std::fmt;

#[derive(Clone)]
pub struct Credentials {
    pub service_url: String,
    pub email: String,
    pub password: String,
    pub authorization_header: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("service_url", &self.service_url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ApprovalConfig {
    pub api_url: String,
    pub authorization_header: Option<String>,
}

impl fmt::Debug for ApprovalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApprovalConfig")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default)]
pub struct RunConfig {
    pub service_url: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub authorization_header: Option<String>,
    pub workflow_id: Option<String>,
    pub approval_api_url: String,
    pub approval_authorization: Option<String>,
}

impl RunConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        RunConfig {
            service_url: cli.url.clone(),
            email: cli.email.clone(),
            password: cli.password.clone(),
            authorization_header: cli.authorization.clone(),
            workflow_id: cli.workflow_id.clone(),
            approval_api_url: cli.approval_api_url.clone(),
            approval_authorization: cli.approval_authorization.clone(),
        }
    }

    pub fn credentials(&self) -> Result<Credentials, SmokeError> {
        Ok(Credentials {
            service_url: required(&self.service_url, "URL")?,
            email: required(&self.email, "EMAIL")?,
            password: required(&self.password, "PASSWORD")?,
            authorization_header: required(&self.authorization_header, "AUTHORIZATION")?,
        })
    }

    pub fn approval(&self) -> ApprovalConfig {
        ApprovalConfig {
            api_url: self.approval_api_url.trim_end_matches('/').to_string(),
            authorization_header: self.approval_authorization.clone(),
        }
    }

    pub fn workflow_id(&self) -> Result<String, SmokeError> {
        required(&self.workflow_id, "CIRCLE_WORKFLOW_ID")
    }
}

fn required(value: &Option<String>, var: &str) -> Result<String, SmokeError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SmokeError::Config(format!("{} is not set", var))),
    }
}
