use crate::config::ApprovalConfig;
use crate::domain::models::{JobItem, JobList, RollbackReport};
use crate::error::SmokeError;
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport};
use reqwest::Method;

/// Picks which workflow job holds the approval request to approve.
pub trait ApprovalSelector {
    fn select<'j>(&self, jobs: &'j [JobItem]) -> Option<&'j JobItem>;
    fn describe(&self) -> String;
}

/// Job at a fixed position in the job list, regardless of its type or
/// status. Index 1 matches workflows whose approval gate is the second job.
pub struct FixedIndex(pub usize);

impl ApprovalSelector for FixedIndex {
    fn select<'j>(&self, jobs: &'j [JobItem]) -> Option<&'j JobItem> {
        jobs.get(self.0)
    }

    fn describe(&self) -> String {
        format!("job index {}", self.0)
    }
}

/// First approval job still waiting on a decision.
pub struct FirstOnHold;

impl ApprovalSelector for FirstOnHold {
    fn select<'j>(&self, jobs: &'j [JobItem]) -> Option<&'j JobItem> {
        jobs.iter().find(|j| {
            j.job_type.as_deref() == Some("approval") && j.status.as_deref() == Some("on_hold")
        })
    }

    fn describe(&self) -> String {
        "first on-hold approval job".to_string()
    }
}

pub struct RollbackTrigger<'a> {
    config: ApprovalConfig,
    transport: &'a dyn HttpTransport,
    selector: Box<dyn ApprovalSelector>,
}

impl<'a> RollbackTrigger<'a> {
    pub fn new(
        config: ApprovalConfig,
        transport: &'a dyn HttpTransport,
        selector: Box<dyn ApprovalSelector>,
    ) -> Self {
        RollbackTrigger {
            config,
            transport,
            selector,
        }
    }

    /// Approve the rollback gate of `workflow_id`: fetch its job list, pick
    /// the approval request with the selector, then approve it.
    pub fn trigger_rollback(&self, workflow_id: &str) -> Result<RollbackReport, SmokeError> {
        let jobs_url = format!("{}/workflow/{}/job", self.config.api_url, workflow_id);
        let response = self.send(Method::GET, &jobs_url, None)?;
        tracing::info!(status = response.status, body = %response.body, "workflow job list");
        if !response.is_success() {
            return Err(SmokeError::Rollback(format!(
                "job list request returned status {}",
                response.status
            )));
        }

        let jobs: JobList = serde_json::from_str(&response.body)
            .map_err(|e| SmokeError::Rollback(format!("unexpected job list shape: {}", e)))?;
        let job = self.selector.select(&jobs.items).ok_or_else(|| {
            SmokeError::Rollback(format!(
                "no job at {} ({} jobs listed)",
                self.selector.describe(),
                jobs.items.len()
            ))
        })?;
        let approval_request_id = job.approval_request_id.clone().ok_or_else(|| {
            SmokeError::Rollback(format!(
                "job at {} has no approval_request_id",
                self.selector.describe()
            ))
        })?;
        tracing::info!(%approval_request_id, job = ?job.name, "approval request selected");

        let approve_url = format!(
            "{}/workflow/{}/approve/{}",
            self.config.api_url, workflow_id, approval_request_id
        );
        tracing::info!(url = %approve_url, "approving rollback");
        let response = self.send(Method::POST, &approve_url, Some(serde_json::json!({})))?;
        tracing::info!(status = response.status, body = %response.body, "approval response");
        if !response.is_success() {
            return Err(SmokeError::Rollback(format!(
                "approval request returned status {}",
                response.status
            )));
        }

        Ok(RollbackReport {
            workflow_id: workflow_id.to_string(),
            approval_request_id,
            job_name: job.name.clone(),
            status: response.status,
        })
    }

    fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, SmokeError> {
        let mut request = HttpRequest::new(method, url).header("content-type", "application/json");
        if let Some(auth) = &self.config.authorization_header {
            request = request.header("authorization", auth.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        self.transport.send(request)
    }
}
