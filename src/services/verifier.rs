use crate::domain::models::{
    AuthToken, EndpointDescriptor, EndpointMethod, FailureMode, RunVerdict, VerificationFailure,
};
use crate::error::SmokeError;
use crate::services::aggregator::ResultAggregator;
use crate::services::transport::{HttpRequest, HttpTransport};
use reqwest::Method;

pub struct EndpointVerifier<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> EndpointVerifier<'a> {
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        EndpointVerifier { transport }
    }

    /// Check every endpoint in catalog order.
    ///
    /// In `FailFast` mode the first mismatch ends the run as
    /// `SmokeError::VerificationMismatch` and later endpoints are never
    /// requested. In `CollectAll` mode mismatches are recorded and every
    /// endpoint is attempted. Transport errors abort in both modes.
    pub fn verify(
        &self,
        endpoints: &[EndpointDescriptor],
        token: &AuthToken,
        mode: FailureMode,
    ) -> Result<RunVerdict, SmokeError> {
        let mut aggregator = ResultAggregator::new();

        for endpoint in endpoints {
            let Some(request) = build_request(endpoint, token) else {
                tracing::warn!(
                    url = %endpoint.url,
                    method = %endpoint.method,
                    "unrecognized endpoint type, skipping"
                );
                aggregator.note_skipped();
                continue;
            };

            let response = self.transport.send(request)?;
            aggregator.note_checked();
            tracing::info!(
                method = %endpoint.method,
                url = %endpoint.url,
                status = response.status,
                expected = endpoint.expected_status,
                body = %response.body,
                "endpoint checked"
            );

            if response.status == endpoint.expected_status {
                continue;
            }

            let failure = VerificationFailure {
                method: endpoint.method.to_string(),
                url: endpoint.url.clone(),
                expected: endpoint.expected_status,
                actual: response.status,
            };
            match mode {
                FailureMode::FailFast => {
                    tracing::error!("{}", failure);
                    return Err(SmokeError::VerificationMismatch(failure));
                }
                FailureMode::CollectAll => {
                    tracing::warn!("{}", failure);
                    aggregator.record(failure);
                }
            }
        }

        let verdict = aggregator.summarize(mode);
        if verdict.passed {
            tracing::info!(checked = verdict.checked, "all endpoints passed");
        } else {
            tracing::error!(
                failed = verdict.failures.len(),
                checked = verdict.checked,
                "endpoints failed verification"
            );
            for failure in &verdict.failures {
                tracing::error!("{}", failure);
            }
        }
        Ok(verdict)
    }
}

fn build_request(endpoint: &EndpointDescriptor, token: &AuthToken) -> Option<HttpRequest> {
    let method = match endpoint.method {
        EndpointMethod::Get => Method::GET,
        EndpointMethod::Patch => Method::PATCH,
        EndpointMethod::Post => Method::POST,
        EndpointMethod::Unrecognized(_) => return None,
    };
    let mut request =
        HttpRequest::new(method, &endpoint.url).header("authorization", token.header_value());
    if endpoint.method == EndpointMethod::Post {
        if let Some(body) = &endpoint.body {
            request = request.json(serde_json::Value::Object(body.clone()));
        }
    }
    Some(request)
}
