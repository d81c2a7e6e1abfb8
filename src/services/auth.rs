use crate::config::Credentials;
use crate::domain::constants::LOGIN_SUCCESS_STATUS;
use crate::domain::models::AuthToken;
use crate::error::SmokeError;
use crate::services::transport::{HttpRequest, HttpTransport};
use reqwest::Method;
use serde::Deserialize;

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

pub struct Authenticator<'a> {
    credentials: Credentials,
    transport: &'a dyn HttpTransport,
}

impl<'a> Authenticator<'a> {
    pub fn new(credentials: Credentials, transport: &'a dyn HttpTransport) -> Self {
        Authenticator {
            credentials,
            transport,
        }
    }

    /// Exchange the configured credentials for a bearer token.
    ///
    /// Issues exactly one request. The raw status and body are logged before
    /// the outcome is decided so CI logs show why a login was rejected.
    pub fn authenticate(&self) -> Result<AuthToken, SmokeError> {
        let request = HttpRequest::new(Method::POST, &self.credentials.service_url)
            .header("authorization", &self.credentials.authorization_header)
            .json(serde_json::json!({
                "email": self.credentials.email,
                "password": self.credentials.password,
            }));

        let response = self.transport.send(request)?;
        tracing::info!(status = response.status, "login status code");
        tracing::info!(body = %response.body, "login body");

        if response.status != LOGIN_SUCCESS_STATUS {
            tracing::error!("login failed");
            return Err(SmokeError::Authentication(format!(
                "identity endpoint returned status {}",
                response.status
            )));
        }

        let login: LoginResponse = serde_json::from_str(&response.body).map_err(|e| {
            SmokeError::Authentication(format!("login response has no access_token: {}", e))
        })?;
        tracing::info!("logged in");
        Ok(AuthToken::bearer(&login.access_token))
    }
}
