use crate::domain::models::VerificationFailure;

pub const EXIT_VERIFICATION: i32 = 1;
pub const EXIT_AUTHENTICATION: i32 = 3;
pub const EXIT_ROLLBACK: i32 = 4;
pub const EXIT_TRANSPORT: i32 = 5;
pub const EXIT_CONFIG: i32 = 6;

#[derive(thiserror::Error, Debug)]
pub enum SmokeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("verification mismatch: {0}")]
    VerificationMismatch(VerificationFailure),
    #[error("{} endpoint(s) failed verification: {}", .0.len(), list_failures(.0))]
    RunFailure(Vec<VerificationFailure>),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rollback failed: {0}")]
    Rollback(String),
}

impl SmokeError {
    pub fn exit_code(&self) -> i32 {
        match self {
            SmokeError::Config(_) => EXIT_CONFIG,
            SmokeError::Authentication(_) => EXIT_AUTHENTICATION,
            SmokeError::VerificationMismatch(_) | SmokeError::RunFailure(_) => EXIT_VERIFICATION,
            SmokeError::Transport(_) => EXIT_TRANSPORT,
            SmokeError::Rollback(_) => EXIT_ROLLBACK,
        }
    }

    /// Whether this error means the deployment under test misbehaved, as
    /// opposed to the run itself being unable to proceed.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            SmokeError::VerificationMismatch(_) | SmokeError::RunFailure(_)
        )
    }
}

fn list_failures(failures: &[VerificationFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Exit code for any error bubbling out of a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<SmokeError>()
        .map(SmokeError::exit_code)
        .unwrap_or(EXIT_VERIFICATION)
}
