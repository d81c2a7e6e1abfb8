pub const CATALOG_EXTENSION: &str = "json";

pub const DEFAULT_LOG_FILE: &str = "smoke-test.log";

pub const DEFAULT_APPROVAL_API_URL: &str = "https://circleci.com/api/v2";

/// Position of the approval job in the workflow job list.
/// The rollback workflow lists the approval gate second.
pub const DEFAULT_APPROVAL_INDEX: usize = 1;

pub const BEARER_SCHEME: &str = "Bearer ";

pub const LOGIN_SUCCESS_STATUS: u16 = 200;
