use crate::domain::constants::{DEFAULT_APPROVAL_API_URL, DEFAULT_APPROVAL_INDEX, DEFAULT_LOG_FILE};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "smokegate",
    version,
    about = "Smoke-test deployed endpoints and approve rollbacks"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(short = 'f', long, value_enum, help = "Run the smoke test or trigger the rollback")]
    pub function: Function,
    #[arg(
        short = 't',
        long,
        required = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        help = "true to stop at the first failing endpoint, false to check them all"
    )]
    pub flag: bool,
    #[arg(short = 'e', long = "env", help = "Environment to test (e.g. stg or prd)")]
    pub environment: String,
    #[arg(short = 'n', long, help = "Catalog name, read from <catalog-dir>/<name>.json")]
    pub name: String,

    #[arg(long, default_value = ".", help = "Directory holding endpoint catalogs")]
    pub catalog_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_LOG_FILE, help = "Log file appended to on every run")]
    pub log_file: PathBuf,
    #[arg(long, help = "Approve the rollback when the smoke test fails")]
    pub rollback_on_failure: bool,

    #[arg(long, env = "URL", hide_env_values = true, help = "Identity endpoint URL")]
    pub url: Option<String>,
    #[arg(long, env = "EMAIL", hide_env_values = true)]
    pub email: Option<String>,
    #[arg(long, env = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(
        long,
        env = "AUTHORIZATION",
        hide_env_values = true,
        help = "authorization header sent with the login request"
    )]
    pub authorization: Option<String>,

    #[arg(long, env = "CIRCLE_WORKFLOW_ID", help = "Workflow holding the rollback approval")]
    pub workflow_id: Option<String>,
    #[arg(long, env = "APPROVAL_API_URL", default_value = DEFAULT_APPROVAL_API_URL)]
    pub approval_api_url: String,
    #[arg(
        long,
        env = "APPROVAL_AUTHORIZATION",
        hide_env_values = true,
        help = "authorization header for the workflow-approval API"
    )]
    pub approval_authorization: Option<String>,
    #[arg(long, value_enum, default_value_t = ApprovalPolicy::FixedIndex)]
    pub approval_policy: ApprovalPolicy,
    #[arg(
        long,
        default_value_t = DEFAULT_APPROVAL_INDEX,
        help = "Job position used by the fixed-index approval policy"
    )]
    pub approval_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Function {
    Test,
    Rollback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ApprovalPolicy {
    FixedIndex,
    FirstOnHold,
}
