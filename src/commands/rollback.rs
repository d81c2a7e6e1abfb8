use crate::*;

pub fn handle_rollback_command(
    cli: &Cli,
    config: &RunConfig,
    transport: &dyn HttpTransport,
) -> anyhow::Result<bool> {
    if cli.function != Function::Rollback {
        return Ok(false);
    }

    let report = run_rollback(cli, config, transport)?;
    print_one(cli.json, true, report, |r| {
        format!(
            "approved {} on workflow {}",
            r.approval_request_id, r.workflow_id
        )
    })?;
    Ok(true)
}

/// Resolve the workflow and selection policy from the CLI, then approve.
pub fn run_rollback(
    cli: &Cli,
    config: &RunConfig,
    transport: &dyn HttpTransport,
) -> Result<RollbackReport, SmokeError> {
    let workflow_id = config.workflow_id()?;
    let selector: Box<dyn ApprovalSelector> = match cli.approval_policy {
        ApprovalPolicy::FixedIndex => Box::new(FixedIndex(cli.approval_index)),
        ApprovalPolicy::FirstOnHold => Box::new(FirstOnHold),
    };
    tracing::info!(%workflow_id, policy = %selector.describe(), "triggering rollback");

    let report = RollbackTrigger::new(config.approval(), transport, selector)
        .trigger_rollback(&workflow_id)?;
    tracing::info!(approval_request_id = %report.approval_request_id, "rollback approved");
    Ok(report)
}
