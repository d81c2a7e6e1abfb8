use crate::*;

pub fn handle_test_command(
    cli: &Cli,
    config: &RunConfig,
    transport: &dyn HttpTransport,
) -> anyhow::Result<bool> {
    if cli.function != Function::Test {
        return Ok(false);
    }

    let mode = FailureMode::from_flag(cli.flag);
    tracing::info!(env = %cli.environment, catalog = %cli.name, ?mode, "smoke test starts");

    let catalog = load_catalog(&cli.catalog_dir, &cli.name)?;
    let endpoints = catalog.environment(&cli.environment)?;
    tracing::info!(
        path = %catalog.source().display(),
        endpoints = endpoints.len(),
        "catalog environment selected"
    );
    let credentials = config.credentials()?;
    let token = Authenticator::new(credentials, transport).authenticate()?;

    let outcome = EndpointVerifier::new(transport).verify(endpoints, &token, mode);
    let failure = match outcome {
        Ok(verdict) => {
            let passed = verdict.passed;
            let failures = verdict.failures.clone();
            let report = TestReport {
                environment: cli.environment.clone(),
                catalog: cli.name.clone(),
                verdict,
            };
            print_one(cli.json, passed, report, |r| {
                if r.verdict.passed {
                    format!(
                        "passed: {} endpoints checked ({} skipped)",
                        r.verdict.checked, r.verdict.skipped
                    )
                } else {
                    let mut lines = vec![format!(
                        "failed: {} of {} endpoints",
                        r.verdict.failures.len(),
                        r.verdict.checked
                    )];
                    lines.extend(r.verdict.failures.iter().map(|f| f.to_string()));
                    lines.join("\n")
                }
            })?;
            if passed {
                tracing::info!("smoke test succeeded");
                return Ok(true);
            }
            SmokeError::RunFailure(failures)
        }
        Err(err) if err.is_verification_failure() => err,
        Err(err) => return Err(err.into()),
    };

    if cli.rollback_on_failure {
        tracing::warn!("smoke test failed, triggering rollback");
        if let Err(rollback_err) = run_rollback(cli, config, transport) {
            // Any rollback-side error, config included, exits as a rollback failure.
            let rollback_err = match rollback_err {
                SmokeError::Rollback(_) => rollback_err,
                other => SmokeError::Rollback(other.to_string()),
            };
            return Err(anyhow::Error::new(rollback_err).context(failure.to_string()));
        }
    }
    Err(failure.into())
}
