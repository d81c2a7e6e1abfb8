use clap::Parser;

mod catalog;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod services;

pub use catalog::*;
pub use cli::*;
pub use commands::*;
pub use config::*;
pub use domain::models::*;
pub use error::*;
pub use services::auth::*;
pub use services::logging::*;
pub use services::output::*;
pub use services::rollback::*;
pub use services::transport::*;
pub use services::verifier::*;

fn main() {
    let cli = Cli::parse();

    let log = match RunLog::open(&cli.log_file) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("error: cannot open log file {}: {:#}", cli.log_file.display(), err);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let code = {
        let _run = log.enter();
        match run(&cli) {
            Ok(()) => 0,
            Err(err) => {
                tracing::error!("{:#}", err);
                exit_code_for(&err)
            }
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = RunConfig::from_cli(cli);
    let transport = BlockingTransport::new()?;

    if handle_test_command(cli, &config, &transport)? {
        return Ok(());
    }
    handle_rollback_command(cli, &config, &transport)?;
    Ok(())
}
