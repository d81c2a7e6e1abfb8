//! Run-scoped log sink: console (stderr) plus a plain-text log file.
//!
//! Nothing is installed globally. `RunLog::enter` makes the sink the default
//! dispatcher for the current thread until the returned guard drops, so one
//! run's lifecycle bounds its logging and tests can swap in their own sink.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::dispatcher::{self, DefaultGuard};
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

pub struct RunLog {
    dispatch: Dispatch,
}

impl RunLog {
    pub fn open(log_file: &Path) -> anyhow::Result<Self> {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let console = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false);

        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(log_file)?;
        let file_layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false);

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file_layer);
        Ok(RunLog {
            dispatch: Dispatch::new(subscriber),
        })
    }

    pub fn enter(&self) -> DefaultGuard {
        dispatcher::set_default(&self.dispatch)
    }
}
