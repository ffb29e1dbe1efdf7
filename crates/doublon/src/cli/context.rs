//! State shared by every subcommand of one invocation.

use std::{env, future::Future, path::PathBuf, process::ExitCode, sync::Arc};

use doublon_config::Config;
use doublon_store::{CandidateStore, open_store};
use tokio::runtime::Builder;

/// Working directory and effective configuration for one CLI run.
pub struct CommandContext {
    /// Directory the command was started from.
    pub cwd: PathBuf,
    /// Merged configuration, or defaults when it was not loaded.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and loads the configuration that applies to it.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = working_dir()?;
        let config = Config::load(&cwd)
            .map_err(|e| fail(&format!("failed to load configuration: {e}")))?;
        Ok(Self { cwd, config })
    }

    /// Like [`Self::load`] but with default settings, so `init` and `inspect` still run
    /// next to a broken config file.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        Ok(Self {
            cwd: working_dir()?,
            config: Config::default(),
        })
    }

    /// Opens the configured candidate store.
    pub fn store(&self) -> Result<Arc<dyn CandidateStore>, ExitCode> {
        open_store(&self.config.store).map_err(|e| {
            let code = fail(&e.to_string());
            eprintln!("Run 'doublon status' to check the store configuration.");
            code
        })
    }

    /// Drives `future` to completion on a multi-threaded runtime built for this call.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, ExitCode> {
        let runtime = Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| fail(&format!("failed to start async runtime: {e}")))?;
        Ok(runtime.block_on(future))
    }
}

/// Current directory of the process.
fn working_dir() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| fail(&format!("could not determine current directory: {e}")))
}

/// Reports `message` on stderr and yields the failure exit code.
fn fail(message: &str) -> ExitCode {
    eprintln!("error: {message}");
    ExitCode::FAILURE
}
