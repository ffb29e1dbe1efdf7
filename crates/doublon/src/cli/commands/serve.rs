//! Implementation of `doublon serve`.

use std::process::ExitCode;

use doublon::server::{AppState, bind, serve};
use doublon_engine::DetectorSettings;
use tracing::warn;

use crate::cli::{args::ServeCommand, context::CommandContext};

/// Runs the HTTP service until interrupted.
pub fn run(ctx: &CommandContext, cmd: &ServeCommand) -> ExitCode {
    for warning in ctx.config.validate() {
        warn!("{warning}");
    }

    let host = cmd.host.as_deref().unwrap_or(&ctx.config.server.host);
    let port = cmd.port.unwrap_or(ctx.config.server.port);

    let store = match ctx.store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    let state = AppState::new(store, DetectorSettings::from(&ctx.config));

    let outcome = ctx.block_on(async {
        let listener = bind(host, port)
            .await
            .map_err(|e| format!("cannot listen on {host}:{port}: {e}"))?;
        serve(listener, state)
            .await
            .map_err(|e| format!("server failed: {e}"))
    });

    match outcome {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(message)) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
        Err(code) => code,
    }
}
