//! Command-line interface for doublon.

mod cli;

use std::process::ExitCode;

use cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
};
use doublon::telemetry::{COMMAND_FILTER, SERVE_FILTER, init_tracing};

fn main() -> ExitCode {
    let cli = parse_cli();

    let filter = if matches!(cli.command, Commands::Serve(_)) {
        SERVE_FILTER
    } else {
        COMMAND_FILTER
    };
    init_tracing(filter);

    // init and inspect must work even when an existing config file is broken
    let ctx = if matches!(cli.command, Commands::Init(_) | Commands::Inspect { .. }) {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
