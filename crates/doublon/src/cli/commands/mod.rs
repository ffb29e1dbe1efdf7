//! Command implementations and dispatch.

pub mod config;
pub mod init;
pub mod inspect;
pub mod serve;
pub mod similar;
pub mod status;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Similar(cmd) => similar::run(ctx, cmd),
        Commands::Inspect { what } => inspect::run(&what),
        Commands::Serve(cmd) => serve::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Status => status::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
