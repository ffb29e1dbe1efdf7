//! Implementation of `doublon config`.

use std::process::ExitCode;

use doublon_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let highlighter = Highlighter::new();
    print!("{}", highlighter.highlight_toml(&ctx.config.settings_to_toml()));
    ExitCode::SUCCESS
}
