//! Implementation of `doublon init`.

use std::{fs, process::ExitCode};

use doublon_config::ConfigScope;
use doublon_highlight::{Highlighter, dim, indent_content, subheader};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Writes a commented starter `.doublon.toml`, locally or in the home directory.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let scope = ConfigScope::for_cwd(&ctx.cwd, cmd.global);
    let Some(path) = scope.config_path(&ctx.cwd) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };

    if path.exists() && !cmd.force {
        eprintln!("error: {} already exists", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = scope.template();
    if let Err(e) = fs::write(&path, &template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }
    println!("Created {}", path.display());

    println!();
    println!("{}", subheader("Configuration written:"));
    println!(
        "{}",
        indent_content(&Highlighter::new().highlight_toml(&template))
    );

    let next = match scope {
        ConfigScope::Local => "Uncomment [store] and point path at a JSON export of the directory.",
        ConfigScope::Global => "Uncomment [store] to share a REST backend across directories.",
    };
    println!("{}", dim(next));

    ExitCode::SUCCESS
}
