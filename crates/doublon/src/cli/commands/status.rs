//! Implementation of `doublon status`.

use std::process::ExitCode;

use doublon_config::{ConfigWarning, discover_config_files, is_global_config};
use doublon_store::{CandidateStore, StoreError, open_store};

use crate::cli::{
    context::CommandContext,
    output::{dim, error, subheader, success, warning},
};

/// Record counts per collection.
struct Counts {
    /// Brands.
    brands: usize,
    /// Approved controversies.
    controversies: usize,
    /// Pending propositions.
    propositions: usize,
}

/// Shows configuration files, the store, record counts and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("doublon init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        let scope = if is_global_config(path) { "global" } else { "local" };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    let config = &ctx.config;
    let mut store_ok = true;

    println!("{}", subheader("Store:"));
    match open_store(&config.store) {
        Ok(store) => {
            println!("   {}", store.describe());
            match ctx.block_on(count_records(store.as_ref())) {
                Ok(Ok(counts)) => {
                    println!("   {} brands", counts.brands);
                    println!("   {} approved controversies", counts.controversies);
                    println!("   {} pending propositions", counts.propositions);
                }
                Ok(Err(e)) => {
                    println!("   {}", error(&format!("unreachable: {e}")));
                    store_ok = false;
                }
                Err(code) => return code,
            }
        }
        Err(e) => {
            println!("   {}", error(&e.to_string()));
            store_ok = false;
        }
    }
    println!();

    println!("{}", subheader("Matching:"));
    println!(
        "   thresholds {:.2} / {:.2} / {:.2}, gate {:.2}",
        config.thresholds.low, config.thresholds.medium, config.thresholds.high, config.matching.gate
    );
    println!(
        "   limits {} brands, {} controversies, {} propositions",
        config.limits.brands, config.limits.controversies, config.limits.propositions
    );
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        if store_ok {
            println!("{}", success("No issues found."));
            return ExitCode::SUCCESS;
        }
        return ExitCode::FAILURE;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Fetches every collection and counts it.
async fn count_records(store: &dyn CandidateStore) -> Result<Counts, StoreError> {
    let (brands, controversies, propositions) = tokio::try_join!(
        store.brands(),
        store.approved_controversies(),
        store.pending_propositions(),
    )?;
    Ok(Counts {
        brands: brands.len(),
        controversies: controversies.len(),
        propositions: propositions.len(),
    })
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::StorePathMissing | ConfigWarning::StorePathNotFound { .. } => {
                println!(
                    "{}",
                    dim("Hint: set [store] path to a JSON snapshot in .doublon.toml")
                );
            }
            ConfigWarning::StoreUrlMissing => {
                println!("{}", dim("Hint: set [store] url to the REST backend base URL"));
            }
            ConfigWarning::ApiKeyUnset { var } => {
                println!("{}", dim(&format!("Hint: export {var}=<key>")));
            }
            _ => {}
        }
    }
}
