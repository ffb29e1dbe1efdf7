//! Implementation of `doublon similar`.

use std::process::ExitCode;

use doublon_engine::{Detector, DetectorSettings, Query};

use crate::cli::{
    args::SimilarCommand,
    context::CommandContext,
    output::{output_bundle_json, output_bundle_tables},
};

/// Searches the configured store for records resembling the given brand or report.
pub fn run(ctx: &CommandContext, cmd: SimilarCommand) -> ExitCode {
    let brand = cmd.brand.trim();
    if brand.is_empty() {
        eprintln!("error: --brand must not be empty");
        return ExitCode::FAILURE;
    }

    let mut query = Query {
        kind: cmd.kind,
        brand_name: brand.to_string(),
        description: None,
        occurred_on: None,
        source_url: None,
    };
    if let Some(description) = non_blank(cmd.description) {
        query = query.with_description(description);
    }
    if let Some(date) = non_blank(cmd.date) {
        query = query.with_date(date);
    }
    if let Some(url) = non_blank(cmd.source_url) {
        query = query.with_source_url(url);
    }

    let store = match ctx.store() {
        Ok(store) => store,
        Err(code) => return code,
    };
    let settings = DetectorSettings::from(&ctx.config);
    let detector = Detector::with_settings(store, settings);

    let bundle = match ctx.block_on(detector.find_similar(&query)) {
        Ok(Ok(bundle)) => bundle,
        Ok(Err(e)) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        Err(code) => return code,
    };

    if cmd.json {
        output_bundle_json(&bundle)
    } else {
        output_bundle_tables(&query, &bundle, &settings.thresholds)
    }
}

/// Drops blank optional arguments.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
