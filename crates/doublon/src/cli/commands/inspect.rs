//! Implementation of `doublon inspect`.

use std::{collections::HashSet, process::ExitCode};

use doublon_highlight::{dim, subheader};
use doublon_similarity::{
    date_similarity, extract_keywords, keyword_similarity, normalize, parse_date,
    string_similarity,
};

use crate::cli::args::InspectWhat;

/// Prints an individual similarity signal.
pub fn run(what: &InspectWhat) -> ExitCode {
    match what {
        InspectWhat::Name { a, b } => inspect_name(a, b),
        InspectWhat::Url { a, b } => inspect_url(a, b),
        InspectWhat::Keywords { url } => inspect_keywords(url),
        InspectWhat::Date { a, b } => inspect_date(a, b),
    }
    ExitCode::SUCCESS
}

/// Implements `doublon inspect name`.
fn inspect_name(a: &str, b: &str) {
    println!("{}", subheader("Normalized:"));
    println!("  {a:?} -> {:?}", normalize(a));
    println!("  {b:?} -> {:?}", normalize(b));
    println!();
    println!("{} {:.4}", subheader("Name similarity:"), string_similarity(a, b));
}

/// Implements `doublon inspect url`.
fn inspect_url(a: &str, b: &str) {
    let first = extract_keywords(a);
    let second = extract_keywords(b);

    println!("{}", subheader("Keywords:"));
    println!("  {}", format_keywords(&first));
    println!("  {}", format_keywords(&second));

    let common = first.intersection(&second).count();
    println!();
    println!("{}", dim(&format!("common: {common}, union: {}", first.union(&second).count())));
    println!(
        "{} {:.4}",
        subheader("URL similarity:"),
        keyword_similarity(&first, &second)
    );
}

/// Implements `doublon inspect keywords`.
fn inspect_keywords(url: &str) {
    let keywords = extract_keywords(url);
    println!("{}", subheader(&format!("Keywords ({}):", keywords.len())));
    println!("  {}", format_keywords(&keywords));
}

/// Implements `doublon inspect date`.
fn inspect_date(a: &str, b: &str) {
    println!("{}", subheader("Parsed:"));
    for value in [a, b] {
        match parse_date(value) {
            Some(date) => println!("  {value:?} -> {date}"),
            None => println!("  {value:?} -> {}", dim("(unparsable)")),
        }
    }
    println!();
    println!("{} {:.0}", subheader("Date similarity:"), date_similarity(a, b));
}

/// Sorted, comma-separated keywords.
fn format_keywords(keywords: &HashSet<String>) -> String {
    if keywords.is_empty() {
        return dim("(none)");
    }
    let mut sorted: Vec<&str> = keywords.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join(", ")
}
