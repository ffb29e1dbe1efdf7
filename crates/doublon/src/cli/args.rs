//! Clap argument definitions for the `doublon` CLI.

use std::{env, process::exit};

use clap::{Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use doublon_engine::{EngineError, QueryKind};

/// Parse a query kind from a string.
fn parse_kind(s: &str) -> Result<QueryKind, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "doublon")]
#[command(about = "Duplicate detection for brand controversy reports")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `doublon similar`.
#[derive(Args, Debug, Clone)]
pub struct SimilarCommand {
    /// What is being created: marque or evenement
    #[arg(short = 't', long = "type", value_parser = parse_kind)]
    pub kind: QueryKind,

    /// Brand name
    #[arg(short = 'b', long)]
    pub brand: String,

    /// Description or title of the report
    #[arg(short = 'd', long)]
    pub description: Option<String>,

    /// Incident date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Source URL of the report
    #[arg(short = 'u', long)]
    pub source_url: Option<String>,

    /// Output in JSON format, as the HTTP API returns it
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `doublon serve`.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeCommand {
    /// Address to bind [default: from config, 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind [default: from config, 8080]
    #[arg(short = 'p', long)]
    pub port: Option<u16>,
}

/// Arguments for `doublon init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.doublon.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `doublon` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Find existing records resembling a new brand or report
    #[command(after_help = "\
EXAMPLES:
  doublon similar --type marque --brand 'Nesslé'
  doublon similar --type evenement --brand 'Acme Corp' \\
      --date 2023-05-01 --source-url https://news.example.com/acme-water-pollution-2023
  doublon similar -t evenement -b 'Acme Corp' --json")]
    Similar(SimilarCommand),

    /// Show individual similarity signals
    Inspect {
        /// What to inspect
        #[command(subcommand)]
        what: InspectWhat,
    },

    /// Run the HTTP service
    Serve(ServeCommand),

    /// Initialize doublon configuration in current directory
    Init(InitCommand),

    /// Show status and validate configuration
    Status,

    /// Show effective configuration settings
    Config,
}

/// What to inspect with `doublon inspect`.
#[derive(Clone, Subcommand)]
pub enum InspectWhat {
    /// Compare two brand names
    Name {
        /// First name
        a: String,
        /// Second name
        b: String,
    },
    /// Compare two source URLs
    Url {
        /// First URL
        a: String,
        /// Second URL
        b: String,
    },
    /// Show the keywords extracted from a URL
    Keywords {
        /// URL to analyze
        url: String,
    },
    /// Compare two dates
    Date {
        /// First date
        a: String,
        /// Second date
        b: String,
    },
}

/// Parses CLI arguments, printing hierarchical help for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_hierarchical_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints custom help with hierarchical subcommand display.
fn print_hierarchical_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: doublon <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }

        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:<10} {about}");

        for nested in sub.get_subcommands() {
            let nested_about = nested
                .get_about()
                .map(|s| s.to_string())
                .unwrap_or_default();
            println!("    {:<8} {nested_about}", nested.get_name());
        }
    }

    println!();
    println!("Run 'doublon <COMMAND> --help' for details on a command.");
}
