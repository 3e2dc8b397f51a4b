use std::path::PathBuf;

use clap::Parser;
use codetable::io_utils::table_cli_error;
use codetable::{run, Config, RowPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codetable", about = "Derive lookup tables from a character encoding table")]
struct Args {
    /// Tab-delimited encoding table (character, full code, full rank, short code, short rank)
    encoding: Option<PathBuf>,
    /// Tab-delimited decomposition table (character, sequence)
    #[arg(long)]
    decomposition: Option<PathBuf>,
    /// Directory receiving the derived tables
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// YAML run configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Abort on rows with an unexpected column count instead of filling them
    #[arg(long)]
    strict: bool,
    /// Skip short codes in the merged table
    #[arg(long)]
    no_short: bool,
    /// Skip full codes in the merged table
    #[arg(long)]
    no_full: bool,
    /// Skip decomposition fallbacks in the merged table
    #[arg(long)]
    no_decomposition: bool,
    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<(Config, bool), Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => Config::from_yaml_file(path)
                .map_err(|e| table_cli_error("loading configuration", e))?,
            None => Config::default(),
        };
        if let Some(p) = self.encoding {
            config.encoding = p;
        }
        if let Some(p) = self.decomposition {
            config.decomposition = Some(p);
        }
        if let Some(p) = self.out_dir {
            config.output_dir = p;
        }
        if self.strict {
            config.row_policy = RowPolicy::Strict;
        }
        if self.no_short {
            config.phases.short = false;
        }
        if self.no_full {
            config.phases.full = false;
        }
        if self.no_decomposition {
            config.phases.decomposition = false;
        }
        Ok((config, self.json))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_cli() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let (config, json) = Args::parse().into_config()?;
    let summary = run(&config).map_err(|e| table_cli_error("derivation failed", e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
