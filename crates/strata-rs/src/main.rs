//! Load a configuration scheme from files and print the result.

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use strata_rs::{Loader, file_resolvers};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Command-line options for the configuration inspector.
#[derive(Parser)]
#[command(name = "strata", version)]
struct Cli {
    /// Environment prefix for `<PREFIX>_CONFIG` and `<PREFIX>_*` overrides
    #[arg(long, default_value = "EX")]
    prefix: String,
    /// Output format for the merged document
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Print only the value at this dotted path
    #[arg(long)]
    get: Option<String>,
    /// Configuration files, lowest precedence first
    references: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!(
        "starting strata (prefix={}, references={}, path_set={})",
        cli.prefix,
        cli.references.len(),
        cli.get.is_some()
    );
    let loader = Loader::new()
        .with_prefix(&cli.prefix)
        .with_resolvers(file_resolvers())
        .with_references(cli.references);
    debug!("registered resolvers: {:?}", loader.resolvers());
    let config = loader.load().context("failed to load configuration")?;

    if let Some(path) = cli.get.as_deref() {
        let Some(value) = config.get(path) else {
            bail!("no value at {path:?}");
        };
        println!("{value}");
        return Ok(());
    }

    let rendered = match cli.format {
        OutputFormat::Json => config.to_json(),
        OutputFormat::Yaml => config.to_yaml(),
    }
    .context("failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}
