use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use csv_handler_backend::domain::ScalePrecision;
use csv_handler_backend::io::{acquire, render_table, FileSource, StdinSource, TextSource};
use csv_handler_backend::{initialize_backend, HandlerConfig};
use shared::{DeleteRowRequest, EditRowRequest, ImportOutcome};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Normalize an address/amount list and print it with its total
#[derive(Parser, Debug)]
#[command(name = "csv-handler", version, about)]
struct Args {
    /// CSV or tab-separated file, or `-` for standard input
    input: String,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Token decimals used to convert display amounts to real units
    #[arg(long)]
    scale: Option<u32>,

    /// Field delimiter; detected from the text when omitted
    #[arg(long)]
    delimiter: Option<char>,

    /// Edit one row after import
    #[arg(long, num_args = 3, value_names = ["INDEX", "ADDRESS", "AMOUNT"])]
    edit: Option<Vec<String>>,

    /// Delete rows by their imported index (repeatable)
    #[arg(long)]
    delete: Vec<usize>,

    /// Rescale all amounts to a new number of decimals after editing
    #[arg(long)]
    rescale_to: Option<u32>,

    /// Print the row table as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Flag addresses that are not `0x` followed by 40 hex digits
    #[arg(long)]
    hex_addresses: bool,
}

fn is_hex_address(address: &str) -> bool {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"));
    matches!(digits, Some(d) if d.len() == 40 && d.chars().all(|c| c.is_ascii_hexdigit()))
}

fn load_config(args: &Args) -> Result<HandlerConfig> {
    let mut config = match &args.config {
        Some(path) => HandlerConfig::from_yaml_file(path)?,
        None => HandlerConfig::default(),
    };
    if let Some(scale) = args.scale {
        config.scale = ScalePrecision::new(scale).context("Invalid --scale")?;
    }
    if let Some(delimiter) = args.delimiter {
        config.splitter.delimiter = Some(delimiter);
    }
    Ok(config)
}

fn parse_edit(values: &[String]) -> Result<EditRowRequest> {
    match values {
        [index, address, amount] => Ok(EditRowRequest {
            index: index
                .parse()
                .with_context(|| format!("Invalid row index '{}'", index))?,
            address: address.clone(),
            amount: amount.clone(),
        }),
        _ => bail!("--edit takes INDEX ADDRESS AMOUNT"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let mut service = initialize_backend(config);
    if args.hex_addresses {
        service = service.with_verifier(is_hex_address);
    }
    let handler = Arc::new(Mutex::new(service));

    let source: Box<dyn TextSource> = if args.input == "-" {
        Box::new(StdinSource)
    } else {
        Box::new(FileSource::new(&args.input))
    };
    match acquire(&handler, source.as_ref()).await? {
        ImportOutcome::Applied(summary) => info!(
            "Loaded {} rows from {}",
            summary.rows_imported,
            source.describe()
        ),
        ImportOutcome::Superseded => bail!("Input from {} was superseded", source.describe()),
    }

    let mut service = handler.lock().await;

    if let Some(values) = &args.edit {
        service.apply_edit(parse_edit(values)?)?;
    }

    // Highest index first so the remaining indices still match the imported table
    let mut deletions = args.delete.clone();
    deletions.sort_unstable_by(|a, b| b.cmp(a));
    deletions.dedup();
    for index in deletions {
        service.apply_delete(DeleteRowRequest { index })?;
    }

    if let Some(scale) = args.rescale_to {
        service.on_scale_changed(scale)?;
    }

    let table = service.table();
    let flagged = table.flagged_rows().count();
    if flagged > 0 {
        warn!("{} addresses failed the hex address check", flagged);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        print!("{}", render_table(&table));
    }
    Ok(())
}
