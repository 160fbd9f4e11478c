//! Stock projection CLI
//!
//! Command-line interface for running event projections against the local tables

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use stock_event_projection::{
    EngineError, EventType, MarketData, ProjectionMethod, StockAnalysisService, StockDetails, StockRequest,
    TableConfig,
};

#[derive(Debug, Parser)]
#[command(name = "stock-projection", version, about = "Project stock prices and income items under an event scenario")]
struct Cli {
    /// Directory holding the four table exports [default: $STOCK_EVENTS_DATA_DIR or data]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project one or more symbols
    Project {
        /// Stock symbol, repeat for several
        #[arg(long = "symbol", required = true)]
        symbols: Vec<String>,

        /// "Inflation" or "Interest Rate"
        #[arg(long, default_value = "Inflation")]
        event_type: EventType,

        /// Expected event rate, in percent
        #[arg(long, allow_hyphen_values = true)]
        expected_rate: f64,

        /// "Dynamic" or "Simple"; anything else runs Simple
        #[arg(long, default_value = "Dynamic")]
        method: String,

        /// Write all projection records to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List symbols available for an event type
    Symbols {
        #[arg(long, default_value = "Inflation")]
        event_type: EventType,
    },
}

#[derive(serde::Serialize)]
struct CsvRecord<'a> {
    symbol: &'a str,
    parameter: &'a str,
    current_value: f64,
    projected_value: f64,
    change: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.data_dir {
        Some(dir) => TableConfig::with_data_dir(dir),
        None => TableConfig::from_env(),
    };
    let data = MarketData::load(&config)
        .with_context(|| format!("Failed to load tables from {}", config.data_dir().display()))?;

    match cli.command {
        Command::Project {
            symbols,
            event_type,
            expected_rate,
            method,
            output,
        } => {
            let service = StockAnalysisService::new(Arc::new(data));
            let method = ProjectionMethod::from(method);

            let results: Vec<(String, Result<StockDetails, EngineError>)> = symbols
                .par_iter()
                .map(|symbol| {
                    let request = StockRequest {
                        stock_symbol: symbol.clone(),
                        event_type,
                        expected_rate,
                        method,
                    };
                    (symbol.clone(), service.stock_details(&request))
                })
                .collect();

            for (symbol, result) in &results {
                match result {
                    Ok(details) => print_details(details, method),
                    Err(e) => eprintln!("{}: {}", symbol, e),
                }
            }

            if let Some(path) = output {
                write_csv(&path, &results)?;
                println!("\nProjections written to: {}", path.display());
            }
        }
        Command::Symbols { event_type } => {
            let symbols = data.symbols(event_type);
            println!("{} symbols with {} data:", symbols.len(), event_type);
            for symbol in symbols {
                println!("  {}", symbol);
            }
        }
    }

    Ok(())
}

fn print_details(details: &StockDetails, method: ProjectionMethod) {
    println!("\n{} ({}, {} method)", details.stock_symbol, details.event_type, method.label());
    println!("{}", "-".repeat(96));
    println!("{:<50} {:>14} {:>16} {:>12}", "Parameter", "Current", "Projected", "Change");

    for record in &details.projections {
        println!(
            "{:<50} {:>14.4} {:>16.4} {:>12.4}",
            record.parameter, record.current_value, record.projected_value, record.change
        );
    }

    if details.interpretation.is_empty() {
        println!("\nInterpretation: none");
    } else {
        println!("\nInterpretation:");
        for (category, sentence) in &details.interpretation {
            println!("  {}: {}", category, sentence);
        }
    }
}

fn write_csv(path: &Path, results: &[(String, Result<StockDetails, EngineError>)]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("Unable to create {}", path.display()))?;

    for details in results.iter().filter_map(|(_, result)| result.as_ref().ok()) {
        for record in &details.projections {
            writer.serialize(CsvRecord {
                symbol: &details.stock_symbol,
                parameter: &record.parameter,
                current_value: record.current_value,
                projected_value: record.projected_value,
                change: record.change,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}
