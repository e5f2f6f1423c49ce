use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use oxrdf::Graph;
use tracing::info;

use rdt_bridge::ontology::{emit_instance_model, write_turtle};
use rdt_bridge::{
    ForecastFetcher, ForecastQuery, ForecastStepSource, LocationForecastClient, LookupOutcome,
    RdtConfig, RdtError, SimulatedClock, logging,
};

/// Forecast step source and ontology fact emitter for ruleless digital twins
#[derive(Parser, Debug)]
#[command(name = "rdt-bridge", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the forecast once and look up a single instant
    Forecast {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Instant to look up (RFC 3339), defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Drive the step source through a fixed number of steps
    Simulate {
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Experiment start relative to now, in seconds
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        start_time: f64,
        #[arg(long, default_value_t = 3600.0)]
        step_size: f64,
        #[arg(long, default_value_t = 24)]
        steps: u32,
    },
    /// Emit the instance model as Turtle
    Ontology {
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn query(config: &RdtConfig, lat: Option<f64>, lon: Option<f64>) -> Result<ForecastQuery> {
    let query = ForecastQuery::new(
        lat.unwrap_or(config.location.latitude),
        lon.unwrap_or(config.location.longitude),
    )?;
    Ok(query)
}

async fn forecast(config: &RdtConfig, query: ForecastQuery, at: DateTime<Utc>) -> Result<()> {
    let client = LocationForecastClient::new(&config.weather)?;
    let fetcher = ForecastFetcher::fetch(&client, query).await?;

    match fetcher.lookup(at).logged() {
        LookupOutcome::Found(reading) => println!(
            "{at} ({}): {:.1}°C, cloud cover {:.0}%",
            query.format_coordinates(),
            reading.air_temperature,
            reading.cloud_area_fraction
        ),
        LookupOutcome::NotFound => println!("{at} ({}): not found", query.format_coordinates()),
        LookupOutcome::TransientError(details) => {
            println!("{at} ({}): not found ({details})", query.format_coordinates());
        }
    }
    Ok(())
}

async fn simulate(
    config: &RdtConfig,
    query: ForecastQuery,
    start_time: f64,
    step_size: f64,
    steps: u32,
) -> Result<()> {
    let client = LocationForecastClient::new(&config.weather)?;
    let clock = SimulatedClock::for_experiment(start_time)?;
    let mut source = ForecastStepSource::initialize(&client, query, clock)
        .await
        .context("Initial forecast fetch failed")?;

    info!(start = %source.clock().start(), steps, step_size, "Starting simulation");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "time,temperature,notFound")?;
    let initial = source.outputs();
    writeln!(out, "0,{},{}", initial.temperature, initial.not_found())?;

    for step in 0..steps {
        let current = f64::from(step) * step_size;
        let reading = source.advance(current, step_size);
        writeln!(
            out,
            "{},{},{}",
            current + step_size,
            reading.temperature,
            reading.not_found()
        )?;
    }
    Ok(())
}

fn ontology(config: &RdtConfig, output: Option<PathBuf>) -> Result<()> {
    let options = config.ontology.to_options();
    let mut graph = Graph::new();
    emit_instance_model(&mut graph, &options)?;
    info!(triples = graph.len(), "Instance model emitted");

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_turtle(&graph, BufWriter::new(file), Some(&options.base_iri))?
                .flush()?;
            info!("Wrote {}", path.display());
        }
        None => {
            write_turtle(&graph, io::stdout().lock(), Some(&options.base_iri))?.flush()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RdtConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose);

    let result = match cli.command {
        Command::Forecast { lat, lon, at } => {
            let query = query(&config, lat, lon)?;
            forecast(&config, query, at.unwrap_or_else(Utc::now)).await
        }
        Command::Simulate {
            lat,
            lon,
            start_time,
            step_size,
            steps,
        } => {
            let query = query(&config, lat, lon)?;
            simulate(&config, query, start_time, step_size, steps).await
        }
        Command::Ontology { output } => ontology(&config, output),
    };

    if let Err(e) = &result {
        if let Some(err) = e.downcast_ref::<RdtError>() {
            eprintln!("{}", err.user_message());
        }
    }
    result
}
