use analytics::MetricsEngine;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use configuration::{Config, ReportSettings, SourceKind};
use core_types::DegeneratePolicy;
use database::DailyRecordSource;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use web_server::{AppState, DashboardDocument};

mod presentation;

/// The main entry point for the weather & sales report.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (DATABASE_URL, overrides) from a .env file, if any.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::read_config(&cli.config, std::env::var("DATABASE_URL").ok())
        .with_context(|| format!("Failed to read {}", cli.config.display()))?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    // Keep the guard alive for the whole run so the log file is flushed on exit.
    let _log_guard = configuration::init_tracing(&config.logging)?;

    tracing::debug!(config = %cli.config.display(), source_kind = ?config.source.kind, "Configuration loaded.");

    let engine = MetricsEngine::with_policy(config.report.degenerate_policy);
    let source = database::build_source(&config.source, &config.database)
        .await
        .context("Failed to set up the data source")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, source.as_ref(), engine, &config.report).await,
        Commands::Records => handle_records(source.as_ref()).await,
        Commands::Serve(args) => handle_serve(args, source, engine, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Daily sales against the weather for one city and month.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Read records from this source instead of the configured one.
    #[arg(long, global = true, value_enum)]
    source: Option<SourceKind>,

    /// JSON export to read; implies `--source file`.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Report undefined metrics as absent instead of failing.
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(kind) = self.source {
            config.source.kind = kind;
        }
        if let Some(file) = &self.file {
            config.source.kind = SourceKind::File;
            config.source.file = Some(file.clone());
        }
        if self.lenient {
            config.report.degenerate_policy = DegeneratePolicy::Lenient;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the metrics and print the KPI summary.
    Report(ReportArgs),
    /// Print the daily records as a table.
    Records,
    /// Serve the metrics and the daily series over HTTP.
    Serve(ServeArgs),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser)]
struct ReportArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host` and `server.port`.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_report(
    args: ReportArgs,
    source: &dyn DailyRecordSource,
    engine: MetricsEngine,
    report: &ReportSettings,
) -> anyhow::Result<()> {
    let records = source.load_daily_records().await?;
    tracing::info!(source = %source.describe(), records = records.len(), "Computing the report.");
    let metrics = engine
        .compute(&records)
        .with_context(|| format!("Cannot compute metrics from {}", source.describe()))?;
    let doc = DashboardDocument::new(report, metrics);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
        OutputFormat::Table => {
            println!("{} · Weather & Sales · {}", doc.report.city, doc.report.period);
            println!("{}", presentation::kpi_table(&doc));
            for line in presentation::insight_lines(&doc) {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}

async fn handle_records(source: &dyn DailyRecordSource) -> anyhow::Result<()> {
    let records = source.load_daily_records().await?;
    tracing::info!(source = %source.describe(), records = records.len(), "Printing the daily records.");
    println!("{}", presentation::records_table(&records));
    Ok(())
}

async fn handle_serve(
    args: ServeArgs,
    source: Arc<dyn DailyRecordSource>,
    engine: MetricsEngine,
    config: &Config,
) -> anyhow::Result<()> {
    let addr = match args.addr {
        Some(addr) => addr,
        None => config.server.socket_addr()?,
    };

    let state = AppState {
        source,
        engine,
        report: config.report.clone(),
    };
    web_server::run_server(addr, state).await
}
