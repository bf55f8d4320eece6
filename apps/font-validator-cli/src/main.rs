//! Font Validator Binary
//!
//! Loads the URL list, drives Chromium through every page and writes the
//! CSV/HTML (and optionally JSON) reports before printing the summary.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use font_validator::browser::ChromiumSession;
use font_validator::config::{ComponentTable, RunConfig};
use font_validator::reporter::{OutputFormat, ReportPaths, Reporter};
use font_validator::runner::ValidationRunner;
use font_validator::urls::read_urls;
use font_validator::ValidationError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "font-validator")]
#[command(
    version,
    about = "Validate rendered font families of page components in a headless browser"
)]
struct Args {
    /// JSON file holding an array of URLs
    #[arg(long, default_value = "data/urls.json")]
    urls: PathBuf,

    /// Directory receiving the timestamped reports
    #[arg(long, default_value = "reports")]
    reports_dir: PathBuf,

    /// TOML file overriding the built-in component table
    #[arg(long)]
    components: Option<PathBuf>,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    // stdout is reserved for the summary
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Font Validator v{}", env!("CARGO_PKG_VERSION"));

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = RunConfig::from_env();
    let components = match &args.components {
        Some(path) => ComponentTable::from_file(path)
            .with_context(|| format!("loading components from {}", path.display()))?,
        None => ComponentTable::default(),
    };

    let paths = ReportPaths::new(&args.reports_dir, Local::now().naive_local());
    std::fs::create_dir_all(&args.reports_dir)
        .with_context(|| format!("creating {}", args.reports_dir.display()))?;

    let urls = read_urls(&args.urls);
    if urls.is_empty() {
        return Err(ValidationError::NoUrls.into());
    }

    let mut session = ChromiumSession::launch(&config.browser_settings()).await?;
    let runner = ValidationRunner::from_config(&config, components);
    let outcome = runner.run(&mut session, &urls).await;

    if let Err(e) = session.close().await {
        warn!("{}", e);
    }
    let report = outcome?;

    paths.write_all(&report, args.json)?;

    Reporter::new(OutputFormat::Console).report(&report)?;
    println!("CSV report saved to: {}", paths.csv.display());
    println!("HTML report saved to: {}", paths.html.display());
    if args.json {
        println!("JSON report saved to: {}", paths.json.display());
    }

    Ok(())
}
