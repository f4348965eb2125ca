//! funcplot - plot sine, cosine and sinc functions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use funcplot::{AppConfig, FunctionKind, PlotSession};

#[derive(Parser, Debug)]
#[command(name = "funcplot")]
#[command(about = "Plot sine, cosine and sinc functions", long_about = None)]
struct Args {
    /// Settings file (default: Settings/app.json next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,

    /// Export the plot to this SVG file and exit without opening a window
    #[arg(long, value_name = "SVG")]
    export: Option<PathBuf>,

    /// Function to export (default: the stored selection)
    #[arg(long, requires = "export")]
    function: Option<FunctionKind>,
}

fn init_logging(log_path: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match log_path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_deref())?;

    let mut cfg = AppConfig::default();
    if let Some(path) = args.config {
        cfg.config_path = path;
    }
    tracing::info!("Starting funcplot with settings {}", cfg.config_path.display());

    let mut session = PlotSession::open(&cfg.config_path)?;

    if let Some(out) = args.export {
        if let Some(kind) = args.function {
            session.set_selected_kind(kind)?;
        }
        session
            .export_svg(&out)
            .with_context(|| format!("Failed to export {}", out.display()))?;
        println!("Plot saved to {}", out.display());
        return Ok(());
    }

    funcplot::run_app(session, cfg).map_err(|e| anyhow::anyhow!("Window error: {e}"))?;
    tracing::info!("funcplot exited");
    Ok(())
}
