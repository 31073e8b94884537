//! CLI entry point for the movie rating report.
//!
//! Reads `avg_ratings.tsv` and `rating_counts.tsv`, then writes the rating
//! histogram, the top-20 count chart and the rating/count scatter to `./output/`.

use anyhow::Result;
use clap::Parser;
use movie_report::render::BitmapRenderer;
use movie_report::{ReportConfig, ReportGenerator, output};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "movie_report")]
#[command(about = "Render rating charts from MovieLens aggregate files", long_about = None)]
struct Cli {
    /// Per-movie average ratings (`movieId<TAB>avg`)
    #[arg(long, value_name = "PATH", default_value = "avg_ratings.tsv")]
    avg: PathBuf,

    /// Per-movie rating counts (`movieId<TAB>cnt`)
    #[arg(long, value_name = "PATH", default_value = "rating_counts.tsv")]
    counts: PathBuf,

    /// Directory the PNG charts are written to
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output_dir: PathBuf,

    /// Only render the histogram and the top-20 chart
    #[arg(long, default_value_t = false)]
    no_scatter: bool,
}

impl From<Cli> for ReportConfig {
    fn from(cli: Cli) -> Self {
        ReportConfig {
            avg_path: cli.avg,
            counts_path: cli.counts,
            output_dir: cli.output_dir,
            include_scatter: !cli.no_scatter,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + optional JSON rolling log file
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let (json_layer, _file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_path = Path::new(&log_file_path);
            let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
            let log_file_name = log_path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "movie_report.log".into());

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug")),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = ReportConfig::from(Cli::parse());

    let summary = BitmapRenderer::new()
        .map(|renderer| ReportGenerator::new(config, renderer))
        .and_then(|generator| generator.run())
        .inspect_err(|e| error!(error = %e, "Report failed"))?;

    output::print_json(&summary)?;
    println!("✓ Plots saved in {}", summary.output_dir.display());

    Ok(())
}
