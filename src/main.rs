//! Presign Uploadr - direct document upload through presigned URLs

use clap::{Parser, Subcommand};
use presign_uploadr::config::{Config, ConfigError};
use presign_uploadr::notify::ConsoleNotifier;
use presign_uploadr::selector::RawFile;
use presign_uploadr::{metrics, telemetry, UploadForm};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Presign Uploadr - upload a document to object storage via a presigned URL
#[derive(Parser, Debug)]
#[command(name = "presign-uploadr")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Presign endpoint, overrides the configuration file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error), overrides the configuration file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print Prometheus metrics to stderr when done
    #[arg(long)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select a document and upload it. Files after the first are ignored.
    Upload {
        /// Document(s) to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// MIME type to report instead of guessing from the extension
        #[arg(short, long)]
        mime_type: Option<String>,
    },
    /// Validate a document and show the name it would be stored under
    Check {
        file: PathBuf,

        /// MIME type to report instead of guessing from the extension
        #[arg(short, long)]
        mime_type: Option<String>,
    },
}

/// Load the configuration file, falling back to `--endpoint` alone when the
/// file is absent. Flags are applied before validation.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match Config::load_unvalidated(&args.config) {
        Ok(config) => config,
        Err(ConfigError::IoError(_)) if args.endpoint.is_some() => {
            Config::with_endpoint(args.endpoint.clone().unwrap_or_default())
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(endpoint) = &args.endpoint {
        config.presign.endpoint = endpoint.clone();
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.print_metrics {
        config.metrics.enabled = true;
    }

    config.validate()?;
    Ok(config)
}

async fn read_candidates(paths: &[PathBuf], mime_type: Option<&str>) -> anyhow::Result<Vec<RawFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(RawFile::from_path(path, mime_type).await?);
    }
    Ok(files)
}

async fn run(args: Args, config: &Config) -> anyhow::Result<bool> {
    let mut form = UploadForm::from_config(&config.presign, Arc::new(ConsoleNotifier))?;

    match args.command {
        Command::Upload { files, mime_type } => {
            // Only the first file is attached, as with a multi-file drop
            let candidates = read_candidates(&files[..1], mime_type.as_deref()).await?;
            if files.len() > 1 {
                info!(ignored = files.len() - 1, "Only the first file is uploaded");
            }

            if form.drop_files(candidates).is_err() {
                return Ok(false);
            }
            Ok(form.handle_upload().await.is_ok())
        }
        Command::Check { file, mime_type } => {
            let candidate = RawFile::from_path(&file, mime_type.as_deref()).await?;
            match form.select_file(Some(candidate)) {
                Ok(Some(selected)) => {
                    println!("{}\t{}", selected.name(), selected.mime_type());
                    Ok(true)
                }
                Ok(None) | Err(_) => Ok(false),
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(&args)?;
    telemetry::init_subscriber(&config.logging)?;

    info!("Starting Presign Uploadr v{}", presign_uploadr::VERSION);
    info!(endpoint = %config.presign.endpoint, "Loaded configuration");

    let metrics_enabled = config.metrics.enabled;
    let succeeded = run(args, &config).await?;

    if metrics_enabled {
        eprint!("{}", metrics::gather());
    }

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
