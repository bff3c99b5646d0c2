//! MuntinKit command line

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use muntinkit::{init_json_logging, init_logging, run_job, Config, Job, JobReport, Layout, Opening};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "muntinkit")]
#[command(about = "Cut lists, stock packing and assembly order for window glazing bars")]
#[command(version)]
struct Cli {
    /// Configuration file (JSON or TOML); defaults to the user config
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a job file through the full pipeline
    Run {
        /// Path to the JSON job file
        job: PathBuf,

        /// Output file for the report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportFormat,
    },

    /// Generate a grid layout and run it through the pipeline
    Grid {
        /// Glass width in mm
        #[arg(long)]
        width: f64,

        /// Glass height in mm
        #[arg(long)]
        height: f64,

        /// Number of pane rows
        #[arg(short, long, default_value = "2")]
        rows: usize,

        /// Number of pane columns
        #[arg(short = 'k', long, default_value = "2")]
        cols: usize,

        /// Make horizontals continuous and split the verticals
        #[arg(long)]
        horizontal_master: bool,

        /// Number of identical sashes (overrides the config)
        #[arg(short, long)]
        sashes: Option<usize>,

        /// Output file for the report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportFormat,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a default configuration file
    Init {
        /// Target path (defaults to the user config)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Pretty-printed JSON
    Json,
    /// Plain-text shop sheet
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.log_json {
        init_json_logging()?;
    } else {
        init_logging()?;
    }
    info!("MuntinKit {} (built {})", muntinkit::VERSION, muntinkit::BUILD_DATE);

    match cli.command {
        Commands::Run {
            job,
            output,
            format,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let job_file = Job::load(&job)
                .with_context(|| format!("Failed to load job file {}", job.display()))?;
            let report = run_job(&job_file, &config)
                .with_context(|| format!("Job '{}' failed", job_file.name))?;
            emit(&report, format, output.as_deref())?;
        }

        Commands::Grid {
            width,
            height,
            rows,
            cols,
            horizontal_master,
            sashes,
            output,
            format,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let mut job = Job::new(
                format!("{rows}x{cols} grid"),
                Opening::new(width, height),
            )
            .with_layout(Layout::Grid {
                rows,
                cols,
                horizontal_master,
            });
            job.sash_count = sashes;
            let report = run_job(&job, &config).context("Grid job failed")?;
            emit(&report, format, output.as_deref())?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => {
                let path = match path.or(cli.config) {
                    Some(path) => path,
                    None => Config::default_path()?,
                };
                if path.exists() && !force {
                    bail!(
                        "{} already exists; pass --force to overwrite",
                        path.display()
                    );
                }
                Config::default()
                    .save_to_file(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Configuration written to: {}", path.display());
            }
            ConfigAction::Show => {
                let config = load_config(cli.config.as_deref())?;
                print!("{}", config.to_toml_string()?);
            }
        },
    }

    Ok(())
}

/// Explicit config files must exist; the user config falls back to defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let path = Config::default_path()?;
            Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        }
    }
}

fn emit(report: &JobReport, format: ReportFormat, output: Option<&Path>) -> anyhow::Result<()> {
    let content = match format {
        ReportFormat::Json => report.to_json().context("Failed to serialize report")?,
        ReportFormat::Text => report.summary(),
    };

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            println!("Report saved to: {}", path.display());
        }
        None => println!("{content}"),
    }

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
