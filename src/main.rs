use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lockwatch::{
    audit,
    checker::AdvisoryRegistry,
    config::Config,
    inventory,
    logging::init_tracing,
    output::{render_inventory, render_report, OutputFormat},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

/// Exit codes. Findings only change the status when asked to.
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const FINDINGS: u8 = 2;
}

#[derive(Parser)]
#[command(name = "lockwatch")]
#[command(
    author,
    version,
    about = "Scan npm projects for dependencies on known-compromised package versions"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Root directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// List every package name in the tree instead of checking advisories
    #[arg(long)]
    inventory: bool,

    /// Advisory list file (name=version1||version2 per line)
    #[arg(short, long)]
    advisories: Option<PathBuf>,

    /// Output format (text, table, json)
    #[arg(short, long)]
    format: Option<String>,

    /// Write output to file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Exit with status 2 when compromised packages are found
    #[arg(long)]
    fail_on_findings: bool,

    /// Custom config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();

    if let Some(Commands::Config { init, path }) = cli.command {
        handle_config(init, path)?;
        return Ok(exit_codes::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    init_tracing(level)?;

    let format_str = cli.format.clone().unwrap_or_else(|| config.default_format.clone());
    let format = OutputFormat::from_str(&format_str).map_err(|e| anyhow::anyhow!(e))?;

    if cli.inventory {
        let names = inventory::collect_inventory(&cli.root, &config.ignore)?;
        emit(&render_inventory(&names, format)?, cli.output.as_deref(), format)?;
        return Ok(exit_codes::SUCCESS);
    }

    let advisory_file = cli.advisories.as_ref().unwrap_or(&config.advisory_file);
    let registry = AdvisoryRegistry::load(advisory_file)?;

    let report = match format {
        OutputFormat::Text => audit::run_scan(&cli.root, &registry, &config, |_, _, dir| {
            println!("🔍 Checking repo: {}", dir.display());
        })?,
        OutputFormat::Table => scan_with_progress(&cli.root, &registry, &config)?,
        OutputFormat::Json => audit::run_scan(&cli.root, &registry, &config, |_, _, _| {})?,
    };

    emit(&render_report(&report, format)?, cli.output.as_deref(), format)?;

    let fail_on_findings = cli.fail_on_findings || config.fail_on_findings;
    if fail_on_findings && report.has_findings() {
        Ok(exit_codes::FINDINGS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn scan_with_progress(
    root: &Path,
    registry: &AdvisoryRegistry,
    config: &Config,
) -> Result<lockwatch::ScanReport> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let result = audit::run_scan(root, registry, config, |index, total, dir| {
        pb.set_length(total as u64);
        pb.set_position(index as u64);
        pb.set_message(format!("Checking {}", dir.display()));
    });

    match &result {
        Ok(report) => {
            pb.set_position(report.projects.len() as u64);
            pb.finish_with_message(format!("Checked {} projects", report.projects.len()));
        }
        Err(_) => pb.abandon(),
    }

    Ok(result?)
}

fn emit(content: &str, output: Option<&Path>, format: OutputFormat) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            if format.is_interactive() {
                println!("Results written to: {}", path.display());
            }
        }
        None => {
            print!("{}", content);
            if format == OutputFormat::Json {
                println!();
            }
        }
    }
    Ok(())
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'lockwatch config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
