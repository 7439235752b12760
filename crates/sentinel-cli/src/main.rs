mod cmd_archive;
mod cmd_classify;
mod cmd_config;
mod cmd_scan;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::cmd_config::ConfigCmd;
use crate::config::SentinelConfig;

#[derive(Parser)]
#[command(
    name = "sentinel",
    version,
    about = "Scan new GitHub repositories, classify trend signals, and bank the snapshots"
)]
struct Cli {
    /// Workspace root holding data/ and central_bank/ (defaults to cwd)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Config file (defaults to <root>/.sentinel/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search recent repositories, classify them, and persist a snapshot
    Scan {
        /// Write the snapshot under this directory instead of committing it
        #[arg(long)]
        local: Option<PathBuf>,
        /// Print the snapshot without writing it
        #[arg(long)]
        dry_run: bool,
        /// Use the strict preset (noise filter on, tech strategies only)
        #[arg(long)]
        strict: bool,
    },
    /// Classify candidates from a saved search response or JSON array
    Classify {
        /// Input JSON file
        input: PathBuf,
        /// Write the snapshot under this directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Use the strict preset (noise filter on, tech strategies only)
        #[arg(long)]
        strict: bool,
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Move dated artifacts from data/ into central_bank/
    Archive {
        /// Relocation policy: verified or batch (default: from config)
        #[arg(long)]
        policy: Option<String>,
        /// Only relocate this date partition (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("sentinel={level}"))),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let config_path = cli
        .config
        .unwrap_or_else(|| SentinelConfig::default_path(&root));
    let mut config = SentinelConfig::load(&config_path)?;
    config.apply_env();

    match cli.cmd {
        Command::Scan {
            local,
            dry_run,
            strict,
        } => cmd_scan::execute(&cmd_scan::ScanParams {
            config: &config,
            local: local.as_deref(),
            dry_run,
            strict,
        }),
        Command::Classify {
            input,
            out,
            strict,
            json,
        } => cmd_classify::execute(&cmd_classify::ClassifyParams {
            config: &config,
            input: &input,
            out: out.as_deref(),
            strict,
            json,
        }),
        Command::Archive { policy, date } => cmd_archive::execute(&cmd_archive::ArchiveParams {
            root: &root,
            config: &config,
            policy: policy.as_deref(),
            date: date.as_deref(),
        }),
        Command::Config { cmd } => cmd_config::run(cmd, &config),
    }
}
