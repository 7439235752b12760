use clap::Subcommand;

use crate::config::SentinelConfig;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Print the effective configuration as JSON
    Show {
        /// Print built-in defaults instead of the loaded file
        #[arg(long)]
        default: bool,
    },
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, config: &SentinelConfig) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Show { default } => show(if default { None } else { Some(config) }),
    }
}

/// `sentinel config show`
fn show(config: Option<&SentinelConfig>) -> anyhow::Result<()> {
    let defaults = SentinelConfig::default();
    let config = config.unwrap_or(&defaults);
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
