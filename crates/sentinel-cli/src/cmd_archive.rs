use std::path::Path;

use sentinel_bank::{ArchiveMover, ArchiveReport, FileStatus, RelocationPolicy, StdFs};

use crate::config::SentinelConfig;

pub struct ArchiveParams<'a> {
    pub root: &'a Path,
    pub config: &'a SentinelConfig,
    pub policy: Option<&'a str>,
    pub date: Option<&'a str>,
}

/// `sentinel archive`: relocate transient artifacts into the bank.
/// Per-item failures are reported but do not fail the command.
pub fn execute(params: &ArchiveParams) -> anyhow::Result<()> {
    let policy = match params.policy {
        Some(p) => p.parse::<RelocationPolicy>()?,
        None => params.config.archive.policy,
    };
    if let Some(date) = params.date {
        validate_date(date)?;
    }

    let mover = ArchiveMover::new(StdFs, params.root, &params.config.archive)
        .with_policy(policy)
        .with_date(params.date.map(str::to_string));
    mover.check_roots()?;
    let report = mover.run();
    print_report(&report);
    Ok(())
}

fn validate_date(date: &str) -> anyhow::Result<()> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(date, format)
        .map_err(|e| anyhow::anyhow!("invalid --date '{date}' (expected YYYY-MM-DD): {e}"))?;
    Ok(())
}

fn print_report(report: &ArchiveReport) {
    if report.partitions.is_empty() {
        println!("No dated partitions found.");
    }
    for p in &report.partitions {
        println!(
            "{}/{} -> {} [{:?}] {} file(s)",
            p.category,
            p.date,
            p.destination.display(),
            p.state,
            p.files.len()
        );
    }
    println!(
        "moved: {}, copied: {}, retained: {}, failed: {}",
        report.count(FileStatus::Moved),
        report.count(FileStatus::Copied),
        report.count(FileStatus::Retained),
        report.count(FileStatus::Failed),
    );
    if let Some(purged) = report.purged {
        println!("purged {purged} transient entr{}", if purged == 1 { "y" } else { "ies" });
    }
    if !report.errors.is_empty() {
        println!("{} item error(s); see log for details", report.errors.len());
    }
}
