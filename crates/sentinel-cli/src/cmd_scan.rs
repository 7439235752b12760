use std::path::Path;

use time::OffsetDateTime;

use sentinel_core::{
    classify, format_summary, ArtifactPersist, ClassificationBatch, ClassifierConfig,
    RepositorySearch, SearchQuery,
};
use sentinel_github::GitHubClient;
use sentinel_store::{LocalPersist, Snapshot, SnapshotConfig, SnapshotWriter};

use crate::config::SentinelConfig;

pub struct ScanParams<'a> {
    pub config: &'a SentinelConfig,
    /// Write the snapshot under this directory instead of committing it.
    pub local: Option<&'a Path>,
    pub dry_run: bool,
    pub strict: bool,
}

/// `sentinel scan`
pub fn execute(params: &ScanParams) -> anyhow::Result<()> {
    let config = params.config;
    let token = std::env::var("GITHUB_TOKEN").ok();
    let client = GitHubClient::new(config.github.clone(), token);

    let now = OffsetDateTime::now_utc();
    let query = SearchQuery::recent(now, &config.search);
    println!("Query: {}", query.q);

    let candidates = client.search(&query)?;
    let classifier = classifier_config(config, params.strict);
    let scanned_at = rfc3339(now);
    let batch = classify(&candidates, &classifier, &scanned_at);
    print_batch(&batch);

    if params.dry_run {
        let snapshot = Snapshot::from_batch(&batch, &scanned_at);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    match params.local {
        Some(dir) => persist_batch(LocalPersist::new(dir), &config.snapshot, &batch, now)?,
        None => persist_batch(&client, &config.snapshot, &batch, now)?,
    }
    Ok(())
}

pub(crate) fn classifier_config(config: &SentinelConfig, strict: bool) -> ClassifierConfig {
    if strict {
        ClassifierConfig::strict()
    } else {
        config.classifier.clone()
    }
}

/// Write `batch` through `persist`, printing the artifact path.
pub(crate) fn persist_batch<P: ArtifactPersist>(
    persist: P,
    snapshot: &SnapshotConfig,
    batch: &ClassificationBatch,
    now: OffsetDateTime,
) -> anyhow::Result<()> {
    let writer = SnapshotWriter::new(persist, snapshot.clone());
    let key = writer.partition(now);
    match writer.write(batch, &key, &rfc3339(now))? {
        Some(path) => println!("Archived {} signal(s) -> {path}", batch.total()),
        None => println!("No significant movement; nothing written."),
    }
    Ok(())
}

pub(crate) fn print_batch(batch: &ClassificationBatch) {
    println!(
        "Classified {} signal(s) (noise dropped: {}, unmatched dropped: {})",
        batch.total(),
        batch.dropped_noise(),
        batch.dropped_unmatched()
    );
    if !batch.summary().is_empty() {
        println!("Trend: {}", format_summary(batch.summary()));
    }
}

pub(crate) fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&time::format_description::well_known::Rfc3339)
        .expect("RFC3339 formatting should not fail")
}
