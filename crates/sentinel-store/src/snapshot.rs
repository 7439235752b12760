use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};

use sentinel_core::{format_summary, ArtifactPersist, ClassificationBatch, Signal, TagSummary};

/// Where and how snapshots are named.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Transient working root the artifacts land under.
    pub transient_root: String,
    pub category: String,
    pub file_prefix: String,
    /// Whole-hour offset applied to UTC when deriving the date/hour partition.
    pub utc_offset_hours: i8,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            transient_root: "data".to_string(),
            category: "tech".to_string(),
            file_prefix: "sentinel".to_string(),
            utc_offset_hours: 0,
        }
    }
}

/// Category + calendar date + hour-of-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    pub category: String,
    pub date: Date,
    pub hour: u8,
}

impl PartitionKey {
    /// Partition for a UTC instant shifted by `utc_offset_hours`.
    pub fn at(category: impl Into<String>, now: OffsetDateTime, utc_offset_hours: i8) -> Self {
        let shifted = now.to_offset(time::UtcOffset::UTC) + Duration::hours(i64::from(utc_offset_hours));
        Self {
            category: category.into(),
            date: shifted.date(),
            hour: shifted.hour(),
        }
    }

    /// `YYYY-MM-DD`
    pub fn date_folder(&self) -> String {
        format_date(self.date)
    }

    /// `<root>/<category>/<YYYY-MM-DD>/<prefix>-<H>h.json`
    pub fn artifact_path(&self, transient_root: &str, file_prefix: &str) -> String {
        format!(
            "{}/{}/{}/{}-{}h.json",
            transient_root.trim_end_matches('/'),
            self.category,
            self.date_folder(),
            file_prefix,
            self.hour
        )
    }
}

pub fn format_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .expect("calendar date formatting should not fail")
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotMeta {
    pub scanned_at: String,
    pub total_items: usize,
    pub trend_summary: TagSummary,
}

/// The persisted artifact: metadata block plus the full signal list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub items: Vec<Signal>,
}

impl Snapshot {
    pub fn from_batch(batch: &ClassificationBatch, scanned_at: &str) -> Self {
        Self {
            meta: SnapshotMeta {
                scanned_at: scanned_at.to_string(),
                total_items: batch.total(),
                trend_summary: batch.summary().clone(),
            },
            items: batch.signals().to_vec(),
        }
    }

    pub fn to_bytes(&self) -> sentinel_core::Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

/// Commit message carrying the trend summary.
pub fn commit_message(summary: &TagSummary) -> String {
    format!("Update: {}", format_summary(summary))
}

/// Serializes a batch in memory and hands it to the persistence collaborator
/// in a single call.
pub struct SnapshotWriter<P> {
    persist: P,
    config: SnapshotConfig,
}

impl<P: ArtifactPersist> SnapshotWriter<P> {
    pub fn new(persist: P, config: SnapshotConfig) -> Self {
        Self { persist, config }
    }

    /// Partition key for `now` under this writer's category and offset.
    pub fn partition(&self, now: OffsetDateTime) -> PartitionKey {
        PartitionKey::at(self.config.category.clone(), now, self.config.utc_offset_hours)
    }

    /// Persist `batch` and return the artifact path. An empty batch writes
    /// nothing and returns `None`.
    pub fn write(
        &self,
        batch: &ClassificationBatch,
        key: &PartitionKey,
        scanned_at: &str,
    ) -> sentinel_core::Result<Option<String>> {
        if batch.is_empty() {
            tracing::info!("no signals; snapshot skipped");
            return Ok(None);
        }

        let path = key.artifact_path(&self.config.transient_root, &self.config.file_prefix);
        let bytes = Snapshot::from_batch(batch, scanned_at).to_bytes()?;
        let message = commit_message(batch.summary());
        self.persist.persist(&path, &bytes, &message)?;
        tracing::info!(%path, items = batch.total(), "snapshot persisted");
        Ok(Some(path))
    }
}
