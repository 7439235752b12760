use std::path::Path;

use time::OffsetDateTime;

use sentinel_core::{classify, RepositoryCandidate};
use sentinel_store::{LocalPersist, Snapshot};

use crate::cmd_scan::{classifier_config, persist_batch, print_batch, rfc3339};
use crate::config::SentinelConfig;

pub struct ClassifyParams<'a> {
    pub config: &'a SentinelConfig,
    pub input: &'a Path,
    pub out: Option<&'a Path>,
    pub strict: bool,
    pub json: bool,
}

/// `sentinel classify <input.json>`: offline classification of a saved
/// search response or candidate array.
pub fn execute(params: &ClassifyParams) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(params.input)?;
    let candidates = parse_candidates(&content)?;

    let now = OffsetDateTime::now_utc();
    let scanned_at = rfc3339(now);
    let classifier = classifier_config(params.config, params.strict);
    let batch = classify(&candidates, &classifier, &scanned_at);

    if params.json {
        let snapshot = Snapshot::from_batch(&batch, &scanned_at);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_batch(&batch);
    }

    if let Some(out) = params.out {
        persist_batch(LocalPersist::new(out), &params.config.snapshot, &batch, now)?;
    }
    Ok(())
}

/// Accept either `{"items": [...]}` or a bare array.
fn parse_candidates(content: &str) -> anyhow::Result<Vec<RepositoryCandidate>> {
    let val: serde_json::Value = serde_json::from_str(content)?;
    let items = match val {
        serde_json::Value::Array(items) => serde_json::Value::Array(items),
        serde_json::Value::Object(mut map) => map
            .remove("items")
            .ok_or_else(|| anyhow::anyhow!("input object has no \"items\" array"))?,
        _ => anyhow::bail!("input must be a JSON array or an object with \"items\""),
    };
    Ok(serde_json::from_value(items)?)
}
