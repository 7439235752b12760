use crate::config::ClassifierConfig;
use crate::noise;
use crate::strategy::StrategyEngine;
use crate::types::{ClassificationBatch, RepositoryCandidate, Signal, FALLBACK_TAG};

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Signal(Signal),
    Noise,
    Unmatched,
}

/// Classify a single candidate under `config`.
pub fn classify_one(
    engine: &StrategyEngine,
    config: &ClassifierConfig,
    repo: &RepositoryCandidate,
    classified_at: &str,
) -> Verdict {
    let text = repo.text();
    if config.noise_filter && noise::is_noise_text(&text) {
        return Verdict::Noise;
    }

    let mut tags = engine.evaluate_text(repo, &text);
    if tags.is_empty() {
        if !config.fallback_tag {
            return Verdict::Unmatched;
        }
        tags.push(FALLBACK_TAG);
    }

    Verdict::Signal(Signal {
        repo: repo.clone(),
        tags,
        classified_at: classified_at.to_string(),
    })
}

/// Classify candidates in input order and build the batch with its
/// tag-frequency summary. Pure: the timestamp is supplied by the caller.
pub fn classify(
    candidates: &[RepositoryCandidate],
    config: &ClassifierConfig,
    classified_at: &str,
) -> ClassificationBatch {
    let engine = StrategyEngine::new(config.strategy_set, config.thresholds);

    let mut signals = Vec::with_capacity(candidates.len());
    let mut dropped_noise = 0;
    let mut dropped_unmatched = 0;
    for repo in candidates {
        match classify_one(&engine, config, repo, classified_at) {
            Verdict::Signal(signal) => signals.push(signal),
            Verdict::Noise => dropped_noise += 1,
            Verdict::Unmatched => dropped_unmatched += 1,
        }
    }

    ClassificationBatch::new(signals, dropped_noise, dropped_unmatched)
}
