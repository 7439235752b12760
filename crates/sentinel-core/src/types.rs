use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A repository surfaced by the hosting platform's search index.
///
/// Field names on the wire follow the GitHub REST representation so that
/// search responses deserialize directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryCandidate {
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
    #[serde(rename = "html_url", default)]
    pub url: String,
}

impl RepositoryCandidate {
    /// Short repository name: the segment after the last `/` of `full_name`.
    pub fn name(&self) -> &str {
        self.full_name
            .rsplit_once('/')
            .map_or(self.full_name.as_str(), |(_, name)| name)
    }

    /// Lowercased `name + " " + description`, the text every strategy and the
    /// noise filter inspects. A missing description counts as empty.
    pub fn text(&self) -> String {
        format!(
            "{} {}",
            self.name(),
            self.description.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }
}

/// Thematic category label assigned by a strategy.
///
/// Declaration order is the order used by the tag-frequency summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    TechAccelerator,
    CorePragmatism,
    CodeLeverage,
    ParadigmShift,
    TalentGrowth,
    CareerMoves,
    KnowledgeBase,
    ViralUncategorized,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::TechAccelerator => "TECH_ACCELERATOR",
            Tag::CorePragmatism => "CORE_PRAGMATISM",
            Tag::CodeLeverage => "CODE_LEVERAGE",
            Tag::ParadigmShift => "PARADIGM_SHIFT",
            Tag::TalentGrowth => "TALENT_GROWTH",
            Tag::CareerMoves => "CAREER_MOVES",
            Tag::KnowledgeBase => "KNOWLEDGE_BASE",
            Tag::ViralUncategorized => "VIRAL_UNCATEGORIZED",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fallback tag for candidates no strategy claims.
pub const FALLBACK_TAG: Tag = Tag::ViralUncategorized;

/// A classified candidate: the repository fields plus the tags in strategy
/// evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Signal {
    #[serde(flatten)]
    pub repo: RepositoryCandidate,
    pub tags: Vec<Tag>,
    pub classified_at: String,
}

/// Tag → occurrence count across every emitted signal.
pub type TagSummary = BTreeMap<Tag, usize>;

/// The output of one classification run. Built once by [`crate::classify`],
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationBatch {
    signals: Vec<Signal>,
    summary: TagSummary,
    dropped_noise: usize,
    dropped_unmatched: usize,
}

impl ClassificationBatch {
    pub(crate) fn new(signals: Vec<Signal>, dropped_noise: usize, dropped_unmatched: usize) -> Self {
        let summary = tag_summary(&signals);
        Self {
            signals,
            summary,
            dropped_noise,
            dropped_unmatched,
        }
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn summary(&self) -> &TagSummary {
        &self.summary
    }

    /// Number of emitted signals.
    pub fn total(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Candidates excluded by the noise filter.
    pub fn dropped_noise(&self) -> usize {
        self.dropped_noise
    }

    /// Candidates excluded because nothing matched and fallback is off.
    pub fn dropped_unmatched(&self) -> usize {
        self.dropped_unmatched
    }
}

/// Count every tag occurrence; a signal with two tags contributes twice.
pub fn tag_summary(signals: &[Signal]) -> TagSummary {
    signals
        .iter()
        .flat_map(|s| s.tags.iter().copied())
        .fold(TagSummary::new(), |mut acc, tag| {
            *acc.entry(tag).or_insert(0) += 1;
            acc
        })
}

/// Render a summary as `TAG: n, TAG: n`.
pub fn format_summary(summary: &TagSummary) -> String {
    summary
        .iter()
        .map(|(tag, n)| format!("{tag}: {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}
