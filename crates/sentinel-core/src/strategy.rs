//! Named heuristic strategies and the ordered registry that evaluates them.
//!
//! Each strategy inspects the lowercased `name + description` text and, where
//! applicable, structured fields. A strategy yields its tag only when its full
//! predicate holds. Registry order is the order tags appear on a signal.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{StrategySet, Thresholds};
use crate::types::{RepositoryCandidate, Tag};

/// Languages that qualify a candidate for the core-systems signal.
pub const HARDCORE_LANGUAGES: &[&str] = &["Rust", "C", "C++", "Zig"];

static ACCELERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"agi|infra|llm|cuda|compiler|quantization|tensor|gpu").unwrap()
});
static CORE_SYSTEMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"kernel|driver|runtime|engine|embedded|performance").unwrap());
static LEVERAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"protocol|sdk|api-first|autonomous|agent|permissionless|defi").unwrap()
});
static PARADIGM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"reimagining|alternative to|solving the problem of|new way|vs code").unwrap()
});
static SKILLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"skills|roadmap|path|learning|guide|101").unwrap());
static INTERVIEW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"interview|questions|leetcode|offer").unwrap());
static RESOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"awesome|collection|list|curated|resources|template").unwrap()
});

/// Everything a predicate may look at.
pub struct Subject<'a> {
    pub repo: &'a RepositoryCandidate,
    /// Lowercased `name + " " + description`.
    pub text: &'a str,
    pub thresholds: &'a Thresholds,
}

/// A named pure predicate that claims one tag.
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub tag: Tag,
    predicate: fn(&Subject<'_>) -> bool,
}

impl Strategy {
    /// The strategy's tag if its predicate holds.
    pub fn evaluate(&self, subject: &Subject<'_>) -> Option<Tag> {
        (self.predicate)(subject).then_some(self.tag)
    }
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}

// ── Tech strategies ──

fn accelerator(s: &Subject<'_>) -> bool {
    ACCELERATOR.is_match(s.text)
}

fn core_systems(s: &Subject<'_>) -> bool {
    let hardcore = s
        .repo
        .language
        .as_deref()
        .is_some_and(|lang| HARDCORE_LANGUAGES.contains(&lang));
    hardcore && CORE_SYSTEMS.is_match(s.text)
}

fn leverage(s: &Subject<'_>) -> bool {
    LEVERAGE.is_match(s.text) && s.repo.forks > s.thresholds.leverage_min_forks
}

fn paradigm(s: &Subject<'_>) -> bool {
    let popular = s
        .thresholds
        .paradigm_min_stars
        .map_or(true, |min| s.repo.stars > min);
    PARADIGM.is_match(s.text) && popular
}

// ── Talent strategies ──

fn skills(s: &Subject<'_>) -> bool {
    SKILLS.is_match(s.text)
}

fn interview(s: &Subject<'_>) -> bool {
    INTERVIEW.is_match(s.text)
}

fn resource(s: &Subject<'_>) -> bool {
    RESOURCE.is_match(s.text)
}

const TECH_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "accelerator",
        tag: Tag::TechAccelerator,
        predicate: accelerator,
    },
    Strategy {
        name: "core_systems",
        tag: Tag::CorePragmatism,
        predicate: core_systems,
    },
    Strategy {
        name: "leverage",
        tag: Tag::CodeLeverage,
        predicate: leverage,
    },
    Strategy {
        name: "paradigm",
        tag: Tag::ParadigmShift,
        predicate: paradigm,
    },
];

const TALENT_STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "skills",
        tag: Tag::TalentGrowth,
        predicate: skills,
    },
    Strategy {
        name: "interview",
        tag: Tag::CareerMoves,
        predicate: interview,
    },
    Strategy {
        name: "resource",
        tag: Tag::KnowledgeBase,
        predicate: resource,
    },
];

/// Ordered strategy registry.
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    strategies: Vec<Strategy>,
    thresholds: Thresholds,
}

impl StrategyEngine {
    pub fn new(set: StrategySet, thresholds: Thresholds) -> Self {
        let mut strategies = TECH_STRATEGIES.to_vec();
        if set.includes_talent() {
            strategies.extend_from_slice(TALENT_STRATEGIES);
        }
        Self {
            strategies,
            thresholds,
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Evaluate every strategy in registry order and collect matched tags.
    pub fn evaluate(&self, repo: &RepositoryCandidate) -> Vec<Tag> {
        let text = repo.text();
        self.evaluate_text(repo, &text)
    }

    /// Same as [`evaluate`](Self::evaluate) with the lowercased text supplied
    /// by the caller.
    pub fn evaluate_text(&self, repo: &RepositoryCandidate, text: &str) -> Vec<Tag> {
        let subject = Subject {
            repo,
            text,
            thresholds: &self.thresholds,
        };
        self.strategies
            .iter()
            .filter_map(|s| s.evaluate(&subject))
            .collect()
    }
}
