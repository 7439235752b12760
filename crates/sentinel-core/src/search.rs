use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::error::Result;
use crate::types::RepositoryCandidate;

/// Tunables for the recent-repositories query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub min_stars: u64,
    pub lookback_hours: u32,
    pub page_size: u32,
    pub sort: String,
    pub order: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_stars: 50,
            lookback_hours: 24,
            page_size: 50,
            sort: "stars".to_string(),
            order: "desc".to_string(),
        }
    }
}

/// One search request against the repository index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub q: String,
    pub sort: String,
    pub order: String,
    pub per_page: u32,
}

impl SearchQuery {
    /// Repositories above the star floor created within the lookback window:
    /// `stars:>N created:>=YYYY-MM-DD`.
    pub fn recent(now: OffsetDateTime, config: &SearchConfig) -> Self {
        let since = now - Duration::hours(i64::from(config.lookback_hours));
        let date = since
            .date()
            .format(format_description!("[year]-[month]-[day]"))
            .expect("calendar date formatting should not fail");
        Self {
            q: format!("stars:>{} created:>={date}", config.min_stars),
            sort: config.sort.clone(),
            order: config.order.clone(),
            per_page: config.page_size,
        }
    }
}

/// Source of repository candidates. Implementations map every transport,
/// status, or decoding failure to [`crate::Error::Fetch`].
pub trait RepositorySearch {
    fn search(&self, query: &SearchQuery) -> Result<Vec<RepositoryCandidate>>;
}
