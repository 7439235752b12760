//! GitHub REST collaborators: repository search and commit-based contents
//! writes. Both are blocking and carry no retry; failures map to
//! `Error::Fetch` / `Error::Persist` and propagate to the caller.

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};

use sentinel_core::{ArtifactPersist, Error, RepositoryCandidate, RepositorySearch, SearchQuery};

const TIMEOUT: Duration = Duration::from_secs(30);
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("sentinel/", env!("CARGO_PKG_VERSION"));

// ── Config ──

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitHubConfig {
    pub api_base: String,
    /// Owner of the repository snapshots are committed to.
    pub owner: Option<String>,
    pub repo: Option<String>,
    /// Target branch; the repository default when unset.
    pub branch: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: None,
            repo: None,
            branch: None,
        }
    }
}

// ── Client ──

pub struct GitHubClient {
    agent: ureq::Agent,
    token: Option<String>,
    config: GitHubConfig,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig, token: Option<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(TIMEOUT))
            .build()
            .new_agent();
        Self {
            agent,
            token: token.filter(|t| !t.is_empty()),
            config,
        }
    }

    fn auth(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn target(&self) -> Option<(&str, &str)> {
        Some((self.config.owner.as_deref()?, self.config.repo.as_deref()?))
    }

    /// Blob sha of an existing file, `None` when the path is new.
    fn existing_sha(&self, url: &str) -> Result<Option<String>, ureq::Error> {
        let mut req = self
            .agent
            .get(url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT);
        if let Some(auth) = self.auth() {
            req = req.header("Authorization", &auth);
        }
        if let Some(branch) = &self.config.branch {
            req = req.query("ref", branch);
        }
        match req.call() {
            Ok(mut resp) => {
                let body = resp.body_mut().read_to_string()?;
                Ok(parse_sha(&body))
            }
            Err(ureq::Error::StatusCode(404)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl RepositorySearch for GitHubClient {
    fn search(&self, query: &SearchQuery) -> sentinel_core::Result<Vec<RepositoryCandidate>> {
        let url = format!("{}/search/repositories", self.config.api_base.trim_end_matches('/'));
        let mut req = self
            .agent
            .get(&url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .query("q", &query.q)
            .query("sort", &query.sort)
            .query("order", &query.order)
            .query("per_page", query.per_page.to_string());
        if let Some(auth) = self.auth() {
            req = req.header("Authorization", &auth);
        }

        tracing::info!(q = %query.q, "searching repositories");
        let mut resp = req.call().map_err(|e| Error::Fetch(e.to_string()))?;
        let body = resp
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let items = parse_search_response(&body)?;
        tracing::info!(count = items.len(), "search returned");
        Ok(items)
    }
}

impl ArtifactPersist for GitHubClient {
    fn persist(&self, path: &str, bytes: &[u8], message: &str) -> sentinel_core::Result<()> {
        let (owner, repo) = self
            .target()
            .ok_or_else(|| Error::persist(path, "target repository owner/name not configured"))?;
        let url = contents_url(&self.config.api_base, owner, repo, path);

        let sha = self
            .existing_sha(&url)
            .map_err(|e| Error::persist(path, e))?;
        let body = contents_body(message, bytes, sha.as_deref(), self.config.branch.as_deref());

        let mut req = self
            .agent
            .put(&url)
            .header("Accept", ACCEPT)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json");
        if let Some(auth) = self.auth() {
            req = req.header("Authorization", &auth);
        }
        req.send(body.to_string())
            .map_err(|e| Error::persist(path, e))?;
        tracing::info!(%path, %owner, %repo, "artifact committed");
        Ok(())
    }
}

// ── Wire helpers ──

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepositoryCandidate>,
}

/// Decode a `/search/repositories` response body.
pub fn parse_search_response(body: &str) -> sentinel_core::Result<Vec<RepositoryCandidate>> {
    let resp: SearchResponse =
        serde_json::from_str(body).map_err(|e| Error::Fetch(format!("bad search response: {e}")))?;
    Ok(resp.items)
}

pub fn contents_url(api_base: &str, owner: &str, repo: &str, path: &str) -> String {
    format!(
        "{}/repos/{owner}/{repo}/contents/{}",
        api_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// JSON body for `PUT /repos/{owner}/{repo}/contents/{path}`.
pub fn contents_body(
    message: &str,
    bytes: &[u8],
    sha: Option<&str>,
    branch: Option<&str>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "message": message,
        "content": base64::engine::general_purpose::STANDARD.encode(bytes),
    });
    if let Some(sha) = sha {
        body["sha"] = serde_json::Value::String(sha.to_string());
    }
    if let Some(branch) = branch {
        body["branch"] = serde_json::Value::String(branch.to_string());
    }
    body
}

fn parse_sha(body: &str) -> Option<String> {
    let val: serde_json::Value = serde_json::from_str(body).ok()?;
    val.get("sha")?.as_str().map(str::to_string)
}
