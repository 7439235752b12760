use crate::types::RepositoryCandidate;

/// Substrings marking curated lists, tutorials, and career aggregations.
pub const NOISE_MARKERS: &[&str] = &[
    "awesome",
    "curated",
    "list of",
    "tutorial",
    "roadmap",
    "interview",
    "leetcode",
    "cheatsheet",
    "cheat sheet",
    "course",
    "bootcamp",
];

/// True when the candidate's lowercased name + description contains any
/// noise marker.
pub fn is_noise(candidate: &RepositoryCandidate) -> bool {
    is_noise_text(&candidate.text())
}

/// Marker check over already-lowercased text.
pub fn is_noise_text(text: &str) -> bool {
    NOISE_MARKERS.iter().any(|m| text.contains(m))
}
