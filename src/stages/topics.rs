//! Stage 1: topic extraction - parse the user request into topics.
//!
//! Splits the request on sentence terminators and coordinating
//! conjunctions, discards short fragments, deduplicates by normalized
//! text, and derives decorative search-query strings. Pure function of
//! its input plus the id/clock source; no failure mode beyond the
//! single-topic fallback for inputs with no surviving fragment.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::types::{generate_id, now_iso, Topic, VerificationStatus};

// Sentence terminators and word-boundary conjunctions, case-insensitive.
static SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.;]+|\b(?i:and|or|also)\b").expect("split pattern is valid"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Minimum fragment length in characters; anything at or below this is
/// discarded.
const MIN_FRAGMENT_LEN: usize = 5;

/// Split a request into topics.
///
/// Fragments shorter than six characters are dropped; duplicates are
/// removed by case-insensitive, whitespace-collapsed comparison with
/// the first occurrence winning. If nothing survives, the whole trimmed
/// request (possibly empty) becomes a single fallback topic - never an
/// error.
pub fn extract_topics(session_id: &str, request: &str) -> Vec<Topic> {
    let cleaned = request.trim();

    let mut seen: Vec<String> = Vec::new();
    let mut topics: Vec<Topic> = Vec::new();

    for segment in SPLIT_RE.split(cleaned) {
        let fragment = segment.trim();
        if fragment.chars().count() <= MIN_FRAGMENT_LEN {
            continue;
        }
        let normalized = WHITESPACE_RE
            .replace_all(&fragment.to_lowercase(), " ")
            .into_owned();
        if seen.iter().any(|s| s == &normalized) {
            continue;
        }
        seen.push(normalized);
        topics.push(build_topic(
            session_id,
            fragment,
            format!("Research topic derived from: \"{}\"", fragment),
        ));
    }

    if topics.is_empty() {
        debug!(session_id, "no fragment survived extraction, falling back to full request");
        topics.push(build_topic(
            session_id,
            cleaned,
            "Research topic from full user request".to_string(),
        ));
    }

    topics
}

fn build_topic(session_id: &str, title: &str, description: String) -> Topic {
    Topic {
        id: generate_id("topic"),
        session_id: session_id.to_string(),
        title: title.to_string(),
        description,
        search_queries: build_search_queries(title),
        created_at: now_iso(),
        status: VerificationStatus::Pending,
    }
}

/// Derive the five fixed-pattern search-query strings for a fragment.
///
/// Decorative metadata only; never executed against a search backend.
pub fn build_search_queries(text: &str) -> Vec<String> {
    let base = PUNCTUATION_RE.replace_all(text, "").trim().to_string();
    vec![
        base.clone(),
        format!("{} peer reviewed research", base),
        format!("{} academic curriculum", base),
        format!("{} scientific method verified", base),
        format!("{} working prototype open source", base),
    ]
}
