//! Stage 2: article synthesis - expand topics into synthetic sources.
//!
//! For every topic, exactly four articles are emitted, one per source
//! type in the fixed [`SourceType::ALL`] order. The [`SourceMeta`]
//! lookup is the single source of truth for per-source-type labels,
//! organization names, URLs, and snippets; nothing else duplicates it.
//! URLs are deterministically constructed search links, never fetched.

use crate::types::{
    generate_id, now_iso, Article, Citation, CredibilityLevel, SourceType, Topic,
    VerificationStatus,
};

/// Base year for citation dating; each source type is offset backwards
/// by its position in the fixed synthesis order.
const CITATION_BASE_YEAR: i32 = 2024;

/// Static per-source-type metadata record.
pub struct SourceMeta {
    /// Display label, rendered into article titles.
    pub label: &'static str,
    /// Organization name used as the article source.
    pub name: &'static str,
    /// Search URL builder for a topic title.
    pub url: fn(&str) -> String,
    /// Snippet builder for a topic title.
    pub snippet: fn(&str) -> String,
}

static PEER_REVIEWED_META: SourceMeta = SourceMeta {
    label: "Peer-Reviewed",
    name: "IEEE Xplore / PubMed",
    url: |t| {
        format!(
            "https://scholar.google.com/scholar?q={}",
            urlencoding::encode(t)
        )
    },
    snippet: |t| {
        format!(
            "Peer-reviewed analysis of \"{}\" demonstrating reproducible results \
             across multiple independent studies with rigorous methodology.",
            t
        )
    },
};

static CURRICULUM_META: SourceMeta = SourceMeta {
    label: "Curriculum",
    name: "MIT OpenCourseWare / Stanford Online",
    url: |t| format!("https://ocw.mit.edu/search/?q={}", urlencoding::encode(t)),
    snippet: |_| {
        "This topic is covered in accredited university curricula, forming \
         part of foundational knowledge with verified pedagogical methods."
            .to_string()
    },
};

static WORKING_CODE_META: SourceMeta = SourceMeta {
    label: "Open Source Code",
    name: "GitHub / ArXiv Code Repositories",
    url: |t| format!("https://github.com/search?q={}", urlencoding::encode(t)),
    snippet: |_| {
        "Open-source implementation with verified test coverage, CI, and \
         transparent development history available for public audit."
            .to_string()
    },
};

static REPUTABLE_ORG_META: SourceMeta = SourceMeta {
    label: "Organization Report",
    name: "ACM / IEEE / W3C",
    url: |t| {
        format!(
            "https://dl.acm.org/action/doSearch?query={}",
            urlencoding::encode(t)
        )
    },
    snippet: |_| {
        "Report from recognized professional organization with established \
         credibility, following industry-standard reporting procedures."
            .to_string()
    },
};

static UNKNOWN_META: SourceMeta = SourceMeta {
    label: "Unknown",
    name: "Unknown Source",
    url: |t| {
        let slug: String = t
            .chars()
            .take(30)
            .collect::<String>()
            .to_lowercase()
            .replace(' ', "-");
        format!("https://search.crossref.org/?q={}", slug)
    },
    snippet: |_| "Source requires additional verification.".to_string(),
};

impl SourceType {
    /// Look up the metadata record for this source type.
    pub fn meta(self) -> &'static SourceMeta {
        match self {
            SourceType::PeerReviewed => &PEER_REVIEWED_META,
            SourceType::Curriculum => &CURRICULUM_META,
            SourceType::WorkingCode => &WORKING_CODE_META,
            SourceType::ReputableOrg => &REPUTABLE_ORG_META,
            SourceType::Unknown => &UNKNOWN_META,
        }
    }
}

/// Emit exactly four articles per topic, one per source type in fixed
/// order. Every article starts at medium credibility, pending status,
/// with one citation built from the same metadata and a year offset by
/// the source type's position.
pub fn synthesize_articles(topics: &[Topic]) -> Vec<Article> {
    let mut articles = Vec::with_capacity(topics.len() * SourceType::ALL.len());
    for topic in topics {
        for (idx, source_type) in SourceType::ALL.into_iter().enumerate() {
            articles.push(synthesize_article(topic, source_type, idx));
        }
    }
    articles
}

fn synthesize_article(topic: &Topic, source_type: SourceType, idx: usize) -> Article {
    let meta = source_type.meta();
    let url = (meta.url)(&topic.title);
    Article {
        id: generate_id("article"),
        topic_id: topic.id.clone(),
        title: format!("{} - {} Analysis", topic.title, meta.label),
        source: meta.name.to_string(),
        url: url.clone(),
        snippet: (meta.snippet)(&topic.title),
        source_type,
        credibility: CredibilityLevel::Medium,
        citations: vec![Citation {
            id: generate_id("cit"),
            text: format!("Research findings on {} ({})", topic.title, source_type),
            authors: vec!["Research Team".to_string()],
            publication: meta.name.to_string(),
            year: CITATION_BASE_YEAR - idx as i32,
            doi: None,
            url: Some(url),
        }],
        retrieved_at: now_iso(),
        status: VerificationStatus::Pending,
    }
}
