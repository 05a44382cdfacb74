//! Stage 5: idea generation from verified articles only.
//!
//! One idea per verified article, plus parallel novel-procedure,
//! method-extension, and cross-domain lists of the same cardinality.
//! The orchestrator skips this stage entirely (together with the
//! consensus round) when the verified set is empty; that skip is a
//! documented early exit, not an error.

use crate::types::{
    generate_id, now_iso, Article, BrainstormIdea, BrainstormResult, SourceType,
    VerificationStatus,
};

/// Feasibility for ideas backed by working code.
const CODE_FEASIBILITY: u8 = 85;
/// Feasibility for ideas backed by any other verified source.
const DEFAULT_FEASIBILITY: u8 = 70;
/// Innovation score; constant across all ideas.
const INNOVATION_SCORE: u8 = 75;

const METHODOLOGY: &str =
    "1. Verify base\n2. Identify extensions\n3. Cross-domain\n4. Test\n5. Document";

/// Generate ideas from the verified articles.
///
/// Callers pass only articles with verified status; the generated
/// lists are parallel, one entry per article.
pub fn brainstorm(session_id: &str, verified_articles: &[&Article]) -> BrainstormResult {
    let mut ideas = Vec::with_capacity(verified_articles.len());
    let mut novel = Vec::with_capacity(verified_articles.len());
    let mut extensions = Vec::with_capacity(verified_articles.len());
    let mut cross_domain = Vec::with_capacity(verified_articles.len());

    for article in verified_articles {
        ideas.push(BrainstormIdea {
            id: generate_id("idea"),
            title: format!("Innovation from {}", article.title),
            description: format!("Build upon verified research from {}", article.source),
            methodology: METHODOLOGY.to_string(),
            feasibility_score: if article.source_type == SourceType::WorkingCode {
                CODE_FEASIBILITY
            } else {
                DEFAULT_FEASIBILITY
            },
            innovation_score: INNOVATION_SCORE,
            evidence_basis: article.citations.iter().map(|c| c.text.clone()).collect(),
            status: VerificationStatus::Pending,
        });
        novel.push(format!(
            "Extend {} using verified methodology from {}",
            article.title, article.source
        ));
        extensions.push(format!(
            "Apply {} validation to adjacent areas",
            article.source_type
        ));
        cross_domain.push("Transfer verified findings to related fields".to_string());
    }

    BrainstormResult {
        id: generate_id("brn"),
        session_id: session_id.to_string(),
        base_truth_id: verified_articles
            .first()
            .map(|a| a.id.clone())
            .unwrap_or_default(),
        ideas,
        novel_procedures: novel,
        method_extensions: extensions,
        cross_domain_applications: cross_domain,
        created_at: now_iso(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Citation, CredibilityLevel};
    use pretty_assertions::assert_eq;

    fn verified_article(source_type: SourceType, title: &str) -> Article {
        Article {
            id: generate_id("article"),
            topic_id: "topic_1".to_string(),
            title: title.to_string(),
            source: "Sample Source".to_string(),
            url: "https://example.org".to_string(),
            snippet: "snippet".to_string(),
            source_type,
            credibility: CredibilityLevel::High,
            citations: vec![Citation {
                id: generate_id("cit"),
                text: format!("Citation for {}", title),
                authors: vec!["Research Team".to_string()],
                publication: "Sample Source".to_string(),
                year: 2024,
                doi: None,
                url: None,
            }],
            retrieved_at: now_iso(),
            status: VerificationStatus::Verified,
        }
    }

    #[test]
    fn test_one_idea_per_verified_article() {
        let a = verified_article(SourceType::PeerReviewed, "Paper A");
        let b = verified_article(SourceType::WorkingCode, "Repo B");
        let result = brainstorm("session_1", &[&a, &b]);
        assert_eq!(result.ideas.len(), 2);
        assert_eq!(result.novel_procedures.len(), 2);
        assert_eq!(result.method_extensions.len(), 2);
        assert_eq!(result.cross_domain_applications.len(), 2);
    }

    #[test]
    fn test_feasibility_by_source_type() {
        let a = verified_article(SourceType::PeerReviewed, "Paper A");
        let b = verified_article(SourceType::WorkingCode, "Repo B");
        let result = brainstorm("session_1", &[&a, &b]);
        assert_eq!(result.ideas[0].feasibility_score, 70);
        assert_eq!(result.ideas[1].feasibility_score, 85);
        assert!(result.ideas.iter().all(|i| i.innovation_score == 75));
    }

    #[test]
    fn test_evidence_basis_copied_from_citations() {
        let a = verified_article(SourceType::PeerReviewed, "Paper A");
        let result = brainstorm("session_1", &[&a]);
        assert_eq!(
            result.ideas[0].evidence_basis,
            vec!["Citation for Paper A".to_string()]
        );
    }

    #[test]
    fn test_base_truth_is_first_article() {
        let a = verified_article(SourceType::PeerReviewed, "Paper A");
        let b = verified_article(SourceType::WorkingCode, "Repo B");
        let result = brainstorm("session_1", &[&a, &b]);
        assert_eq!(result.base_truth_id, a.id);
    }

    #[test]
    fn test_empty_input_yields_empty_result() {
        let result = brainstorm("session_1", &[]);
        assert!(result.ideas.is_empty());
        assert_eq!(result.base_truth_id, "");
    }

    #[test]
    fn test_method_extension_names_source_type() {
        let a = verified_article(SourceType::WorkingCode, "Repo B");
        let result = brainstorm("session_1", &[&a]);
        assert_eq!(
            result.method_extensions[0],
            "Apply working_code validation to adjacent areas"
        );
    }
}
