//! Stage 7: compile verified truths.
//!
//! The hard double gate: an article becomes a [`VerifiedTruth`] only if
//! its verification status is verified or needs-review AND its
//! scientific verdict is infallible-truth or needs-more-research. An
//! article missing either record is excluded. This is a filter, not an
//! advisory check.

use std::collections::HashMap;

use crate::types::{
    generate_id, Article, ScientificValidation, Session, Verdict, Verification,
    VerificationStatus, VerifiedTruth,
};

/// Fixed method labels attached to every compiled truth.
const TRUTH_METHODS: [&str; 4] = [
    "Peer-reviewed validation",
    "Multi-source cross-reference",
    "Scientific method verification",
    "Data poison screening",
];

/// Compile the final truth records for a session.
pub fn compile_verified_truths(
    session: &Session,
    articles: &[Article],
    verifications: &[Verification],
    validations: &[ScientificValidation],
) -> Vec<VerifiedTruth> {
    let ver_by_target: HashMap<&str, &Verification> = verifications
        .iter()
        .map(|v| (v.target_id.as_str(), v))
        .collect();
    let val_by_target: HashMap<&str, &ScientificValidation> = validations
        .iter()
        .map(|v| (v.target_id.as_str(), v))
        .collect();

    let mut truths = Vec::new();
    for article in articles {
        let Some(verification) = ver_by_target.get(article.id.as_str()) else {
            continue;
        };
        let Some(validation) = val_by_target.get(article.id.as_str()) else {
            continue;
        };

        if !matches!(
            verification.overall_status,
            VerificationStatus::Verified | VerificationStatus::NeedsReview
        ) {
            continue;
        }
        if !matches!(
            validation.overall_verdict,
            Verdict::InfallibleTruth | Verdict::NeedsMoreResearch
        ) {
            continue;
        }

        truths.push(VerifiedTruth {
            id: generate_id("truth"),
            session_id: session.id.clone(),
            title: article.title.clone(),
            content: article.snippet.clone(),
            verification_path: [&article.id, &verification.id, &validation.id]
                .into_iter()
                .filter(|id| !id.is_empty())
                .cloned()
                .collect(),
            credibility_score: verification.credibility_score,
            scientific_verdict: validation.overall_verdict,
            sources: article.citations.clone(),
            methods: TRUTH_METHODS.iter().map(|m| m.to_string()).collect(),
            insights: validation.extracted_insights.clone(),
        });
    }
    truths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        now_iso, CredibilityLevel, SourceType, ValidationResult,
    };
    use pretty_assertions::assert_eq;

    fn article() -> Article {
        Article {
            id: generate_id("article"),
            topic_id: "topic_1".to_string(),
            title: "Sample Article".to_string(),
            source: "Sample Source".to_string(),
            url: "https://example.org".to_string(),
            snippet: "sample snippet".to_string(),
            source_type: SourceType::PeerReviewed,
            credibility: CredibilityLevel::Medium,
            citations: Vec::new(),
            retrieved_at: now_iso(),
            status: VerificationStatus::Pending,
        }
    }

    fn verification_with(target_id: &str, status: VerificationStatus) -> Verification {
        Verification {
            id: generate_id("ver"),
            target_id: target_id.to_string(),
            checks: Vec::new(),
            overall_status: status,
            credibility_score: 80,
            evidence: Vec::new(),
            flagged_issues: Vec::new(),
            verified_at: now_iso(),
        }
    }

    fn blank_result() -> ValidationResult {
        ValidationResult {
            score: 0,
            assessment: String::new(),
            evidence: Vec::new(),
            recommendation: String::new(),
        }
    }

    fn validation_with(target_id: &str, verdict: Verdict) -> ScientificValidation {
        ScientificValidation {
            id: generate_id("scival"),
            target_id: target_id.to_string(),
            logical_consistency: blank_result(),
            replicability: blank_result(),
            variable_measurement: blank_result(),
            scalability: blank_result(),
            perspective_analysis: blank_result(),
            poison_detection: blank_result(),
            overall_verdict: verdict,
            extracted_insights: vec!["insight".to_string()],
            validated_at: now_iso(),
        }
    }

    #[test]
    fn test_double_gate_membership_all_sixteen_combinations() {
        // Inclusion iff status in {verified, needs_review} and verdict
        // in {infallible_truth, needs_more_research}.
        let statuses = [
            VerificationStatus::Verified,
            VerificationStatus::NeedsReview,
            VerificationStatus::Rejected,
            VerificationStatus::FlaggedPoisoned,
        ];
        let verdicts = [
            Verdict::InfallibleTruth,
            Verdict::NeedsMoreResearch,
            Verdict::PoisonedData,
            Verdict::Rejected,
        ];
        let session = Session::new("request");
        for status in statuses {
            for verdict in verdicts {
                let art = article();
                let ver = verification_with(&art.id, status);
                let val = validation_with(&art.id, verdict);
                let truths = compile_verified_truths(
                    &session,
                    std::slice::from_ref(&art),
                    std::slice::from_ref(&ver),
                    std::slice::from_ref(&val),
                );
                let expected = matches!(
                    status,
                    VerificationStatus::Verified | VerificationStatus::NeedsReview
                ) && matches!(
                    verdict,
                    Verdict::InfallibleTruth | Verdict::NeedsMoreResearch
                );
                assert_eq!(
                    truths.len(),
                    usize::from(expected),
                    "status {:?}, verdict {:?}",
                    status,
                    verdict
                );
            }
        }
    }

    #[test]
    fn test_article_without_verification_excluded() {
        let session = Session::new("request");
        let art = article();
        let val = validation_with(&art.id, Verdict::InfallibleTruth);
        let truths =
            compile_verified_truths(&session, std::slice::from_ref(&art), &[], &[val]);
        assert!(truths.is_empty());
    }

    #[test]
    fn test_article_without_validation_excluded() {
        let session = Session::new("request");
        let art = article();
        let ver = verification_with(&art.id, VerificationStatus::Verified);
        let truths =
            compile_verified_truths(&session, std::slice::from_ref(&art), &[ver], &[]);
        assert!(truths.is_empty());
    }

    #[test]
    fn test_verification_path_id_chain() {
        let session = Session::new("request");
        let art = article();
        let ver = verification_with(&art.id, VerificationStatus::Verified);
        let val = validation_with(&art.id, Verdict::InfallibleTruth);
        let truths = compile_verified_truths(
            &session,
            std::slice::from_ref(&art),
            std::slice::from_ref(&ver),
            std::slice::from_ref(&val),
        );
        assert_eq!(truths.len(), 1);
        assert_eq!(
            truths[0].verification_path,
            vec![art.id.clone(), ver.id.clone(), val.id.clone()]
        );
    }

    #[test]
    fn test_truth_copies_score_verdict_and_insights() {
        let session = Session::new("request");
        let art = article();
        let ver = verification_with(&art.id, VerificationStatus::NeedsReview);
        let val = validation_with(&art.id, Verdict::NeedsMoreResearch);
        let truths = compile_verified_truths(
            &session,
            std::slice::from_ref(&art),
            std::slice::from_ref(&ver),
            std::slice::from_ref(&val),
        );
        assert_eq!(truths[0].credibility_score, 80);
        assert_eq!(truths[0].scientific_verdict, Verdict::NeedsMoreResearch);
        assert_eq!(truths[0].insights, vec!["insight".to_string()]);
        assert_eq!(truths[0].methods.len(), 4);
        assert_eq!(truths[0].session_id, session.id);
    }
}
