//! Stage 4: scientific method validation.
//!
//! Six pure assessments over (article, verification result): logical
//! consistency, replicability, variable measurement, scalability,
//! perspective analysis, and the poison-detection safety gate. The
//! poison gate combines the verification's bias outcome with a
//! [`crate::shield`] scan of the article text. The overall verdict is
//! computed from the poison score and the mean of four of the six
//! dimensions; a poison score below 50 overrides everything else.
//!
//! Precondition: callers only invoke this for articles whose
//! verification status is verified or needs-review.

use crate::shield;
use crate::types::{
    generate_id, now_iso, Article, CheckType, ScientificValidation, SourceType, ValidationResult,
    Verdict, Verification,
};

/// Poison scores below this force a poisoned-data verdict.
const POISON_GATE: u8 = 50;

/// Text-scan risk at or above this marks the article poisoned.
const TEXT_RISK_GATE: u8 = 50;

/// Mean-score floor for an infallible-truth verdict.
const TRUTH_FLOOR: f64 = 75.0;

/// Mean-score floor for a needs-more-research verdict.
const RESEARCH_FLOOR: f64 = 50.0;

/// Apply the six assessments and compute the overall verdict.
/// Deterministic and total.
pub fn apply_scientific_method(
    article: &Article,
    verification: &Verification,
) -> ScientificValidation {
    let logical = assess_logical(article, verification);
    let replicability = assess_replicability(article);
    let variables = assess_variables(article);
    let scalability = assess_scalability(article);
    let perspective = assess_perspective(article);
    let poison = assess_poison(article, verification);

    // The verdict mean deliberately excludes scalability and
    // perspective; those two only contribute insights.
    let mean = f64::from(
        u32::from(logical.score)
            + u32::from(replicability.score)
            + u32::from(variables.score)
            + u32::from(poison.score),
    ) / 4.0;

    let verdict = if poison.score < POISON_GATE {
        Verdict::PoisonedData
    } else if mean >= TRUTH_FLOOR {
        Verdict::InfallibleTruth
    } else if mean >= RESEARCH_FLOOR {
        Verdict::NeedsMoreResearch
    } else {
        Verdict::Rejected
    };

    let mut insights = Vec::new();
    if scalability.score >= 70 {
        insights.push(format!("High scalability: {}", scalability.recommendation));
    }
    if perspective.score >= 70 {
        insights.push(format!(
            "Multi-perspective value: {}",
            perspective.recommendation
        ));
    }

    ScientificValidation {
        id: generate_id("scival"),
        target_id: article.id.clone(),
        logical_consistency: logical,
        replicability,
        variable_measurement: variables,
        scalability,
        perspective_analysis: perspective,
        poison_detection: poison,
        overall_verdict: verdict,
        extracted_insights: insights,
        validated_at: now_iso(),
    }
}

fn assess_logical(article: &Article, verification: &Verification) -> ValidationResult {
    let bonus = if article.source_type == SourceType::PeerReviewed {
        10
    } else {
        0
    };
    let score = (u32::from(verification.credibility_score) + bonus).min(100) as u8;
    ValidationResult {
        score,
        assessment: if score >= 75 {
            "Logically consistent".to_string()
        } else {
            "Some logical gaps".to_string()
        },
        evidence: verification.evidence.iter().take(3).cloned().collect(),
        recommendation: if score >= 75 {
            "Proceed with confidence".to_string()
        } else {
            "Seek corroboration".to_string()
        },
    }
}

fn assess_replicability(article: &Article) -> ValidationResult {
    let ok = matches!(
        article.source_type,
        SourceType::PeerReviewed | SourceType::WorkingCode
    );
    ValidationResult {
        score: if ok { 88 } else { 45 },
        assessment: if ok {
            "Independently replicable".to_string()
        } else {
            "Replication unclear".to_string()
        },
        evidence: vec![if ok {
            "Documented methodology".to_string()
        } else {
            "Partial documentation".to_string()
        }],
        recommendation: if ok {
            "Fully replicable".to_string()
        } else {
            "Document replication steps".to_string()
        },
    }
}

fn assess_variables(article: &Article) -> ValidationResult {
    let score = match article.source_type {
        SourceType::WorkingCode => 85,
        SourceType::PeerReviewed => 80,
        _ => 50,
    };
    ValidationResult {
        score,
        assessment: if score >= 75 {
            "Variables properly measured".to_string()
        } else {
            "Needs rigor".to_string()
        },
        evidence: vec![if score >= 75 {
            "Quantitative measurements".to_string()
        } else {
            "Needs clarification".to_string()
        }],
        recommendation: if score >= 75 {
            "Examine edge cases".to_string()
        } else {
            "Improve methodology".to_string()
        },
    }
}

fn assess_scalability(article: &Article) -> ValidationResult {
    let score = match article.source_type {
        SourceType::WorkingCode => 80,
        SourceType::PeerReviewed => 70,
        _ => 50,
    };
    ValidationResult {
        score,
        assessment: if score >= 70 {
            "Scalable".to_string()
        } else {
            "Localized only".to_string()
        },
        evidence: vec![if score >= 70 {
            "Growth metrics available".to_string()
        } else {
            "Limited evidence".to_string()
        }],
        recommendation: if score >= 70 {
            "Design scaling strategy".to_string()
        } else {
            "Test scalability".to_string()
        },
    }
}

fn assess_perspective(article: &Article) -> ValidationResult {
    let ok = matches!(
        article.source_type,
        SourceType::PeerReviewed | SourceType::Curriculum
    );
    ValidationResult {
        score: if ok { 78 } else { 55 },
        assessment: if ok {
            "Multiple perspectives".to_string()
        } else {
            "Single discipline".to_string()
        },
        evidence: vec![if ok {
            "Cross-disciplinary".to_string()
        } else {
            "Single perspective".to_string()
        }],
        recommendation: if ok {
            "Apply across fields".to_string()
        } else {
            "Seek adjacent input".to_string()
        },
    }
}

/// The critical safety gate: poisoned when the bias check failed, the
/// credibility score fell below 40, or the article text itself trips
/// the poison-shield scanner.
fn assess_poison(article: &Article, verification: &Verification) -> ValidationResult {
    let bias_failed = verification
        .checks
        .iter()
        .any(|c| c.check_type == CheckType::BiasDetection && !c.passed);
    let scan_hits = shield::scan_for_poison(&article.snippet);
    let text_risk = shield::calculate_poison_risk(&scan_hits);
    let poisoned =
        bias_failed || verification.credibility_score < 40 || text_risk >= TEXT_RISK_GATE;
    ValidationResult {
        score: if poisoned { 20 } else { 90 },
        assessment: if poisoned {
            "POISON DETECTED".to_string()
        } else {
            "Clean".to_string()
        },
        evidence: if poisoned {
            let mut evidence = verification.flagged_issues.clone();
            evidence.extend(
                scan_hits
                    .iter()
                    .map(|hit| format!("{}: \"{}\"", hit.description, hit.match_text)),
            );
            evidence
        } else {
            vec!["No issues".to_string()]
        },
        recommendation: if poisoned {
            "REJECT".to_string()
        } else {
            "Safe for downstream use".to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::verification::verify_article;
    use crate::types::{CredibilityLevel, VerificationStatus};
    use pretty_assertions::assert_eq;

    fn article_of(source_type: SourceType) -> Article {
        Article {
            id: generate_id("article"),
            topic_id: "topic_1".to_string(),
            title: "Sample".to_string(),
            source: "Sample Source".to_string(),
            url: "https://example.org/sample".to_string(),
            snippet: "snippet".to_string(),
            source_type,
            credibility: CredibilityLevel::Medium,
            citations: Vec::new(),
            retrieved_at: now_iso(),
            status: VerificationStatus::Pending,
        }
    }

    fn validate(source_type: SourceType) -> ScientificValidation {
        let article = article_of(source_type);
        let verification = verify_article(&article);
        apply_scientific_method(&article, &verification)
    }

    #[test]
    fn test_peer_reviewed_reaches_infallible_truth() {
        let val = validate(SourceType::PeerReviewed);
        // Credibility 87 + 10 peer-review bonus, capped at 100.
        assert_eq!(val.logical_consistency.score, 97);
        assert_eq!(val.replicability.score, 88);
        assert_eq!(val.variable_measurement.score, 80);
        assert_eq!(val.scalability.score, 70);
        assert_eq!(val.perspective_analysis.score, 78);
        assert_eq!(val.poison_detection.score, 90);
        assert_eq!(val.overall_verdict, Verdict::InfallibleTruth);
    }

    #[test]
    fn test_curriculum_needs_more_research() {
        let val = validate(SourceType::Curriculum);
        assert_eq!(val.logical_consistency.score, 74);
        assert_eq!(val.replicability.score, 45);
        assert_eq!(val.variable_measurement.score, 50);
        assert_eq!(val.poison_detection.score, 90);
        // Mean (74+45+50+90)/4 = 64.75.
        assert_eq!(val.overall_verdict, Verdict::NeedsMoreResearch);
    }

    #[test]
    fn test_poison_gate_overrides_high_scores() {
        // A high-scoring verification whose bias check failed must come
        // out poisoned regardless of the other dimensions.
        let article = article_of(SourceType::PeerReviewed);
        let mut verification = verify_article(&article);
        verification.credibility_score = 95;
        if let Some(bias) = verification
            .checks
            .iter_mut()
            .find(|c| c.check_type == CheckType::BiasDetection)
        {
            bias.passed = false;
        }
        let val = apply_scientific_method(&article, &verification);
        assert_eq!(val.poison_detection.score, 20);
        assert_eq!(val.overall_verdict, Verdict::PoisonedData);
    }

    #[test]
    fn test_manipulative_text_trips_scan_gate() {
        // Indicator hits: "100% effective" (high, 30) plus "guaranteed"
        // and "always" (medium, 15 each) put the text risk at 60.
        let mut article = article_of(SourceType::PeerReviewed);
        article.snippet =
            "This treatment is 100% effective and guaranteed to always work.".to_string();
        let verification = verify_article(&article);
        let val = apply_scientific_method(&article, &verification);
        assert_eq!(val.poison_detection.score, 20);
        assert_eq!(val.overall_verdict, Verdict::PoisonedData);
        assert!(val
            .poison_detection
            .evidence
            .iter()
            .any(|e| e.contains("100% effective")));
    }

    #[test]
    fn test_mild_text_stays_below_scan_gate() {
        // "everyone knows" alone is a low-severity hit (risk 5).
        let mut article = article_of(SourceType::PeerReviewed);
        article.snippet = "everyone knows this area is well studied".to_string();
        let verification = verify_article(&article);
        let val = apply_scientific_method(&article, &verification);
        assert_eq!(val.poison_detection.score, 90);
        assert_eq!(val.overall_verdict, Verdict::InfallibleTruth);
    }

    #[test]
    fn test_low_credibility_triggers_poison_gate() {
        let article = article_of(SourceType::ReputableOrg);
        let mut verification = verify_article(&article);
        verification.credibility_score = 39;
        let val = apply_scientific_method(&article, &verification);
        assert_eq!(val.poison_detection.score, 20);
        assert_eq!(val.overall_verdict, Verdict::PoisonedData);
    }

    #[test]
    fn test_insights_appended_conditionally() {
        let val = validate(SourceType::PeerReviewed);
        // Scalability 70 and perspective 78 both clear the floor.
        assert_eq!(val.extracted_insights.len(), 2);
        assert!(val.extracted_insights[0].starts_with("High scalability:"));
        assert!(val.extracted_insights[1].starts_with("Multi-perspective value:"));

        let val = validate(SourceType::ReputableOrg);
        // Scalability 50 and perspective 55: no insights.
        assert!(val.extracted_insights.is_empty());
    }

    #[test]
    fn test_working_code_insight_from_scalability_only() {
        let val = validate(SourceType::WorkingCode);
        assert_eq!(val.scalability.score, 80);
        assert_eq!(val.perspective_analysis.score, 55);
        assert_eq!(val.extracted_insights.len(), 1);
        assert!(val.extracted_insights[0].starts_with("High scalability:"));
    }

    #[test]
    fn test_logical_evidence_limited_to_three() {
        let val = validate(SourceType::PeerReviewed);
        assert!(val.logical_consistency.evidence.len() <= 3);
    }

    #[test]
    fn test_validation_targets_article() {
        let article = article_of(SourceType::Curriculum);
        let verification = verify_article(&article);
        let val = apply_scientific_method(&article, &verification);
        assert_eq!(val.target_id, article.id);
    }

    #[test]
    fn test_validation_deterministic() {
        let article = article_of(SourceType::Curriculum);
        let verification = verify_article(&article);
        let a = apply_scientific_method(&article, &verification);
        let b = apply_scientific_method(&article, &verification);
        assert_eq!(a.overall_verdict, b.overall_verdict);
        assert_eq!(a.logical_consistency.score, b.logical_consistency.score);
        assert_eq!(a.extracted_insights, b.extracted_insights);
    }
}
