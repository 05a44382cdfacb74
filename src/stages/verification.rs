//! Stage 3: verification - data-driven multi-check credibility scoring.
//!
//! Six fixed [`CheckRule`]s are applied to every article in declaration
//! order. Each rule has a weight, a pass predicate over the article's
//! source type, fixed pass/fail confidence constants, and templated
//! detail text. The credibility score is the weighted mean of the check
//! confidences; the overall status decision is a fixed priority chain.
//! Same article in, same verification out.

use crate::types::{
    generate_id, now_iso, Article, CheckType, SourceType, Verification, VerificationCheck,
    VerificationStatus,
};

/// Minimum score and passed-check count for a VERIFIED decision.
const VERIFIED_SCORE: u8 = 75;
const VERIFIED_PASSED: usize = 4;

/// Minimum score and passed-check count for a NEEDS_REVIEW decision.
const REVIEW_SCORE: u8 = 50;
const REVIEW_PASSED: usize = 3;

/// One data-driven verification rule.
pub struct CheckRule {
    /// Which check this rule produces.
    pub check_type: CheckType,
    /// Weight in the credibility score.
    pub weight: f64,
    /// Rule description.
    pub description: &'static str,
    /// Pass predicate over the article's source type only.
    pub passes: fn(SourceType) -> bool,
    /// Confidence when the check passes.
    pub pass_confidence: u8,
    /// Confidence when the check fails.
    pub fail_confidence: u8,
    /// Detail text when the check passes.
    pub pass_detail: fn(&Article) -> String,
    /// Detail text when the check fails.
    pub fail_detail: fn(&Article) -> String,
}

/// The six fixed rules, in application order.
pub static CHECK_RULES: [CheckRule; 6] = [
    CheckRule {
        check_type: CheckType::WebSearch,
        weight: 1.0,
        description: "Validate claims through web search engines",
        passes: |t| {
            matches!(
                t,
                SourceType::PeerReviewed | SourceType::ReputableOrg | SourceType::Curriculum
            )
        },
        pass_confidence: 82,
        fail_confidence: 35,
        pass_detail: |a| format!("Web search confirms findings from {}", a.source),
        fail_detail: |a| format!("Limited corroboration for claims from {}", a.source),
    },
    CheckRule {
        check_type: CheckType::CurriculumMatch,
        weight: 1.2,
        description: "Check alignment with accredited curricula",
        passes: |t| matches!(t, SourceType::Curriculum | SourceType::PeerReviewed),
        pass_confidence: 90,
        fail_confidence: 40,
        pass_detail: |_| "Content aligns with university-level curricula".to_string(),
        fail_detail: |_| "No direct curriculum match found".to_string(),
    },
    CheckRule {
        check_type: CheckType::PeerReview,
        weight: 1.5,
        description: "Verify peer-review status in indexed journals",
        passes: |t| matches!(t, SourceType::PeerReviewed),
        pass_confidence: 95,
        fail_confidence: 30,
        pass_detail: |_| "Published in indexed, peer-reviewed journal".to_string(),
        fail_detail: |_| "Not found in peer-reviewed journals".to_string(),
    },
    CheckRule {
        check_type: CheckType::SourceReputation,
        weight: 1.0,
        description: "Evaluate source credibility",
        passes: |t| !matches!(t, SourceType::Unknown),
        pass_confidence: 85,
        fail_confidence: 25,
        pass_detail: |a| format!("Source \"{}\" has established credibility", a.source),
        fail_detail: |_| "Source credibility could not be established".to_string(),
    },
    CheckRule {
        check_type: CheckType::CrossReference,
        weight: 1.5,
        description: "Cross-reference with independent sources",
        passes: |t| matches!(t, SourceType::PeerReviewed | SourceType::Curriculum),
        pass_confidence: 88,
        fail_confidence: 45,
        pass_detail: |_| "Claims confirmed by multiple independent sources".to_string(),
        fail_detail: |_| "Single-source claim; cross-referencing recommended".to_string(),
    },
    CheckRule {
        check_type: CheckType::BiasDetection,
        weight: 1.3,
        description: "Screen for bias markers",
        passes: |t| !matches!(t, SourceType::Unknown),
        pass_confidence: 80,
        fail_confidence: 20,
        pass_detail: |_| "No significant bias markers detected".to_string(),
        fail_detail: |_| "Potential bias detected in source".to_string(),
    },
];

/// Run the six fixed checks against an article and decide its overall
/// verification status. Deterministic, pure, total.
pub fn verify_article(article: &Article) -> Verification {
    let checks = run_checks(article);
    let score = score_checks(&checks);
    let overall = overall_status(score, &checks);

    Verification {
        id: generate_id("ver"),
        target_id: article.id.clone(),
        overall_status: overall,
        credibility_score: score,
        evidence: checks
            .iter()
            .filter(|c| c.passed)
            .map(|c| c.details.clone())
            .collect(),
        flagged_issues: checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| format!("{}: {}", c.check_type, c.details))
            .collect(),
        checks,
        verified_at: now_iso(),
    }
}

/// Apply every rule to the article, in rule order.
fn run_checks(article: &Article) -> Vec<VerificationCheck> {
    CHECK_RULES
        .iter()
        .map(|rule| build_check(rule, (rule.passes)(article.source_type), article))
        .collect()
}

/// Build one check result with the rule's fixed confidences and details.
pub(crate) fn build_check(rule: &CheckRule, passed: bool, article: &Article) -> VerificationCheck {
    VerificationCheck {
        id: generate_id("chk"),
        check_type: rule.check_type,
        description: rule.description.to_string(),
        passed,
        confidence: if passed {
            rule.pass_confidence
        } else {
            rule.fail_confidence
        },
        details: if passed {
            (rule.pass_detail)(article)
        } else {
            (rule.fail_detail)(article)
        },
        sources: if passed {
            vec![article.url.clone()]
        } else {
            Vec::new()
        },
    }
}

/// Weighted mean of check confidences, rounded to the nearest integer.
///
/// Checks are expected in rule order; the weight for each comes from
/// the rule at the same index.
pub(crate) fn score_checks(checks: &[VerificationCheck]) -> u8 {
    let weighted_sum: f64 = checks
        .iter()
        .zip(CHECK_RULES.iter())
        .map(|(check, rule)| f64::from(check.confidence) * rule.weight)
        .sum();
    let weight_total: f64 = CHECK_RULES.iter().map(|r| r.weight).sum();
    if weight_total > 0.0 {
        (weighted_sum / weight_total).round() as u8
    } else {
        0
    }
}

/// The fixed-priority status decision.
pub(crate) fn overall_status(score: u8, checks: &[VerificationCheck]) -> VerificationStatus {
    let passed_count = checks.iter().filter(|c| c.passed).count();
    let bias_failed = checks
        .iter()
        .any(|c| c.check_type == CheckType::BiasDetection && !c.passed);

    if score >= VERIFIED_SCORE && passed_count >= VERIFIED_PASSED {
        VerificationStatus::Verified
    } else if score >= REVIEW_SCORE && passed_count >= REVIEW_PASSED {
        VerificationStatus::NeedsReview
    } else if bias_failed {
        VerificationStatus::FlaggedPoisoned
    } else {
        VerificationStatus::Rejected
    }
}
