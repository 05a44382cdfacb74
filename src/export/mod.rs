//! Session export - document projection and plain-text rendering.
//!
//! [`generate_export_document`] projects a [`Session`] into an ordered
//! list of sections; [`render_export_to_text`] renders that document
//! deterministically. Both are pure and callable independently of
//! pipeline execution, e.g. to re-export a previously computed session.
//! The only timestamp in the output is the document's `generated_at`
//! field, which can be pinned via [`generate_export_document_at`] when
//! byte-stable output matters.
//!
//! Section order is fixed: executive summary, verified truths,
//! methodology, verified verification reports, scientific validations,
//! consensus discussions, rejected/flagged data, analytics.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppResult;
use crate::types::{generate_id, now_iso, Session, VerificationStatus};

/// Divider line between rendered sections.
const DIVIDER: &str =
    "========================================================================";

/// A rendering-only projection of a session. Never persisted;
/// regenerated on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Unique document id.
    pub id: String,
    /// Source session id.
    pub session_id: String,
    /// Original user request.
    pub user_request: String,
    /// Generation timestamp; the only non-deterministic field.
    pub generated_at: String,
    /// Count of verified truths, for the header.
    pub truth_count: usize,
    /// Total citations across all truths, for the header.
    pub citation_count: usize,
    /// Ordered sections.
    pub sections: Vec<ExportSection>,
}

/// One titled section of the export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSection {
    /// Section heading, rendered in brackets.
    pub heading: String,
    /// Section body text.
    pub body: String,
    /// Citation lines attached to the section.
    pub citations: Vec<String>,
    /// Verification score for the section's subject, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_score: Option<u8>,
}

impl ExportSection {
    fn new(heading: impl Into<String>, body: String) -> Self {
        ExportSection {
            heading: heading.into(),
            body,
            citations: Vec::new(),
            verification_score: None,
        }
    }
}

/// Project a session into an export document stamped with the current
/// time.
pub fn generate_export_document(session: &Session) -> ExportDocument {
    generate_export_document_at(session, now_iso())
}

/// Project a session into an export document with a caller-supplied
/// `generated_at`, for byte-stable re-exports.
pub fn generate_export_document_at(session: &Session, generated_at: String) -> ExportDocument {
    let mut sections = Vec::new();

    sections.push(executive_summary(session));
    for truth in &session.verified_truths {
        sections.push(truth_section(truth));
    }
    sections.push(methodology_section());
    for verification in &session.verifications {
        if verification.overall_status == VerificationStatus::Verified {
            sections.push(verification_section(session, verification));
        }
    }
    for validation in &session.scientific_validations {
        sections.push(validation_section(session, validation));
    }
    if let Some(discussion) = &session.pmops {
        sections.push(discussion_section(discussion));
    }
    sections.push(rejected_section(session));
    sections.push(analytics_section(session));

    ExportDocument {
        id: generate_id("export"),
        session_id: session.id.clone(),
        user_request: session.user_request.clone(),
        generated_at,
        truth_count: session.verified_truths.len(),
        citation_count: session
            .verified_truths
            .iter()
            .map(|t| t.sources.len())
            .sum(),
        sections,
    }
}

/// Render an export document to a divider-delimited plain-text
/// document. Pure: the same document always renders identically.
pub fn render_export_to_text(doc: &ExportDocument) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(DIVIDER.to_string());
    lines.push("RESEARCH VERIFICATION PIPELINE - VERIFIED OUTPUT".to_string());
    lines.push("Poison & Manipulation Free Research".to_string());
    lines.push(DIVIDER.to_string());
    lines.push(String::new());
    lines.push(format!("Session: {}", doc.session_id));
    lines.push(format!("Generated: {}", doc.generated_at));
    lines.push(format!("User Request: \"{}\"", doc.user_request));
    lines.push(format!("Verified Truths: {}", doc.truth_count));
    lines.push(format!("Sources Cited: {}", doc.citation_count));
    lines.push(String::new());

    for section in &doc.sections {
        lines.push(DIVIDER.to_string());
        lines.push(format!("[{}]", section.heading));
        lines.push(DIVIDER.to_string());
        lines.push(String::new());
        lines.push(section.body.clone());
        if let Some(score) = section.verification_score {
            lines.push(format!("Verification Score: {}/100", score));
        }
        if !section.citations.is_empty() {
            lines.push(String::new());
            lines.push("Citations:".to_string());
            for citation in &section.citations {
                lines.push(format!("  {}", citation));
            }
        }
        lines.push(String::new());
    }

    lines.push(DIVIDER.to_string());
    lines.push("END OF DOCUMENT".to_string());
    lines.push(DIVIDER.to_string());

    lines.join("\n")
}

/// Render a session and write it to a text file.
pub fn save_export(session: &Session, path: &Path) -> AppResult<()> {
    let doc = generate_export_document(session);
    let text = render_export_to_text(&doc);
    fs::write(path, text)?;
    info!(path = %path.display(), session_id = %session.id, "export written");
    Ok(())
}

// ============================================================================
// Section builders
// ============================================================================

fn executive_summary(session: &Session) -> ExportSection {
    let flagged = session
        .articles
        .iter()
        .filter(|a| a.status == VerificationStatus::FlaggedPoisoned)
        .count();
    let mut body = format!(
        "Topics Researched: {}\nTotal Articles Analyzed: {}\nVerified Truths: {}\nFlagged as Poisoned: {}",
        session.topics.len(),
        session.articles.len(),
        session.verified_truths.len(),
        flagged,
    );
    if !session.verified_truths.is_empty() {
        let avg: u32 = session
            .verified_truths
            .iter()
            .map(|t| u32::from(t.credibility_score))
            .sum::<u32>()
            / session.verified_truths.len() as u32;
        body.push_str(&format!("\nAverage Credibility: {}/100", avg));
    }
    ExportSection::new("EXECUTIVE SUMMARY", body)
}

fn truth_section(truth: &crate::types::VerifiedTruth) -> ExportSection {
    let mut body = format!(
        "{}\nCredibility Score: {}/100\nScientific Verdict: {}",
        truth.content, truth.credibility_score, truth.scientific_verdict
    );
    body.push_str("\n\nMethods:");
    for method in &truth.methods {
        body.push_str(&format!("\n  - {}", method));
    }
    if !truth.insights.is_empty() {
        body.push_str("\n\nInsights:");
        for insight in &truth.insights {
            body.push_str(&format!("\n  - {}", insight));
        }
    }
    let citations = truth
        .sources
        .iter()
        .map(|c| {
            let authors = if c.authors.is_empty() {
                "Unknown".to_string()
            } else {
                c.authors.join(", ")
            };
            let mut line = format!(
                "[{}] {} ({}). \"{}\". {}",
                c.id, authors, c.year, c.text, c.publication
            );
            if let Some(url) = &c.url {
                line.push_str(&format!(" URL: {}", url));
            }
            line
        })
        .collect();
    ExportSection {
        heading: format!("VERIFIED TRUTH: {}", truth.title),
        body,
        citations,
        verification_score: Some(truth.credibility_score),
    }
}

fn methodology_section() -> ExportSection {
    ExportSection::new(
        "METHODOLOGY",
        "Seven-stage verification pipeline:\n\
         \x20 1. Topic extraction from user request\n\
         \x20 2. Multi-source article synthesis\n\
         \x20 3. Six-point weighted credibility verification\n\
         \x20 4. Scientific method validation with poison gate\n\
         \x20 5. Idea generation from verified sources only\n\
         \x20 6. Six-role consensus protocol with traceable voting\n\
         \x20 7. Double-gated truth compilation"
            .to_string(),
    )
}

fn verification_section(
    session: &Session,
    verification: &crate::types::Verification,
) -> ExportSection {
    let title = session
        .articles
        .iter()
        .find(|a| a.id == verification.target_id)
        .map(|a| a.title.clone())
        .unwrap_or_else(|| verification.target_id.clone());
    let mut body = format!(
        "Status: {}\nCredibility: {}/100\n",
        verification.overall_status, verification.credibility_score
    );
    for check in &verification.checks {
        let status = if check.passed { "PASS" } else { "FAIL" };
        body.push_str(&format!(
            "\n  [{}] {}: {} ({}%)",
            status, check.check_type, check.details, check.confidence
        ));
    }
    ExportSection {
        heading: format!("VERIFICATION: {}", title),
        body,
        citations: Vec::new(),
        verification_score: Some(verification.credibility_score),
    }
}

fn validation_section(
    session: &Session,
    validation: &crate::types::ScientificValidation,
) -> ExportSection {
    let title = session
        .articles
        .iter()
        .find(|a| a.id == validation.target_id)
        .map(|a| a.title.clone())
        .unwrap_or_else(|| validation.target_id.clone());
    let dims = [
        ("Logical Consistency", &validation.logical_consistency),
        ("Replicability", &validation.replicability),
        ("Variable Measurement", &validation.variable_measurement),
        ("Scalability", &validation.scalability),
        ("Perspective Analysis", &validation.perspective_analysis),
        ("Poison Detection", &validation.poison_detection),
    ];
    let mut body = format!("Overall Verdict: {}\n", validation.overall_verdict);
    for (name, result) in dims {
        body.push_str(&format!(
            "\n  {}: {}/100 - {}",
            name, result.score, result.assessment
        ));
    }
    if !validation.extracted_insights.is_empty() {
        body.push_str("\n\nInsights:");
        for insight in &validation.extracted_insights {
            body.push_str(&format!("\n  - {}", insight));
        }
    }
    ExportSection::new(format!("SCIENTIFIC VALIDATION: {}", title), body)
}

fn discussion_section(discussion: &crate::types::PmopsDiscussion) -> ExportSection {
    let mut body = discussion.performance_review.clone();
    body.push_str("\n\n=== FULL CHAT LOG ===");
    for message in &discussion.chat_log {
        body.push_str(&format!(
            "\n[{}] {}: {}",
            message.timestamp, message.agent_name, message.content
        ));
    }
    ExportSection::new("P.M.O.P.S. DISCUSSION & PERFORMANCE REVIEW", body)
}

fn rejected_section(session: &Session) -> ExportSection {
    let rejected: Vec<String> = session
        .articles
        .iter()
        .filter(|a| {
            matches!(
                a.status,
                VerificationStatus::Rejected | VerificationStatus::FlaggedPoisoned
            )
        })
        .map(|article| {
            let verification = session
                .verifications
                .iter()
                .find(|v| v.target_id == article.id);
            let mut entry = format!(
                "- {} [{}]: credibility {}/100",
                article.title,
                article.status,
                verification.map(|v| v.credibility_score).unwrap_or(0),
            );
            if let Some(v) = verification {
                for issue in &v.flagged_issues {
                    entry.push_str(&format!("\n    {}", issue));
                }
            }
            entry
        })
        .collect();
    let body = if rejected.is_empty() {
        "No articles were rejected or flagged as poisoned.".to_string()
    } else {
        rejected.join("\n")
    };
    ExportSection::new("REJECTED & FLAGGED DATA", body)
}

fn analytics_section(session: &Session) -> ExportSection {
    let total_checks: usize = session.verifications.iter().map(|v| v.checks.len()).sum();
    let passed_checks: usize = session
        .verifications
        .iter()
        .map(|v| v.checks.iter().filter(|c| c.passed).count())
        .sum();
    let pass_rate = if total_checks > 0 {
        (passed_checks as f64 / total_checks as f64 * 100.0).round() as u32
    } else {
        0
    };
    let avg_credibility = if session.verifications.is_empty() {
        0
    } else {
        session
            .verifications
            .iter()
            .map(|v| u32::from(v.credibility_score))
            .sum::<u32>()
            / session.verifications.len() as u32
    };

    // Verdict histogram in a stable, sorted order.
    let mut verdict_counts: BTreeMap<String, usize> = BTreeMap::new();
    for validation in &session.scientific_validations {
        *verdict_counts
            .entry(validation.overall_verdict.to_string())
            .or_insert(0) += 1;
    }

    let ideas = session
        .brainstorm
        .as_ref()
        .map(|b| b.ideas.len())
        .unwrap_or(0);
    let proposals = session
        .pmops
        .as_ref()
        .map(|p| p.proposals.len())
        .unwrap_or(0);
    let votes = session
        .pmops
        .as_ref()
        .map(|p| p.voting_results.len())
        .unwrap_or(0);

    let mut body = format!(
        "Total Verification Checks: {}\nChecks Passed: {} ({}%)\nAverage Credibility: {}/100",
        total_checks, passed_checks, pass_rate, avg_credibility
    );
    body.push_str("\n\nVerdicts:");
    if verdict_counts.is_empty() {
        body.push_str("\n  (none)");
    } else {
        for (verdict, count) in &verdict_counts {
            body.push_str(&format!("\n  {}: {}", verdict, count));
        }
    }
    body.push_str(&format!(
        "\n\nBrainstorm Ideas: {}\nProposals: {}\nVotes Cast: {}",
        ideas, proposals, votes
    ));
    ExportSection::new("ANALYTICS & METRICS", body)
}
