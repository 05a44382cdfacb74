//! Pipeline orchestrator - the full verification workflow.
//!
//! Runs the seven stages strictly sequentially; the only conditional
//! control flow is the early exit that skips idea generation and the
//! consensus round when zero articles are verified. No loops back, no
//! recursion, no suspension points. Fresh identifiers are minted per
//! invocation, so concurrent callers never share state.

use tracing::{debug, info};

use crate::stages::{brainstorm, pmops, research, topics, truths, validation, verification};
use crate::types::{
    Article, CredibilityLevel, PipelineStage, ScientificValidation, Session, Verification,
    VerificationStatus,
};

/// Execute the complete verification pipeline for one request.
///
/// Total over all input strings: empty or whitespace-only input
/// degrades to a single fallback topic rather than erroring. Length
/// caps belong to the boundary layer, not here.
pub fn run_full_pipeline(request: &str) -> Session {
    let mut session = Session::new(request);
    info!(session_id = %session.id, "pipeline started");

    // Stage 1: parse the request into topics.
    let extracted = topics::extract_topics(&session.id, request);
    debug!(session_id = %session.id, topics = extracted.len(), "topics extracted");
    session.topics = extracted;
    session.current_stage = PipelineStage::Research;

    // Stage 2: synthesize articles.
    let articles = research::synthesize_articles(&session.topics);
    debug!(session_id = %session.id, articles = articles.len(), "articles synthesized");
    session.articles = articles;
    session.current_stage = PipelineStage::Verification;

    run_verification_stages(&mut session);

    info!(
        session_id = %session.id,
        truths = session.verified_truths.len(),
        "pipeline complete"
    );
    session
}

/// Stages 3-7 over the session's synthesized articles.
///
/// Split out so the zero-verified early exit can be exercised against
/// hand-built article sets in tests.
fn run_verification_stages(session: &mut Session) {
    // Stage 3: verify every article and fold the result back into the
    // article's status and credibility.
    let mut verifications: Vec<Verification> = Vec::with_capacity(session.articles.len());
    for article in &mut session.articles {
        let verification = verification::verify_article(article);
        apply_verification(article, &verification);
        verifications.push(verification);
    }
    session.verifications = verifications;
    session.current_stage = PipelineStage::ScientificMethod;

    // Stage 4: scientific method for verified and needs-review articles.
    let mut validations: Vec<ScientificValidation> = Vec::new();
    for article in &session.articles {
        if !matches!(
            article.status,
            VerificationStatus::Verified | VerificationStatus::NeedsReview
        ) {
            continue;
        }
        if let Some(verification) = session
            .verifications
            .iter()
            .find(|v| v.target_id == article.id)
        {
            validations.push(validation::apply_scientific_method(article, verification));
        }
    }
    session.scientific_validations = validations;
    session.current_stage = PipelineStage::Brainstorming;

    // Stage 5 and 6: only when at least one article is fully verified.
    let verified: Vec<&Article> = session
        .articles
        .iter()
        .filter(|a| a.status == VerificationStatus::Verified)
        .collect();
    if verified.is_empty() {
        debug!(session_id = %session.id, "zero verified articles, skipping brainstorm and consensus");
    } else {
        let brainstorm_result = brainstorm::brainstorm(&session.id, &verified);
        session.current_stage = PipelineStage::Pmops;
        let discussion = pmops::run_pmops(session, &brainstorm_result);
        session.brainstorm = Some(brainstorm_result);
        session.pmops = Some(discussion);
    }
    session.current_stage = PipelineStage::Export;

    // Stage 7: compile the double-gated truths.
    session.verified_truths = truths::compile_verified_truths(
        session,
        &session.articles,
        &session.verifications,
        &session.scientific_validations,
    );
}

/// Fold a verification result into the article record.
fn apply_verification(article: &mut Article, verification: &Verification) {
    match verification.overall_status {
        VerificationStatus::Verified => {
            article.credibility = CredibilityLevel::High;
            article.status = VerificationStatus::Verified;
        }
        VerificationStatus::FlaggedPoisoned => {
            article.credibility = CredibilityLevel::Poisoned;
            article.status = VerificationStatus::FlaggedPoisoned;
        }
        other => {
            article.status = other;
        }
    }
}
