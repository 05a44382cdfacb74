//! Core data model for the research verification pipeline.
//!
//! Every record produced by the pipeline lives here: the [`Session`] root
//! aggregate, per-stage records ([`Topic`], [`Article`], [`Verification`],
//! [`ScientificValidation`], [`BrainstormResult`], [`PmopsDiscussion`],
//! [`VerifiedTruth`]) and the closed enums that key the fixed lookup tables.
//!
//! All records are plain data: `Clone + Debug + Serialize + Deserialize`,
//! no interior mutability, no shared state. Identifiers come from
//! [`generate_id`], a per-call UUID source, so concurrent pipeline
//! invocations never collide.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Enums
// ============================================================================

/// Pipeline stage marker tracked on the session as each stage completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Request parsing into topics.
    Input,
    /// Synthetic article generation.
    Research,
    /// Multi-check credibility verification.
    Verification,
    /// Scientific method validation.
    ScientificMethod,
    /// Idea generation from verified articles.
    Brainstorming,
    /// Six-role consensus protocol.
    Pmops,
    /// Truth compilation and export.
    Export,
}

/// Verification outcome for an article or check target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Not yet verified.
    Pending,
    /// Passed verification with high confidence.
    Verified,
    /// Failed verification.
    Rejected,
    /// Failed the bias screen; treated as poisoned data.
    FlaggedPoisoned,
    /// Partially verified; requires human review.
    NeedsReview,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::Rejected => write!(f, "rejected"),
            VerificationStatus::FlaggedPoisoned => write!(f, "flagged_poisoned"),
            VerificationStatus::NeedsReview => write!(f, "needs_review"),
        }
    }
}

/// Credibility level assigned to an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredibilityLevel {
    /// Verified, high-credibility source.
    High,
    /// Default level before verification.
    Medium,
    /// Low-credibility source.
    Low,
    /// Flagged by the poison screen.
    Poisoned,
}

/// Type of synthetic source an article is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Peer-reviewed journal publication.
    PeerReviewed,
    /// Accredited university curriculum.
    Curriculum,
    /// Open-source implementation with public audit trail.
    WorkingCode,
    /// Report from a recognized professional organization.
    ReputableOrg,
    /// Unverifiable source; exercises every fail path.
    Unknown,
}

impl SourceType {
    /// The four real source types, in the fixed synthesis order.
    pub const ALL: [SourceType; 4] = [
        SourceType::PeerReviewed,
        SourceType::Curriculum,
        SourceType::WorkingCode,
        SourceType::ReputableOrg,
    ];
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::PeerReviewed => write!(f, "peer_reviewed"),
            SourceType::Curriculum => write!(f, "curriculum"),
            SourceType::WorkingCode => write!(f, "working_code"),
            SourceType::ReputableOrg => write!(f, "reputable_org"),
            SourceType::Unknown => write!(f, "unknown"),
        }
    }
}

/// The six fixed roles of the consensus protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Searches and extracts research findings.
    ResearchAnalyst,
    /// Runs the six-point verification checklist.
    VerificationSpecialist,
    /// Applies the scientific method assessments.
    ScientificValidator,
    /// Generates ideas from verified data.
    BrainstormInnovator,
    /// Facilitates discussion and transparent voting.
    PmopsFacilitator,
    /// Compiles and exports verified output.
    OutputCoordinator,
}

impl AgentRole {
    /// All six roles in the fixed protocol order.
    pub const ALL: [AgentRole; 6] = [
        AgentRole::ResearchAnalyst,
        AgentRole::VerificationSpecialist,
        AgentRole::ScientificValidator,
        AgentRole::BrainstormInnovator,
        AgentRole::PmopsFacilitator,
        AgentRole::OutputCoordinator,
    ];
}

/// Overall verdict of a scientific validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Passed every gate with a high mean score.
    InfallibleTruth,
    /// Usable but requires further corroboration.
    NeedsMoreResearch,
    /// Failed the poison gate; must not be used downstream.
    PoisonedData,
    /// Failed validation outright.
    Rejected,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::InfallibleTruth => write!(f, "infallible_truth"),
            Verdict::NeedsMoreResearch => write!(f, "needs_more_research"),
            Verdict::PoisonedData => write!(f, "poisoned_data"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}

// ============================================================================
// Id and clock utilities
// ============================================================================

/// Generate a prefixed, collision-resistant identifier.
///
/// Fresh UUID per call; no shared counter, safe under concurrent
/// pipeline invocations.
pub fn generate_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..12])
}

/// Current UTC time as an RFC 3339 string.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

// ============================================================================
// Records
// ============================================================================

/// Immutable attribution record attached to an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// Unique citation id.
    pub id: String,
    /// Citation text.
    pub text: String,
    /// Author list.
    pub authors: Vec<String>,
    /// Publishing venue.
    pub publication: String,
    /// Publication year.
    pub year: i32,
    /// Optional DOI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Optional URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A researchable fragment derived from the user request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic id.
    pub id: String,
    /// Owning session id.
    pub session_id: String,
    /// Display title (the surviving fragment text).
    pub title: String,
    /// Derived description.
    pub description: String,
    /// Decorative search-query strings; never executed.
    pub search_queries: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Topic status.
    pub status: VerificationStatus,
}

/// A synthetic source record, one per topic per source type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique article id.
    pub id: String,
    /// Parent topic id.
    pub topic_id: String,
    /// Article title.
    pub title: String,
    /// Source organization name.
    pub source: String,
    /// Deterministically constructed search URL; never fetched.
    pub url: String,
    /// Textual snippet.
    pub snippet: String,
    /// Source type tag.
    pub source_type: SourceType,
    /// Credibility level; updated from the verification result.
    pub credibility: CredibilityLevel,
    /// Attached citations.
    pub citations: Vec<Citation>,
    /// Retrieval timestamp.
    pub retrieved_at: String,
    /// Verification status; updated from the verification result.
    pub status: VerificationStatus,
}

/// The six fixed verification check rules, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    /// Corroboration through web search.
    WebSearch,
    /// Alignment with accredited curricula.
    CurriculumMatch,
    /// Peer-review status in indexed journals.
    PeerReview,
    /// Source credibility evaluation.
    SourceReputation,
    /// Cross-reference with independent sources.
    CrossReference,
    /// Bias marker screening.
    BiasDetection,
}

impl std::fmt::Display for CheckType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckType::WebSearch => write!(f, "web_search"),
            CheckType::CurriculumMatch => write!(f, "curriculum_match"),
            CheckType::PeerReview => write!(f, "peer_review"),
            CheckType::SourceReputation => write!(f, "source_reputation"),
            CheckType::CrossReference => write!(f, "cross_reference"),
            CheckType::BiasDetection => write!(f, "bias_detection"),
        }
    }
}

/// Result of a single verification check rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCheck {
    /// Unique check id.
    pub id: String,
    /// Which rule produced this check.
    pub check_type: CheckType,
    /// Rule description.
    pub description: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Confidence, 0-100.
    pub confidence: u8,
    /// Human-readable detail text.
    pub details: String,
    /// Source references backing the check.
    pub sources: Vec<String>,
}

/// The six-check credibility assessment of one article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verification {
    /// Unique verification id.
    pub id: String,
    /// Target article id.
    pub target_id: String,
    /// Ordered check results.
    pub checks: Vec<VerificationCheck>,
    /// Overall status decision.
    pub overall_status: VerificationStatus,
    /// Weighted credibility score, 0-100.
    pub credibility_score: u8,
    /// Detail text of every passed check.
    pub evidence: Vec<String>,
    /// `"check_type: details"` for every failed check.
    pub flagged_issues: Vec<String>,
    /// Verification timestamp.
    pub verified_at: String,
}

/// One scored assessment dimension inside a scientific validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Score, 0-100.
    pub score: u8,
    /// Assessment text.
    pub assessment: String,
    /// Supporting evidence.
    pub evidence: Vec<String>,
    /// Recommendation text.
    pub recommendation: String,
}

/// The six-dimension scientific assessment of one article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScientificValidation {
    /// Unique validation id.
    pub id: String,
    /// Target article id.
    pub target_id: String,
    /// Logical consistency assessment.
    pub logical_consistency: ValidationResult,
    /// Replicability assessment.
    pub replicability: ValidationResult,
    /// Variable measurement assessment.
    pub variable_measurement: ValidationResult,
    /// Scalability assessment.
    pub scalability: ValidationResult,
    /// Perspective analysis assessment.
    pub perspective_analysis: ValidationResult,
    /// Poison detection safety gate.
    pub poison_detection: ValidationResult,
    /// Overall verdict.
    pub overall_verdict: Verdict,
    /// Conditionally extracted insights.
    pub extracted_insights: Vec<String>,
    /// Validation timestamp.
    pub validated_at: String,
}

/// A candidate idea generated from a verified article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainstormIdea {
    /// Unique idea id.
    pub id: String,
    /// Idea title.
    pub title: String,
    /// Idea description.
    pub description: String,
    /// Fixed methodology template.
    pub methodology: String,
    /// Feasibility score, 0-100.
    pub feasibility_score: u8,
    /// Innovation score, 0-100.
    pub innovation_score: u8,
    /// Evidence basis copied from the article's citations.
    pub evidence_basis: Vec<String>,
    /// Idea status.
    pub status: VerificationStatus,
}

/// Output of the idea generation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainstormResult {
    /// Unique result id.
    pub id: String,
    /// Owning session id.
    pub session_id: String,
    /// Id of the first verified article the ideas build on.
    pub base_truth_id: String,
    /// Generated ideas, one per verified article.
    pub ideas: Vec<BrainstormIdea>,
    /// Novel procedure strings, parallel to `ideas`.
    pub novel_procedures: Vec<String>,
    /// Method extension strings, parallel to `ideas`.
    pub method_extensions: Vec<String>,
    /// Cross-domain application strings, parallel to `ideas`.
    pub cross_domain_applications: Vec<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// One message in the consensus chat log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id.
    pub id: String,
    /// Authoring role.
    pub agent_id: AgentRole,
    /// Display name of the authoring role.
    pub agent_name: String,
    /// Message content.
    pub content: String,
    /// Message timestamp.
    pub timestamp: String,
    /// Referenced source strings.
    pub referenced_sources: Vec<String>,
}

/// A proposal produced by one role during the consensus round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmopsProposal {
    /// Unique proposal id.
    pub id: String,
    /// Authoring role.
    pub agent_id: AgentRole,
    /// Proposal title.
    pub title: String,
    /// Proposal description.
    pub description: String,
    /// Listed advantages.
    pub pros: Vec<String>,
    /// Listed drawbacks.
    pub cons: Vec<String>,
    /// Feasibility score, 0-100.
    pub feasibility: u8,
    /// Supporting citation strings.
    pub citations: Vec<String>,
}

/// One traceable vote cast during the consensus round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteResult {
    /// Voting role; never anonymous.
    pub agent_id: AgentRole,
    /// Display name of the voting role.
    pub agent_name: String,
    /// Id of the proposal voted for.
    pub proposal_id: String,
    /// Templated vote reasoning.
    pub reasoning: String,
    /// Vote timestamp.
    pub timestamp: String,
}

/// Record of one complete six-role consensus round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PmopsDiscussion {
    /// Unique discussion id.
    pub id: String,
    /// Owning session id.
    pub session_id: String,
    /// Discussion topic (the original user request).
    pub topic: String,
    /// All proposals, one per role, in role order.
    pub proposals: Vec<PmopsProposal>,
    /// Full chat log: proposal messages then critiques.
    pub chat_log: Vec<ChatMessage>,
    /// All votes cast.
    pub voting_results: Vec<VoteResult>,
    /// Id of the winning proposal.
    pub winning_proposal_id: String,
    /// Generated performance review narrative.
    pub performance_review: String,
    /// Completion timestamp.
    pub completed_at: String,
}

/// Final output record for an article that survived both gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedTruth {
    /// Unique truth id.
    pub id: String,
    /// Owning session id.
    pub session_id: String,
    /// Source article title.
    pub title: String,
    /// Source article snippet.
    pub content: String,
    /// Ordered id chain: article, verification, validation.
    pub verification_path: Vec<String>,
    /// Credibility score from the verification.
    pub credibility_score: u8,
    /// Verdict from the scientific validation.
    pub scientific_verdict: Verdict,
    /// Source citations.
    pub sources: Vec<Citation>,
    /// Fixed method labels applied to every truth.
    pub methods: Vec<String>,
    /// Insights extracted during validation.
    pub insights: Vec<String>,
}

/// Root record of one pipeline run.
///
/// Mutated only by the orchestrator as each stage completes; immutable
/// once returned. `brainstorm` and `pmops` are `None` when the session
/// had zero verified articles and those stages were skipped, which is
/// distinct from having run with zero items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session id.
    pub id: String,
    /// Original request text, untrimmed.
    pub user_request: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Marker of the last completed stage.
    pub current_stage: PipelineStage,
    /// Extracted topics.
    pub topics: Vec<Topic>,
    /// Synthesized articles, four per topic.
    pub articles: Vec<Article>,
    /// One verification per article.
    pub verifications: Vec<Verification>,
    /// One validation per verified/needs-review article.
    pub scientific_validations: Vec<ScientificValidation>,
    /// Idea generation output; `None` when the stage was skipped.
    pub brainstorm: Option<BrainstormResult>,
    /// Consensus round output; `None` when the stage was skipped.
    pub pmops: Option<PmopsDiscussion>,
    /// Final double-gated truths.
    pub verified_truths: Vec<VerifiedTruth>,
}

impl Session {
    /// Create a fresh session for the given request text.
    pub fn new(user_request: impl Into<String>) -> Self {
        Session {
            id: generate_id("session"),
            user_request: user_request.into(),
            created_at: now_iso(),
            current_stage: PipelineStage::Input,
            topics: Vec::new(),
            articles: Vec::new(),
            verifications: Vec::new(),
            scientific_validations: Vec::new(),
            brainstorm: None,
            pmops: None,
            verified_truths: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_id_prefix_and_length() {
        let id = generate_id("topic");
        assert!(id.starts_with("topic_"));
        assert_eq!(id.len(), "topic_".len() + 12);
    }

    #[test]
    fn test_generate_id_unique_per_call() {
        let a = generate_id("session");
        let b = generate_id("session");
        assert_ne!(a, b);
    }

    #[test]
    fn test_source_type_fixed_order() {
        assert_eq!(
            SourceType::ALL,
            [
                SourceType::PeerReviewed,
                SourceType::Curriculum,
                SourceType::WorkingCode,
                SourceType::ReputableOrg,
            ]
        );
    }

    #[test]
    fn test_agent_role_cardinality() {
        assert_eq!(AgentRole::ALL.len(), 6);
    }

    #[test]
    fn test_enum_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&VerificationStatus::FlaggedPoisoned).unwrap(),
            "\"flagged_poisoned\""
        );
        assert_eq!(
            serde_json::to_string(&Verdict::InfallibleTruth).unwrap(),
            "\"infallible_truth\""
        );
        assert_eq!(
            serde_json::to_string(&SourceType::PeerReviewed).unwrap(),
            "\"peer_reviewed\""
        );
        assert_eq!(
            serde_json::to_string(&CheckType::BiasDetection).unwrap(),
            "\"bias_detection\""
        );
    }

    #[test]
    fn test_display_matches_serde() {
        assert_eq!(VerificationStatus::NeedsReview.to_string(), "needs_review");
        assert_eq!(Verdict::PoisonedData.to_string(), "poisoned_data");
        assert_eq!(SourceType::WorkingCode.to_string(), "working_code");
        assert_eq!(CheckType::CrossReference.to_string(), "cross_reference");
    }

    #[test]
    fn test_new_session_starts_at_input() {
        let session = Session::new("test request");
        assert_eq!(session.current_stage, PipelineStage::Input);
        assert_eq!(session.user_request, "test request");
        assert!(session.topics.is_empty());
        assert!(session.brainstorm.is_none());
        assert!(session.pmops.is_none());
    }
}
