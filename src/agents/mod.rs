//! The fixed six-role cast of the consensus protocol.
//!
//! Each role carries a display name, a skill list, a system prompt, and a
//! proposal approach used during the consensus round. All of it is static
//! keyed data: enum-to-record lookups, exhaustiveness-checked by the
//! compiler, never rebuilt at runtime.
//!
//! The poison-shield prompt is injected into the verification and
//! scientific-validator prompts only.

use crate::shield::POISON_SHIELD_PROMPT;
use crate::types::AgentRole;

/// Fixed per-role proposal template used by the consensus round.
///
/// The approach table is the single source of truth for proposal
/// titles, pros, cons, and feasibility scores.
#[derive(Debug, Clone, Copy)]
pub struct AgentApproach {
    /// Proposal title stem; rendered as "{title} Approach".
    pub title: &'static str,
    /// Proposal description stem.
    pub description: &'static str,
    /// Listed advantages.
    pub pros: &'static [&'static str],
    /// Listed drawbacks.
    pub cons: &'static [&'static str],
    /// Fixed feasibility score, 0-100.
    pub feasibility: u8,
}

impl AgentRole {
    /// Human-readable display name for the role.
    pub fn display_name(self) -> &'static str {
        match self {
            AgentRole::ResearchAnalyst => "Research Analyst",
            AgentRole::VerificationSpecialist => "Verification Specialist",
            AgentRole::ScientificValidator => "Scientific Validator",
            AgentRole::BrainstormInnovator => "Brainstorming Innovator",
            AgentRole::PmopsFacilitator => "P.M.O.P.S. Facilitator",
            AgentRole::OutputCoordinator => "Output Coordinator",
        }
    }

    /// Skill list advertised for the role.
    pub fn skills(self) -> &'static [&'static str] {
        match self {
            AgentRole::ResearchAnalyst => &[
                "Academic database search (PubMed, IEEE, JSTOR)",
                "Curriculum analysis and source verification",
                "Citation extraction and formatting",
                "Technical document data extraction",
            ],
            AgentRole::VerificationSpecialist => &[
                "Cross-source validation",
                "Bias and propaganda detection",
                "Data poisoning identification",
                "Source reputation assessment",
                "Fact-checking protocols",
            ],
            AgentRole::ScientificValidator => &[
                "Logical reasoning assessment",
                "Reproducibility analysis",
                "Variable measurement evaluation",
                "Scalability assessment",
                "Multi-perspective analysis",
            ],
            AgentRole::BrainstormInnovator => &[
                "Creative problem-solving",
                "Novel idea generation",
                "Methodology extension",
                "Cross-domain application",
                "Prototype development guidance",
            ],
            AgentRole::PmopsFacilitator => &[
                "Group discussion management",
                "Transparent voting administration",
                "Performance review generation",
                "Chat log preservation",
                "Consensus building",
            ],
            AgentRole::OutputCoordinator => &[
                "Data organization and formatting",
                "File generation and export",
                "Analytics and metrics",
                "System prompt shield implementation",
                "Scientific documentation",
            ],
        }
    }

    /// System prompt for the role.
    ///
    /// The poison shield is injected only into the two roles that gate
    /// data quality.
    pub fn system_prompt(self) -> String {
        match self {
            AgentRole::ResearchAnalyst => {
                "You are the Research Analyst Agent. Search for peer-reviewed, \
                 curricula-verified, and academic research only. Never fabricate \
                 citations. Always include DOI or verifiable URL."
                    .to_string()
            }
            AgentRole::VerificationSpecialist => format!(
                "{}\n\nYou are the Verification Specialist. Cross-validate every claim \
                 against 2+ independent sources. Apply the 6-point checklist.",
                POISON_SHIELD_PROMPT
            ),
            AgentRole::ScientificValidator => format!(
                "{}\n\nYou are the Scientific Method Validator. Check logical consistency, \
                 replicability, variable measurement, scalability, and perspective.",
                POISON_SHIELD_PROMPT
            ),
            AgentRole::BrainstormInnovator => {
                "You are the Brainstorming Innovator. Build only upon verified data. \
                 Every idea must include methodology, evidence basis, and feasibility."
                    .to_string()
            }
            AgentRole::PmopsFacilitator => {
                "You are the P.M.O.P.S. Facilitator. Manage group discussion, \
                 run transparent voting (NO anonymous votes), generate performance reviews."
                    .to_string()
            }
            AgentRole::OutputCoordinator => {
                "You are the Output Coordinator. Compile all verified data into \
                 clean .txt exports with full citation chains and analytics."
                    .to_string()
            }
        }
    }

    /// Fixed proposal approach for the consensus round.
    pub fn approach(self) -> &'static AgentApproach {
        match self {
            AgentRole::ResearchAnalyst => &RESEARCH_ANALYST_APPROACH,
            AgentRole::VerificationSpecialist => &VERIFICATION_SPECIALIST_APPROACH,
            AgentRole::ScientificValidator => &SCIENTIFIC_VALIDATOR_APPROACH,
            AgentRole::BrainstormInnovator => &BRAINSTORM_INNOVATOR_APPROACH,
            AgentRole::PmopsFacilitator => &PMOPS_FACILITATOR_APPROACH,
            AgentRole::OutputCoordinator => &OUTPUT_COORDINATOR_APPROACH,
        }
    }
}

static RESEARCH_ANALYST_APPROACH: AgentApproach = AgentApproach {
    title: "Deep Literature Review",
    description: "Comprehensive systematic review of peer-reviewed literature.",
    pros: &["Thorough evidence base", "Identifies gaps", "Strong citations"],
    cons: &["Time-intensive", "May miss unpublished work"],
    feasibility: 85,
};

static VERIFICATION_SPECIALIST_APPROACH: AgentApproach = AgentApproach {
    title: "Multi-Layer Verification",
    description: "Cascading verification from multiple independent sources.",
    pros: &[
        "Highest confidence",
        "Eliminates poisoned data",
        "Traceable chain",
    ],
    cons: &["May reject novel findings", "Resource-intensive"],
    feasibility: 90,
};

static SCIENTIFIC_VALIDATOR_APPROACH: AgentApproach = AgentApproach {
    title: "Replication-First",
    description: "Prioritize independently replicable findings.",
    pros: &[
        "Infallible truth guarantee",
        "No false positives",
        "Scalable",
    ],
    cons: &["Slower progress", "Excludes observational studies"],
    feasibility: 82,
};

static BRAINSTORM_INNOVATOR_APPROACH: AgentApproach = AgentApproach {
    title: "Innovation Pipeline",
    description: "Fast prototyping with verified data as foundation.",
    pros: &["Rapid innovation", "Actionable outputs", "Cross-domain"],
    cons: &["Speed vs thoroughness tradeoff", "Prototype quality varies"],
    feasibility: 75,
};

static PMOPS_FACILITATOR_APPROACH: AgentApproach = AgentApproach {
    title: "Consensus-Driven",
    description: "Iterative discussion until supermajority agreement.",
    pros: &["Democratic", "Multiple perspectives", "Full documentation"],
    cons: &["Can be slow", "Groupthink risk"],
    feasibility: 78,
};

static OUTPUT_COORDINATOR_APPROACH: AgentApproach = AgentApproach {
    title: "Documentation-First",
    description: "Comprehensive documentation at every step.",
    pros: &["Complete audit trail", "Easy to extend", "Transparent"],
    cons: &["Documentation overhead", "May slow iteration"],
    feasibility: 80,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_unique() {
        let names: Vec<_> = AgentRole::ALL.iter().map(|r| r.display_name()).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_every_role_has_skills() {
        for role in AgentRole::ALL {
            assert!(!role.skills().is_empty());
        }
    }

    #[test]
    fn test_shield_injected_into_gating_roles_only() {
        for role in AgentRole::ALL {
            let prompt = role.system_prompt();
            let has_shield = prompt.contains("DATA POISON SHIELD");
            let expects_shield = matches!(
                role,
                AgentRole::VerificationSpecialist | AgentRole::ScientificValidator
            );
            assert_eq!(has_shield, expects_shield, "role {:?}", role);
        }
    }

    #[test]
    fn test_approach_feasibility_scores() {
        assert_eq!(AgentRole::ResearchAnalyst.approach().feasibility, 85);
        assert_eq!(AgentRole::VerificationSpecialist.approach().feasibility, 90);
        assert_eq!(AgentRole::ScientificValidator.approach().feasibility, 82);
        assert_eq!(AgentRole::BrainstormInnovator.approach().feasibility, 75);
        assert_eq!(AgentRole::PmopsFacilitator.approach().feasibility, 78);
        assert_eq!(AgentRole::OutputCoordinator.approach().feasibility, 80);
    }

    #[test]
    fn test_approaches_have_pros_and_cons() {
        for role in AgentRole::ALL {
            let approach = role.approach();
            assert!(!approach.pros.is_empty());
            assert!(!approach.cons.is_empty());
        }
    }
}
