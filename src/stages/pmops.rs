//! Stage 6: P.M.O.P.S. - the fixed six-role consensus protocol.
//!
//! Four rounds over the static [`AgentRole::ALL`] cast:
//! 1. proposals - one per role from its fixed approach template;
//! 2. critiques - round-robin, reviewer is the next role cyclically;
//! 3. voting - each role picks the highest-feasibility proposal it did
//!    not author, one traceable vote each, never anonymous;
//! 4. tally - highest count wins, first-seen tie-break, first proposal
//!    as default when no votes exist.
//!
//! A deterministic performance review closes the record. All branches
//! are total; given a valid brainstorm result this stage cannot fail.

use tracing::debug;

use crate::types::{
    generate_id, now_iso, AgentRole, BrainstormResult, ChatMessage, PmopsDiscussion,
    PmopsProposal, Session, VoteResult,
};

/// Run the full consensus round for a session.
pub fn run_pmops(session: &Session, brainstorm: &BrainstormResult) -> PmopsDiscussion {
    let roles = AgentRole::ALL;
    let mut proposals: Vec<PmopsProposal> = Vec::with_capacity(roles.len());
    let mut chat_log: Vec<ChatMessage> = Vec::new();

    // Proposal round: one proposal and one chat message per role.
    let base_idea_title = brainstorm.ideas.first().map(|i| i.title.as_str());
    for role in roles {
        let approach = role.approach();
        let proposal = PmopsProposal {
            id: generate_id("prop"),
            agent_id: role,
            title: format!("{} Approach", approach.title),
            description: format!(
                "{} Building on: {}",
                approach.description,
                base_idea_title.unwrap_or("verified research")
            ),
            pros: approach.pros.iter().map(|s| s.to_string()).collect(),
            cons: approach.cons.iter().map(|s| s.to_string()).collect(),
            feasibility: approach.feasibility,
            citations: brainstorm.novel_procedures.iter().take(2).cloned().collect(),
        };
        chat_log.push(ChatMessage {
            id: generate_id("msg"),
            agent_id: role,
            agent_name: role.display_name().to_string(),
            content: format!("I propose: {}. {}", proposal.title, proposal.description),
            timestamp: now_iso(),
            referenced_sources: proposal.citations.clone(),
        });
        proposals.push(proposal);
    }

    // Critique round: reviewer for proposal i is role (i+1) mod 6, so
    // no role ever critiques itself and the wrap is cyclic.
    for (i, proposal) in proposals.iter().enumerate() {
        let reviewer = roles[(i + 1) % roles.len()];
        let first_pro = proposal.pros.first().map(String::as_str).unwrap_or("N/A");
        let first_con = proposal.cons.first().map(String::as_str).unwrap_or("N/A");
        chat_log.push(ChatMessage {
            id: generate_id("msg"),
            agent_id: reviewer,
            agent_name: reviewer.display_name().to_string(),
            content: format!(
                "Reviewing \"{}\": Pros: {}. Cons: {}. Feasibility: {}/100.",
                proposal.title, first_pro, first_con, proposal.feasibility
            ),
            timestamp: now_iso(),
            referenced_sources: Vec::new(),
        });
    }

    // Voting round: every role votes for the strictly highest
    // feasibility among proposals it did not author; ties resolve to
    // the first encountered in proposal order. The empty-eligible
    // guard cannot trigger with six distinct roles, but a role with no
    // eligible proposal skips its vote rather than erroring.
    let mut votes: Vec<VoteResult> = Vec::new();
    let mut tally: Vec<(String, u32)> = Vec::new();
    for role in roles {
        let best = proposals
            .iter()
            .filter(|p| p.agent_id != role)
            .fold(None::<&PmopsProposal>, |acc, p| match acc {
                Some(current) if current.feasibility >= p.feasibility => Some(current),
                _ => Some(p),
            });
        let Some(best) = best else {
            debug!(role = ?role, "no eligible proposal to vote for, skipping");
            continue;
        };
        votes.push(VoteResult {
            agent_id: role,
            agent_name: role.display_name().to_string(),
            proposal_id: best.id.clone(),
            reasoning: format!(
                "Selected \"{}\" for highest feasibility ({}/100)",
                best.title, best.feasibility
            ),
            timestamp: now_iso(),
        });
        match tally.iter_mut().find(|(id, _)| id == &best.id) {
            Some((_, count)) => *count += 1,
            None => tally.push((best.id.clone(), 1)),
        }
    }

    // Tally: highest count wins; ties resolve to the first id seen in
    // vote order; no votes at all falls back to the first proposal.
    let winning_id = tally
        .iter()
        .fold(None::<&(String, u32)>, |acc, entry| match acc {
            Some(current) if current.1 >= entry.1 => Some(current),
            _ => Some(entry),
        })
        .map(|(id, _)| id.clone())
        .or_else(|| proposals.first().map(|p| p.id.clone()))
        .unwrap_or_default();

    let winner = proposals.iter().find(|p| p.id == winning_id);
    let review = generate_review(session, &proposals, &chat_log, &votes, winner);

    PmopsDiscussion {
        id: generate_id("pmops"),
        session_id: session.id.clone(),
        topic: session.user_request.clone(),
        proposals,
        chat_log,
        voting_results: votes,
        winning_proposal_id: winning_id,
        performance_review: review,
        completed_at: now_iso(),
    }
}

/// Deterministic multi-line performance review: participants, message
/// count, full per-vote breakdown, and the winning proposal.
fn generate_review(
    session: &Session,
    proposals: &[PmopsProposal],
    chat_log: &[ChatMessage],
    votes: &[VoteResult],
    winner: Option<&PmopsProposal>,
) -> String {
    let participant_lines: Vec<String> = proposals
        .iter()
        .map(|p| {
            format!(
                "  - {}: \"{}\" (Feasibility: {}/100)",
                p.agent_id.display_name(),
                p.title,
                p.feasibility
            )
        })
        .collect();
    let vote_lines: Vec<String> = votes
        .iter()
        .map(|v| format!("  - {}: {}", v.agent_name, v.reasoning))
        .collect();

    format!(
        "=== P.M.O.P.S. PERFORMANCE REVIEW ===\n\
         Session: {}\n\
         User Request: \"{}\"\n\
         Date: {}\n\
         \n\
         PARTICIPANTS ({} agents):\n\
         {}\n\
         \n\
         DISCUSSION: {} messages exchanged.\n\
         \n\
         VOTING (All traceable - NO anonymous voting):\n\
         {}\n\
         \n\
         WINNING PROPOSAL: \"{}\"\n\
         \x20 Feasibility: {}/100\n\
         \n\
         RECOMMENDATIONS:\n\
         \x20 - Implement winning proposal with verification checkpoints\n\
         \x20 - Re-evaluate rejected proposals for complementary approaches\n\
         === END PERFORMANCE REVIEW ===",
        session.id,
        session.user_request,
        now_iso(),
        proposals.len(),
        participant_lines.join("\n"),
        chat_log.len(),
        vote_lines.join("\n"),
        winner.map(|p| p.title.as_str()).unwrap_or("N/A"),
        winner.map(|p| p.feasibility).unwrap_or(0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::brainstorm::brainstorm;
    use crate::types::{
        generate_id, now_iso, Article, Citation, CredibilityLevel, SourceType, VerificationStatus,
    };
    use pretty_assertions::assert_eq;

    fn session_and_brainstorm() -> (Session, BrainstormResult) {
        let session = Session::new("consensus test request");
        let article = Article {
            id: generate_id("article"),
            topic_id: "topic_1".to_string(),
            title: "Verified Paper".to_string(),
            source: "Sample Source".to_string(),
            url: "https://example.org".to_string(),
            snippet: "snippet".to_string(),
            source_type: SourceType::PeerReviewed,
            credibility: CredibilityLevel::High,
            citations: vec![Citation {
                id: generate_id("cit"),
                text: "Citation text".to_string(),
                authors: vec!["Research Team".to_string()],
                publication: "Sample Source".to_string(),
                year: 2024,
                doi: None,
                url: None,
            }],
            retrieved_at: now_iso(),
            status: VerificationStatus::Verified,
        };
        let result = brainstorm(&session.id, &[&article]);
        (session, result)
    }

    #[test]
    fn test_six_proposals_in_role_order() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        assert_eq!(discussion.proposals.len(), 6);
        let authors: Vec<_> = discussion.proposals.iter().map(|p| p.agent_id).collect();
        assert_eq!(authors, AgentRole::ALL.to_vec());
    }

    #[test]
    fn test_chat_log_has_proposals_then_critiques() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        assert_eq!(discussion.chat_log.len(), 12);
        assert!(discussion.chat_log[..6]
            .iter()
            .all(|m| m.content.starts_with("I propose:")));
        assert!(discussion.chat_log[6..]
            .iter()
            .all(|m| m.content.starts_with("Reviewing")));
    }

    #[test]
    fn test_critique_round_robin_no_self_review() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        for (i, critique) in discussion.chat_log[6..].iter().enumerate() {
            let expected_reviewer = AgentRole::ALL[(i + 1) % 6];
            assert_eq!(critique.agent_id, expected_reviewer);
            assert_ne!(critique.agent_id, discussion.proposals[i].agent_id);
        }
    }

    #[test]
    fn test_no_self_votes_and_at_most_six() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        assert!(discussion.voting_results.len() <= 6);
        for vote in &discussion.voting_results {
            let voted_for = discussion
                .proposals
                .iter()
                .find(|p| p.id == vote.proposal_id)
                .expect("vote references a known proposal");
            assert_ne!(voted_for.agent_id, vote.agent_id);
        }
    }

    #[test]
    fn test_highest_feasibility_proposal_wins() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        // Multi-Layer Verification has feasibility 90; every other role
        // votes for it, and its author votes for the 85 proposal.
        let winner = discussion
            .proposals
            .iter()
            .find(|p| p.id == discussion.winning_proposal_id)
            .expect("winner present in proposals");
        assert_eq!(winner.agent_id, AgentRole::VerificationSpecialist);
        assert_eq!(discussion.voting_results.len(), 6);
        let winner_votes = discussion
            .voting_results
            .iter()
            .filter(|v| v.proposal_id == winner.id)
            .count();
        assert_eq!(winner_votes, 5);
    }

    #[test]
    fn test_votes_are_traceable_to_named_roles() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        for vote in &discussion.voting_results {
            assert_eq!(vote.agent_name, vote.agent_id.display_name());
            assert!(!vote.reasoning.is_empty());
        }
    }

    #[test]
    fn test_performance_review_lists_votes_and_winner() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        let review = &discussion.performance_review;
        assert!(review.contains("PARTICIPANTS (6 agents):"));
        assert!(review.contains("DISCUSSION: 12 messages exchanged."));
        assert!(review.contains("NO anonymous voting"));
        assert!(review.contains("WINNING PROPOSAL: \"Multi-Layer Verification Approach\""));
        for role in AgentRole::ALL {
            assert!(review.contains(role.display_name()), "{:?}", role);
        }
    }

    #[test]
    fn test_empty_brainstorm_still_totals() {
        // The orchestrator never calls this with an empty brainstorm,
        // but the stage itself must stay total.
        let session = Session::new("request");
        let br = brainstorm(&session.id, &[]);
        let discussion = run_pmops(&session, &br);
        assert_eq!(discussion.proposals.len(), 6);
        assert!(discussion.proposals[0]
            .description
            .ends_with("Building on: verified research"));
        assert!(discussion
            .proposals
            .iter()
            .all(|p| p.citations.is_empty()));
    }

    #[test]
    fn test_discussion_topic_is_user_request() {
        let (session, br) = session_and_brainstorm();
        let discussion = run_pmops(&session, &br);
        assert_eq!(discussion.topic, "consensus test request");
        assert_eq!(discussion.session_id, session.id);
    }
}
