use serde::{Deserialize, Serialize};

/// Proposals are addressed by their insertion index.
pub type ProposalId = usize;

/// A submitted proposal and its live vote count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub description: String,
    pub vote_count: u64,
}

impl Proposal {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            vote_count: 0,
        }
    }
}

/// Select the proposal with the most votes.
///
/// Proposals are scanned in index order and only a strictly greater count replaces the
/// current leader, so ties resolve to the lowest index. Returns `None` for an empty list.
pub fn select_winner(proposals: &[Proposal]) -> Option<ProposalId> {
    let mut winner: Option<(ProposalId, u64)> = None;
    for (id, proposal) in proposals.iter().enumerate() {
        match winner {
            Some((_, best)) if proposal.vote_count <= best => {}
            _ => winner = Some((id, proposal.vote_count)),
        }
    }
    winner.map(|(id, _)| id)
}

/// Index of the first proposal whose description matches exactly.
pub fn position_of(proposals: &[Proposal], description: &str) -> Option<ProposalId> {
    proposals
        .iter()
        .position(|proposal| proposal.description == description)
}
