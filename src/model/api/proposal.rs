use serde::{Deserialize, Serialize};
use voting_session::{Proposal, ProposalId};

/// A proposal submission from a voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSubmission {
    pub description: String,
    /// Value attached to the submission. Accepted for compatibility; it has no effect.
    #[serde(default)]
    pub value: Option<u64>,
}

/// API-friendly representation of a proposal, including its index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDesc {
    pub id: ProposalId,
    pub description: String,
    pub vote_count: u64,
}

impl ProposalDesc {
    pub fn new(id: ProposalId, proposal: &Proposal) -> Self {
        Self {
            id,
            description: proposal.description.clone(),
            vote_count: proposal.vote_count,
        }
    }
}

/// The index of a proposal, as returned on submission and lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRef {
    pub id: ProposalId,
}
