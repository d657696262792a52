use serde::{Deserialize, Serialize};
use voting_session::ProposalId;

/// A vote from a voter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub proposal_id: ProposalId,
    /// Value attached to the vote. Accepted for compatibility; it has no effect.
    #[serde(default)]
    pub value: Option<u64>,
}
