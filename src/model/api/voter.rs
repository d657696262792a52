use serde::{Deserialize, Serialize};
use voting_session::{ProposalId, Voter, VoterId};

/// An administrator's request to register a voter.
///
/// The identity is kept as a raw string so a malformed one is reported like any other
/// identity error rather than as an unreadable body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRegistration {
    pub voter: String,
}

/// API-friendly representation of a voter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterDesc {
    pub voter: VoterId,
    pub is_registered: bool,
    pub has_voted: bool,
    pub voted_proposal_id: Option<ProposalId>,
}

impl VoterDesc {
    pub fn new(voter: VoterId, record: &Voter) -> Self {
        Self {
            voter,
            is_registered: record.is_registered,
            has_voted: record.has_voted,
            voted_proposal_id: record.voted_proposal_id,
        }
    }
}
