use serde::{Deserialize, Serialize};
use voting_session::{EventSink, ProposalId, VoterId, VotingSession, WorkflowStatus};

/// Public overview of the voting session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDesc {
    pub status: WorkflowStatus,
    pub status_code: u8,
    pub description: String,
    pub administrator: VoterId,
    /// Only present once votes have been tallied.
    pub winning_proposal_id: Option<ProposalId>,
}

impl<S> From<&VotingSession<S>> for SessionDesc
where
    S: EventSink,
{
    fn from(session: &VotingSession<S>) -> Self {
        let status = session.status();
        Self {
            status,
            status_code: status.code(),
            description: session.status_description().to_string(),
            administrator: session.administrator(),
            winning_proposal_id: session.winning_proposal_id(),
        }
    }
}
