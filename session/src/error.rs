use thiserror::Error;

use crate::{identity::VoterId, proposal::ProposalId, workflow::WorkflowStatus};

pub type Result<T> = std::result::Result<T, SessionError>;

/// Reasons a session operation is rejected.
///
/// Every variant is caller-correctable: the offending call is refused and the session is
/// left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Caller is not authorized for this operation")]
    NotAuthorized,
    #[error("Voter {0} is already registered")]
    AlreadyRegistered(VoterId),
    #[error("Voter {0} is not registered")]
    NotRegistered(VoterId),
    #[error("Operation requires phase `{expected}`, but the session is in `{actual}`")]
    WrongPhase {
        expected: WorkflowStatus,
        actual: WorkflowStatus,
    },
    #[error("Voter {0} has already voted")]
    AlreadyVoted(VoterId),
    #[error("No proposal with ID {0}")]
    InvalidProposal(ProposalId),
    #[error("No proposal described as {0:?}")]
    NotFound(String),
    #[error("Cannot tally a session without proposals")]
    NoProposals,
}
