use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Phases of a voting session, in the only order they may be visited.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkflowStatus {
    /// The administrator is adding voters. Initial phase.
    RegisteringVoters,
    /// Registered voters may submit proposals.
    ProposalsRegistrationStarted,
    /// Proposal submission is closed; voting has not opened yet.
    ProposalsRegistrationEnded,
    /// Registered voters may cast their single vote.
    VotingSessionStarted,
    /// Voting is closed, awaiting the tally.
    VotingSessionEnded,
    /// A winner has been selected.
    VotesTallied,
}

/// Every phase, in workflow order.
pub const WORKFLOW: [WorkflowStatus; 6] = [
    WorkflowStatus::RegisteringVoters,
    WorkflowStatus::ProposalsRegistrationStarted,
    WorkflowStatus::ProposalsRegistrationEnded,
    WorkflowStatus::VotingSessionStarted,
    WorkflowStatus::VotingSessionEnded,
    WorkflowStatus::VotesTallied,
];

/// Label for raw status codes that do not name a phase.
pub const UNKNOWN_STATUS: &str = "Unknown status";

impl WorkflowStatus {
    /// Position of this phase in [`WORKFLOW`], also used as its numeric wire code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The phase immediately after this one, or `None` once votes are tallied.
    pub fn next(self) -> Option<Self> {
        WORKFLOW.get(self.code() as usize + 1).copied()
    }

    /// Fixed human-readable label for this phase.
    pub fn description(self) -> &'static str {
        match self {
            Self::RegisteringVoters => "Registering voters",
            Self::ProposalsRegistrationStarted => "Proposals registration started",
            Self::ProposalsRegistrationEnded => "Proposals registration ended",
            Self::VotingSessionStarted => "Voting session started",
            Self::VotingSessionEnded => "Voting session ended",
            Self::VotesTallied => "Votes tallied",
        }
    }
}

impl TryFrom<u8> for WorkflowStatus {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        WORKFLOW.get(code as usize).copied().ok_or(code)
    }
}

impl Display for WorkflowStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Describe a raw status code, falling back to [`UNKNOWN_STATUS`] for codes
/// outside the workflow.
pub fn describe_status_code(code: u8) -> &'static str {
    WorkflowStatus::try_from(code)
        .map(WorkflowStatus::description)
        .unwrap_or(UNKNOWN_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_workflow_order() {
        for (i, status) in WORKFLOW.iter().enumerate() {
            assert_eq!(status.code() as usize, i);
            assert_eq!(WorkflowStatus::try_from(i as u8), Ok(*status));
        }
        assert_eq!(WorkflowStatus::try_from(6), Err(6));
    }

    #[test]
    fn next_is_strictly_forward() {
        assert_eq!(
            WorkflowStatus::RegisteringVoters.next(),
            Some(WorkflowStatus::ProposalsRegistrationStarted)
        );
        assert_eq!(
            WorkflowStatus::VotingSessionEnded.next(),
            Some(WorkflowStatus::VotesTallied)
        );
        assert_eq!(WorkflowStatus::VotesTallied.next(), None);
        for pair in WORKFLOW.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn descriptions() {
        assert_eq!(
            WorkflowStatus::RegisteringVoters.description(),
            "Registering voters"
        );
        assert_eq!(WorkflowStatus::VotesTallied.to_string(), "Votes tallied");
        assert_eq!(describe_status_code(3), "Voting session started");
        assert_eq!(describe_status_code(42), UNKNOWN_STATUS);
    }
}
