use serde::{Deserialize, Serialize};

use crate::proposal::ProposalId;

/// A registered voter's record.
///
/// Records only exist for registered identities; revocation removes them outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_registered: bool,
    pub has_voted: bool,
    /// The proposal this voter chose. `Some` exactly when `has_voted` is set.
    pub voted_proposal_id: Option<ProposalId>,
}

impl Voter {
    /// A freshly registered voter who has not voted.
    pub fn registered() -> Self {
        Self {
            is_registered: true,
            has_voted: false,
            voted_proposal_id: None,
        }
    }

    /// Record a vote for `proposal_id`.
    pub(crate) fn cast(&mut self, proposal_id: ProposalId) {
        self.has_voted = true;
        self.voted_proposal_id = Some(proposal_id);
    }

    /// Forget any vote, keeping the registration.
    pub(crate) fn clear_vote(&mut self) {
        self.has_voted = false;
        self.voted_proposal_id = None;
    }
}
