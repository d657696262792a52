use std::collections::HashMap;

use log::{debug, info};

use crate::{
    error::{Result, SessionError},
    event::{EventSink, LogSink, SessionEvent},
    identity::VoterId,
    proposal::{position_of, select_winner, Proposal, ProposalId},
    voter::Voter,
    workflow::WorkflowStatus,
};

/// The voting session manager: one administrator, a voter registry, an append-only
/// proposal list, the current phase and, once tallied, the winner.
///
/// Every operation checks all of its preconditions before touching any state, so a
/// rejected call changes nothing and publishes nothing.
#[derive(Debug)]
pub struct VotingSession<S = LogSink> {
    administrator: VoterId,
    voters: HashMap<VoterId, Voter>,
    proposals: Vec<Proposal>,
    status: WorkflowStatus,
    winning_proposal_id: Option<ProposalId>,
    sink: S,
}

impl VotingSession<LogSink> {
    /// Create a session whose events are only logged.
    pub fn with_log_sink(administrator: VoterId) -> Self {
        Self::new(administrator, LogSink)
    }
}

impl<S> VotingSession<S>
where
    S: EventSink,
{
    /// Create a session in [`WorkflowStatus::RegisteringVoters`] with no voters or proposals.
    pub fn new(administrator: VoterId, sink: S) -> Self {
        info!("Created voting session administered by {administrator}");
        Self {
            administrator,
            voters: HashMap::new(),
            proposals: Vec::new(),
            status: WorkflowStatus::RegisteringVoters,
            winning_proposal_id: None,
            sink,
        }
    }

    pub fn administrator(&self) -> VoterId {
        self.administrator
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// The winner chosen by the most recent tally, if any.
    pub fn winning_proposal_id(&self) -> Option<ProposalId> {
        self.winning_proposal_id
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_registered(&self, identity: &VoterId) -> bool {
        self.voters
            .get(identity)
            .map_or(false, |voter| voter.is_registered)
    }

    /// Register a voter. Administrator only; allowed in every phase.
    pub fn register_voter(&mut self, caller: &VoterId, identity: VoterId) -> Result<()> {
        self.require_administrator(caller)?;
        if self.voters.contains_key(&identity) {
            return Err(reject(SessionError::AlreadyRegistered(identity)));
        }

        self.voters.insert(identity, Voter::registered());
        info!("Registered voter {identity}");
        self.sink
            .publish(SessionEvent::VoterRegistered { voter: identity });
        Ok(())
    }

    /// Remove a voter, taking back their vote if they cast one.
    ///
    /// After votes are tallied the winner is re-selected from the reduced counts, so a
    /// revocation can change the published winner.
    pub fn revoke_voter(&mut self, caller: &VoterId, identity: VoterId) -> Result<()> {
        self.require_administrator(caller)?;
        let voter = self
            .voters
            .remove(&identity)
            .ok_or_else(|| reject(SessionError::NotRegistered(identity)))?;

        if let Some(proposal_id) = voter.voted_proposal_id {
            // Valid because votes are only recorded against existing proposals.
            let proposal = &mut self.proposals[proposal_id];
            proposal.vote_count -= 1;
            info!(
                "Withdrew vote of {identity} from proposal {proposal_id} (now {} votes)",
                proposal.vote_count
            );
        }
        if self.status == WorkflowStatus::VotesTallied {
            self.winning_proposal_id = select_winner(&self.proposals);
            info!(
                "Re-tallied after revocation, winner is now proposal {:?}",
                self.winning_proposal_id
            );
        }

        info!("Revoked voter {identity}");
        self.sink
            .publish(SessionEvent::VoterRevoked { voter: identity });
        Ok(())
    }

    pub fn start_proposals_registration(&mut self, caller: &VoterId) -> Result<()> {
        self.advance(
            caller,
            WorkflowStatus::RegisteringVoters,
            WorkflowStatus::ProposalsRegistrationStarted,
        )
    }

    pub fn end_proposals_registration(&mut self, caller: &VoterId) -> Result<()> {
        self.advance(
            caller,
            WorkflowStatus::ProposalsRegistrationStarted,
            WorkflowStatus::ProposalsRegistrationEnded,
        )
    }

    pub fn start_voting_session(&mut self, caller: &VoterId) -> Result<()> {
        self.advance(
            caller,
            WorkflowStatus::ProposalsRegistrationEnded,
            WorkflowStatus::VotingSessionStarted,
        )
    }

    pub fn end_voting_session(&mut self, caller: &VoterId) -> Result<()> {
        self.advance(
            caller,
            WorkflowStatus::VotingSessionStarted,
            WorkflowStatus::VotingSessionEnded,
        )
    }

    /// Select the winner and move to [`WorkflowStatus::VotesTallied`].
    ///
    /// The proposal with the most votes wins; ties go to the lowest index.
    pub fn tally_votes(&mut self, caller: &VoterId) -> Result<()> {
        self.require_administrator(caller)?;
        self.require_status(WorkflowStatus::VotingSessionEnded)?;
        let winner =
            select_winner(&self.proposals).ok_or_else(|| reject(SessionError::NoProposals))?;

        self.winning_proposal_id = Some(winner);
        info!(
            "Tallied votes, winner is proposal {winner} with {} votes",
            self.proposals[winner].vote_count
        );
        self.set_status(WorkflowStatus::VotesTallied);
        Ok(())
    }

    /// Start over from [`WorkflowStatus::RegisteringVoters`] once a session has been
    /// tallied. Proposals, votes and the winner are cleared; registrations are kept.
    pub fn reset(&mut self, caller: &VoterId) -> Result<()> {
        self.require_administrator(caller)?;
        self.require_status(WorkflowStatus::VotesTallied)?;

        self.proposals.clear();
        self.voters.values_mut().for_each(Voter::clear_vote);
        self.winning_proposal_id = None;
        info!(
            "Reset voting session, keeping {} registered voters",
            self.voters.len()
        );
        self.set_status(WorkflowStatus::RegisteringVoters);
        self.sink.publish(SessionEvent::SessionReset);
        Ok(())
    }

    /// Submit a proposal and return its index. Duplicate descriptions are allowed.
    pub fn add_proposal(
        &mut self,
        caller: &VoterId,
        description: impl Into<String>,
    ) -> Result<ProposalId> {
        self.require_voter(caller)?;
        self.require_status(WorkflowStatus::ProposalsRegistrationStarted)?;

        let proposal_id = self.proposals.len();
        self.proposals.push(Proposal::new(description));
        info!("Voter {caller} registered proposal {proposal_id}");
        self.sink
            .publish(SessionEvent::ProposalRegistered { proposal_id });
        Ok(proposal_id)
    }

    /// Cast the caller's one and only vote.
    pub fn add_vote(&mut self, caller: &VoterId, proposal_id: ProposalId) -> Result<()> {
        self.require_voter(caller)?;
        self.require_status(WorkflowStatus::VotingSessionStarted)?;
        if self.voters.get(caller).map_or(false, |voter| voter.has_voted) {
            return Err(reject(SessionError::AlreadyVoted(*caller)));
        }
        if proposal_id >= self.proposals.len() {
            return Err(reject(SessionError::InvalidProposal(proposal_id)));
        }

        if let Some(voter) = self.voters.get_mut(caller) {
            voter.cast(proposal_id);
        }
        self.proposals[proposal_id].vote_count += 1;
        info!("Voter {caller} voted for proposal {proposal_id}");
        self.sink.publish(SessionEvent::Voted {
            voter: *caller,
            proposal_id,
        });
        Ok(())
    }

    pub fn proposals(&self, caller: &VoterId) -> Result<&[Proposal]> {
        self.require_voter(caller)?;
        Ok(&self.proposals)
    }

    pub fn voter(&self, caller: &VoterId, identity: &VoterId) -> Result<&Voter> {
        self.require_voter(caller)?;
        self.voters
            .get(identity)
            .ok_or_else(|| reject(SessionError::NotRegistered(*identity)))
    }

    /// The winning proposal. Only available once votes are tallied.
    pub fn winner(&self, caller: &VoterId) -> Result<&Proposal> {
        self.winning_proposal(caller).map(|(_, proposal)| proposal)
    }

    /// Like [`Self::winner`], together with the winner's index.
    pub fn winning_proposal(&self, caller: &VoterId) -> Result<(ProposalId, &Proposal)> {
        self.require_voter(caller)?;
        self.require_status(WorkflowStatus::VotesTallied)?;
        self.winning_proposal_id
            .and_then(|id| Some((id, self.proposals.get(id)?)))
            .ok_or_else(|| reject(SessionError::NoProposals))
    }

    pub fn status_description(&self) -> &'static str {
        self.status.description()
    }

    /// Index of the first proposal described exactly as `description`.
    pub fn find_proposal_id(&self, description: &str) -> Result<ProposalId> {
        position_of(&self.proposals, description)
            .ok_or_else(|| reject(SessionError::NotFound(description.to_string())))
    }

    fn require_administrator(&self, caller: &VoterId) -> Result<()> {
        if *caller == self.administrator {
            Ok(())
        } else {
            Err(reject(SessionError::NotAuthorized))
        }
    }

    fn require_voter(&self, caller: &VoterId) -> Result<()> {
        if self.is_registered(caller) {
            Ok(())
        } else {
            Err(reject(SessionError::NotAuthorized))
        }
    }

    fn require_status(&self, expected: WorkflowStatus) -> Result<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(reject(SessionError::WrongPhase {
                expected,
                actual: self.status,
            }))
        }
    }

    /// Move one step forward, from `from` to `to`.
    fn advance(
        &mut self,
        caller: &VoterId,
        from: WorkflowStatus,
        to: WorkflowStatus,
    ) -> Result<()> {
        debug_assert_eq!(from.next(), Some(to));
        self.require_administrator(caller)?;
        self.require_status(from)?;
        self.set_status(to);
        Ok(())
    }

    fn set_status(&mut self, new: WorkflowStatus) {
        let previous = std::mem::replace(&mut self.status, new);
        info!("Workflow status changed from `{previous}` to `{new}`");
        self.sink
            .publish(SessionEvent::WorkflowStatusChange { previous, new });
    }
}

/// Log a rejected call and hand the error back.
fn reject(err: SessionError) -> SessionError {
    debug!("Rejected session operation: {err}");
    err
}
