use log::info;
use serde::{Deserialize, Serialize};

use crate::{identity::VoterId, proposal::ProposalId, workflow::WorkflowStatus};

/// Notifications emitted after each successful state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    VoterRegistered {
        voter: VoterId,
    },
    VoterRevoked {
        voter: VoterId,
    },
    WorkflowStatusChange {
        previous: WorkflowStatus,
        new: WorkflowStatus,
    },
    ProposalRegistered {
        proposal_id: ProposalId,
    },
    Voted {
        voter: VoterId,
        proposal_id: ProposalId,
    },
    /// Proposals, votes and the winner were cleared by the administrator.
    SessionReset,
}

/// Receives session notifications. Delivery and durability are up to the implementor.
pub trait EventSink {
    fn publish(&mut self, event: SessionEvent);
}

/// A sink that writes every event to the log and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&mut self, event: SessionEvent) {
        info!("Session event: {event:?}");
    }
}

/// Collects events in order; handy for inspecting what a session emitted.
impl EventSink for Vec<SessionEvent> {
    fn publish(&mut self, event: SessionEvent) {
        self.push(event);
    }
}

impl<S> EventSink for &mut S
where
    S: EventSink + ?Sized,
{
    fn publish(&mut self, event: SessionEvent) {
        (**self).publish(event)
    }
}
