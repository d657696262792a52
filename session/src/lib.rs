//! A permissioned voting session.
//!
//! An administrator registers voters and walks the session through a fixed sequence of
//! phases: proposals are collected, votes are cast, and a tally selects the proposal with
//! the most votes. [`VotingSession`] owns all of the state and enforces who may do what,
//! and when; every successful change is announced to an [`EventSink`].

mod error;
mod event;
mod identity;
mod proposal;
mod session;
mod voter;
mod workflow;

pub use error::{Result, SessionError};
pub use event::{EventSink, LogSink, SessionEvent};
pub use identity::{IdentityError, VoterId, IDENTITY_LENGTH};
pub use proposal::{select_winner, Proposal, ProposalId};
pub use session::VotingSession;
pub use voter::Voter;
pub use workflow::{describe_status_code, WorkflowStatus, UNKNOWN_STATUS, WORKFLOW};
