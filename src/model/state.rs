use rocket::tokio::sync::{Mutex, MutexGuard};
use voting_session::{VoterId, VotingSession};

use super::journal::EventJournal;

/// The session as hosted by the server, with every event kept in a journal.
pub type HostedSession = VotingSession<EventJournal>;

/// Managed state holding the one voting session.
///
/// Each request locks the whole session for the duration of its operation, so
/// a multi-step change such as recording a vote and bumping its count is never
/// observed half-done.
pub struct SessionState {
    administrator: VoterId,
    session: Mutex<HostedSession>,
}

impl SessionState {
    pub fn new(administrator: VoterId) -> Self {
        Self {
            administrator,
            session: Mutex::new(VotingSession::new(administrator, EventJournal::default())),
        }
    }

    /// The administrator, readable without taking the lock.
    pub fn administrator(&self) -> VoterId {
        self.administrator
    }

    pub async fn lock(&self) -> MutexGuard<'_, HostedSession> {
        self.session.lock().await
    }
}
