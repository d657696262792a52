#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

/// Assemble the server: configuration, the voting session, request logging, and routes.
pub fn build() -> Rocket<Build> {
    rocket::build()
        .attach(config::ConfigFairing)
        .attach(config::SessionFairing)
        .attach(logging::LoggerFairing)
        .mount("/", api::routes())
}

#[cfg(test)]
pub(crate) mod test_utils {
    use rocket::http::Cookie;
    use rocket::local::asynchronous::Client;
    use voting_session::VoterId;

    use crate::model::auth::{Admin, AuthToken, Voter};
    use crate::Config;

    /// The administrator configured in `Rocket.toml`.
    pub fn admin_id(client: &Client) -> VoterId {
        client
            .rocket()
            .state::<crate::model::state::SessionState>()
            .unwrap()
            .administrator()
    }

    /// Launch a fresh server with its own, empty session.
    pub async fn client() -> Client {
        log4rs_test_utils::test_logging::init_logging_once_for(
            ["voting_backend", "voting_session"],
            None,
            None,
        );
        Client::tracked(crate::build()).await.unwrap()
    }

    pub fn admin_cookie(client: &Client) -> Cookie<'static> {
        let config = client.rocket().state::<Config>().unwrap();
        AuthToken::<Admin>::new(admin_id(client)).into_cookie(config)
    }

    pub fn voter_cookie(client: &Client, voter: VoterId) -> Cookie<'static> {
        let config = client.rocket().state::<Config>().unwrap();
        AuthToken::<Voter>::new(voter).into_cookie(config)
    }
}
