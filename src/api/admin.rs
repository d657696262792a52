use rocket::{serde::json::Json, Route, State};
use voting_session::VoterId;

use crate::{
    error::Result,
    model::{
        api::{session::SessionDesc, voter::VoterRegistration},
        auth::{Admin, AuthToken},
        state::SessionState,
    },
};

pub fn routes() -> Vec<Route> {
    routes![
        register_voter,
        revoke_voter,
        start_proposals_registration,
        end_proposals_registration,
        start_voting_session,
        end_voting_session,
        tally_votes,
        reset_session,
    ]
}

#[post("/admin/voters", data = "<registration>", format = "json")]
pub(crate) async fn register_voter(
    token: AuthToken<Admin>,
    registration: Json<VoterRegistration>,
    session: &State<SessionState>,
) -> Result<()> {
    let voter: VoterId = registration.voter.parse()?;
    session.lock().await.register_voter(&token.id, voter)?;
    Ok(())
}

#[delete("/admin/voters/<voter>")]
pub(crate) async fn revoke_voter(
    token: AuthToken<Admin>,
    voter: &str,
    session: &State<SessionState>,
) -> Result<()> {
    let voter: VoterId = voter.parse()?;
    session.lock().await.revoke_voter(&token.id, voter)?;
    Ok(())
}

#[post("/admin/session/proposals/start")]
pub(crate) async fn start_proposals_registration(
    token: AuthToken<Admin>,
    session: &State<SessionState>,
) -> Result<Json<SessionDesc>> {
    let mut session = session.lock().await;
    session.start_proposals_registration(&token.id)?;
    Ok(Json((&*session).into()))
}

#[post("/admin/session/proposals/end")]
pub(crate) async fn end_proposals_registration(
    token: AuthToken<Admin>,
    session: &State<SessionState>,
) -> Result<Json<SessionDesc>> {
    let mut session = session.lock().await;
    session.end_proposals_registration(&token.id)?;
    Ok(Json((&*session).into()))
}

#[post("/admin/session/voting/start")]
pub(crate) async fn start_voting_session(
    token: AuthToken<Admin>,
    session: &State<SessionState>,
) -> Result<Json<SessionDesc>> {
    let mut session = session.lock().await;
    session.start_voting_session(&token.id)?;
    Ok(Json((&*session).into()))
}

#[post("/admin/session/voting/end")]
pub(crate) async fn end_voting_session(
    token: AuthToken<Admin>,
    session: &State<SessionState>,
) -> Result<Json<SessionDesc>> {
    let mut session = session.lock().await;
    session.end_voting_session(&token.id)?;
    Ok(Json((&*session).into()))
}

#[post("/admin/session/tally")]
pub(crate) async fn tally_votes(
    token: AuthToken<Admin>,
    session: &State<SessionState>,
) -> Result<Json<SessionDesc>> {
    let mut session = session.lock().await;
    session.tally_votes(&token.id)?;
    Ok(Json((&*session).into()))
}

#[post("/admin/session/reset")]
pub(crate) async fn reset_session(
    token: AuthToken<Admin>,
    session: &State<SessionState>,
) -> Result<Json<SessionDesc>> {
    let mut session = session.lock().await;
    session.reset(&token.id)?;
    Ok(Json((&*session).into()))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json,
    };
    use voting_session::WorkflowStatus;

    use crate::api::test_helpers::{admin_post, open_voting, register, session, vote};
    use crate::model::api::proposal::ProposalDesc;
    use crate::test_utils::{admin_cookie, client, voter_cookie};
    use crate::Config;

    use super::*;

    async fn revoke(client: &Client, voter: &str) -> Status {
        client
            .delete(format!("/admin/voters/{voter}"))
            .cookie(admin_cookie(client))
            .dispatch()
            .await
            .status()
    }

    async fn winner(client: &Client, voter: VoterId) -> ProposalDesc {
        let response = client
            .get("/winner")
            .cookie(voter_cookie(client, voter))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        response.into_json().await.unwrap()
    }

    #[rocket::async_test]
    async fn register_and_revoke() {
        let client = client().await;
        let voter = VoterId::example(1);

        assert_eq!(register(&client, voter).await, Status::Ok);
        assert_eq!(register(&client, voter).await, Status::Conflict);
        assert_eq!(client_voter_count(&client).await, 1);

        assert_eq!(revoke(&client, &voter.to_string()).await, Status::Ok);
        assert_eq!(revoke(&client, &voter.to_string()).await, Status::NotFound);
        assert_eq!(client_voter_count(&client).await, 0);
    }

    async fn client_voter_count(client: &Client) -> usize {
        client
            .rocket()
            .state::<SessionState>()
            .unwrap()
            .lock()
            .await
            .voter_count()
    }

    #[rocket::async_test]
    async fn bad_identities() {
        let client = client().await;
        assert_eq!(revoke(&client, "not-an-address").await, Status::BadRequest);
        assert_eq!(revoke(&client, "0x1234").await, Status::BadRequest);

        // Malformed identities in a body are rejected the same way as in a path.
        for voter in ["0x1234", "not-an-address", "0xab000000000000000000000000000000000000zz"] {
            let response = client
                .post(uri!(register_voter))
                .header(ContentType::JSON)
                .cookie(admin_cookie(&client))
                .body(format!(r#"{{"voter": "{voter}"}}"#))
                .dispatch()
                .await;
            assert_eq!(response.status(), Status::BadRequest);
        }
        assert_eq!(client_voter_count(&client).await, 0);

        // Upper-case hex names the same voter.
        let upper = VoterId::example(10).to_string().to_uppercase().replacen("0X", "0x", 1);
        let response = client
            .post(uri!(register_voter))
            .header(ContentType::JSON)
            .cookie(admin_cookie(&client))
            .body(format!(r#"{{"voter": "{upper}"}}"#))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(register(&client, VoterId::example(10)).await, Status::Conflict);
    }

    #[rocket::async_test]
    async fn admin_routes_need_admin() {
        let client = client().await;
        let voter = VoterId::example(1);
        let body = serde_json::to_string(&VoterRegistration::example(voter)).unwrap();

        // No token at all.
        let response = client
            .post(uri!(register_voter))
            .header(ContentType::JSON)
            .body(&body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Unauthorized);

        // A voter token.
        let response = client
            .post(uri!(register_voter))
            .header(ContentType::JSON)
            .cookie(voter_cookie(&client, voter))
            .body(&body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Forbidden);

        // Admin rights, but not the session's administrator.
        let config = client.rocket().state::<Config>().unwrap();
        let impostor = AuthToken::<Admin>::new(VoterId::example(99)).into_cookie(config);
        let response = client
            .post(uri!(register_voter))
            .header(ContentType::JSON)
            .cookie(impostor.clone())
            .body(&body)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Forbidden);
        let response = client
            .post(uri!(start_proposals_registration))
            .cookie(impostor)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Forbidden);

        assert_eq!(client_voter_count(&client).await, 0);
        assert_eq!(
            session(&client).await.status,
            WorkflowStatus::RegisteringVoters
        );
    }

    #[rocket::async_test]
    async fn workflow_in_order() {
        let client = client().await;
        assert_eq!(register(&client, VoterId::example(1)).await, Status::Ok);

        // Skipping ahead is refused.
        for path in [
            "/admin/session/proposals/end",
            "/admin/session/voting/start",
            "/admin/session/voting/end",
            "/admin/session/tally",
            "/admin/session/reset",
        ] {
            assert_eq!(admin_post(&client, path).await, Status::Conflict);
        }
        assert_eq!(
            session(&client).await.status,
            WorkflowStatus::RegisteringVoters
        );

        let response = client
            .post(uri!(start_proposals_registration))
            .cookie(admin_cookie(&client))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let desc: SessionDesc = response.into_json().await.unwrap();
        assert_eq!(desc.status, WorkflowStatus::ProposalsRegistrationStarted);
        assert_eq!(desc.status_code, 1);
        assert_eq!(desc.description, "Proposals registration started");

        // Going again is refused, as is going backwards.
        assert_eq!(
            admin_post(&client, "/admin/session/proposals/start").await,
            Status::Conflict
        );
        crate::api::test_helpers::submit(&client, VoterId::example(1), "Proposal").await;

        assert_eq!(admin_post(&client, "/admin/session/proposals/end").await, Status::Ok);
        assert_eq!(admin_post(&client, "/admin/session/voting/start").await, Status::Ok);
        assert_eq!(admin_post(&client, "/admin/session/voting/end").await, Status::Ok);
        assert_eq!(
            admin_post(&client, "/admin/session/proposals/start").await,
            Status::Conflict
        );
        assert_eq!(admin_post(&client, "/admin/session/tally").await, Status::Ok);

        let desc = session(&client).await;
        assert_eq!(desc.status, WorkflowStatus::VotesTallied);
        assert_eq!(desc.winning_proposal_id, Some(0));
    }

    #[rocket::async_test]
    async fn tally_without_proposals() {
        let client = client().await;
        for path in [
            "/admin/session/proposals/start",
            "/admin/session/proposals/end",
            "/admin/session/voting/start",
            "/admin/session/voting/end",
        ] {
            assert_eq!(admin_post(&client, path).await, Status::Ok);
        }
        assert_eq!(
            admin_post(&client, "/admin/session/tally").await,
            Status::UnprocessableEntity
        );
        assert_eq!(
            session(&client).await.status,
            WorkflowStatus::VotingSessionEnded
        );
    }

    #[rocket::async_test]
    async fn revoke_after_tally_changes_winner() {
        let client = client().await;
        open_voting(&client, 3, &["A", "B"]).await;
        assert_eq!(vote(&client, VoterId::example(1), 1).await, Status::Ok);
        assert_eq!(vote(&client, VoterId::example(2), 1).await, Status::Ok);
        assert_eq!(vote(&client, VoterId::example(3), 0).await, Status::Ok);
        assert_eq!(admin_post(&client, "/admin/session/voting/end").await, Status::Ok);
        assert_eq!(admin_post(&client, "/admin/session/tally").await, Status::Ok);

        let won = winner(&client, VoterId::example(3)).await;
        assert_eq!((won.id, won.description.as_str(), won.vote_count), (1, "B", 2));

        // B drops to a tie with A, and A has the lower index.
        assert_eq!(
            revoke(&client, &VoterId::example(2).to_string()).await,
            Status::Ok
        );
        let won = winner(&client, VoterId::example(3)).await;
        assert_eq!((won.id, won.description.as_str(), won.vote_count), (0, "A", 1));
        assert_eq!(session(&client).await.winning_proposal_id, Some(0));
    }

    #[rocket::async_test]
    async fn reset_starts_new_round() {
        let client = client().await;
        open_voting(&client, 2, &["A"]).await;
        assert_eq!(vote(&client, VoterId::example(1), 0).await, Status::Ok);
        assert_eq!(admin_post(&client, "/admin/session/voting/end").await, Status::Ok);
        assert_eq!(admin_post(&client, "/admin/session/tally").await, Status::Ok);

        let response = client
            .post(uri!(reset_session))
            .cookie(admin_cookie(&client))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let desc: SessionDesc = response.into_json().await.unwrap();
        assert_eq!(desc.status, WorkflowStatus::RegisteringVoters);
        assert_eq!(desc.winning_proposal_id, None);

        // Voters stay registered and may vote again in the next round.
        assert_eq!(client_voter_count(&client).await, 2);
        assert_eq!(register(&client, VoterId::example(1)).await, Status::Conflict);
    }
}
