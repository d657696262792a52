use rocket::{serde::json::Json, Route, State};
use voting_session::VoterId;

use crate::{
    error::Result,
    model::{
        api::{
            proposal::{ProposalDesc, ProposalRef, ProposalSubmission},
            vote::Ballot,
            voter::VoterDesc,
        },
        auth::{AuthToken, Voter},
        state::SessionState,
    },
};

pub fn routes() -> Vec<Route> {
    routes![add_proposal, get_proposals, add_vote, get_voter, get_winner]
}

#[post("/proposals", data = "<submission>", format = "json")]
pub(crate) async fn add_proposal(
    token: AuthToken<Voter>,
    submission: Json<ProposalSubmission>,
    session: &State<SessionState>,
) -> Result<Json<ProposalRef>> {
    let submission = submission.into_inner();
    if let Some(value) = submission.value {
        debug!("Ignoring value {value} sent with proposal from {}", token.id);
    }
    let id = session
        .lock()
        .await
        .add_proposal(&token.id, submission.description)?;
    Ok(Json(ProposalRef { id }))
}

#[get("/proposals")]
async fn get_proposals(
    token: AuthToken<Voter>,
    session: &State<SessionState>,
) -> Result<Json<Vec<ProposalDesc>>> {
    let session = session.lock().await;
    let proposals = session
        .proposals(&token.id)?
        .iter()
        .enumerate()
        .map(|(id, proposal)| ProposalDesc::new(id, proposal))
        .collect();
    Ok(Json(proposals))
}

#[post("/votes", data = "<ballot>", format = "json")]
pub(crate) async fn add_vote(
    token: AuthToken<Voter>,
    ballot: Json<Ballot>,
    session: &State<SessionState>,
) -> Result<()> {
    if let Some(value) = ballot.value {
        debug!("Ignoring value {value} sent with vote from {}", token.id);
    }
    session
        .lock()
        .await
        .add_vote(&token.id, ballot.proposal_id)?;
    Ok(())
}

#[get("/voters/<voter>")]
async fn get_voter(
    token: AuthToken<Voter>,
    voter: &str,
    session: &State<SessionState>,
) -> Result<Json<VoterDesc>> {
    let voter: VoterId = voter.parse()?;
    let session = session.lock().await;
    let record = session.voter(&token.id, &voter)?;
    Ok(Json(VoterDesc::new(voter, record)))
}

#[get("/winner")]
async fn get_winner(
    token: AuthToken<Voter>,
    session: &State<SessionState>,
) -> Result<Json<ProposalDesc>> {
    let session = session.lock().await;
    let (id, proposal) = session.winning_proposal(&token.id)?;
    Ok(Json(ProposalDesc::new(id, proposal)))
}
