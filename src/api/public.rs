use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    model::{
        api::{
            pagination::{Paginated, PaginationRequest},
            proposal::ProposalRef,
            session::SessionDesc,
        },
        journal::JournalEntry,
        state::SessionState,
    },
};

pub fn routes() -> Vec<Route> {
    routes![session, search_proposal, events]
}

#[get("/session")]
pub(crate) async fn session(session: &State<SessionState>) -> Json<SessionDesc> {
    Json((&*session.lock().await).into())
}

/// Look up the first proposal with exactly this description.
#[get("/proposals/search?<description>")]
async fn search_proposal(
    description: &str,
    session: &State<SessionState>,
) -> Result<Json<ProposalRef>> {
    let id = session.lock().await.find_proposal_id(description)?;
    Ok(Json(ProposalRef { id }))
}

/// One page of what the session has announced, optionally starting from a sequence number.
#[get("/events?<since>&<pagination..>")]
async fn events(
    since: Option<u64>,
    pagination: PaginationRequest,
    session: &State<SessionState>,
) -> Json<Paginated<JournalEntry>> {
    let session = session.lock().await;
    let entries = session.sink().since(since.unwrap_or(0));
    Json(pagination.to_paginated(entries.len(), pagination.page_of(entries)))
}
