//! Request handlers. Each one decodes its payload, runs the matching ledger
//! operation on the blocking pool, and encodes the result as JSON.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rail_types::{
    Station, Ticket, TicketPayload, Train, TrainPayload, TrainSearchPayload, TrainUpdatePayload,
    Traveller, TravellerPayload,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::Caller;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct InitStationRequest {
    pub name: String,
}

/// Public view of the station. The owning principal is never sent back: it
/// is the credential for every station-only operation.
#[derive(Debug, Deserialize, Serialize)]
pub struct StationView {
    pub id: String,
}

impl From<Station> for StationView {
    fn from(station: Station) -> Self {
        Self { id: station.id }
    }
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": "rail-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Station ----

pub async fn init_station(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(request): Json<InitStationRequest>,
) -> ServerResult<(StatusCode, Json<StationView>)> {
    if caller.is_anonymous() {
        return Err(ServerError::AuthFailed(
            "station initialization requires credentials".into(),
        ));
    }
    let station = state
        .run(move |ledger| ledger.init_station(&request.name, &caller))
        .await?;
    Ok((StatusCode::CREATED, Json(station.into())))
}

pub async fn get_station(State(state): State<AppState>) -> ServerResult<Json<StationView>> {
    let station = state.run(|ledger| ledger.station()).await?;
    Ok(Json(station.into()))
}

// ---- Trains ----

pub async fn add_train(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(payload): Json<TrainPayload>,
) -> ServerResult<(StatusCode, Json<Train>)> {
    let train = state
        .run(move |ledger| ledger.add_train(&payload, &caller))
        .await?;
    Ok((StatusCode::CREATED, Json(train)))
}

pub async fn update_train(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Json(payload): Json<TrainUpdatePayload>,
) -> ServerResult<Json<Train>> {
    let train = state
        .run(move |ledger| ledger.update_train(&payload, &caller))
        .await?;
    Ok(Json(train))
}

pub async fn get_train(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Train>> {
    Ok(Json(state.run(move |ledger| ledger.get_train_by_id(&id)).await?))
}

pub async fn trains_with_empty_seats(
    State(state): State<AppState>,
) -> ServerResult<Json<Vec<Train>>> {
    Ok(Json(state.run(|ledger| ledger.trains_with_empty_seats()).await?))
}

pub async fn search_trains(
    State(state): State<AppState>,
    Json(query): Json<TrainSearchPayload>,
) -> ServerResult<Json<Vec<Train>>> {
    Ok(Json(state.run(move |ledger| ledger.search_trains(&query)).await?))
}

pub async fn travellers_by_train(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Traveller>>> {
    Ok(Json(state.run(move |ledger| ledger.travellers_by_train(&id)).await?))
}

pub async fn tickets_by_train(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Ticket>>> {
    Ok(Json(state.run(move |ledger| ledger.tickets_by_train(&id)).await?))
}

// ---- Travellers ----

pub async fn add_traveller(
    State(state): State<AppState>,
    Json(payload): Json<TravellerPayload>,
) -> ServerResult<(StatusCode, Json<Traveller>)> {
    let traveller = state.run(move |ledger| ledger.add_traveller(&payload)).await?;
    Ok((StatusCode::CREATED, Json(traveller)))
}

pub async fn get_traveller(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Traveller>> {
    Ok(Json(state.run(move |ledger| ledger.get_traveller_by_id(&id)).await?))
}

pub async fn tickets_by_traveller(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Vec<Ticket>>> {
    Ok(Json(state.run(move |ledger| ledger.tickets_by_traveller(&id)).await?))
}

// ---- Tickets ----

pub async fn add_ticket(
    State(state): State<AppState>,
    Json(payload): Json<TicketPayload>,
) -> ServerResult<(StatusCode, Json<Ticket>)> {
    let ticket = state.run(move |ledger| ledger.add_ticket(&payload)).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Ticket>> {
    Ok(Json(state.run(move |ledger| ledger.ticket_by_id(&id)).await?))
}
