use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all ledger endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route(
            "/v1/station",
            get(handler::get_station).post(handler::init_station),
        )
        .route(
            "/v1/trains",
            post(handler::add_train).put(handler::update_train),
        )
        .route("/v1/trains/available", get(handler::trains_with_empty_seats))
        .route("/v1/trains/search", post(handler::search_trains))
        .route("/v1/trains/:id", get(handler::get_train))
        .route("/v1/trains/:id/tickets", get(handler::tickets_by_train))
        .route("/v1/trains/:id/travellers", get(handler::travellers_by_train))
        .route("/v1/travellers", post(handler::add_traveller))
        .route("/v1/travellers/:id", get(handler::get_traveller))
        .route("/v1/travellers/:id/tickets", get(handler::tickets_by_traveller))
        .route("/v1/tickets", post(handler::add_ticket))
        .route("/v1/tickets/:id", get(handler::get_ticket))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
