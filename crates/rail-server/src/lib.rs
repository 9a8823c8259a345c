//! HTTP server for the station booking ledger.
//!
//! Exposes every ledger operation as a JSON endpoint. The caller's identity
//! comes from an `Authorization: Bearer <principal>` header, resolved by an
//! [`AuthProvider`]; requests without the header run as the anonymous
//! principal.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{AuthProvider, BearerPrincipalAuth, Caller, Credentials};
pub use config::{ServerConfig, StorageBackend, StorageConfig};
pub use error::{ServerError, ServerResult};
pub use server::RailServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use rail_booking::BookingLedger;
    use rail_store::Stores;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        router::build_router(AppState::new(BookingLedger::new(Stores::in_memory())))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn init(app: &Router) {
        let (status, _) = send(app, "POST", "/v1/station", Some("S"), Some(json!({"name": "Central"}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    fn train_body(capacity: u32) -> Value {
        json!({
            "capacity": capacity,
            "time": "10:00",
            "starting_point": "A",
            "stops": ["B", "C"],
        })
    }

    // ---- Meta ----

    #[tokio::test]
    async fn health_endpoint() {
        let (status, body) = send(&app(), "GET", "/v1/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn info_endpoint() {
        let (status, body) = send(&app(), "GET", "/v1/info", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "rail-server");
    }

    // ---- Station ----

    #[tokio::test]
    async fn station_initializes_once() {
        let app = app();
        let (status, body) = send(&app, "GET", "/v1/station", None, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "not_initialized");

        init(&app).await;
        let (status, body) = send(&app, "GET", "/v1/station", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].is_string());

        let (status, _) =
            send(&app, "POST", "/v1/station", Some("T"), Some(json!({"name": "Other"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn station_responses_hide_the_owner() {
        let app = app();
        let (status, created) = send(
            &app,
            "POST",
            "/v1/station",
            Some("secret-station-key"),
            Some(json!({"name": "Central"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created.get("identity").is_none());

        let (_, fetched) = send(&app, "GET", "/v1/station", None, None).await;
        assert!(fetched.get("identity").is_none());
        assert!(!fetched.to_string().contains("secret-station-key"));

        // Nothing a reader can see grants station rights.
        let station_id = fetched["id"].as_str().unwrap().to_string();
        let (status, _) =
            send(&app, "POST", "/v1/trains", Some(&station_id), Some(train_body(1))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn anonymous_caller_cannot_create_station() {
        let app = app();
        let (status, body) =
            send(&app, "POST", "/v1/station", None, Some(json!({"name": "Central"}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "auth_failed");

        let (status, _) = send(&app, "GET", "/v1/station", None, None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = send(&app, "POST", "/v1/trains", None, Some(train_body(1))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn malformed_authorization_is_rejected() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/v1/station")
            .header("authorization", "Basic abc")
            .header("content-type", "application/json")
            .body(Body::from(json!({"name": "Central"}).to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // ---- Trains ----

    #[tokio::test]
    async fn only_station_adds_trains() {
        let app = app();
        init(&app).await;

        let (status, body) = send(&app, "POST", "/v1/trains", Some("X"), Some(train_body(2))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "unauthorized");

        let (status, _) = send(&app, "POST", "/v1/trains", None, Some(train_body(2))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, "POST", "/v1/trains", Some("S"), Some(train_body(2))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["empty_seats"], 2);
    }

    #[tokio::test]
    async fn invalid_train_is_bad_request() {
        let app = app();
        init(&app).await;
        let (status, body) = send(&app, "POST", "/v1/trains", Some("S"), Some(train_body(0))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_input");
    }

    #[tokio::test]
    async fn update_and_search_trains() {
        let app = app();
        init(&app).await;
        let (_, train) = send(&app, "POST", "/v1/trains", Some("S"), Some(train_body(2))).await;
        let id = train["id"].as_str().unwrap().to_string();

        let update = json!({"id": id, "time": "11:30", "starting_point": "A", "stops": ["D"]});
        let (status, body) = send(&app, "PUT", "/v1/trains", Some("S"), Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["time"], "11:30");
        assert_eq!(body["capacity"], 2);

        let search = json!({"time": "11:30", "starting_point": "A", "destination": "D"});
        let (status, body) = send(&app, "POST", "/v1/trains/search", None, Some(search)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&app, "GET", &format!("/v1/trains/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stops"], json!(["D"]));

        let (status, _) = send(&app, "GET", "/v1/trains/missing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ---- Booking ----

    #[tokio::test]
    async fn booking_flow() {
        let app = app();
        init(&app).await;
        let (_, train) = send(&app, "POST", "/v1/trains", Some("S"), Some(train_body(1))).await;
        let train_id = train["id"].as_str().unwrap().to_string();

        let (status, traveller) = send(
            &app,
            "POST",
            "/v1/travellers",
            None,
            Some(json!({"name": "Ada", "phone": "555-0100"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let traveller_id = traveller["id"].as_str().unwrap().to_string();

        let ticket_body = json!({
            "time": "10:00",
            "train_id": train_id,
            "traveller_id": traveller_id,
            "boarding": "A",
            "destination": "C",
        });
        let (status, ticket) =
            send(&app, "POST", "/v1/tickets", None, Some(ticket_body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(ticket["seat_no"], 0);
        assert_eq!(ticket["traveller"]["name"], "Ada");

        let (status, body) = send(&app, "POST", "/v1/tickets", None, Some(ticket_body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "full");

        let (status, _) = send(&app, "GET", "/v1/trains/available", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let ticket_id = ticket["id"].as_str().unwrap();
        let (status, body) = send(&app, "GET", &format!("/v1/tickets/{ticket_id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["train_id"], train_id.as_str());

        let (_, body) =
            send(&app, "GET", &format!("/v1/trains/{train_id}/tickets"), None, None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) =
            send(&app, "GET", &format!("/v1/trains/{train_id}/travellers"), None, None).await;
        assert_eq!(body[0]["id"], traveller_id.as_str());

        let (_, body) =
            send(&app, "GET", &format!("/v1/travellers/{traveller_id}/tickets"), None, None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) =
            send(&app, "GET", &format!("/v1/travellers/{traveller_id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phone"], "555-0100");
    }

    #[tokio::test]
    async fn traveller_before_station_is_conflict() {
        let (status, _) = send(
            &app(),
            "POST",
            "/v1/travellers",
            None,
            Some(json!({"name": "Ada", "phone": "1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
