// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use crate::credentials::{LOGIN_HEADER, PASSWORD_HEADER};
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_LOGIN: &str = "ops";
const PASSWORD: &str = "Tower-Control-42";

/// Helper to create test app state with one Administrator.
fn create_test_app_state(read_mode: ReadMode) -> AppState {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    airops_api::bootstrap_administrator(&mut persistence, ADMIN_LOGIN, PASSWORD)
        .expect("Failed to bootstrap administrator");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: ApiConfig { read_mode },
    }
}

fn create_test_app() -> Router {
    build_router(create_test_app_state(ReadMode::Strict))
}

fn request(method: &str, uri: &str, login: &str, body: Option<&Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(LOGIN_HEADER, login)
        .header(PASSWORD_HEADER, PASSWORD);
    match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (HttpStatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

async fn create_flight(app: &Router, code: &str, total_seats: u32) {
    let body = json!({
        "code": code,
        "carrier": "Airops Air",
        "origin": "FCO",
        "destination": "LIN",
        "date": "2026-03-14",
        "departure_time": "09:30",
        "total_seats": total_seats,
    });
    let (status, _) = send(app, request("POST", "/flights", ADMIN_LOGIN, Some(&body))).await;
    assert_eq!(status, HttpStatusCode::OK);
}

async fn create_agent(app: &Router, login: &str) {
    let body = json!({
        "login": login,
        "name": "Gate",
        "surname": "Agent",
        "role": "Generic",
        "password": PASSWORD,
    });
    let (status, _) = send(app, request("POST", "/users", ADMIN_LOGIN, Some(&body))).await;
    assert_eq!(status, HttpStatusCode::OK);
}

fn booking_body(ticket: &str, seat: &str, baggage: &[&str]) -> Value {
    json!({
        "ticket_number": ticket,
        "flight_code": "AZ100",
        "seat_label": seat,
        "passenger": {
            "name": "Grace",
            "surname": "Hopper",
            "document_number": "P1234567",
        },
        "baggage_codes": baggage,
    })
}

#[tokio::test]
async fn test_missing_credentials_is_unauthorized() {
    let app: Router = create_test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/baggage/lost")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app: Router = create_test_app();

    let req = Request::builder()
        .method("GET")
        .uri("/baggage/lost")
        .header(LOGIN_HEADER, ADMIN_LOGIN)
        .header(PASSWORD_HEADER, "Not-The-Password-1")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_creates_flight_and_reads_seat_map() {
    let app: Router = create_test_app();
    create_flight(&app, "AZ100", 16).await;

    let (status, body) = send(
        &app,
        request("GET", "/flights/AZ100/seats", ADMIN_LOGIN, None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    let seats = body["seats"].as_array().unwrap();
    assert_eq!(seats.len(), 16);
    assert_eq!(seats[0]["label"], "1A");
    assert_eq!(seats[15]["label"], "3D");
    assert_eq!(body["free_seats"], 16);
}

#[tokio::test]
async fn test_generic_user_cannot_create_flight() {
    let app: Router = create_test_app();
    create_agent(&app, "agent").await;

    let body = json!({
        "code": "AZ100",
        "carrier": "Airops Air",
        "origin": "FCO",
        "destination": "LIN",
        "date": "2026-03-14",
        "departure_time": "09:30",
        "total_seats": 16,
    });
    let (status, _) = send(&app, request("POST", "/flights", "agent", Some(&body))).await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_weak_password_is_bad_request() {
    let app: Router = create_test_app();

    let body = json!({
        "login": "agent",
        "name": "Gate",
        "surname": "Agent",
        "role": "Generic",
        "password": "short",
    });
    let (status, body) = send(&app, request("POST", "/users", ADMIN_LOGIN, Some(&body))).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Credential policy violation")
    );
}

#[tokio::test]
async fn test_bad_flight_date_is_bad_request() {
    let app: Router = create_test_app();

    let body = json!({
        "code": "AZ100",
        "carrier": "Airops Air",
        "origin": "FCO",
        "destination": "LIN",
        "date": "not-a-date",
        "departure_time": "09:30",
        "total_seats": 16,
    });
    let (status, _) = send(&app, request("POST", "/flights", ADMIN_LOGIN, Some(&body))).await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booking_lifecycle_over_http() {
    let app: Router = create_test_app();
    create_agent(&app, "agent").await;
    create_flight(&app, "AZ100", 16).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/bookings",
            "agent",
            Some(&booking_body("TK-1", "1A", &["BAG-1"])),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["ticket_number"], "TK-1");

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/bookings",
            "agent",
            Some(&booking_body("TK-2", "1A", &[])),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (status, body) = send(
        &app,
        request("GET", "/users/agent/bookings", "agent", None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    let bookings = body["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["baggage"][0]["code"], "BAG-1");

    let (status, body) = send(
        &app,
        request("POST", "/bookings/TK-1/cancel", "agent", None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "cancelled");

    let (status, _) = send(
        &app,
        request("POST", "/bookings/TK-1/cancel", "agent", None),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);

    let (_, body) = send(
        &app,
        request("GET", "/flights/AZ100/seats", "agent", None),
    )
    .await;
    assert_eq!(body["free_seats"], 16);
}

#[tokio::test]
async fn test_other_users_bookings_are_forbidden() {
    let app: Router = create_test_app();
    create_agent(&app, "agent").await;
    create_agent(&app, "other").await;

    let (status, _) = send(
        &app,
        request("GET", "/users/agent/bookings", "other", None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_booking_status_over_http() {
    let app: Router = create_test_app();
    create_flight(&app, "AZ100", 16).await;
    send(
        &app,
        request(
            "POST",
            "/bookings",
            ADMIN_LOGIN,
            Some(&booking_body("TK-1", "2B", &[])),
        ),
    )
    .await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/bookings/TK-1/status",
            ADMIN_LOGIN,
            Some(&json!({ "status": "confirmed" })),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
async fn test_unknown_flight_seat_map_is_not_found() {
    let app: Router = create_test_app();

    let (status, _) = send(
        &app,
        request("GET", "/flights/ZZ999/seats", ADMIN_LOGIN, None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lenient_reads_return_empty_seat_map() {
    let app: Router = build_router(create_test_app_state(ReadMode::Lenient));

    let (status, body) = send(
        &app,
        request("GET", "/flights/ZZ999/seats", ADMIN_LOGIN, None),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert!(body["seats"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_gate_conflict_over_http() {
    let app: Router = create_test_app();
    create_flight(&app, "AZ100", 16).await;
    create_flight(&app, "AZ200", 16).await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/gates",
            ADMIN_LOGIN,
            Some(&json!({ "gate_number": 7 })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let hold = json!({ "gate_number": 7 });
    let (status, body) = send(
        &app,
        request("POST", "/flights/AZ100/gate", ADMIN_LOGIN, Some(&hold)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["flight"]["gate"], 7);

    let (status, _) = send(
        &app,
        request("POST", "/flights/AZ200/gate", ADMIN_LOGIN, Some(&hold)),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
}

#[tokio::test]
async fn test_flight_status_update_over_http() {
    let app: Router = create_test_app();
    create_flight(&app, "AZ100", 16).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/flights/AZ100/status",
            ADMIN_LOGIN,
            Some(&json!({ "status": "delayed", "delay_minutes": 20 })),
        ),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["flight"]["status"], "delayed");
    assert_eq!(body["flight"]["delay_minutes"], 20);
}

#[tokio::test]
async fn test_baggage_flow_over_http() {
    let app: Router = create_test_app();
    create_flight(&app, "AZ100", 16).await;
    send(
        &app,
        request(
            "POST",
            "/bookings",
            ADMIN_LOGIN,
            Some(&booking_body("TK-1", "1A", &["BAG-1", "BAG-2"])),
        ),
    )
    .await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/baggage",
            ADMIN_LOGIN,
            Some(&json!({ "code": "LOOSE-1" })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/flights/AZ100/baggage/status",
            ADMIN_LOGIN,
            Some(&json!({ "status": "loaded" })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["updated"], 2);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/baggage/BAG-2/status",
            ADMIN_LOGIN,
            Some(&json!({ "status": "lost" })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = send(&app, request("GET", "/baggage/lost", ADMIN_LOGIN, None)).await;
    assert_eq!(status, HttpStatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["code"], "BAG-2");

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/baggage/BAG-2/status",
            ADMIN_LOGIN,
            Some(&json!({ "status": "misplaced" })),
        ),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bootstrap_skipped_when_users_exist() {
    let app_state: AppState = create_test_app_state(ReadMode::Strict);
    let mut persistence = app_state.persistence.lock().await;

    let created =
        airops_api::bootstrap_administrator(&mut persistence, "second", PASSWORD).unwrap();

    assert!(!created);
    assert_eq!(persistence.count_users().unwrap(), 1);
}
