//! HttpAddressLookup against an in-process backend.
//!
//! Spins up a small axum app on an ephemeral port that mimics the
//! `/api/getAddresses` endpoint.

use address_book::{
    AddressForm, AddressLookup, AddressQuery, Config, HttpAddressLookup, LookupError,
    LookupOutcome,
};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;

async fn get_addresses(Query(params): Query<HashMap<String, String>>) -> Response {
    let postcode = params.get("postcode").cloned().unwrap_or_default();
    let streetnumber = params.get("streetnumber").cloned().unwrap_or_default();

    match postcode.as_str() {
        "1345" => Json(json!({
            "status": "ok",
            "details": [
                { "street": "Lindengracht", "postcode": "1345", "city": "Amsterdam", "echo": streetnumber },
                { "street": "Westerstraat", "postcode": "1345", "city": "Amsterdam", "echo": streetnumber }
            ]
        }))
        .into_response(),
        "0000" => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "errormessage": "Postcode not found" })),
        )
            .into_response(),
        "html" => (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").into_response(),
        _ => Json(json!({ "status": "ok" })).into_response(),
    }
}

async fn spawn_backend() -> SocketAddr {
    let app = Router::new().route("/api/getAddresses", get(get_addresses));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> HttpAddressLookup {
    let config = Config::new(&format!("http://{}", addr)).unwrap();
    HttpAddressLookup::new(&config).unwrap()
}

#[tokio::test]
async fn test_success_body_is_decoded() {
    let client = client_for(spawn_backend().await);

    let response = client
        .lookup(&AddressQuery::new("1345", "350"))
        .await
        .unwrap();
    let outcome = response.into_outcome("350");

    let candidates = outcome.candidates();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].street, "Lindengracht");
    assert_eq!(candidates[0].house_number, "350");
}

#[tokio::test]
async fn test_query_parameters_reach_backend() {
    let client = client_for(spawn_backend().await);

    let response = client
        .lookup(&AddressQuery::new("1345", "12b"))
        .await
        .unwrap();
    let details = response.details.unwrap();
    assert_eq!(details[0]["echo"], "12b");
}

#[tokio::test]
async fn test_error_body_on_non_success_status_is_still_read() {
    let client = client_for(spawn_backend().await);

    let response = client
        .lookup(&AddressQuery::new("0000", "1"))
        .await
        .unwrap();
    assert!(response.is_error());
    assert!(matches!(
        response.into_outcome("1"),
        LookupOutcome::Failed(e) if e.to_string() == "Postcode not found"
    ));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let client = client_for(spawn_backend().await);

    let err = client
        .lookup(&AddressQuery::new("html", "1"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr)
        .lookup(&AddressQuery::new("1345", "350"))
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
}

#[tokio::test]
async fn test_form_against_http_backend() {
    let client = client_for(spawn_backend().await);
    let mut form = AddressForm::new();

    form.on_change("postCode", "1345");
    form.on_change("houseNumber", "350");
    form.submit_lookup(&client).await;
    assert_eq!(form.candidates().len(), 2);

    form.on_change("postCode", "9999");
    form.submit_lookup(&client).await;
    assert!(form.candidates().is_empty());
    assert!(form.error().is_none());

    form.on_change("postCode", "0000");
    form.submit_lookup(&client).await;
    assert_eq!(form.error_message().as_deref(), Some("Postcode not found"));
}
