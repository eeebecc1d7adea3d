use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::tracker::router::{delete_handler, get_handler};
use crate::tracker::ScholarshipService;

fn json_request(method: &str, uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn create_route_returns_created_record_with_defaults() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/scholarships",
            &json!({
                "scholarshipName": "Fulbright",
                "universityName": "Columbia University",
                "country": "United States",
                "fundingType": "Full",
                "deadline": "2026-10-01T00:00:00.000Z"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], json!(1));
    assert_eq!(payload["status"], json!("Not Started"));
    assert_eq!(payload["documentsDone"], json!([]));
    assert_eq!(payload["deadline"], json!("2026-10-01"));
    assert_eq!(payload["portalSignup"], json!(false));
}

#[tokio::test]
async fn create_route_reports_the_invalid_field() {
    let (service, store) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/scholarships",
            &json!({
                "scholarshipName": "Fulbright",
                "universityName": "Columbia University",
                "country": "United States",
                "fundingType": "Loan"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("fundingType"));
    assert!(payload["message"].as_str().is_some());
    assert!(store.is_empty().expect("store readable"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/scholarships")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"scholarshipName\": "))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["message"].as_str().is_some());
}

#[tokio::test]
async fn list_route_filters_by_search_and_status() {
    let (service, _) = build_service();
    service.create(gates_draft()).expect("create succeeds");
    service.create(daad_draft()).expect("create succeeds");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/scholarships"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let names: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|entry| entry["scholarshipName"].as_str())
        .collect();
    assert_eq!(names, vec!["Gates Cambridge", "DAAD EPOS"]);

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/scholarships?search=MUNICH&status=In%20Progress",
        ))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["universityName"], json!("TU Munich"));
}

#[tokio::test]
async fn list_route_treats_blank_status_as_no_filter() {
    let (service, _) = build_service();
    service.create(gates_draft()).expect("create succeeds");
    service.create(daad_draft()).expect("create succeeds");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/scholarships?search=&status="))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().expect("array payload").len(), 2);

    let response = router
        .oneshot(empty_request("GET", "/api/scholarships?status=Pending"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("status"));
    assert!(payload["message"].as_str().is_some());
}

#[tokio::test]
async fn update_route_changes_status_only() {
    let (service, _) = build_service();
    let created = service.create(gates_draft()).expect("create succeeds");
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            &format!("/api/scholarships/{}", created.id),
            &json!({ "status": "Applied" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("Applied"));
    assert_eq!(payload["scholarshipName"], json!("Gates Cambridge"));
    assert_eq!(payload["documentsDone"], json!(["CV"]));
}

#[tokio::test]
async fn update_route_returns_not_found_for_unknown_id() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/scholarships/99",
            &json!({ "status": "Applied" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], json!("Scholarship not found"));
}

#[tokio::test]
async fn delete_route_returns_no_content_then_not_found() {
    let (service, _) = build_service();
    let created = service.create(gates_draft()).expect("create succeeds");
    let router = router_with_service(service);
    let uri = format!("/api/scholarships/{}", created.id);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .clone()
        .oneshot(empty_request("GET", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(empty_request("DELETE", &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_handler_rejects_non_numeric_ids() {
    let (service, _) = build_service();

    let response = get_handler::<crate::tracker::InMemoryScholarshipStore>(
        State(Arc::new(service)),
        Path("abc".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("id"));
}

#[tokio::test]
async fn handlers_return_internal_error_when_store_is_down() {
    let service = Arc::new(ScholarshipService::new(Arc::new(UnavailableStore)));

    let response =
        delete_handler::<UnavailableStore>(State(service.clone()), Path("1".to_string())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = get_handler::<UnavailableStore>(State(service), Path("1".to_string())).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["message"], json!("Internal server error"));
}

#[tokio::test]
async fn dashboard_route_honours_the_now_parameter() {
    let (service, _) = build_service();
    service.create(gates_draft()).expect("create succeeds");
    service.create(daad_draft()).expect("create succeeds");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/dashboard?now=2026-10-10T09:00:00"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(2));
    let upcoming = payload["upcomingDeadlines"].as_array().expect("array");
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0]["daysLeft"], json!(4));
    assert_eq!(upcoming[0]["urgent"], json!(true));
    assert_eq!(upcoming[0]["deadlineLabel"], json!("Oct 14, 2026"));

    let response = router
        .oneshot(empty_request("GET", "/api/dashboard?now=yesterday"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], json!("now"));
}
