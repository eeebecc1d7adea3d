use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use serde::Deserialize;
use tracing::error;

use super::contract::{self, MessageBody, ValidationErrorBody};
use super::domain::{parse_instant, ScholarshipDraft, ScholarshipId, ScholarshipPatchRequest};
use super::filter::RecordFilter;
use super::service::{ScholarshipService, ServiceError};
use super::store::{ScholarshipStore, StoreError};
use super::validation::ValidationError;

/// Router exposing the scholarship CRUD contract and the dashboard summary.
pub fn scholarship_router<S>(service: Arc<ScholarshipService<S>>) -> Router
where
    S: ScholarshipStore + 'static,
{
    Router::new()
        .route(
            contract::LIST.path,
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            contract::GET.path,
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route(contract::DASHBOARD.path, get(dashboard_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    now: Option<String>,
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<ScholarshipService<S>>>,
    query: Result<Query<RecordFilter>, QueryRejection>,
) -> Response
where
    S: ScholarshipStore + 'static,
{
    // only `status` can fail to decode
    let Query(filter) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return validation_response(ValidationError::for_field(
                "status",
                rejection.body_text(),
            ))
        }
    };

    match service.list(&filter) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn get_handler<S>(
    State(service): State<Arc<ScholarshipService<S>>>,
    Path(raw_id): Path<String>,
) -> Response
where
    S: ScholarshipStore + 'static,
{
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.get(id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<ScholarshipService<S>>>,
    payload: Result<Json<ScholarshipDraft>, JsonRejection>,
) -> Response
where
    S: ScholarshipStore + 'static,
{
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.create(draft) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<ScholarshipService<S>>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ScholarshipPatchRequest>, JsonRejection>,
) -> Response
where
    S: ScholarshipStore + 'static,
{
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.update(id, request) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<ScholarshipService<S>>>,
    Path(raw_id): Path<String>,
) -> Response
where
    S: ScholarshipStore + 'static,
{
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<ScholarshipService<S>>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    S: ScholarshipStore + 'static,
{
    let now = match query.now.as_deref() {
        Some(raw) => match parse_instant(raw) {
            Ok(now) => now,
            Err(message) => {
                return validation_response(ValidationError::for_field("now", message))
            }
        },
        None => Local::now().naive_local(),
    };

    match service.dashboard(now) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

fn parse_id(raw: &str) -> Result<ScholarshipId, Response> {
    raw.trim().parse::<i64>().map(ScholarshipId).map_err(|_| {
        validation_response(ValidationError::for_field(
            "id",
            format!("'{raw}' is not a valid scholarship id"),
        ))
    })
}

pub(crate) fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(err) => validation_response(err),
        ServiceError::Store(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(MessageBody::new("Scholarship not found")),
        )
            .into_response(),
        ServiceError::Store(err @ StoreError::Unavailable(_)) => {
            error!(error = %err, "scholarship store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageBody::new("Internal server error")),
            )
                .into_response()
        }
    }
}

fn validation_response(err: ValidationError) -> Response {
    let ValidationError { message, field } = err;
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorBody { message, field }),
    )
        .into_response()
}

fn rejection_response(rejection: JsonRejection) -> Response {
    validation_response(ValidationError::new(rejection.body_text()))
}
