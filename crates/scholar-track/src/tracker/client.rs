use std::sync::Arc;

use chrono::NaiveDateTime;
use reqwest::{Response, StatusCode};
use tracing::{debug, warn};

use super::cache::QueryCache;
use super::contract::{self, build_url, Endpoint, Method, MessageBody, ValidationErrorBody};
use super::domain::{ScholarshipDraft, ScholarshipId, ScholarshipPatchRequest, ScholarshipRecord};
use super::report::{DashboardLimits, DashboardSummary};

/// Failure surfaced to the caller of a client operation; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{0}")]
    Transport(String),
}

/// Typed HTTP client for the scholarship API with a cached list query.
pub struct TrackerClient {
    http: reqwest::Client,
    base_url: String,
    cache: QueryCache<Vec<ScholarshipRecord>>,
}

impl TrackerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: QueryCache::default(),
        }
    }

    pub fn cache(&self) -> &QueryCache<Vec<ScholarshipRecord>> {
        &self.cache
    }

    pub async fn list(&self) -> Result<Arc<Vec<ScholarshipRecord>>, ClientError> {
        self.cache
            .get_or_load(contract::LIST.path, || self.fetch_list())
            .await
    }

    /// A missing record is `Ok(None)` rather than an error.
    pub async fn get(&self, id: ScholarshipId) -> Result<Option<ScholarshipRecord>, ClientError> {
        let path = build_url(contract::GET.path, &[("id", id)]);
        let response = self
            .request(contract::GET, &path)
            .send()
            .await
            .map_err(|_| transport("Failed to fetch scholarship"))?;

        match response.status() {
            status if succeeded(contract::GET, status) => {
                decode(response, "Failed to fetch scholarship").await.map(Some)
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(transport("Failed to fetch scholarship")),
        }
    }

    pub async fn create(&self, draft: &ScholarshipDraft) -> Result<ScholarshipRecord, ClientError> {
        let response = self
            .request(contract::CREATE, contract::CREATE.path)
            .json(draft)
            .send()
            .await
            .map_err(|_| transport("Failed to create scholarship"))?;

        let record = match response.status() {
            status if succeeded(contract::CREATE, status) => {
                decode(response, "Failed to create scholarship").await?
            }
            StatusCode::BAD_REQUEST => return Err(validation(response).await),
            _ => return Err(transport("Failed to create scholarship")),
        };

        self.invalidate_list();
        Ok(record)
    }

    pub async fn update(
        &self,
        id: ScholarshipId,
        request: &ScholarshipPatchRequest,
    ) -> Result<ScholarshipRecord, ClientError> {
        let path = build_url(contract::UPDATE.path, &[("id", id)]);
        let response = self
            .request(contract::UPDATE, &path)
            .json(request)
            .send()
            .await
            .map_err(|_| transport("Failed to update scholarship"))?;

        let record = match response.status() {
            status if succeeded(contract::UPDATE, status) => {
                decode(response, "Failed to update scholarship").await?
            }
            StatusCode::BAD_REQUEST => return Err(validation(response).await),
            StatusCode::NOT_FOUND => return Err(not_found(response).await),
            _ => return Err(transport("Failed to update scholarship")),
        };

        self.invalidate_list();
        Ok(record)
    }

    pub async fn delete(&self, id: ScholarshipId) -> Result<(), ClientError> {
        let path = build_url(contract::DELETE.path, &[("id", id)]);
        let response = self
            .request(contract::DELETE, &path)
            .send()
            .await
            .map_err(|_| transport("Failed to delete scholarship"))?;

        match response.status() {
            status if succeeded(contract::DELETE, status) => {
                self.invalidate_list();
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(not_found(response).await),
            _ => Err(transport("Failed to delete scholarship")),
        }
    }

    /// Dashboard computed locally from the cached list.
    pub async fn dashboard(&self, now: NaiveDateTime) -> Result<DashboardSummary, ClientError> {
        let records = self.list().await?;
        Ok(DashboardSummary::build_with_limits(
            &records,
            now,
            DashboardLimits::default(),
        ))
    }

    async fn fetch_list(&self) -> Result<Vec<ScholarshipRecord>, ClientError> {
        debug!("fetching scholarship list");
        let response = self
            .request(contract::LIST, contract::LIST.path)
            .send()
            .await
            .map_err(|_| transport("Failed to fetch scholarships"))?;
        if !succeeded(contract::LIST, response.status()) {
            return Err(transport("Failed to fetch scholarships"));
        }
        decode(response, "Failed to fetch scholarships").await
    }

    fn request(&self, endpoint: Endpoint, path: &str) -> reqwest::RequestBuilder {
        self.http.request(http_method(endpoint.method), self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn invalidate_list(&self) {
        self.cache.invalidate(contract::LIST.path);
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn succeeded(endpoint: Endpoint, status: StatusCode) -> bool {
    status.as_u16() == endpoint.success_status
}

fn transport(message: &str) -> ClientError {
    ClientError::Transport(message.to_string())
}

async fn decode<T>(response: Response, context: &str) -> Result<T, ClientError>
where
    T: serde::de::DeserializeOwned,
{
    response.json::<T>().await.map_err(|err| {
        warn!(error = %err, "undecodable scholarship API response");
        transport(context)
    })
}

async fn validation(response: Response) -> ClientError {
    match response.json::<ValidationErrorBody>().await {
        Ok(body) => ClientError::Validation {
            message: body.message,
            field: body.field,
        },
        Err(_) => ClientError::Validation {
            message: "Invalid scholarship data".to_string(),
            field: None,
        },
    }
}

async fn not_found(response: Response) -> ClientError {
    let message = response
        .json::<MessageBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| "Scholarship not found".to_string());
    ClientError::NotFound { message }
}
