//! Request/response contract shared by the router and the HTTP client.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub success_status: u16,
}

pub const LIST: Endpoint = Endpoint {
    method: Method::Get,
    path: "/api/scholarships",
    success_status: 200,
};

pub const GET: Endpoint = Endpoint {
    method: Method::Get,
    path: "/api/scholarships/:id",
    success_status: 200,
};

pub const CREATE: Endpoint = Endpoint {
    method: Method::Post,
    path: "/api/scholarships",
    success_status: 201,
};

pub const UPDATE: Endpoint = Endpoint {
    method: Method::Put,
    path: "/api/scholarships/:id",
    success_status: 200,
};

pub const DELETE: Endpoint = Endpoint {
    method: Method::Delete,
    path: "/api/scholarships/:id",
    success_status: 204,
};

pub const DASHBOARD: Endpoint = Endpoint {
    method: Method::Get,
    path: "/api/dashboard",
    success_status: 200,
};

/// Body of a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Body of 404 and 500 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Replaces each literal `:name` token in `path` with its value.
pub fn build_url<V: Display>(path: &str, params: &[(&str, V)]) -> String {
    let mut url = path.to_string();
    for (name, value) in params {
        let token = format!(":{name}");
        if url.contains(&token) {
            url = url.replacen(&token, &value.to_string(), 1);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_substitutes_named_tokens() {
        assert_eq!(build_url(GET.path, &[("id", 7)]), "/api/scholarships/7");
        assert_eq!(build_url(LIST.path, &[("id", 7)]), "/api/scholarships");
        assert_eq!(build_url::<i64>(UPDATE.path, &[]), "/api/scholarships/:id");
    }

    #[test]
    fn endpoints_carry_expected_statuses() {
        assert_eq!(CREATE.success_status, 201);
        assert_eq!(DELETE.success_status, 204);
        assert_eq!(DELETE.method.as_str(), "DELETE");
    }

    #[test]
    fn validation_body_omits_missing_field() {
        let body = ValidationErrorBody {
            message: "Country is required".to_string(),
            field: None,
        };
        let encoded = serde_json::to_value(&body).expect("serializes");
        assert!(encoded.get("field").is_none());
    }
}
