//! Response wrapper for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Wrapper for successful responses with content type metadata.
///
/// Provides symmetry with `ProblemDetails` by including content type
/// information in the response body; the payload fields are flattened to
/// the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        cost: f64,
    }

    #[test]
    fn test_response_serialization_flattens_payload() {
        #[derive(Debug, Serialize)]
        struct EscapeResult {
            hops: usize,
            path: Vec<String>,
        }

        let response = ServiceResponse::new(EscapeResult {
            hops: 2,
            path: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        });
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"hops\":2"));
        assert!(json.contains("\"path\":["));
        assert!(!json.contains("\"data\":{"));
        assert!(json.contains("\"content_type\":\"application/json\""));
    }

    #[test]
    fn test_response_from_trait() {
        let data = TestData { cost: 7.5 };
        let response: ServiceResponse<TestData> = data.clone().into();
        assert_eq!(response.data, data);
        assert_eq!(response.content_type, "application/json");
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"cost":7.5,"content_type":"application/json"}"#;
        let response: ServiceResponse<TestData> = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.cost, 7.5);
    }
}
