//! Error types for the predictor.
//!
//! `ValidationError` and `ClientError` belong to the caller side of the
//! exchange, `PredictError` to the prediction endpoint.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::api::cors_headers;
use crate::config::API_KEY_VAR;

/// A bounded field was outside its closed interval.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Attendance must be between 0-100%")]
    Attendance,

    #[error("Internal Assessment must be between 0-50")]
    InternalAssessment,

    #[error("Class Test must be between 0-40")]
    ClassTest,

    #[error("Assignment marks must be between 0-50")]
    AssignmentMarks,

    #[error("Aptitude marks must be between 0-100")]
    AptitudeMarks,

    #[error("Coding marks must be between 0-100")]
    CodingMarks,
}

impl ValidationError {
    /// Wire name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::InternalAssessment => "internalAssessment",
            Self::ClassTest => "classTest",
            Self::AssignmentMarks => "assignmentMarks",
            Self::AptitudeMarks => "aptitudeMarks",
            Self::CodingMarks => "codingMarks",
        }
    }
}

/// Failures of a single prediction request on the server side.
///
/// None of these are retried.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{} is not configured", API_KEY_VAR)]
    MissingCredential,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("AI credits exhausted. Please add credits to your workspace.")]
    QuotaExhausted,

    #[error("AI gateway error")]
    Gateway { status: u16, body: String },

    #[error("AI gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid AI response format")]
    MalformedResponse,

    #[error("Incomplete prediction data")]
    IncompleteResponse,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        for header in cors_headers() {
            builder.insert_header(header);
        }
        builder.json(json!({ "error": self.to_string() }))
    }
}

/// Failures seen by the caller of the prediction endpoint.
#[derive(Debug, Error, Clone)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A prediction is already in progress")]
    Busy,

    /// Transport or endpoint failure. The status is kept for logging only,
    /// the message is the same whatever went wrong.
    #[error("Failed to generate prediction. Please try again.")]
    Failed { status: Option<u16> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::Attendance.to_string(),
            "Attendance must be between 0-100%"
        );
        assert_eq!(
            ValidationError::ClassTest.to_string(),
            "Class Test must be between 0-40"
        );
        assert_eq!(ValidationError::CodingMarks.field(), "codingMarks");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PredictError::RateLimited.status_code(), 429);
        assert_eq!(PredictError::QuotaExhausted.status_code(), 402);
        assert_eq!(PredictError::MalformedResponse.status_code(), 500);
        assert_eq!(PredictError::IncompleteResponse.status_code(), 500);
        assert_eq!(PredictError::MissingCredential.status_code(), 500);
        assert_eq!(
            PredictError::Gateway {
                status: 503,
                body: "down".into()
            }
            .status_code(),
            500
        );
    }

    #[test]
    fn test_gateway_error_hides_upstream_body() {
        let err = PredictError::Gateway {
            status: 500,
            body: "secret upstream detail".into(),
        };
        assert_eq!(err.to_string(), "AI gateway error");
    }

    #[test]
    fn test_client_failure_message_ignores_status() {
        let a = ClientError::Failed { status: Some(429) };
        let b = ClientError::Failed { status: None };
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(
            a.to_string(),
            "Failed to generate prediction. Please try again."
        );
    }

    #[actix_web::test]
    async fn test_error_response_body_and_cors() {
        let resp = PredictError::IncompleteResponse.error_response();
        assert_eq!(resp.status(), 500);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );

        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "Incomplete prediction data" }));
    }
}
