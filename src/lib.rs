//! Student performance predictor.
//!
//! Collects eight metrics for a student, asks a chat-completion model for a
//! PASS/FAIL prediction, and returns the checked result with a confidence
//! score and recommendations.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod model;
pub mod oracle;
pub mod prompt;
pub mod validation;

pub use error::{ClientError, PredictError, ValidationError};
pub use model::{PredictionOutcome, PredictionResult, StudentRecord};
