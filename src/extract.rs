//! Turns the model's free-text reply into a checked prediction object.

use serde_json::{Map, Value};
use tracing::error;

use crate::error::PredictError;

const REQUIRED_FIELDS: [&str; 3] = ["prediction", "confidence", "recommendations"];

/// Returns the span from the first `{` to the last `}`, if there is one.
///
/// This is deliberately greedy: with several objects in the text the span
/// covers all of them and the parse that follows fails.
pub fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// JavaScript truthiness for a JSON value. Empty arrays and objects are truthy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Extracts, checks and normalizes a prediction from the reply text.
///
/// A required field that is missing or falsy is `IncompleteResponse`. That
/// includes a confidence of exactly 0. The parsed object comes back as-is
/// apart from `prediction`, which is upper-cased and must be a string.
pub fn parse_reply(content: &str) -> Result<Map<String, Value>, PredictError> {
    let candidate = json_span(content).unwrap_or(content);

    let value: Value = serde_json::from_str(candidate).map_err(|e| {
        error!(error = %e, content, "failed to parse AI response");
        PredictError::MalformedResponse
    })?;

    let complete = REQUIRED_FIELDS
        .iter()
        .all(|field| value.get(field).is_some_and(is_truthy));
    let mut reply = match value {
        Value::Object(map) if complete => map,
        _ => return Err(PredictError::IncompleteResponse),
    };

    let prediction = match reply.get("prediction") {
        Some(Value::String(p)) => p.to_uppercase(),
        _ => {
            error!(content, "AI response prediction is not a string");
            return Err(PredictError::MalformedResponse);
        }
    };
    reply.insert("prediction".into(), Value::String(prediction));

    Ok(reply)
}
