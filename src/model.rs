use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The eight metrics collected for one student.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub attendance: f64,
    pub study_hours: f64,
    pub internal_assessment: f64,
    pub class_test: f64,
    pub assignment_marks: f64,
    pub extracurricular: bool,
    pub aptitude_marks: f64,
    pub coding_marks: f64,
}

impl Default for StudentRecord {
    // Initial values of the input form.
    fn default() -> Self {
        Self {
            attendance: 75.0,
            study_hours: 4.0,
            internal_assessment: 35.0,
            class_test: 28.0,
            assignment_marks: 40.0,
            extracurricular: false,
            aptitude_marks: 70.0,
            coding_marks: 65.0,
        }
    }
}

/// What the prediction endpoint returns.
///
/// Only `prediction` is guaranteed to be a string. `confidence` and
/// `recommendations` are kept exactly as the model wrote them: confidence is
/// documented as 0-100 but never clamped or coerced. Any other keys are
/// carried in `extra` and serialized back out untouched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PredictionResult {
    pub prediction: String,
    pub confidence: Value,
    pub recommendations: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PredictionResult {
    pub fn is_pass(&self) -> bool {
        self.prediction == "PASS"
    }

    /// Recommendations as display lines. A non-array value is one line.
    pub fn recommendation_lines(&self) -> Vec<String> {
        match &self.recommendations {
            Value::Array(items) => items.iter().map(display_value).collect(),
            Value::Null => Vec::new(),
            other => vec![display_value(other)],
        }
    }
}

// Strings print bare, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A prediction merged with the record that was submitted for it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionOutcome {
    #[serde(flatten)]
    pub result: PredictionResult,
    pub student_data: StudentRecord,
}

impl PredictionOutcome {
    /// The submitted record always wins over a `studentData` key in the reply.
    pub fn new(mut result: PredictionResult, student_data: StudentRecord) -> Self {
        result.extra.remove("studentData");
        Self {
            result,
            student_data,
        }
    }

    /// One-line notice shown once a prediction arrives.
    pub fn notice(&self) -> String {
        format!("Student is predicted to {}", self.result.prediction)
    }
}

impl fmt::Display for PredictionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        let s = &self.student_data;
        let verdict = if r.is_pass() {
            "Likely to pass"
        } else {
            "At risk of failing"
        };

        writeln!(f, "Prediction: {} ({})", r.prediction, verdict)?;
        writeln!(f, "Confidence: {}%", display_value(&r.confidence))?;

        let recommendations = r.recommendation_lines();
        if !recommendations.is_empty() {
            writeln!(f, "Recommendations:")?;
            for (i, rec) in recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec)?;
            }
        }

        writeln!(f, "Student metrics:")?;
        writeln!(f, "  Attendance: {}%", s.attendance)?;
        writeln!(f, "  Study Hours: {}h/day", s.study_hours)?;
        writeln!(f, "  Internal Assessment: {}/50", s.internal_assessment)?;
        writeln!(f, "  Class Test: {}/40", s.class_test)?;
        writeln!(f, "  Assignments: {}/50", s.assignment_marks)?;
        writeln!(f, "  Aptitude: {}/100", s.aptitude_marks)?;
        writeln!(f, "  Coding: {}/100", s.coding_marks)?;
        write!(
            f,
            "  Extracurricular: {}",
            if s.extracurricular { "Yes" } else { "No" }
        )
    }
}
