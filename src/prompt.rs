use serde::{Deserialize, Serialize};

use crate::model::StudentRecord;

/// Sampling temperature sent with every completion request.
pub const TEMPERATURE: f64 = 0.3;

const SYSTEM_PROMPT: &str = r#"You are an expert educational data analyst and academic counselor with deep expertise in predicting student performance.

Your task is to analyze student performance data and predict whether they will PASS or FAIL, along with a confidence score and personalized recommendations.

Guidelines:
- Consider all factors holistically: attendance, study habits, test scores, assignments, aptitude, coding skills, and extracurricular involvement
- Generally, students need good attendance (>70%), consistent study (>3 hours), and solid performance across assessments to pass
- Provide confidence as a percentage (0-100)
- Generate 3-5 specific, actionable recommendations based on weak areas
- Be constructive and supportive in recommendations

Respond ONLY with valid JSON in this exact format:
{
  "prediction": "PASS" or "FAIL",
  "confidence": number between 0-100,
  "recommendations": ["recommendation 1", "recommendation 2", ...]
}"#;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// The system/user message pair for one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn for_student(record: &StudentRecord) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user: user_prompt(record),
        }
    }

    /// Conversation in the order the gateway expects it.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: Role::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: Role::User,
                content: self.user.clone(),
            },
        ]
    }
}

fn user_prompt(r: &StudentRecord) -> String {
    format!(
        "Analyze this student's performance data:
- Attendance: {}%
- Daily Study Hours: {}
- Internal Assessment: {}/50
- Class Test: {}/40
- Assignment Marks: {}/50
- Aptitude Marks: {}/100
- Coding Marks: {}/100
- Extracurricular Activities: {}

Predict if this student will PASS or FAIL with confidence score and recommendations.",
        r.attendance,
        r.study_hours,
        r.internal_assessment,
        r.class_test,
        r.assignment_marks,
        r.aptitude_marks,
        r.coding_marks,
        if r.extracurricular { "Yes" } else { "No" },
    )
}
