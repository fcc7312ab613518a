use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 学生提交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub text_submission: String,
    #[serde(default)]
    pub file_path: Option<String>,
    pub submitted_at: DateTime<Local>,
}

impl Submission {
    pub fn new(
        assignment_id: impl Into<String>,
        text_submission: impl Into<String>,
        file_path: Option<String>,
        submitted_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            assignment_id: assignment_id.into(),
            text_submission: text_submission.into(),
            file_path,
            submitted_at,
        }
    }
}
