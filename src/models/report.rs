use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::{EvaluationRecord, Locale};

/// 最终评估报告，保存到 `evaluations.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub text_report: String,
    pub evaluation_data: EvaluationRecord,
    pub timestamp: DateTime<Local>,
    pub language: Locale,
}

impl Report {
    pub fn assignment_id(&self) -> &str {
        &self.evaluation_data.assignment_id
    }
}
