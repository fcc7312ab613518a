use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Locale;

/// 每个作业允许的问题数量范围
pub const MIN_QUESTIONS: u8 = 1;
pub const MAX_QUESTIONS: u8 = 5;
pub const DEFAULT_QUESTIONS: u8 = 3;

/// 教师创建的作业
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub name: String,
    pub instructions: String,
    pub learning_objectives: Vec<String>,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default = "default_num_questions")]
    pub num_questions: u8,
    #[serde(default)]
    pub language: Locale,
}

fn default_num_questions() -> u8 {
    DEFAULT_QUESTIONS
}

impl Assignment {
    /// 创建新作业，空白学习目标会被过滤
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        learning_objectives: Vec<String>,
        num_questions: u8,
        language: Locale,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            instructions: instructions.into(),
            learning_objectives: learning_objectives
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            created_at,
            file_path: None,
            num_questions,
            language,
        }
    }

    /// 附件文件名（不含目录）
    pub fn file_name(&self) -> Option<String> {
        self.file_path.as_deref().map(|p| {
            std::path::Path::new(p)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.to_string())
        })
    }
}
