use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::Locale;

/// 一轮问答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub response: String,
}

/// 对话记录：问题列表、学生回答、时间戳与摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub questions: Vec<String>,
    /// 问题原文 → 学生回答
    pub responses: BTreeMap<String, String>,
    pub conversation_history: Vec<Turn>,
    /// 每一步一个时间戳（含开始时刻），仅用于估算回答耗时
    pub timestamps: Vec<DateTime<Local>>,
    pub summary: String,
    pub language: Locale,
}

impl ConversationRecord {
    /// 完整问答记录，用于提示词
    pub fn transcript(&self, question_label: &str, response_label: &str) -> String {
        self.conversation_history
            .iter()
            .map(|t| format!("{}: {}\n{}: {}", question_label, t.question, response_label, t.response))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
