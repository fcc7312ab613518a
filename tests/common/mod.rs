//! 集成测试公共工具

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use assignment_assessor::config::Config;
use assignment_assessor::error::LlmError;
use assignment_assessor::ChatModel;
use async_trait::async_trait;

/// 按顺序返回预设回复的模型，并记录每次调用
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// 追加一次失败的调用
    pub fn push_failure(&self) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(LlmError::api_call_failed("scripted", "scripted failure")));
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(&self, system_message: &str, user_message: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_message.to_string(), user_message.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::EmptyContent { model: "scripted".into() }))
    }
}

pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("assessor-it-{}", uuid::Uuid::new_v4()))
}

pub fn test_config(data_dir: &PathBuf) -> Config {
    Config {
        data_dir: data_dir.to_string_lossy().to_string(),
        llm_api_key: "sk-test".to_string(),
        ..Config::default()
    }
}

/// 完整评估所需的七次回复（两个问题）
pub fn full_assessment_script() -> Vec<&'static str> {
    vec![
        "Here you go:\n1. What is X?\n2) Why does Y matter?",
        "The student explained X and Y.",
        "Comprehension is solid.",
        "Objective met.",
        "Overall good.",
        "```json\n{\"comprehension\": {\"score\": 85, \"examples\": \"e\", \"feedback\": \"f\"}, \"summary\": \"Good work\"}\n```",
        "Executive summary: well done.",
    ]
}
