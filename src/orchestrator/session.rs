//! 会话状态 - 编排层
//!
//! 每个浏览器会话一个 [`Session`]，由 cookie 中的会话 id 索引。
//! 同一会话的操作通过异步互斥锁串行执行。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::assignment::DEFAULT_QUESTIONS;
use crate::models::{Assignment, Locale, Report, Submission};
use crate::workflow::AwaitingAnswer;

/// 当前界面角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Teacher,
    Student,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// 一次性提示，展示后清除
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    /// 界面文案 key
    pub key: &'static str,
}

impl Notice {
    pub fn success(key: &'static str) -> Self {
        Self {
            level: NoticeLevel::Success,
            key,
        }
    }

    pub fn warning(key: &'static str) -> Self {
        Self {
            level: NoticeLevel::Warning,
            key,
        }
    }

    pub fn error(key: &'static str) -> Self {
        Self {
            level: NoticeLevel::Error,
            key,
        }
    }
}

/// 教师正在编辑的作业
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentDraft {
    pub name: String,
    pub instructions: String,
    /// 至少保留一个（可能为空的）输入框
    pub objectives: Vec<String>,
    pub num_questions: u8,
    pub language: Locale,
}

impl Default for AssignmentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            instructions: String::new(),
            objectives: vec![String::new()],
            num_questions: DEFAULT_QUESTIONS,
            language: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Assistant,
    Student,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub content: String,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
        }
    }

    pub fn student(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Student,
            content: content.into(),
        }
    }
}

/// 学生端所处阶段
#[derive(Debug, Clone, Default)]
pub enum StudentStage {
    /// 填写提交
    #[default]
    Submitting,
    /// 回答追问问题
    Conversing {
        assignment: Box<Assignment>,
        submission: Box<Submission>,
        conversation: AwaitingAnswer,
    },
    /// 已生成报告，保存失败时没有 id
    Evaluated {
        evaluation_id: Option<String>,
        report: Box<Report>,
    },
}

/// 单个浏览器会话的全部状态
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub role: Role,
    pub notice: Option<Notice>,
    pub draft: AssignmentDraft,
    pub messages: Vec<ChatMessage>,
    pub stage: StudentStage,
}

impl Session {
    /// 取出提示（只展示一次）
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// 开始新的提交：清空对话与报告
    pub fn reset_student(&mut self) {
        self.messages.clear();
        self.stage = StudentStage::Submitting;
    }
}

/// 会话表
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// 只读查找，不创建会话
    pub fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// 获取会话，不存在时创建
    pub fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::default())))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
