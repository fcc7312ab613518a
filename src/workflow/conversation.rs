//! 对话状态机 - 流程层
//!
//! 固定问题列表上的一问一答。每次回答消耗当前快照并返回新的快照，
//! 不存在"回答到一半"的中间状态。
//!
//! ```text
//! start ──► AwaitingAnswer(0) ──answer──► AwaitingAnswer(1) ──► … ──► Complete
//!   │
//!   └── 问题列表为空 ──► Complete
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::models::{ConversationRecord, Locale, Turn};
use crate::services::prompts::prompts;

/// 等待学生回答第 `index` 个问题
#[derive(Debug, Clone, PartialEq)]
pub struct AwaitingAnswer {
    questions: Vec<String>,
    index: usize,
    responses: BTreeMap<String, String>,
    history: Vec<Turn>,
    timestamps: Vec<DateTime<Local>>,
    locale: Locale,
}

/// 所有问题已回答
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedConversation {
    questions: Vec<String>,
    responses: BTreeMap<String, String>,
    history: Vec<Turn>,
    timestamps: Vec<DateTime<Local>>,
    locale: Locale,
}

/// 对话快照
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationState {
    AwaitingAnswer(AwaitingAnswer),
    Complete(CompletedConversation),
}

/// 一步操作的结果：新快照 + 需要展示的智能体消息
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub state: ConversationState,
    pub messages: Vec<String>,
}

impl ConversationState {
    /// 开始对话，记录起始时间戳
    ///
    /// 问题列表为空时直接完成
    pub fn start(questions: Vec<String>, locale: Locale, at: DateTime<Local>) -> AgentReply {
        let p = prompts(locale);
        if questions.is_empty() {
            return AgentReply {
                state: ConversationState::Complete(CompletedConversation {
                    questions,
                    responses: BTreeMap::new(),
                    history: Vec::new(),
                    timestamps: vec![at],
                    locale,
                }),
                messages: vec![p.completion.to_string()],
            };
        }

        let messages = vec![p.intro.to_string(), questions[0].clone()];
        AgentReply {
            state: ConversationState::AwaitingAnswer(AwaitingAnswer {
                questions,
                index: 0,
                responses: BTreeMap::new(),
                history: Vec::new(),
                timestamps: vec![at],
                locale,
            }),
            messages,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ConversationState::Complete(_))
    }

    pub fn locale(&self) -> Locale {
        match self {
            ConversationState::AwaitingAnswer(s) => s.locale,
            ConversationState::Complete(s) => s.locale,
        }
    }
}

impl AwaitingAnswer {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &str {
        &self.questions[self.index]
    }

    /// 记录当前问题的回答并前进一步
    pub fn answer(mut self, response: &str, at: DateTime<Local>) -> AgentReply {
        let p = prompts(self.locale);
        let question = self.questions[self.index].clone();

        self.timestamps.push(at);
        self.responses.insert(question.clone(), response.to_string());
        self.history.push(Turn {
            question,
            response: response.to_string(),
        });
        self.index += 1;

        if self.index == self.questions.len() {
            return AgentReply {
                state: ConversationState::Complete(CompletedConversation {
                    questions: self.questions,
                    responses: self.responses,
                    history: self.history,
                    timestamps: self.timestamps,
                    locale: self.locale,
                }),
                messages: vec![p.completion.to_string()],
            };
        }

        let next = self.questions[self.index].clone();
        AgentReply {
            state: ConversationState::AwaitingAnswer(self),
            messages: vec![p.acknowledgement.to_string(), next],
        }
    }
}

impl CompletedConversation {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// 带摘要生成对话记录
    pub fn into_record(self, summary: String) -> ConversationRecord {
        ConversationRecord {
            questions: self.questions,
            responses: self.responses,
            conversation_history: self.history,
            timestamps: self.timestamps,
            summary,
            language: self.locale,
        }
    }
}
