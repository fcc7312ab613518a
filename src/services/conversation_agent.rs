//! 对话摘要服务
//!
//! 对话结束后调用一次模型生成摘要，得到最终的 [`ConversationRecord`]

use std::sync::Arc;

use tracing::{error, info};

use crate::clients::ChatModel;
use crate::models::ConversationRecord;
use crate::services::prompts::{fill, prompts};
use crate::utils::truncate_text;
use crate::workflow::conversation::CompletedConversation;

pub struct ConversationAgent {
    model: Arc<dyn ChatModel>,
}

impl ConversationAgent {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// 生成摘要并转换为对话记录
    ///
    /// 模型调用失败时摘要为当前语言的道歉文案
    pub async fn summarize(&self, conversation: CompletedConversation) -> ConversationRecord {
        let p = prompts(conversation.locale());
        let mut record = conversation.into_record(String::new());
        let transcript = record.transcript(p.question_label, p.response_label);
        let user_message = fill(p.summary_user, &[("conversation", &transcript)]);

        info!("📝 正在生成对话摘要 ({} 轮)", record.conversation_history.len());
        record.summary = match self.model.complete(p.summary_system, &user_message).await {
            Ok(summary) => {
                info!("✓ 摘要: {}", truncate_text(&summary, 60));
                summary
            }
            Err(e) => {
                error!("❌ 对话摘要生成失败: {}", e);
                p.summary_failed.to_string()
            }
        };

        record
    }
}
