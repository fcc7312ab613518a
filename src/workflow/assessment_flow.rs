//! 评估流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整处理流程
//!
//! 流程顺序：
//! 1. 生成问题 → 开始对话
//! 2. 对话完成 → 摘要
//! 3. 拼接提交文本（含上传文件内容）→ 评估
//! 4. 生成报告 → 写入 `evaluations.json`（写入失败只记录日志，报告照常返回）

use std::sync::Arc;

use chrono::Local;
use tracing::{error, info};
use uuid::Uuid;

use crate::clients::ChatModel;
use crate::config::Config;
use crate::infrastructure::{DocumentContent, Storage};
use crate::models::{Assignment, Report, Submission};
use crate::services::{ConversationAgent, EvaluationAgent, EvaluationInput, QuestionGenerator, ReportGenerator};
use crate::utils::logging::log_assessment_complete;
use crate::workflow::conversation::{AgentReply, CompletedConversation, ConversationState};

/// 问题生成 + 摘要 + 四次评估 + 报告
pub const LLM_CALLS_PER_ASSESSMENT: usize = 7;

/// 上传文件无法读取时追加的标记
pub const UNREADABLE_UPLOAD_MARKER: &str = "[Uploaded File: Could not read content]";

/// 评估流程
///
/// - 决定各个服务的调用顺序
/// - 唯一的持久化写入是最终报告
pub struct AssessmentFlow {
    question_generator: QuestionGenerator,
    conversation_agent: ConversationAgent,
    evaluation_agent: EvaluationAgent,
    report_generator: ReportGenerator,
    storage: Arc<Storage>,
}

impl AssessmentFlow {
    pub fn new(model: Arc<dyn ChatModel>, storage: Arc<Storage>, config: &Config) -> Self {
        Self {
            question_generator: QuestionGenerator::new(model.clone()),
            conversation_agent: ConversationAgent::new(model.clone()),
            evaluation_agent: EvaluationAgent::new(model.clone(), config.max_prompt_chars),
            report_generator: ReportGenerator::new(model),
            storage,
        }
    }

    /// 为作业生成问题并开始对话
    pub async fn begin(&self, assignment: &Assignment) -> AgentReply {
        let questions = self
            .question_generator
            .generate(
                &assignment.instructions,
                &assignment.learning_objectives,
                assignment.num_questions,
                assignment.language,
            )
            .await;
        ConversationState::start(questions, assignment.language, Local::now())
    }

    /// 对话完成后的评估，返回报告与保存后的报告 id
    ///
    /// 报告无法写入时 id 为 `None`
    pub async fn finish(
        &self,
        assignment: &Assignment,
        submission: &Submission,
        conversation: CompletedConversation,
    ) -> (Option<String>, Report) {
        info!("🧭 对话完成，开始评估: {}", assignment.name);

        let record = self.conversation_agent.summarize(conversation).await;
        let submission_text = self.submission_text(submission).await;

        let evaluation = self
            .evaluation_agent
            .evaluate(
                EvaluationInput {
                    assignment_id: &assignment.id,
                    instructions: &assignment.instructions,
                    objectives: &assignment.learning_objectives,
                    submission_text: &submission_text,
                    conversation: &record,
                    locale: assignment.language,
                },
                Local::now(),
            )
            .await;

        let report = self
            .report_generator
            .generate(evaluation, assignment.language, Local::now())
            .await;

        let evaluation_id = Uuid::new_v4().to_string();
        if let Err(e) = self.storage.evaluations.insert(&evaluation_id, report.clone()).await {
            error!("❌ 报告保存失败 {}: {}", evaluation_id, e);
            return (None, report);
        }
        log_assessment_complete(&evaluation_id, &assignment.name, LLM_CALLS_PER_ASSESSMENT);

        (Some(evaluation_id), report)
    }

    /// 提交文本，附带上传文件内容
    async fn submission_text(&self, submission: &Submission) -> String {
        let mut text = submission.text_submission.clone();
        if let Some(path) = &submission.file_path {
            match self.storage.uploads.read_document(path).await {
                DocumentContent::Text(content) => {
                    text.push_str("\n\n[Uploaded File Content]:\n");
                    text.push_str(&content);
                }
                DocumentContent::Unreadable => {
                    text.push_str("\n\n");
                    text.push_str(UNREADABLE_UPLOAD_MARKER);
                }
            }
        }
        text
    }
}
