//! 评估服务 - 能力层
//!
//! 一次评估固定调用模型四次：
//! 1. 理解 / 真实性 / 关联能力 / 论证 / 参考文献（附回答耗时）
//! 2. 逐个学习目标评分（附完整对话）
//! 3. 整体质量与原创性
//! 4. 把前三段整理成结构化 JSON
//!
//! 前三次调用失败时以占位文本代替；第四次失败或输出无法解析时使用合成结构。

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use crate::clients::ChatModel;
use crate::models::{ConversationRecord, EvaluationRecord, Locale};
use crate::services::prompts::{bullet_list, fill, prompts, PromptSet};
use crate::services::response_timing::{render_response_times, response_times};
use crate::services::structured_output::parse_structured;
use crate::utils::truncate_for_prompt;

/// 一次评估的输入
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    pub assignment_id: &'a str,
    pub instructions: &'a str,
    pub objectives: &'a [String],
    pub submission_text: &'a str,
    pub conversation: &'a ConversationRecord,
    pub locale: Locale,
}

/// 评估服务
pub struct EvaluationAgent {
    model: Arc<dyn ChatModel>,
    max_prompt_chars: usize,
}

impl EvaluationAgent {
    pub fn new(model: Arc<dyn ChatModel>, max_prompt_chars: usize) -> Self {
        Self {
            model,
            max_prompt_chars,
        }
    }

    /// 执行完整评估
    pub async fn evaluate(&self, input: EvaluationInput<'_>, at: DateTime<Local>) -> EvaluationRecord {
        let p = prompts(input.locale);
        let assignment_text = truncate_for_prompt(input.instructions, self.max_prompt_chars);
        let submission_text = truncate_for_prompt(input.submission_text, self.max_prompt_chars);
        let objective_list = bullet_list(input.objectives);
        let timing = render_response_times(&response_times(input.conversation), input.locale);
        let details = input.conversation.transcript(p.question_label, p.response_label);
        let summary = input.conversation.summary.as_str();

        let vars: [(&str, &str); 6] = [
            ("assignment_text", &assignment_text),
            ("submission_text", &submission_text),
            ("learning_objectives", &objective_list),
            ("conversation_summary", summary),
            ("conversation_details", &details),
            ("response_times", &timing),
        ];

        info!("📊 开始评估作业 {} ({})", input.assignment_id, input.locale);
        let templates = [
            p.evaluation_comprehension,
            p.evaluation_objectives,
            p.evaluation_overall,
        ];
        let mut sections = Vec::with_capacity(templates.len());
        for (i, template) in templates.iter().enumerate() {
            sections.push(self.run_section(p, i, &fill(template, &vars)).await);
        }

        let raw_evaluation = p
            .section_headers
            .iter()
            .zip(&sections)
            .map(|(header, body)| format!("{}\n{}", header, body))
            .collect::<Vec<_>>()
            .join("\n\n");

        let structured = match self
            .model
            .complete(
                p.structured_system,
                &fill(p.structured_user, &[("evaluation", &raw_evaluation)]),
            )
            .await
        {
            Ok(text) => parse_structured(&text, input.objectives, &raw_evaluation, input.locale),
            Err(e) => {
                error!("❌ 结构化评估调用失败: {}", e);
                parse_structured("", input.objectives, &raw_evaluation, input.locale)
            }
        };
        if structured.is_fallback() {
            warn!("⚠️ 使用合成的结构化评估");
        }
        info!("✓ 评估完成，抄袭检测: {}", structured.plagiarism_detected());

        EvaluationRecord {
            timestamp: at,
            raw_evaluation,
            structured_evaluation: structured,
            assignment_id: input.assignment_id.to_string(),
            learning_objectives: input.objectives.to_vec(),
            conversation_data: input.conversation.clone(),
        }
    }

    async fn run_section(&self, p: &PromptSet, index: usize, user_message: &str) -> String {
        info!("  🔎 评估第 {}/3 部分", index + 1);
        match self.model.complete(p.evaluation_system, user_message).await {
            Ok(text) => text,
            Err(e) => {
                error!("❌ 第 {} 部分评估失败: {}", index + 1, e);
                p.section_failed[index].to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockChatModel;
    use crate::error::LlmError;
    use crate::models::Turn;
    use crate::utils::text::TRUNCATION_MARKER;
    use mockall::Sequence;
    use std::collections::BTreeMap;

    fn conversation() -> ConversationRecord {
        ConversationRecord {
            questions: vec!["What is X?".into()],
            responses: BTreeMap::from([("What is X?".to_string(), "A thing".to_string())]),
            conversation_history: vec![Turn {
                question: "What is X?".into(),
                response: "A thing".into(),
            }],
            timestamps: vec![Local::now()],
            summary: "Short summary".into(),
            language: Locale::English,
        }
    }

    #[tokio::test]
    async fn four_calls_in_order_with_headers() {
        let mut model = MockChatModel::new();
        let mut seq = Sequence::new();
        model
            .expect_complete()
            .withf(|_, user| user.contains("Response times: Not available") && user.contains(TRUNCATION_MARKER))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("part one".into()));
        model
            .expect_complete()
            .withf(|_, user| user.contains("- Explain X") && user.contains("Question: What is X?\nResponse: A thing"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(LlmError::RequestBuild("down".into())));
        model
            .expect_complete()
            .withf(|_, user| user.contains("overall quality"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("part three".into()));
        model
            .expect_complete()
            .withf(|system, user| system.contains("structures evaluation data") && user.contains("part one"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok("```json\n{\"plagiarism_detected\": true}\n```".into()));

        let agent = EvaluationAgent::new(Arc::new(model), 10);
        let objectives = vec!["Explain X".to_string()];
        let conversation = conversation();
        let record = agent
            .evaluate(
                EvaluationInput {
                    assignment_id: "a1",
                    instructions: "Write about X in great detail",
                    objectives: &objectives,
                    submission_text: "short",
                    conversation: &conversation,
                    locale: Locale::English,
                },
                Local::now(),
            )
            .await;

        assert!(record.raw_evaluation.starts_with("# Comprehension and Authenticity Evaluation\npart one"));
        assert!(record
            .raw_evaluation
            .contains("# Learning Objectives Evaluation\nError in the learning objectives evaluation."));
        assert!(record.raw_evaluation.ends_with("# Overall Quality Evaluation\npart three"));
        assert!(record.structured_evaluation.plagiarism_detected());
        assert!(!record.structured_evaluation.is_fallback());
        assert_eq!(record.assignment_id, "a1");
        assert_eq!(record.learning_objectives, objectives);
    }

    #[tokio::test]
    async fn failed_structuring_call_uses_fallback() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|system, _| system.contains("evaluador"))
            .times(3)
            .returning(|_, _| Ok("sección".into()));
        model
            .expect_complete()
            .withf(|system, _| system.contains("estructura"))
            .times(1)
            .returning(|_, _| Err(LlmError::EmptyContent { model: "m".into() }));

        let agent = EvaluationAgent::new(Arc::new(model), 3000);
        let objectives = vec!["Uno".to_string(), "Dos".to_string()];
        let conversation = conversation();
        let record = agent
            .evaluate(
                EvaluationInput {
                    assignment_id: "a2",
                    instructions: "x",
                    objectives: &objectives,
                    submission_text: "y",
                    conversation: &conversation,
                    locale: Locale::Spanish,
                },
                Local::now(),
            )
            .await;

        let structured = &record.structured_evaluation;
        assert!(structured.is_fallback());
        assert_eq!(structured.objectives().len(), 2);
        assert_eq!(structured.text("raw_evaluation"), Some(record.raw_evaluation.clone()));
    }
}
