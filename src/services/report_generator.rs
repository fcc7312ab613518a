//! 报告生成服务

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{error, info};

use crate::clients::ChatModel;
use crate::models::{EvaluationRecord, Locale, Report};
use crate::services::prompts::{fill, prompts};

pub struct ReportGenerator {
    model: Arc<dyn ChatModel>,
}

impl ReportGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// 根据结构化评估生成文字报告，失败时报告正文为错误占位
    pub async fn generate(&self, evaluation: EvaluationRecord, locale: Locale, at: DateTime<Local>) -> Report {
        let p = prompts(locale);
        let evaluation_json = evaluation.structured_evaluation.to_pretty_json();
        let user_message = fill(p.report_user, &[("evaluation_json", &evaluation_json)]);

        info!("📄 正在生成评估报告 ({})", locale);
        let text_report = match self.model.complete(p.report_system, &user_message).await {
            Ok(text) => {
                info!("✓ 报告生成完成 ({} 字符)", text.chars().count());
                text
            }
            Err(e) => {
                error!("❌ 报告生成失败: {}", e);
                p.report_failed.to_string()
            }
        };

        Report {
            text_report,
            evaluation_data: evaluation,
            timestamp: at,
            language: locale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockChatModel;
    use crate::error::LlmError;
    use crate::models::{ConversationRecord, StructuredEvaluation};
    use std::collections::BTreeMap;

    fn evaluation(locale: Locale) -> EvaluationRecord {
        let objectives = vec!["Explain X".to_string()];
        EvaluationRecord {
            timestamp: Local::now(),
            raw_evaluation: "raw".into(),
            structured_evaluation: StructuredEvaluation::fallback(&objectives, "raw", &prompts(locale).fallback),
            assignment_id: "a1".into(),
            learning_objectives: objectives,
            conversation_data: ConversationRecord {
                questions: vec![],
                responses: BTreeMap::new(),
                conversation_history: vec![],
                timestamps: vec![],
                summary: String::new(),
                language: locale,
            },
        }
    }

    #[tokio::test]
    async fn spanish_report_asks_for_eleven_sections() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|_, user| user.contains("11. Recomendaciones") && user.contains("\"objective\": \"Explain X\""))
            .times(1)
            .returning(|_, _| Ok("Informe".into()));

        let report = ReportGenerator::new(Arc::new(model))
            .generate(evaluation(Locale::Spanish), Locale::Spanish, Local::now())
            .await;
        assert_eq!(report.text_report, "Informe");
        assert_eq!(report.language, Locale::Spanish);
        assert_eq!(report.assignment_id(), "a1");
    }

    #[tokio::test]
    async fn english_failure_uses_placeholder() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|_, user| user.contains("6. Recommendations"))
            .returning(|_, _| Err(LlmError::RequestBuild("x".into())));

        let report = ReportGenerator::new(Arc::new(model))
            .generate(evaluation(Locale::English), Locale::English, Local::now())
            .await;
        assert_eq!(report.text_report, "Error generating the report.");
    }
}
