//! 问题生成服务 - 能力层
//!
//! 根据作业说明与学习目标让模型生成追问问题，并从回复中解析出问题列表

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, error, info};

use crate::clients::ChatModel;
use crate::models::assignment::{MAX_QUESTIONS, MIN_QUESTIONS};
use crate::models::Locale;
use crate::services::prompts::{bullet_list, fill, prompts};

/// 列表项标记：`- `、`1.` / `2)`、`Q:` / `Q1:` / `Question 2:`
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:-\s+|\d+[.)]\s*|Q[^:]*:\s*)(.*)$").expect("列表项正则无效")
});

/// 问题生成服务
pub struct QuestionGenerator {
    model: Arc<dyn ChatModel>,
}

impl QuestionGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// 生成 `count` 个问题（限制在 1-5 之间）
    ///
    /// 模型调用失败时记录错误并返回空列表，不重试
    pub async fn generate(
        &self,
        instructions: &str,
        objectives: &[String],
        count: u8,
        locale: Locale,
    ) -> Vec<String> {
        let count = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
        let p = prompts(locale);
        let num_questions = count.to_string();
        let objective_list = bullet_list(objectives);
        let user_message = fill(
            p.question_user,
            &[
                ("assignment_text", instructions),
                ("learning_objectives", &objective_list),
                ("num_questions", &num_questions),
            ],
        );

        info!("❓ 正在生成 {} 个问题 ({})", count, locale);
        match self.model.complete(p.question_system, &user_message).await {
            Ok(response) => {
                let questions = parse_questions(&response, count as usize);
                info!("✓ 解析出 {} 个问题", questions.len());
                for (i, q) in questions.iter().enumerate() {
                    debug!("  问题 {}: {}", i + 1, q);
                }
                questions
            }
            Err(e) => {
                error!("❌ 问题生成失败: {}", e);
                Vec::new()
            }
        }
    }
}

/// 从模型回复中提取问题
///
/// 只保留列表项行，去掉标记后按原顺序返回，最多 `count` 个
pub fn parse_questions(response: &str, count: usize) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter_map(|line| LIST_ITEM.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|q| !q.is_empty())
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockChatModel;
    use crate::error::LlmError;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_bullet_and_paren_markers() {
        let response = "- What is X?\n2) Why does Y matter?";
        assert_eq!(
            parse_questions(response, 5),
            vec!["What is X?".to_string(), "Why does Y matter?".to_string()]
        );
    }

    #[test]
    fn handles_mixed_formats_and_skips_prose() {
        let response = "Here are your questions:\n\n\
                        1. First?\n\
                        Q2: Second?\n\
                        Question 3: Third?\n\
                        10) Fourth?\n\
                        -not a bullet\n\
                        Thanks!";
        assert_eq!(
            parse_questions(response, 5),
            vec!["First?", "Second?", "Third?", "Fourth?"]
        );
    }

    #[test]
    fn truncates_to_requested_count() {
        let response = "1. a\n2. b\n3. c\n4. d";
        assert_eq!(parse_questions(response, 2), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn generate_sends_bulleted_objectives() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|_, user| user.contains("- Explain X\n- Apply Y") && user.contains("Generate 2 questions"))
            .times(1)
            .returning(|_, _| Ok("1. One?\n2. Two?\n3. Three?".to_string()));

        let generator = QuestionGenerator::new(Arc::new(model));
        let questions = generator
            .generate(
                "Write an essay",
                &["Explain X".to_string(), "Apply Y".to_string()],
                2,
                Locale::English,
            )
            .await;
        assert_eq!(questions, vec!["One?", "Two?"]);
    }

    #[tokio::test]
    async fn failure_yields_empty_list() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(LlmError::RequestBuild("boom".into())));

        let generator = QuestionGenerator::new(Arc::new(model));
        let questions = generator.generate("x", &[], 3, Locale::Spanish).await;
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn count_is_clamped() {
        let mut model = MockChatModel::new();
        model
            .expect_complete()
            .withf(|_, user| user.contains("Genera 5 preguntas"))
            .returning(|_, _| Ok((1..=8).map(|i| format!("{i}. q{i}")).collect::<Vec<_>>().join("\n")));

        let generator = QuestionGenerator::new(Arc::new(model));
        let questions = generator.generate("x", &[], 9, Locale::Spanish).await;
        assert_eq!(questions.len(), 5);
    }
}
