//! 结构化评估解析
//!
//! 模型返回的 JSON 可能带有 Markdown 代码块，也可能缺字段或根本无法解析。
//! 这里统一处理为完整的 [`StructuredEvaluation`]，不会向上抛出错误。

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{Locale, StructuredEvaluation};
use crate::services::prompts::prompts;

/// 去掉 ```` ```json ```` 或 ```` ``` ```` 代码块包裹
pub fn strip_code_fences(text: &str) -> &str {
    if let Some((_, rest)) = text.split_once("```json") {
        return rest.split("```").next().unwrap_or(rest).trim();
    }
    let mut blocks = text.split("```");
    match (blocks.next(), blocks.next()) {
        (Some(_), Some(inner)) => inner.trim(),
        _ => text.trim(),
    }
}

/// 解析结构化评估
///
/// - 解析成功且为对象：补齐缺失的键
/// - 否则：返回合成结构（附带三段评估原文）
pub fn parse_structured(
    text: &str,
    objectives: &[String],
    raw_evaluation: &str,
    locale: Locale,
) -> StructuredEvaluation {
    let fallback = &prompts(locale).fallback;
    let json_content = strip_code_fences(text);

    match serde_json::from_str::<Value>(json_content) {
        Ok(Value::Object(map)) => {
            debug!("结构化评估包含 {} 个键", map.len());
            StructuredEvaluation::backfill(map, objectives, fallback)
        }
        Ok(other) => {
            warn!("⚠️ 结构化评估不是 JSON 对象: {}", type_name(&other));
            StructuredEvaluation::fallback(objectives, raw_evaluation, fallback)
        }
        Err(e) => {
            warn!("⚠️ 结构化评估 JSON 解析失败: {}", e);
            StructuredEvaluation::fallback(objectives, raw_evaluation, fallback)
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
