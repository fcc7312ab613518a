//! 评估记录与结构化评估
//!
//! 结构化评估保存为原始 JSON 对象：模型给出的键值原样保留，
//! 缺失的键按固定规则补齐，解析失败时整体替换为合成结构。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::ConversationRecord;

/// 缺失分数时使用的默认分数
pub const DEFAULT_SCORE: u8 = 50;

/// 评分维度（形如 `{score, examples, feedback}` 的顶层键）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    Comprehension,
    Authenticity,
    RelationalSkills,
    Argumentation,
    BibliographyUse,
    OverallQuality,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Criterion::Comprehension,
        Criterion::Authenticity,
        Criterion::RelationalSkills,
        Criterion::Argumentation,
        Criterion::BibliographyUse,
        Criterion::OverallQuality,
    ];

    /// JSON 键名
    pub fn key(self) -> &'static str {
        match self {
            Criterion::Comprehension => "comprehension",
            Criterion::Authenticity => "authenticity",
            Criterion::RelationalSkills => "relational_skills",
            Criterion::Argumentation => "argumentation",
            Criterion::BibliographyUse => "bibliography_use",
            Criterion::OverallQuality => "overall_quality",
        }
    }
}

pub const KEY_LEARNING_OBJECTIVES: &str = "learning_objectives";
pub const KEY_PLAGIARISM_DETECTED: &str = "plagiarism_detected";
pub const KEY_PLAGIARISM_EVIDENCE: &str = "plagiarism_evidence";
pub const KEY_RESPONSE_TIME_ANALYSIS: &str = "response_time_analysis";
pub const KEY_SUMMARY: &str = "summary";
pub const KEY_RAW_EVALUATION: &str = "raw_evaluation";

/// 结构化评估必须包含的全部顶层键
pub const REQUIRED_KEYS: [&str; 11] = [
    "comprehension",
    "authenticity",
    "relational_skills",
    "argumentation",
    "bibliography_use",
    KEY_LEARNING_OBJECTIVES,
    "overall_quality",
    KEY_PLAGIARISM_DETECTED,
    KEY_PLAGIARISM_EVIDENCE,
    KEY_RESPONSE_TIME_ANALYSIS,
    KEY_SUMMARY,
];

/// 合成结构使用的说明文案
#[derive(Debug, Clone, Copy)]
pub struct FallbackText {
    /// 缺失字段占位（如 "N/A"）
    pub not_available: &'static str,
    /// 评分维度的 examples / feedback
    pub format_error: &'static str,
    pub plagiarism_unavailable: &'static str,
    pub response_time_unavailable: &'static str,
    pub summary_error: &'static str,
}

/// 单个评分维度的读取视图
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub score: Option<f64>,
    pub examples: String,
    pub feedback: String,
}

/// 单个学习目标的读取视图
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveScore {
    pub objective: String,
    pub entry: ScoreEntry,
}

/// 结构化评估
///
/// 序列化结果就是 JSON 对象本身。是否为合成结构只在内存中记录，
/// 不会写入存储，也不受模型回复里出现的键影响。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredEvaluation {
    fields: Map<String, Value>,
    #[serde(skip)]
    synthetic: bool,
}

impl PartialEq for StructuredEvaluation {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl StructuredEvaluation {
    /// 补齐缺失的键，已有键保持不变
    ///
    /// - `plagiarism_detected` → `false`
    /// - 文本键 → `text.not_available`
    /// - 评分维度 → `{score: 50, examples, feedback}`
    /// - `learning_objectives` → 每个声明的学习目标一条默认记录
    /// - 每条学习目标记录中缺失的字段同样补齐
    pub fn backfill(mut map: Map<String, Value>, objectives: &[String], text: &FallbackText) -> Self {
        let na = text.not_available;

        for criterion in Criterion::ALL {
            map.entry(criterion.key())
                .or_insert_with(|| score_record(DEFAULT_SCORE, na));
        }
        map.entry(KEY_PLAGIARISM_DETECTED).or_insert(Value::Bool(false));
        for key in [KEY_PLAGIARISM_EVIDENCE, KEY_RESPONSE_TIME_ANALYSIS, KEY_SUMMARY] {
            map.entry(key).or_insert_with(|| Value::String(na.to_string()));
        }
        map.entry(KEY_LEARNING_OBJECTIVES)
            .or_insert_with(|| objective_records(objectives, na));

        if let Some(Value::Array(entries)) = map.get_mut(KEY_LEARNING_OBJECTIVES) {
            for entry in entries.iter_mut() {
                if let Value::Object(obj) = entry {
                    for field in ["objective", "examples", "feedback"] {
                        obj.entry(field).or_insert_with(|| Value::String(na.to_string()));
                    }
                    obj.entry("score").or_insert_with(|| json!(DEFAULT_SCORE));
                }
            }
        }

        Self {
            fields: map,
            synthetic: false,
        }
    }

    /// 解析失败时的合成结构：所有分数为 50，每个学习目标各占一条
    pub fn fallback(objectives: &[String], raw_evaluation: &str, text: &FallbackText) -> Self {
        let mut map = Map::new();
        map.insert(KEY_RAW_EVALUATION.into(), Value::String(raw_evaluation.to_string()));
        for criterion in Criterion::ALL {
            map.insert(criterion.key().into(), score_record(DEFAULT_SCORE, text.format_error));
        }
        map.insert(
            KEY_LEARNING_OBJECTIVES.into(),
            objective_records(objectives, text.format_error),
        );
        map.insert(KEY_PLAGIARISM_DETECTED.into(), Value::Bool(false));
        map.insert(
            KEY_PLAGIARISM_EVIDENCE.into(),
            Value::String(text.plagiarism_unavailable.to_string()),
        );
        map.insert(
            KEY_RESPONSE_TIME_ANALYSIS.into(),
            Value::String(text.response_time_unavailable.to_string()),
        );
        map.insert(KEY_SUMMARY.into(), Value::String(text.summary_error.to_string()));
        Self {
            fields: map,
            synthetic: true,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// 是否为解析失败后的合成结构
    pub fn is_fallback(&self) -> bool {
        self.synthetic
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.fields).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn criterion(&self, criterion: Criterion) -> Option<ScoreEntry> {
        self.fields.get(criterion.key()).and_then(read_entry)
    }

    pub fn objectives(&self) -> Vec<ObjectiveScore> {
        self.fields
            .get(KEY_LEARNING_OBJECTIVES)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| {
                        Some(ObjectiveScore {
                            objective: value_text(e.get("objective")?),
                            entry: read_entry(e)?,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn plagiarism_detected(&self) -> bool {
        match self.fields.get(KEY_PLAGIARISM_DETECTED) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(value_text)
    }
}

fn score_record(score: u8, text: &str) -> Value {
    json!({ "score": score, "examples": text, "feedback": text })
}

fn objective_records(objectives: &[String], text: &str) -> Value {
    Value::Array(
        objectives
            .iter()
            .map(|obj| {
                json!({
                    "objective": obj,
                    "score": DEFAULT_SCORE,
                    "examples": text,
                    "feedback": text,
                })
            })
            .collect(),
    )
}

fn read_entry(value: &Value) -> Option<ScoreEntry> {
    let obj = value.as_object()?;
    let score = obj.get("score").and_then(|s| match s {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });
    Some(ScoreEntry {
        score,
        examples: obj.get("examples").map(value_text).unwrap_or_default(),
        feedback: obj.get("feedback").map(value_text).unwrap_or_default(),
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 评估记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub timestamp: DateTime<Local>,
    /// 三段评估原文（带固定小节标题）
    pub raw_evaluation: String,
    pub structured_evaluation: StructuredEvaluation,
    pub assignment_id: String,
    pub learning_objectives: Vec<String>,
    pub conversation_data: ConversationRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEXT: FallbackText = FallbackText {
        not_available: "N/A",
        format_error: "format error",
        plagiarism_unavailable: "no plagiarism analysis",
        response_time_unavailable: "no timing analysis",
        summary_error: "format error summary",
    };

    fn objectives() -> Vec<String> {
        vec!["Explain X".to_string(), "Apply Y".to_string()]
    }

    #[test]
    fn backfill_fills_every_missing_key() {
        let evaluation = StructuredEvaluation::backfill(Map::new(), &objectives(), &TEXT);
        for key in REQUIRED_KEYS {
            assert!(evaluation.as_map().contains_key(key), "missing {key}");
        }
        assert_eq!(
            evaluation.as_map()["comprehension"],
            json!({"score": 50, "examples": "N/A", "feedback": "N/A"})
        );
        assert_eq!(evaluation.as_map()["plagiarism_detected"], json!(false));
        assert_eq!(evaluation.as_map()["summary"], json!("N/A"));
        assert_eq!(evaluation.objectives().len(), 2);
    }

    #[test]
    fn backfill_keeps_present_keys_untouched() {
        let original = json!({
            "comprehension": {"score": "eighty", "notes": "kept"},
            "plagiarism_detected": "maybe",
            "summary": 42,
            "learning_objectives": [{"objective": "Explain X", "score": 90}]
        });
        let Value::Object(map) = original.clone() else { unreachable!() };

        let evaluation = StructuredEvaluation::backfill(map, &objectives(), &TEXT);
        let out = evaluation.as_map();

        assert_eq!(out["comprehension"], original["comprehension"]);
        assert_eq!(out["plagiarism_detected"], original["plagiarism_detected"]);
        assert_eq!(out["summary"], original["summary"]);
        assert_eq!(
            out["learning_objectives"],
            json!([{"objective": "Explain X", "score": 90, "examples": "N/A", "feedback": "N/A"}])
        );
    }

    #[test]
    fn objective_entry_missing_score_gets_default() {
        let Value::Object(map) = json!({"learning_objectives": [{"feedback": "ok"}]}) else {
            unreachable!()
        };
        let evaluation = StructuredEvaluation::backfill(map, &[], &TEXT);
        let objectives = evaluation.objectives();
        assert_eq!(objectives[0].objective, "N/A");
        assert_eq!(objectives[0].entry.score, Some(50.0));
        assert_eq!(objectives[0].entry.feedback, "ok");
    }

    #[test]
    fn fallback_lists_every_declared_objective() {
        let evaluation = StructuredEvaluation::fallback(&objectives(), "raw text", &TEXT);
        let scored = evaluation.objectives();
        assert_eq!(
            scored.iter().map(|o| o.objective.as_str()).collect::<Vec<_>>(),
            vec!["Explain X", "Apply Y"]
        );
        assert!(scored.iter().all(|o| o.entry.score == Some(50.0)));
        assert!(evaluation.is_fallback());
        assert!(!evaluation.plagiarism_detected());
        assert_eq!(evaluation.text(KEY_RAW_EVALUATION).as_deref(), Some("raw text"));
        for criterion in Criterion::ALL {
            assert_eq!(evaluation.criterion(criterion).unwrap().score, Some(50.0));
        }
    }

    #[test]
    fn model_reply_with_raw_evaluation_key_is_not_synthetic() {
        let Value::Object(map) = json!({"raw_evaluation": "echoed by the model", "summary": "fine"}) else {
            unreachable!()
        };
        let evaluation = StructuredEvaluation::backfill(map, &objectives(), &TEXT);
        assert!(!evaluation.is_fallback());
        assert_eq!(evaluation.text("summary").as_deref(), Some("fine"));
    }

    #[test]
    fn synthetic_flag_is_not_serialized() {
        let evaluation = StructuredEvaluation::fallback(&objectives(), "raw", &TEXT);
        let json = serde_json::to_value(&evaluation).unwrap();
        assert_eq!(json.as_object().unwrap().len(), REQUIRED_KEYS.len() + 1);

        let restored: StructuredEvaluation = serde_json::from_value(json).unwrap();
        assert_eq!(restored, evaluation);
    }
}
