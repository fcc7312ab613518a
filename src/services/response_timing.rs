//! 回答耗时估算
//!
//! 相邻两个时间戳之间的间隔即为对应问题的回答耗时，仅作为提示词上下文

use crate::models::{ConversationRecord, Locale};
use crate::services::prompts::{fill, prompts};
use crate::utils::truncate_text;

/// 问题预览长度
const QUESTION_PREVIEW_CHARS: usize = 50;

/// 单个问题的回答耗时
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTime {
    pub question_preview: String,
    pub seconds: f64,
    pub response_chars: usize,
}

/// 计算每轮问答的耗时
///
/// 第 i 轮使用 `timestamps[i]` 与 `timestamps[i + 1]`；
/// 时间戳不足的轮次被忽略
pub fn response_times(record: &ConversationRecord) -> Vec<ResponseTime> {
    record
        .timestamps
        .windows(2)
        .zip(&record.conversation_history)
        .map(|(pair, turn)| ResponseTime {
            question_preview: truncate_text(&turn.question, QUESTION_PREVIEW_CHARS),
            seconds: (pair[1] - pair[0]).num_milliseconds() as f64 / 1000.0,
            response_chars: turn.response.chars().count(),
        })
        .collect()
}

/// 渲染为提示词文本，没有数据时返回 "不可用" 占位
pub fn render_response_times(times: &[ResponseTime], locale: Locale) -> String {
    let p = prompts(locale);
    if times.is_empty() {
        return p.response_times_unavailable.to_string();
    }
    times
        .iter()
        .enumerate()
        .map(|(i, t)| {
            fill(
                p.response_time_line,
                &[
                    ("n", &(i + 1).to_string()),
                    ("seconds", &format!("{:.1}", t.seconds)),
                    ("chars", &t.response_chars.to_string()),
                ],
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
