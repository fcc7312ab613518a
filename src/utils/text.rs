//! 文本截断工具

/// 提示词截断标记
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 截断作业说明或学生提交，避免超出模型上下文
///
/// 按字符计数，超出时保留前 `max_chars` 个字符并追加 [`TRUNCATION_MARKER`]
pub fn truncate_for_prompt(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect::<String>() + TRUNCATION_MARKER
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_for_prompt("hola", 10), "hola");
        assert_eq!(truncate_text("hola", 4), "hola");
    }

    #[test]
    fn long_text_gets_marker() {
        let text = "ñ".repeat(12);
        let out = truncate_for_prompt(&text, 10);
        assert_eq!(out, format!("{}{}", "ñ".repeat(10), TRUNCATION_MARKER));
        assert_eq!(truncate_text(&text, 3), "ñññ...");
    }
}
