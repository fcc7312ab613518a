use serde::{Deserialize, Serialize};

/// 交互语言
///
/// 序列化为标签字符串（`"English"` / `"Español"`），未知标签回退到默认语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    /// 英语
    #[default]
    English,
    /// 西班牙语
    Spanish,
}

impl Locale {
    /// 所有支持的语言
    pub const ALL: [Locale; 2] = [Locale::English, Locale::Spanish];

    /// 获取标准标签
    pub fn tag(self) -> &'static str {
        match self {
            Locale::English => "English",
            Locale::Spanish => "Español",
        }
    }

    /// 从标签解析语言
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "english" | "en" => Some(Locale::English),
            "español" | "espanol" | "spanish" | "es" => Some(Locale::Spanish),
            _ => None,
        }
    }

    /// 从标签解析语言，未知标签回退到默认语言
    pub fn from_tag(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::from_tag(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_string()
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}
