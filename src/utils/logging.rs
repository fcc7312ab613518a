/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 日志
///
/// 优先使用 `RUST_LOG`，否则根据 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 作业评估系统启动");
    info!("🌐 监听地址: {}", config.bind_addr);
    info!("📁 数据目录: {}", config.data_dir);
    info!("🤖 模型: {} (temperature {})", config.llm_model_name, config.llm_temperature);
    if !config.has_api_key() {
        info!("⚠️ 未配置 LLM API Key，评估相关操作将被拒绝");
    }
    info!("{}", "=".repeat(60));
}

/// 记录一次评估完成
pub fn log_assessment_complete(evaluation_id: &str, assignment_name: &str, llm_calls: usize) {
    info!("{}", "─".repeat(60));
    info!("✅ 评估完成: {} ({})", assignment_name, evaluation_id);
    info!("📊 本次共调用 LLM {} 次", llm_calls);
    info!("{}", "─".repeat(60));
}
