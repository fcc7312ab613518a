//! # Assignment Assessor
//!
//! 教师布置作业并设定学习目标，学生提交后由智能体追问，
//! 最终经多阶段评估生成带评分的报告。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（JSON 集合文件、上传文件）
//! - `JsonCollection` - 一个集合一个文件，整文件读写
//! - `UploadStore` - 上传文件的保存与读取
//!
//! ### ② 客户端（Clients）
//! - `clients/` - 模型访问边界
//! - `ChatModel` - system + user → 回复文本
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `QuestionGenerator` - 生成追问问题
//! - `ConversationAgent` - 对话摘要
//! - `EvaluationAgent` - 四次调用的评估
//! - `ReportGenerator` - 文字报告
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整处理流程
//! - `ConversationState` - 一问一答的状态机
//! - `AssessmentFlow` - 问题 → 对话 → 摘要 → 评估 → 报告 → 保存
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/session` - 每个浏览器会话的状态
//! - `orchestrator/controller` - 处理用户操作
//! - `orchestrator/app` - 应用生命周期
//!
//! ### ⑥ 接口层（API）
//! - `api/` - 表单页面、会话 cookie、界面文案
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ChatModel, OpenAiChatModel};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::Storage;
pub use models::{Assignment, Locale, Report, StructuredEvaluation, Submission};
pub use orchestrator::{App, SessionController};
pub use workflow::{AssessmentFlow, ConversationState};
