//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层是整个系统的"指挥中心"：持有会话状态，决定一次用户操作如何落到流程层。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 初始化日志、存储、模型客户端
//! - 启动 HTTP 服务
//!
//! ### `session` - 会话状态
//! - 角色、提示信息、作业草稿、对话记录、学生阶段
//! - 会话表（会话 id → 会话）
//!
//! ### `controller` - 会话控制器
//! - 校验表单
//! - 调用 `workflow::AssessmentFlow`
//! - 更新会话阶段
//!
//! ## 层次关系
//!
//! ```text
//! api (HTTP 表单 / 页面)
//!     ↓
//! controller (处理单个 Action)
//!     ↓
//! workflow::AssessmentFlow (问题 → 对话 → 评估 → 报告)
//!     ↓
//! services (能力层：问题生成 / 摘要 / 评估 / 报告)
//!     ↓
//! clients + infrastructure (模型客户端 / JSON 文件)
//! ```

pub mod app;
pub mod controller;
pub mod session;

pub use app::App;
pub use controller::{Action, AssignmentForm, DraftIntent, SessionController, SubmissionForm};
pub use session::{Role, Session, SessionStore, StudentStage};
