//! 流程层（Workflow Layer）
//!
//! - `conversation`：一问一答的状态机（不可变快照）
//! - `assessment_flow`：一次提交从生成问题到保存报告的完整流程
//!
//! 本层只编排 services，不持有会话状态。

pub mod assessment_flow;
pub mod conversation;

pub use assessment_flow::AssessmentFlow;
pub use conversation::{AgentReply, AwaitingAnswer, CompletedConversation, ConversationState};
