//! 能力层（Services Layer）
//!
//! 每个服务只负责一种能力，只依赖 [`ChatModel`](crate::clients::ChatModel)
//! 与数据模型，不持有存储，也不关心会话。

pub mod catalog;
pub mod conversation_agent;
pub mod evaluation_agent;
pub mod prompts;
pub mod question_generator;
pub mod report_generator;
pub mod response_timing;
pub mod structured_output;

pub use conversation_agent::ConversationAgent;
pub use evaluation_agent::{EvaluationAgent, EvaluationInput};
pub use question_generator::{parse_questions, QuestionGenerator};
pub use report_generator::ReportGenerator;
