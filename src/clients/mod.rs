pub mod llm_client;

#[cfg(test)]
pub use llm_client::MockChatModel;
pub use llm_client::{ChatModel, OpenAiChatModel};
