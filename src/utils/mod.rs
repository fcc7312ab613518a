pub mod logging;
pub mod text;

pub use text::{truncate_for_prompt, truncate_text};
