pub mod assignment;
pub mod conversation;
pub mod evaluation;
pub mod locale;
pub mod report;
pub mod submission;

pub use assignment::Assignment;
pub use conversation::{ConversationRecord, Turn};
pub use evaluation::{Criterion, EvaluationRecord, FallbackText, StructuredEvaluation};
pub use locale::Locale;
pub use report::Report;
pub use submission::Submission;
