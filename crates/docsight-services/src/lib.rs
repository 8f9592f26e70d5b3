//! External services and the insight pipeline built on them.

pub mod insight;
pub mod summarizer;

pub use insight::InsightResolver;
pub use summarizer::{ChatCompletionsClient, Summarizer, SummaryFailure, SummaryOutcome};
