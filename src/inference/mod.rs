pub mod explainer;
pub mod provider;
pub mod providers;
pub mod types;

pub use explainer::{CompletionExplainer, Explanation, ExplanationProvider};
pub use provider::{CompletionProvider, CompletionRequest, ProviderError};
pub use providers::{LmStudioProvider, OpenRouterProvider};
pub use types::{Completion, Message, Role};
