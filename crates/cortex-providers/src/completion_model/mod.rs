//! Completion Model Implementations
//!
//! Streams raw text completions for the completion orchestrator's rendered
//! prompts.
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`NullCompletionModel`] | No model configured, streams nothing |
//! | [`OpenAiCompletionModel`] | OpenAI-compatible chat-completions endpoint |

pub mod null;
pub mod openai;

pub use null::NullCompletionModel;
pub use openai::OpenAiCompletionModel;
