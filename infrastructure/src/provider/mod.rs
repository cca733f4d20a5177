//! Model provider adapters.

mod openai;

pub use openai::OpenAiChatGateway;
