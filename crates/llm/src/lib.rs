//! LLM integration crate for sitebrief.
//!
//! A provider-agnostic abstraction over the generative AI services sitebrief
//! talks to: text completion (optionally structured as JSON), streaming
//! completion and image generation.
//!
//! # Providers
//! - **Gemini**: Google Generative Language API (default)
//! - **Ollama**: Local LLM runtime
//! - **Mock**: Scripted/echo client for tests and offline runs
//!
//! # Example
//! ```no_run
//! use sitebrief_llm::{LlmClient, LlmRequest, providers::GeminiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("api-key");
//! let request = LlmRequest::new("Olá!", "gemini-2.5-flash");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod structured;
pub mod types;

// Re-export main types
pub use client::{
    LlmClient, LlmImage, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage,
};
pub use factory::create_client;
pub use providers::{GeminiClient, MockClient, OllamaClient};
pub use structured::{complete_json, parse_json};
pub use types::ProviderType;
