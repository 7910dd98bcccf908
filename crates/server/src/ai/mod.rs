//! AI text generation: provider clients, fallback chain and the symptom advisor

pub mod advisor;
pub mod client;
pub mod gemini;
pub mod provider;

pub use advisor::{Advisor, Consultation};
pub use client::ClaudeClient;
pub use gemini::GeminiClient;
pub use provider::{AiError, ProviderChain, TextProvider};
