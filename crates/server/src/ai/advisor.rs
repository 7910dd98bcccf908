//! Symptom analysis and chat on top of the provider chain

use serde::Serialize;
use symptocare_core::advice::{HealthAdvice, clean_text, parse_advice};
use symptocare_core::{language_name, prompt};

use super::provider::ProviderChain;

/// Reply sent to the chat widget when no provider answered
pub const CHAT_UNAVAILABLE: &str = "Service unavailable.";

/// Outcome of a symptom analysis
#[derive(Debug, Clone, Serialize)]
pub struct Consultation {
    pub advice: HealthAdvice,
    /// False when the advice is the canned fallback
    pub ai_available: bool,
}

/// Turns user input into prompts, and provider replies into advice
#[derive(Clone)]
pub struct Advisor {
    chain: ProviderChain,
}

impl Advisor {
    pub fn new(chain: ProviderChain) -> Self {
        Self { chain }
    }

    /// Number of configured providers
    pub fn providers(&self) -> usize {
        self.chain.len()
    }

    /// Analyze symptoms, answering in the language named by `language_code`.
    ///
    /// Never fails: when every provider errors the fallback advice is returned.
    pub async fn analyze(&self, symptoms: &str, language_code: &str) -> Consultation {
        let language = language_name(language_code);
        let prompt = prompt::symptom_prompt(symptoms, language);

        match self.chain.generate(&prompt).await {
            Ok(reply) => Consultation {
                advice: parse_advice(&reply),
                ai_available: true,
            },
            Err(e) => {
                tracing::error!(error = %e, "Symptom analysis fell back to canned advice");
                Consultation {
                    advice: HealthAdvice::unavailable(),
                    ai_available: false,
                }
            }
        }
    }

    /// Answer a chat message, or [`CHAT_UNAVAILABLE`]
    pub async fn chat(&self, message: &str) -> String {
        let prompt = prompt::chat_prompt(message);

        match self.chain.generate(&prompt).await {
            Ok(reply) => {
                let cleaned = clean_text(&reply);
                if cleaned.trim().is_empty() {
                    CHAT_UNAVAILABLE.to_string()
                } else {
                    cleaned
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Chat fell back to unavailable reply");
                CHAT_UNAVAILABLE.to_string()
            }
        }
    }
}
