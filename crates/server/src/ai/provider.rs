//! Text-generation providers and the ordered fallback chain over them

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors from an AI provider call
#[derive(Debug, Error)]
pub enum AiError {
    #[error("No AI provider configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("All {attempts} AI providers failed, last error: {last}")]
    Exhausted { attempts: usize, last: Box<AiError> },
}

/// A generative-text backend: prompt in, free text out
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Label used in logs. Must not contain secrets.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Providers tried in order until one returns non-empty text
#[derive(Clone, Default)]
pub struct ProviderChain {
    providers: Vec<Arc<dyn TextProvider>>,
}

impl ProviderChain {
    pub fn new(providers: Vec<Arc<dyn TextProvider>>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Arc<dyn TextProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run the prompt through each provider in turn and return the first usable reply
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let mut last = AiError::NotConfigured;

        for (attempt, provider) in self.providers.iter().enumerate() {
            let result = match provider.generate(prompt).await {
                Ok(text) if text.trim().is_empty() => Err(AiError::EmptyResponse),
                other => other,
            };

            match result {
                Ok(text) => {
                    tracing::debug!(
                        provider = provider.name(),
                        attempt = attempt + 1,
                        "AI provider answered"
                    );
                    record_outcome(provider.name(), "success");
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        attempt = attempt + 1,
                        error = %e,
                        "AI provider failed, trying next"
                    );
                    record_outcome(provider.name(), "failure");
                    last = e;
                }
            }
        }

        if self.is_empty() {
            return Err(AiError::NotConfigured);
        }

        Err(AiError::Exhausted {
            attempts: self.providers.len(),
            last: Box::new(last),
        })
    }
}

fn record_outcome(provider: &str, outcome: &'static str) {
    metrics::counter!(
        "ai_requests_total",
        "provider" => provider.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider returning a fixed outcome and counting calls
    struct Scripted {
        name: String,
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn ok(name: &str, reply: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                reply: Some(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                reply: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    fn chain_of(providers: &[&Arc<Scripted>]) -> ProviderChain {
        ProviderChain::new(
            providers
                .iter()
                .map(|p| (*p).clone() as Arc<dyn TextProvider>)
                .collect(),
        )
    }

    #[async_trait]
    impl TextProvider for Scripted {
        fn name(&self) -> &str {
            &self.name
        }

        async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().ok_or_else(|| AiError::Api {
                provider: self.name.clone(),
                status: 429,
                message: "quota exceeded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_empty_chain_is_not_configured() {
        let chain = ProviderChain::default();
        assert!(matches!(
            chain.generate("hi").await,
            Err(AiError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let first = Scripted::ok("a", "hello");
        let second = Scripted::ok("b", "unused");
        let chain = chain_of(&[&first, &second]);

        assert_eq!(chain.generate("hi").await.unwrap(), "hello");
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_past_failures_and_blank_replies() {
        let failing = Scripted::failing("a");
        let blank = Scripted::ok("b", "   \n");
        let good = Scripted::ok("c", "answer");
        let chain = chain_of(&[&failing, &blank, &good]);

        assert_eq!(chain.generate("hi").await.unwrap(), "answer");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(blank.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exhausted_reports_last_error() {
        let chain = chain_of(&[&Scripted::failing("a"), &Scripted::ok("b", "")]);

        match chain.generate("hi").await {
            Err(AiError::Exhausted { attempts, last }) => {
                assert_eq!(attempts, 2);
                assert!(matches!(*last, AiError::EmptyResponse));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
