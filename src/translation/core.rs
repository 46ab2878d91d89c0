/*!
 * Core translation service implementation.
 *
 * This module contains the `LineTranslator` seam used by the line pipeline and
 * the `TranslationService` that fulfils it through a configured provider.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::trace;
use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::app_config::{Config, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Single-line, text-in/text-out translation.
///
/// Implementations must return the translated line verbatim; callers do not
/// validate or post-process it.
#[async_trait]
pub trait LineTranslator: Send + Sync {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError>;
}

/// Token usage statistics for tracking API consumption
#[derive(Clone, Debug)]
pub struct TokenUsageStats {
    /// Number of prompt tokens
    pub prompt_tokens: u64,

    /// Number of completion tokens
    pub completion_tokens: u64,

    /// Total number of tokens
    pub total_tokens: u64,

    /// Number of completed requests
    pub requests: u64,

    /// Total time spent on API requests
    pub api_duration: Duration,

    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,
}

impl TokenUsageStats {
    /// Create new token usage stats with provider info
    pub fn with_provider_info(provider: String, model: String) -> Self {
        Self {
            prompt_tokens: 0,
            completion_tokens: 0,
            total_tokens: 0,
            requests: 0,
            api_duration: Duration::from_secs(0),
            provider,
            model,
        }
    }

    /// Record one completed request
    pub fn record(&mut self, prompt_tokens: Option<u64>, completion_tokens: Option<u64>, duration: Duration) {
        if let Some(pt) = prompt_tokens {
            self.prompt_tokens += pt;
            self.total_tokens += pt;
        }

        if let Some(ct) = completion_tokens {
            self.completion_tokens += ct;
            self.total_tokens += ct;
        }

        self.requests += 1;
        self.api_duration += duration;
    }

    /// Generate a summary of token usage
    pub fn summary(&self) -> String {
        format!(
            "Token usage ({} - {}): {} requests, {} prompt + {} completion = {} tokens, {:.1}s in API calls",
            self.provider,
            self.model,
            self.requests,
            self.prompt_tokens,
            self.completion_tokens,
            self.total_tokens,
            self.api_duration.as_secs_f64()
        )
    }
}

/// Translation provider implementation variants
#[derive(Debug)]
enum TranslationProviderImpl {
    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },
}

/// Request settings shared by every line of a run
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Rendered system instruction
    pub system_prompt: String,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

/// Main translation service, one provider client per run
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Request settings
    pub options: TranslationOptions,

    /// Accumulated usage across all files of the run
    usage: Mutex<TokenUsageStats>,
}

impl TranslationService {
    /// Create a new translation service from the application configuration
    pub fn new(config: &Config) -> Result<Self> {
        let translation = &config.translation;
        let api_key = translation.get_api_key();
        let endpoint = translation.get_endpoint();
        let timeout_secs = translation.get_timeout_secs();

        let provider = match translation.provider {
            ConfigTranslationProvider::OpenAI => TranslationProviderImpl::OpenAI {
                client: OpenAI::new_with_timeout(api_key, endpoint, timeout_secs),
            },
            ConfigTranslationProvider::Anthropic => TranslationProviderImpl::Anthropic {
                client: Anthropic::new_with_timeout(api_key, endpoint, timeout_secs),
            },
        };

        let options = TranslationOptions {
            system_prompt: config.render_system_prompt()?,
            model: translation.get_model(),
            temperature: translation.common.temperature,
            top_p: translation.common.top_p,
            max_output_tokens: translation.common.max_output_tokens,
        };

        let usage = TokenUsageStats::with_provider_info(
            translation.provider.display_name().to_string(),
            options.model.clone(),
        );

        Ok(Self {
            provider,
            options,
            usage: Mutex::new(usage),
        })
    }

    /// Snapshot of the usage accumulated so far
    pub fn usage(&self) -> TokenUsageStats {
        self.usage.lock().clone()
    }

    async fn send(&self, line: &str) -> Result<(String, Option<u64>, Option<u64>), TranslationError> {
        let options = &self.options;
        match &self.provider {
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(&options.model)
                    .add_message("system", &options.system_prompt)
                    .add_message("user", line)
                    .temperature(options.temperature)
                    .top_p(options.top_p)
                    .max_tokens(options.max_output_tokens);

                let response = client.complete(request).await?;
                let (prompt_tokens, completion_tokens) = match response.usage.as_ref() {
                    Some(usage) => (Some(usage.prompt_tokens as u64), Some(usage.completion_tokens as u64)),
                    None => (None, None),
                };
                Ok((OpenAI::extract_text(&response), prompt_tokens, completion_tokens))
            }
            TranslationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(&options.model, options.max_output_tokens)
                    .system(&options.system_prompt)
                    .add_message("user", line)
                    .temperature(options.temperature)
                    .top_p(options.top_p);

                let response = client.complete(request).await?;
                Ok((
                    Anthropic::extract_text(&response),
                    Some(response.usage.input_tokens as u64),
                    Some(response.usage.output_tokens as u64),
                ))
            }
        }
    }
}

#[async_trait]
impl LineTranslator for TranslationService {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError> {
        let start_time = Instant::now();
        let (translated, prompt_tokens, completion_tokens) = self.send(line).await?;
        let duration = start_time.elapsed();

        trace!("Translated in {:?}: {:?} -> {:?}", duration, line, translated);
        self.usage.lock().record(prompt_tokens, completion_tokens, duration);

        Ok(translated)
    }
}
