/*!
 * Mock translator implementations for testing
 *
 * These implement `LineTranslator` directly so the pipeline and controller
 * can be exercised without any external API calls.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use texlate::errors::{ProviderError, TranslationError};
use texlate::translation::LineTranslator;

/// Tracks calls to ensure no actual external requests are made
#[derive(Debug, Default)]
pub struct ApiCallTracker {
    /// Count of mock calls made
    pub call_count: usize,
    /// Every line received, in call order
    pub lines: Vec<String>,
}

/// Type of error to simulate
#[derive(Debug, Clone, Copy, Default)]
pub enum MockErrorType {
    /// Authentication error (invalid API key)
    #[default]
    Auth,
    /// Connection error
    Connection,
    /// Rate limit error
    RateLimit,
    /// API error
    Api,
}

impl MockErrorType {
    fn to_error(self) -> ProviderError {
        match self {
            Self::Auth => ProviderError::AuthenticationError("Invalid API key".to_string()),
            Self::Connection => ProviderError::ConnectionError("Failed to connect".to_string()),
            Self::RateLimit => ProviderError::RateLimitExceeded("Too many requests".to_string()),
            Self::Api => ProviderError::ApiError {
                status_code: 500,
                message: "Internal server error".to_string(),
            },
        }
    }
}

/// Translates by upper-casing the line
#[derive(Debug, Default)]
pub struct UppercaseTranslator {
    tracker: Arc<Mutex<ApiCallTracker>>,
}

impl UppercaseTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }
}

#[async_trait]
impl LineTranslator for UppercaseTranslator {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError> {
        let mut tracker = self.tracker.lock().unwrap();
        tracker.call_count += 1;
        tracker.lines.push(line.to_string());
        Ok(line.to_uppercase())
    }
}

/// Fails every line containing `trigger`, upper-cases the rest
#[derive(Debug)]
pub struct FailingTranslator {
    trigger: String,
    error_type: MockErrorType,
    tracker: Arc<Mutex<ApiCallTracker>>,
}

impl FailingTranslator {
    pub fn new(trigger: impl Into<String>, error_type: MockErrorType) -> Self {
        Self {
            trigger: trigger.into(),
            error_type,
            tracker: Arc::new(Mutex::new(ApiCallTracker::default())),
        }
    }

    /// Get the call tracker
    pub fn tracker(&self) -> Arc<Mutex<ApiCallTracker>> {
        self.tracker.clone()
    }
}

#[async_trait]
impl LineTranslator for FailingTranslator {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError> {
        {
            let mut tracker = self.tracker.lock().unwrap();
            tracker.call_count += 1;
            tracker.lines.push(line.to_string());
        }

        if line.contains(&self.trigger) {
            return Err(self.error_type.to_error().into());
        }
        Ok(line.to_uppercase())
    }
}

/// Upper-cases lines after a delay and records how many calls overlap
#[derive(Debug)]
pub struct DelayedTranslator {
    /// Only lines containing this are delayed; empty delays every line
    trigger: String,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl DelayedTranslator {
    pub fn new(trigger: impl Into<String>, delay: Duration) -> Self {
        Self {
            trigger: trigger.into(),
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Highest number of simultaneous calls seen so far
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LineTranslator for DelayedTranslator {
    async fn translate_line(&self, line: &str) -> Result<String, TranslationError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if line.contains(&self.trigger) {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(line.to_uppercase())
    }
}
