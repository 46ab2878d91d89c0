/*!
 * Tests for error types and their mapping
 */

use texlate::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_from_status_withAuthCodes_shouldMapToAuthentication() {
    assert!(matches!(ProviderError::from_status(401, "bad key"), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "forbidden"), ProviderError::AuthenticationError(_)));
}

#[test]
fn test_from_status_with429_shouldMapToRateLimit() {
    assert!(matches!(ProviderError::from_status(429, "slow down"), ProviderError::RateLimitExceeded(_)));
}

#[test]
fn test_from_status_withServerError_shouldKeepStatusAndBody() {
    match ProviderError::from_status(503, "unavailable") {
        ProviderError::ApiError { status_code, message } => {
            assert_eq!(status_code, 503);
            assert_eq!(message, "unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_display_shouldCarryProviderMessage() {
    let error = ProviderError::ApiError {
        status_code: 400,
        message: "bad request".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 400 - bad request");
}

#[test]
fn test_translationError_fromProvider_shouldWrapMessage() {
    let error: TranslationError = ProviderError::RateLimitExceeded("quota".to_string()).into();
    assert_eq!(error.to_string(), "Provider error: Rate limit exceeded: quota");
}

#[test]
fn test_appError_fromIo_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}
