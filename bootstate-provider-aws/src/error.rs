//! Conversion of AWS SDK errors into provider API errors
//!
//! Both service crates re-export the same smithy error types, so one set of
//! helpers serves S3 and DynamoDB.

use aws_sdk_s3::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use bootstate_core::api::ApiError;

/// Flatten an SDK error into a service error.
///
/// Modeled errors keep their code and message. Unmodeled responses (a bare
/// 403 on HeadBucket) fall back to the HTTP status. Errors without a
/// response (dispatch, timeout) keep the full source chain.
pub(crate) fn sdk_error<E>(err: SdkError<E>) -> ApiError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => ApiError::service(format!("{}: {}", code, message)),
        (Some(code), None) => ApiError::service(code.to_string()),
        _ => match err.raw_response() {
            Some(raw) => ApiError::service(format!("HTTP {} response", raw.status().as_u16())),
            None => ApiError::service(DisplayErrorContext(err).to_string()),
        },
    }
}

pub(crate) fn build_error(err: BuildError) -> ApiError {
    ApiError::service(format!("invalid request: {}", err))
}
