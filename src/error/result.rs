//! Result type alias for client operations.

use super::api_error::ApiError;
use super::context::ErrorContext;

/// Result type used throughout the client.
pub type ApiResult<T> = Result<T, ApiError>;

/// Extension trait for attaching [`ErrorContext`] to results.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> ApiResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> ApiResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn context(self, ctx: ErrorContext) -> ApiResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> ApiResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
