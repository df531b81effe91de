//! Unified error type for the blog client.

use std::collections::BTreeMap;
use std::fmt;

use super::body::ErrorBody;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use crate::traits::{CookieStoreError, HttpError, Response};

/// Every failure an API call can surface to the caller.
#[derive(Debug)]
pub enum ApiError {
    /// Transport failure; no response was received.
    Network(HttpError),

    /// 401 from the backend. The session has already been cleared.
    Unauthorized { message: String },

    /// Login rejected.
    InvalidCredentials { message: String },

    /// 403 from the backend.
    Forbidden { message: String },

    /// 404 from the backend.
    NotFound { path: String, message: String },

    /// Any other 4xx, with the backend's per-field messages.
    Validation {
        status: u16,
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// 5xx (or an unexpected non-2xx status).
    Server { status: u16, message: String },

    /// 2xx body that did not match the expected shape.
    Decode { message: String },

    /// Cookie jar could not be read or written.
    CookieStore(CookieStoreError),

    /// Invalid client configuration.
    Config { message: String },

    /// Wrapped error with additional context.
    WithContext {
        error: Box<ApiError>,
        context: ErrorContext,
    },
}

impl ApiError {
    /// Map a non-2xx response for `path` to an error.
    pub fn from_response(path: &str, response: &Response) -> Self {
        let status = response.status;
        let fallback = match status {
            401 => "Authentication required",
            403 => "Permission denied",
            404 => "Not found",
            500..=599 => "Internal server error",
            _ => "Request failed",
        };
        let body = ErrorBody::parse(&response.body, fallback);

        match status {
            401 => ApiError::Unauthorized {
                message: body.message,
            },
            403 => ApiError::Forbidden {
                message: body.message,
            },
            404 => ApiError::NotFound {
                path: path.to_string(),
                message: body.message,
            },
            400..=499 => ApiError::Validation {
                status,
                message: body.message,
                fields: body.fields,
            },
            _ => ApiError::Server {
                status,
                message: body.message,
            },
        }
    }

    /// HTTP status behind this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self.inner() {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Network(_) => ErrorCategory::Network,
            ApiError::Unauthorized { .. } | ApiError::InvalidCredentials { .. } => {
                ErrorCategory::Auth
            }
            ApiError::Forbidden { .. }
            | ApiError::NotFound { .. }
            | ApiError::Validation { .. } => ErrorCategory::User,
            ApiError::Server { .. } => ErrorCategory::Server,
            ApiError::Decode { .. } => ErrorCategory::Client,
            ApiError::CookieStore(_) => ErrorCategory::System,
            ApiError::Config { .. } => ErrorCategory::Configuration,
            ApiError::WithContext { error, .. } => error.category(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(err) => err.is_transient(),
            ApiError::Server { status, .. } => *status >= 500,
            ApiError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// True for the 401 case the global handler reacts to.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.inner(), ApiError::Unauthorized { .. })
    }

    /// Per-field validation messages, empty for other errors.
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        match self.inner() {
            ApiError::Validation { fields, .. } => fields.clone(),
            _ => BTreeMap::new(),
        }
    }

    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ApiError::Unauthorized { .. } => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::InvalidCredentials { message }
            | ApiError::Forbidden { message }
            | ApiError::Validation { message, .. } => message.clone(),
            ApiError::NotFound { .. } => "The requested resource was not found.".to_string(),
            ApiError::Server { .. } => {
                "The server is experiencing issues. Please try again later.".to_string()
            }
            ApiError::Decode { .. } => {
                "Received an unexpected response from the server.".to_string()
            }
            ApiError::CookieStore(_) => "Could not access the local session store.".to_string(),
            ApiError::Config { message } => format!("Configuration error: {}", message),
            ApiError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "E_NET",
            ApiError::Unauthorized { .. } => "E_AUTH_401",
            ApiError::InvalidCredentials { .. } => "E_AUTH_LOGIN",
            ApiError::Forbidden { .. } => "E_FORBIDDEN",
            ApiError::NotFound { .. } => "E_NOT_FOUND",
            ApiError::Validation { .. } => "E_VALIDATION",
            ApiError::Server { .. } => "E_SERVER",
            ApiError::Decode { .. } => "E_DECODE",
            ApiError::CookieStore(_) => "E_COOKIES",
            ApiError::Config { .. } => "E_CONFIG",
            ApiError::WithContext { error, .. } => error.error_code(),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        ApiError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ApiError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The error without any context wrappers.
    pub fn inner(&self) -> &ApiError {
        match self {
            ApiError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(err) => write!(f, "{}", err),
            ApiError::Unauthorized { message } => write!(f, "HTTP 401: {}", message),
            ApiError::InvalidCredentials { message } => write!(f, "Login failed: {}", message),
            ApiError::Forbidden { message } => write!(f, "HTTP 403: {}", message),
            ApiError::NotFound { path, message } => write!(f, "HTTP 404 {}: {}", path, message),
            ApiError::Validation {
                status, message, ..
            } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Server { status, message } => write!(f, "HTTP {}: {}", status, message),
            ApiError::Decode { message } => write!(f, "Invalid response body: {}", message),
            ApiError::CookieStore(err) => write!(f, "{}", err),
            ApiError::Config { message } => write!(f, "Invalid configuration: {}", message),
            ApiError::WithContext { error, context } => write!(f, "{} {}", error, context),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(err) => Some(err),
            ApiError::CookieStore(err) => Some(err),
            ApiError::WithContext { error, .. } => error.source(),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        ApiError::Network(err)
    }
}

impl From<CookieStoreError> for ApiError {
    fn from(err: CookieStoreError) -> Self {
        ApiError::CookieStore(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}
