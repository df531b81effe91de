//! Error handling for the blog client.
//!
//! - **Error Categories**: classification that drives handling policy
//! - **`ApiError`**: every failure an API call can surface
//! - **Error Context**: operation/module/path attached for logs
//! - **Error Bodies**: the backend's `detail` / field-error payloads
//!
//! # Handling policy
//!
//! | Category | Source | Handling |
//! |----------|--------|----------|
//! | Auth | 401 | intercepted globally: session cleared, redirect to login, then returned |
//! | User | other 4xx | returned to the caller for display |
//! | Server | 5xx | returned to the caller |
//! | Network | transport | returned to the caller |
//!
//! Best-effort reads (site config, statistics, logout, session check) log the
//! error and keep the last known good state instead of returning it.

mod api_error;
mod body;
mod category;
mod context;
mod result;

pub use api_error::ApiError;
pub use body::{ErrorBody, NON_FIELD_ERRORS};
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use result::{ApiResult, ResultExt};
