//! Error context for enriched error information.

use chrono::{DateTime, Utc};

/// Metadata about the operation that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Backend path the operation targeted.
    pub path: Option<String>,

    /// Module (`user`, `blog`, `site`, ...) that issued the request.
    pub module: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            path: None,
            module: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];
        if let Some(ref module) = self.module {
            parts.push(format!("module={}", module));
        }
        if let Some(ref path) = self.path {
            parts.push(format!("path={}", path));
        }
        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));
        parts.join(" ")
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.module, &self.path) {
            (Some(module), Some(path)) => write!(f, "[{}/{} {}]", module, self.operation, path),
            (Some(module), None) => write!(f, "[{}/{}]", module, self.operation),
            (None, Some(path)) => write!(f, "[{} {}]", self.operation, path),
            (None, None) => write!(f, "[{}]", self.operation),
        }
    }
}
