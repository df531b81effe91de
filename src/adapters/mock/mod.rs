//! Mock implementations for testing.
//!
//! Lets the API client, the state modules and the router guard be exercised
//! without network access.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
