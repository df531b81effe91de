//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`FileCookieStore`] - Cookie jar persisted as JSON
//! - [`MemoryCookieStore`] - Cookie jar held in memory
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides [`mock::MockHttpClient`], a transport with
//! canned responses and request recording.

pub mod file_cookies;
pub mod memory_cookies;
pub mod mock;
pub mod reqwest_http;

pub use file_cookies::{default_cookie_path, FileCookieStore};
pub use memory_cookies::MemoryCookieStore;
pub use mock::MockHttpClient;
pub use reqwest_http::ReqwestHttpClient;
