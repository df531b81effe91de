//! Wire records exchanged with the blog backend.
//!
//! Field names follow the backend's snake_case JSON. Unknown fields are
//! ignored and optional fields default, so additions on the server side do not
//! break decoding.

pub mod article;
pub mod comment;
pub mod page;
pub mod site;
pub mod taxonomy;
pub mod user;

pub use article::{
    ArticleDetail, ArticleDraft, ArticleQuery, ArticleStatus, ArticleSummary, ArticleUpdate,
    LikeResponse,
};
pub use comment::{Comment, CommentArticleRef, NewComment};
pub use page::{ListPayload, Page};
pub use site::{SiteConfig, SiteConfigPatch, Statistics};
pub use taxonomy::{Category, CategoryDraft, Tag};
pub use user::{
    Captcha, Gender, LoginRequest, LoginResponse, MessageResponse, PasswordChange,
    ProfileUpdate, RegisterRequest, RegisterResponse, ToggleStatusResponse, User,
    UserStatistics, CAPTCHA_KEY_HEADER,
};

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:30:00+08:00`) and the naive form the
/// backend emits when time zones are disabled, which is read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}
