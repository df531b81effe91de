//! Application state, one module per domain.
//!
//! Each module owns a [`StateCell`] and mutates it only from its own actions.
//! Readers use the selector methods or subscribe for change notifications.

mod admin;
mod blog;
mod cell;
mod comments;
mod session;
mod site;
mod user;

pub use admin::{AdminModule, AdminState};
pub use blog::{BlogModule, BlogState, Pagination, DEFAULT_PAGE_SIZE};
pub use cell::StateCell;
pub use comments::{CommentsModule, CommentsState};
pub use session::{Session, SessionContext};
pub use site::{SiteModule, SiteState};
pub use user::UserModule;
