//! Signed-in identity shared by the user module, the 401 handler and the
//! navigation guard.

use tokio::sync::watch;

use super::cell::StateCell;
use crate::models::User;

/// Current session. Authentication is derived from the presence of a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub current_user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }
}

/// Handle to the one session of an application. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: StateCell<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Session {
        self.state.snapshot()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read(|s| s.current_user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(Session::is_authenticated)
    }

    pub fn is_staff(&self) -> bool {
        self.state
            .read(|s| s.current_user.as_ref().is_some_and(|u| u.is_staff))
    }

    pub fn set_user(&self, user: User) {
        tracing::info!(user_id = user.id, username = %user.username, "Session established");
        self.state.update(|s| s.current_user = Some(user));
    }

    /// Apply `f` to the signed-in user, if any. Returns whether a user was present.
    pub fn modify_user(&self, f: impl FnOnce(&mut User)) -> bool {
        self.state.update(|s| match s.current_user.as_mut() {
            Some(user) => {
                f(user);
                true
            }
            None => false,
        })
    }

    /// Drop the signed-in user. Returns whether there was one.
    pub fn clear(&self) -> bool {
        let had_user = self.state.update(|s| s.current_user.take().is_some());
        if had_user {
            tracing::info!("Session cleared");
        }
        had_user
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}
