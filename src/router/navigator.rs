//! Current location and navigation history.

use tokio::sync::watch;

use super::location::Location;
use crate::state::StateCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    pub current: Location,
    /// Every location pushed so far, oldest first, including the current one.
    pub history: Vec<Location>,
}

impl Default for NavigatorState {
    fn default() -> Self {
        let home = Location::parse("/");
        Self {
            current: home.clone(),
            history: vec![home],
        }
    }
}

/// Where the application is. Clones share state.
///
/// The navigator applies locations without consulting the guard; use
/// [`crate::router::Router::navigate`] for guarded navigation.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: StateCell<NavigatorState>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, location: Location) {
        tracing::debug!(to = %location, "Navigating");
        self.state.update(|s| {
            s.history.push(location.clone());
            s.current = location;
        });
    }

    pub fn current(&self) -> Location {
        self.state.read(|s| s.current.clone())
    }

    pub fn history(&self) -> Vec<Location> {
        self.state.read(|s| s.history.clone())
    }

    /// Number of pushes to `path` (query ignored).
    pub fn visits(&self, path: &str) -> usize {
        self.state
            .read(|s| s.history.iter().filter(|l| l.path() == path).count())
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigatorState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_home() {
        let nav = Navigator::new();
        assert_eq!(nav.current().path(), "/");
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn test_push_records_history() {
        let nav = Navigator::new();
        nav.push(Location::parse("/article/3"));
        nav.push(Location::parse("/login"));

        assert_eq!(nav.current().path(), "/login");
        assert_eq!(nav.visits("/login"), 1);
        assert_eq!(nav.history().len(), 3);
    }
}
