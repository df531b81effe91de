//! Observable state container.

use std::sync::Arc;
use tokio::sync::watch;

/// Shared, observable state.
///
/// Clones share the same value. Writers mutate in place through
/// [`StateCell::update`]; readers either borrow briefly with
/// [`StateCell::read`], copy with [`StateCell::snapshot`], or
/// [`StateCell::subscribe`] to be woken on every change.
#[derive(Debug)]
pub struct StateCell<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for StateCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> StateCell<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    /// Run `f` against the current value.
    ///
    /// Do not hold across an `.await`; the value is locked while `f` runs.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut out = None;
        self.tx.send_modify(|value| out = Some(f(value)));
        match out {
            Some(out) => out,
            None => unreachable!("send_modify always runs the closure"),
        }
    }

    /// Receiver that observes every subsequent update.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> StateCell<T> {
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }
}
