//! Consumer-facing synchronized state.
//!
//! Each value lives in an [`Observable`] cell backed by a `tokio::sync::watch`
//! channel. Replacements are wholesale and atomic from a consumer's point of
//! view, and a replacement carrying a value equal to the current one never
//! notifies, so subscribers only wake for real changes.

use tokio::sync::watch;

use super::models::{EventSummary, MatchSet, SelectionState, TournamentSummary};

/// An observable state cell with change suppression.
#[derive(Debug)]
pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Observable { tx }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replaces the value wholesale. Returns `true` if the value differed
    /// from the previous one and subscribers were notified.
    pub fn replace(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }

    /// Subscribes to change notifications. The receiver observes the value
    /// current at subscription time plus every subsequent distinct value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

/// The in-memory synchronized view of the bracket: summary lists, the match
/// set collection, and the selection driving them. Collections start empty
/// and are only ever replaced as a unit.
#[derive(Debug)]
pub struct SyncedState {
    pub tournaments: Observable<Vec<TournamentSummary>>,
    pub events: Observable<Vec<EventSummary>>,
    pub sets: Observable<Vec<MatchSet>>,
    pub selection: Observable<SelectionState>,
}

impl SyncedState {
    pub fn new() -> Self {
        SyncedState {
            tournaments: Observable::new(Vec::new()),
            events: Observable::new(Vec::new()),
            sets: Observable::new(Vec::new()),
            selection: Observable::new(SelectionState::default()),
        }
    }
}

impl Default for SyncedState {
    fn default() -> Self {
        Self::new()
    }
}
