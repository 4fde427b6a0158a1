//! Selection transitions for the tournament/event indices.
//!
//! Each operation is a pure function from the current [`SelectionState`] and
//! list context to a [`Transition`]: the next state plus the refresh intents
//! the change implies. The orchestrator applies the state and schedules a
//! cycle only when intents are present, which is what suppresses redundant
//! cascades when nothing actually changed.

use super::models::{EventSummary, SelectionState, TournamentSummary};
use crate::error::AppError;

/// Side effect a selection change asks the orchestrator to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshIntent {
    RefetchTournaments,
    RefetchEvents,
    RefetchSets,
}

/// Result of one selection transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SelectionState,
    pub intents: Vec<RefreshIntent>,
}

impl Transition {
    fn unchanged(state: SelectionState) -> Self {
        Transition {
            next: state,
            intents: Vec::new(),
        }
    }

    /// Whether this transition mutates the selection at all.
    pub fn is_noop(&self, current: &SelectionState) -> bool {
        self.next == *current && self.intents.is_empty()
    }
}

fn check_range(index: Option<usize>, len: usize) -> Result<(), AppError> {
    match index {
        Some(i) if i >= len => Err(AppError::selection_out_of_range(i, len)),
        _ => Ok(()),
    }
}

/// Selects a tournament by index (or clears the selection with `None`).
///
/// A change of tournament unconditionally resets the event index, and the
/// whole pipeline is refetched, mirroring the cascade a tournament switch
/// causes downstream. An out-of-range index is rejected, never clamped.
pub fn set_tournament(
    state: &SelectionState,
    index: Option<usize>,
    tournaments_len: usize,
) -> Result<Transition, AppError> {
    check_range(index, tournaments_len)?;

    if index == state.tournament {
        return Ok(Transition::unchanged(*state));
    }

    Ok(Transition {
        next: SelectionState {
            tournament: index,
            event: None,
        },
        intents: vec![
            RefreshIntent::RefetchTournaments,
            RefreshIntent::RefetchEvents,
            RefreshIntent::RefetchSets,
        ],
    })
}

/// Selects an event by index (or clears it). No cascading reset.
pub fn set_event(
    state: &SelectionState,
    index: Option<usize>,
    events_len: usize,
) -> Result<Transition, AppError> {
    check_range(index, events_len)?;

    if index == state.event {
        return Ok(Transition::unchanged(*state));
    }

    Ok(Transition {
        next: SelectionState {
            tournament: state.tournament,
            event: index,
        },
        intents: vec![RefreshIntent::RefetchSets],
    })
}

/// Reconciles the selection with a freshly fetched tournament list. The
/// selection survives a changed list as long as its index still resolves;
/// when it does not, both indices reset so the state never references an
/// absent tournament.
pub fn on_tournaments_replaced(
    state: &SelectionState,
    new_list: &[TournamentSummary],
) -> Transition {
    match state.tournament {
        Some(i) if i >= new_list.len() => Transition {
            next: SelectionState::default(),
            intents: Vec::new(),
        },
        _ => Transition::unchanged(*state),
    }
}

/// Reconciles the selection with a freshly fetched event list. Compared by
/// value: a different list resets the event index before the swap, so no
/// consumer ever observes a non-null event index referring to a now-absent
/// event. A value-equal replacement preserves the selection.
pub fn on_events_replaced(
    state: &SelectionState,
    old_list: &[EventSummary],
    new_list: &[EventSummary],
) -> Transition {
    if old_list == new_list || state.event.is_none() {
        return Transition::unchanged(*state);
    }

    Transition {
        next: SelectionState {
            tournament: state.tournament,
            event: None,
        },
        intents: vec![RefreshIntent::RefetchSets],
    }
}
