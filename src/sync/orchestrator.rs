//! Refresh orchestration: reacts to selection changes and external refresh
//! requests, sequences the three remote calls (tournaments, events of the
//! selected tournament, match sets of the selected event) and writes results
//! into the synchronized state only after successful validation.
//!
//! Cycles are serialized: at most one runs at a time, and a trigger arriving
//! while one is in flight marks a rerun so the newest trigger wins.

use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

use super::client::{create_http_client_with_timeout, execute};
use super::models::{EventSummary, SelectionState, TournamentSummary};
use super::paginator::fetch_all_sets;
use super::queries;
use super::selection;
use super::state::{Observable, SyncedState};
use super::validate::{validate_event_summary, validate_tournament_summary};
use crate::config::Config;
use crate::error::AppError;

/// Where a refresh cycle currently is. Returns to `Idle` after every cycle,
/// successful or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePhase {
    #[default]
    Idle,
    FetchingTournaments,
    FetchingEvents,
    FetchingSets,
}

/// Owns the remote client and the synchronized state, and runs refresh
/// cycles against them.
pub struct Synchronizer {
    client: reqwest::Client,
    config: Config,
    state: Arc<SyncedState>,
    cycle_lock: Mutex<()>,
    rerun_requested: AtomicBool,
    phase: Observable<CyclePhase>,
}

impl Synchronizer {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Synchronizer {
            client,
            config,
            state: Arc::new(SyncedState::new()),
            cycle_lock: Mutex::new(()),
            rerun_requested: AtomicBool::new(false),
            phase: Observable::new(CyclePhase::Idle),
        })
    }

    /// The synchronized state consumers read from and subscribe to.
    pub fn state(&self) -> Arc<SyncedState> {
        Arc::clone(&self.state)
    }

    /// Current cycle phase, for diagnostics.
    pub fn phase(&self) -> CyclePhase {
        self.phase.get()
    }

    /// Selects a tournament by index into the current tournament list, or
    /// clears the selection with `None`. A change triggers a refresh cycle.
    pub async fn select_tournament(&self, index: Option<usize>) -> Result<(), AppError> {
        let current = self.state.selection.get();
        let transition =
            selection::set_tournament(&current, index, self.state.tournaments.get().len())?;
        if transition.is_noop(&current) {
            debug!("Tournament selection unchanged; skipping refresh");
            return Ok(());
        }
        self.apply_selection(transition.next);
        self.refresh().await
    }

    /// Selects an event by index into the current event list, or clears it.
    /// A change triggers a refresh cycle.
    pub async fn select_event(&self, index: Option<usize>) -> Result<(), AppError> {
        let current = self.state.selection.get();
        let transition = selection::set_event(&current, index, self.state.events.get().len())?;
        if transition.is_noop(&current) {
            debug!("Event selection unchanged; skipping refresh");
            return Ok(());
        }
        self.apply_selection(transition.next);
        self.refresh().await
    }

    /// External refresh trigger: forces a synchronization cycle regardless of
    /// selection state. If a cycle is already in flight the trigger is
    /// coalesced into a rerun once it finishes.
    pub async fn refresh(&self) -> Result<(), AppError> {
        self.rerun_requested.store(true, Ordering::SeqCst);

        let Ok(_guard) = self.cycle_lock.try_lock() else {
            debug!("Refresh cycle already in flight; trigger coalesced");
            return Ok(());
        };

        let mut result = Ok(());
        while self.rerun_requested.swap(false, Ordering::SeqCst) {
            result = self.run_cycle().await;
            if let Err(e) = &result {
                error!("Refresh cycle aborted, previous state kept: {e}");
            }
        }
        result
    }

    /// Writes a new selection, clearing the collections whose upstream
    /// selection became null so no stale data lingers.
    fn apply_selection(&self, next: SelectionState) {
        self.state.selection.replace(next);
        if next.tournament.is_none() {
            self.state.events.replace(Vec::new());
        }
        if next.event.is_none() {
            self.state.sets.replace(Vec::new());
        }
    }

    /// The displayed state must never contradict a "no tournament selected"
    /// condition.
    fn enforce_cleared_when_unselected(&self) {
        let sel = self.state.selection.get();
        if sel.tournament.is_none()
            && (sel.event.is_some()
                || !self.state.events.get().is_empty()
                || !self.state.sets.get().is_empty())
        {
            info!("No tournament selected; force-clearing dependent state");
            self.apply_selection(SelectionState::default());
        }
    }

    async fn run_cycle(&self) -> Result<(), AppError> {
        let result = self.run_cycle_inner().await;
        self.phase.replace(CyclePhase::Idle);
        result
    }

    #[instrument(skip(self))]
    async fn run_cycle_inner(&self) -> Result<(), AppError> {
        self.enforce_cleared_when_unselected();

        self.phase.replace(CyclePhase::FetchingTournaments);
        let tournaments = self.fetch_tournaments().await?;

        // Reconcile the selection against the new list before publishing it,
        // so the index is never observably out of bounds
        let sel = self.state.selection.get();
        let transition = selection::on_tournaments_replaced(&sel, &tournaments);
        if !transition.is_noop(&sel) {
            info!("Tournament selection no longer resolves; resetting selection");
            self.apply_selection(transition.next);
        }
        self.state.tournaments.replace(tournaments);

        let sel = self.state.selection.get();
        let Some(tournament_index) = sel.tournament else {
            self.enforce_cleared_when_unselected();
            debug!("No tournament selected; refresh cycle complete");
            return Ok(());
        };
        let tournaments = self.state.tournaments.get();
        let Some(tournament) = tournaments.get(tournament_index) else {
            info!("Tournament index {tournament_index} no longer resolves; aborting cycle");
            return Ok(());
        };

        self.phase.replace(CyclePhase::FetchingEvents);
        let events = self.fetch_events(tournament).await?;

        let old_events = self.state.events.get();
        let sel = self.state.selection.get();
        let transition = selection::on_events_replaced(&sel, &old_events, &events);
        if !transition.is_noop(&sel) {
            // Reset before the swap so no consumer observes an event index
            // referring to a now-absent event
            info!("Event list changed; resetting event selection");
            self.apply_selection(transition.next);
        }
        self.state.events.replace(events);

        let sel = self.state.selection.get();
        let Some(event_index) = sel.event else {
            debug!("No event selected; refresh cycle complete");
            return Ok(());
        };
        let events = self.state.events.get();
        let Some(event) = events.get(event_index) else {
            info!("Event index {event_index} no longer resolves; aborting cycle");
            return Ok(());
        };

        self.phase.replace(CyclePhase::FetchingSets);
        let sets = fetch_all_sets(&self.client, &self.config, &event.id).await?;
        info!("Synchronized {} sets for event {}", sets.len(), event.name);
        self.state.sets.replace(sets);

        Ok(())
    }

    async fn fetch_tournaments(&self) -> Result<Vec<TournamentSummary>, AppError> {
        let data = execute(&self.client, &self.config, queries::CURRENT_USER_TOURNAMENTS).await?;

        let user = data
            .get("currentUser")
            .filter(|u| u.is_object())
            .ok_or_else(|| {
                AppError::protocol("currentUser missing from tournaments response")
            })?;
        let nodes = user
            .pointer("/tournaments/nodes")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                AppError::protocol("currentUser.tournaments.nodes missing from tournaments response")
            })?;

        let tournaments: Vec<TournamentSummary> =
            nodes.iter().filter_map(validate_tournament_summary).collect();

        info!(
            "Fetched {} tournaments from StartGG user: {} ({})",
            tournaments.len(),
            user.get("name").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
            user.get("slug").and_then(serde_json::Value::as_str).unwrap_or("unknown"),
        );
        Ok(tournaments)
    }

    async fn fetch_events(
        &self,
        tournament: &TournamentSummary,
    ) -> Result<Vec<EventSummary>, AppError> {
        let data = execute(
            &self.client,
            &self.config,
            &queries::tournament_events(&tournament.id),
        )
        .await?;

        let nodes = data
            .get("tournament")
            .and_then(|t| t.get("events"))
            .and_then(Value::as_array)
            .ok_or_else(|| AppError::protocol("tournament.events missing from events response"))?;

        let events: Vec<EventSummary> = nodes.iter().filter_map(validate_event_summary).collect();
        info!(
            "Fetched {} events for tournament {}",
            events.len(),
            tournament.name
        );
        Ok(events)
    }
}
