//! The synchronization pipeline: remote client, response validation,
//! pagination, selection state machine, and the refresh orchestrator that
//! ties them together.

pub mod client;
pub mod models;
pub mod orchestrator;
pub mod paginator;
pub mod queries;
pub mod selection;
pub mod state;
pub mod validate;

pub use models::{EventSummary, MatchSet, SelectionState, Slot, TournamentSummary};
pub use orchestrator::{CyclePhase, Synchronizer};
pub use state::{Observable, SyncedState};
