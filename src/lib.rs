//! StartGG Bracket Synchronizer Library
//!
//! This library keeps an in-memory view of a tournament bracket
//! (tournaments, events, and match sets) synchronized against the StartGG
//! GraphQL API in response to user selections.
//!
//! # Examples
//!
//! ```rust,no_run
//! use startgg_sync::config::Config;
//! use startgg_sync::error::AppError;
//! use startgg_sync::sync::Synchronizer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let sync = Synchronizer::new(config)?;
//!
//!     // Pull the tournament list, then drill down
//!     sync.refresh().await?;
//!     sync.select_tournament(Some(0)).await?;
//!     sync.select_event(Some(0)).await?;
//!
//!     let state = sync.state();
//!     for set in state.sets.get() {
//!         println!("round {}: {:?}", set.round, set.winner_id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod sync;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::AppError;
pub use sync::{
    CyclePhase, EventSummary, MatchSet, SelectionState, Slot, SyncedState, Synchronizer,
    TournamentSummary,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
