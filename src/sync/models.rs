use serde::{Deserialize, Serialize};

/// One tournament owned by the authenticated StartGG user. Immutable once
/// fetched; the list is replaced wholesale on each successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
}

/// One event inside the currently selected tournament. Same replacement
/// semantics as [`TournamentSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub name: String,
}

/// One side of a match set: either a seeded entrant or a placeholder ("bye").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "prereqId")]
    pub prereq_id: Option<String>,
    #[serde(rename = "prereqType")]
    pub prereq_type: String,
    #[serde(rename = "seedNum")]
    pub seed_num: Option<i64>,
    #[serde(rename = "entrantName")]
    pub entrant_name: Option<String>,
    #[serde(rename = "scoreValue")]
    pub score_value: Option<f64>,
}

/// One match in the bracket. Always exactly two slots; sets whose slots are
/// all byes are never materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSet {
    pub id: String,
    #[serde(rename = "phaseGroupId")]
    pub phase_group_id: String,
    #[serde(rename = "phaseOrder")]
    pub phase_order: i64,
    pub placement: i64,
    pub round: i64,
    /// Null on the wire until the set has a winner.
    #[serde(rename = "winnerId")]
    pub winner_id: Option<String>,
    pub slots: [Slot; 2],
}

/// Indices into the current tournament/event summary lists, or `None`
/// meaning "none selected". Mutated only through the selection transition
/// functions, which keep the indices referentially valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub tournament: Option<usize>,
    pub event: Option<usize>,
}

impl Slot {
    /// Whether this slot is a bracket placeholder rather than a real
    /// participant.
    pub fn is_bye(&self) -> bool {
        self.prereq_type == "bye"
    }
}
