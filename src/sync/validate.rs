//! Narrowing of untyped GraphQL payloads into typed domain records.
//!
//! Summary validation is lenient: records missing `id` or `name` are skipped
//! silently, since the summary lists tolerate partial data. Match-set
//! validation is strict and exhaustive: every structural assumption is
//! checked explicitly, all violations for a record are collected, and the
//! caller logs one rejection per bad record while the batch continues.

use serde_json::Value;
use std::fmt;

use super::models::{EventSummary, MatchSet, Slot, TournamentSummary};
use crate::constants::REJECTED_RECORD_LOG_MAX_CHARS;

/// One structural check a record failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub reason: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Outcome of narrowing one raw set record.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValidation {
    /// All checks passed; the normalized record.
    Valid(MatchSet),
    /// Both slots are byes or prereq-less placeholders. Not a real match;
    /// excluded from the output without being logged as invalid.
    AllByes,
    /// One or more structural checks failed.
    Invalid(Vec<Violation>),
}

/// Serializes a raw record for a rejection log line, bounded to a practical
/// size.
pub fn record_excerpt(raw: &Value) -> String {
    raw.to_string()
        .chars()
        .take(REJECTED_RECORD_LOG_MAX_CHARS)
        .collect()
}

/// Collects violations while the per-field helpers produce placeholder
/// values, so a single pass reports every broken field instead of the first.
#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn fail(&mut self, field: impl Into<String>, reason: &'static str) {
        self.violations.push(Violation {
            field: field.into(),
            reason,
        });
    }

    /// Identifiers arrive as strings or numbers; both coerce to `String`.
    fn id_string(&mut self, value: Option<&Value>, field: &str) -> String {
        match value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                self.fail(field, "expected a string or numeric identifier");
                String::new()
            }
        }
    }

    fn integer(&mut self, value: Option<&Value>, field: &str) -> i64 {
        match value.and_then(Value::as_i64) {
            Some(n) => n,
            None => {
                self.fail(field, "expected a number");
                0
            }
        }
    }
}

fn summary_fields(raw: &Value) -> Option<(String, String)> {
    let id = match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };
    let name = raw.get("name")?.as_str()?.to_string();
    Some((id, name))
}

/// Narrows one raw tournament node. Records failing the check are skipped
/// silently rather than rejected with a log.
pub fn validate_tournament_summary(raw: &Value) -> Option<TournamentSummary> {
    summary_fields(raw).map(|(id, name)| TournamentSummary { id, name })
}

/// Narrows one raw event node. Same leniency as
/// [`validate_tournament_summary`].
pub fn validate_event_summary(raw: &Value) -> Option<EventSummary> {
    summary_fields(raw).map(|(id, name)| EventSummary { id, name })
}

/// Whether a raw slot is a bracket placeholder: prereq type `"bye"` or
/// absent.
fn is_bye_or_absent(slot: &Value) -> bool {
    match slot.get("prereqType") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s == "bye",
        Some(_) => false,
    }
}

fn check_slot(checker: &mut Checker, raw: &Value, index: usize) -> Slot {
    let path = |field: &str| format!("slots[{index}].{field}");

    if !raw.is_object() {
        checker.fail(format!("slots[{index}]"), "expected an object");
        return Slot {
            prereq_id: None,
            prereq_type: String::new(),
            seed_num: None,
            entrant_name: None,
            score_value: None,
        };
    }

    let prereq_id = match raw.get("prereqId") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) => None,
        _ => {
            checker.fail(path("prereqId"), "expected a string or null");
            None
        }
    };

    let prereq_type = match raw.get("prereqType") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            checker.fail(path("prereqType"), "expected a string");
            String::new()
        }
    };

    // Real participants must carry a seed; byes get one only if present
    let seed_num = match raw.pointer("/seed/seedNum") {
        Some(Value::Number(n)) => n.as_i64(),
        _ if prereq_type != "bye" => {
            checker.fail(path("seed.seedNum"), "expected a number");
            None
        }
        _ => None,
    };

    let entrant_name = match raw.get("entrant") {
        None | Some(Value::Null) => None,
        Some(entrant) => match entrant.get("name") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => {
                checker.fail(path("entrant.name"), "expected a string");
                None
            }
        },
    };

    let score_value = match raw.get("standing") {
        None | Some(Value::Null) => None,
        Some(standing) => match standing.pointer("/score/value") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::Null) => None,
            _ => {
                checker.fail(path("standing.score.value"), "expected a number or null");
                None
            }
        },
    };

    Slot {
        prereq_id,
        prereq_type,
        seed_num,
        entrant_name,
        score_value,
    }
}

/// Narrows one raw set record into a [`MatchSet`], collecting every violated
/// field. Bye-only sets are bracket placeholders with no real match and come
/// back as [`SetValidation::AllByes`].
pub fn validate_match_set(raw: &Value) -> SetValidation {
    if !raw.is_object() {
        return SetValidation::Invalid(vec![Violation {
            field: "(record)".to_string(),
            reason: "expected an object",
        }]);
    }

    let Some(slots) = raw.get("slots").and_then(Value::as_array) else {
        return SetValidation::Invalid(vec![Violation {
            field: "slots".to_string(),
            reason: "expected an array",
        }]);
    };
    if slots.len() != 2 {
        return SetValidation::Invalid(vec![Violation {
            field: "slots".to_string(),
            reason: "expected exactly 2 entries",
        }]);
    }

    if slots.iter().all(is_bye_or_absent) {
        return SetValidation::AllByes;
    }

    let mut checker = Checker::default();

    let slot_a = check_slot(&mut checker, &slots[0], 0);
    let slot_b = check_slot(&mut checker, &slots[1], 1);

    let id = checker.id_string(raw.get("id"), "id");
    let phase_group_id = checker.id_string(raw.pointer("/phaseGroup/id"), "phaseGroup.id");
    let phase_order = checker.integer(
        raw.pointer("/phaseGroup/phase/phaseOrder"),
        "phaseGroup.phase.phaseOrder",
    );
    let placement = checker.integer(raw.get("wPlacement"), "wPlacement");
    let round = checker.integer(raw.get("round"), "round");

    // The key must exist; its value is null until the set has a winner
    let winner_id = match raw.get("winnerId") {
        None => {
            checker.fail("winnerId", "key is missing");
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(_) => None,
    };

    if !checker.violations.is_empty() {
        return SetValidation::Invalid(checker.violations);
    }

    SetValidation::Valid(MatchSet {
        id,
        phase_group_id,
        phase_order,
        placement,
        round,
        winner_id,
        slots: [slot_a, slot_b],
    })
}
