//! Drives repeated remote calls for one logical set query across pages,
//! accumulating validated records until all pages are consumed.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::client::execute;
use super::models::MatchSet;
use super::queries;
use super::validate::{SetValidation, record_excerpt, validate_match_set};
use crate::config::Config;
use crate::error::AppError;

/// Fetches every page of an event's match sets and returns the validated
/// records in page order.
///
/// Every page must expose `event.sets.nodes` and `event.sets.pageInfo.totalPages`;
/// a missing envelope field at any page aborts pagination entirely, since
/// partial bracket data is unsafe to present as complete. Individual records
/// failing validation are logged and dropped without aborting the page.
#[instrument(skip(client, config))]
pub async fn fetch_all_sets(
    client: &Client,
    config: &Config,
    event_id: &str,
) -> Result<Vec<MatchSet>, AppError> {
    let mut sets = Vec::new();
    let mut page: u64 = 1;

    loop {
        debug!("Fetching sets page {page} for event {event_id}");
        let data = execute(client, config, &queries::event_sets_page(event_id, page)).await?;

        let nodes = data
            .get("event")
            .and_then(|event| event.get("sets"))
            .and_then(|s| s.get("nodes"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                AppError::protocol(format!(
                    "event.sets.nodes missing from sets page {page} for event {event_id}"
                ))
            })?;

        let total_pages = data
            .get("event")
            .and_then(|event| event.pointer("/sets/pageInfo/totalPages"))
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                AppError::protocol(format!(
                    "event.sets.pageInfo.totalPages missing from sets page {page} for event {event_id}"
                ))
            })?;

        for node in nodes {
            match validate_match_set(node) {
                SetValidation::Valid(set) => sets.push(set),
                SetValidation::AllByes => {
                    debug!("Skipping bye-only set on page {page}");
                }
                SetValidation::Invalid(violations) => {
                    let reasons: Vec<String> =
                        violations.iter().map(ToString::to_string).collect();
                    warn!(
                        "Rejecting set record on page {page}: [{}] record: {}",
                        reasons.join(", "),
                        record_excerpt(node)
                    );
                }
            }
        }

        if total_pages > page {
            page += 1;
        } else {
            break;
        }
    }

    info!(
        "Fetched {} sets across {} page(s) for event {}",
        sets.len(),
        page,
        event_id
    );
    Ok(sets)
}
