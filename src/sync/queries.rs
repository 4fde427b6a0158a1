//! The three fixed GraphQL documents the synchronizer issues. Queries are
//! hand-built per operation; there is no general-purpose query layer.

use crate::constants::SETS_PER_PAGE;

/// Tournament list of the authenticated user.
pub const CURRENT_USER_TOURNAMENTS: &str =
    "{currentUser{id slug name tournaments{nodes{name id}}}}";

/// Events of one tournament by id.
pub fn tournament_events(tournament_id: &str) -> String {
    format!("{{tournament(id:\"{tournament_id}\"){{events{{id name}}}}}}")
}

/// One page of an event's match sets. Page size is fixed and byes are
/// included so bracket structure stays complete; bye-only sets are filtered
/// out during validation instead.
pub fn event_sets_page(event_id: &str, page: u64) -> String {
    format!(
        "{{event(id:\"{event_id}\"){{sets(page:{page} perPage:{SETS_PER_PAGE} filters:{{showByes:true}}){{\
pageInfo{{totalPages}}\
nodes{{id round wPlacement winnerId phaseGroup{{id phase{{phaseOrder}}}}\
slots{{prereqId prereqType seed{{seedNum}}entrant{{name}}standing{{score{{value}}}}}}}}}}}}}}"
    )
}
