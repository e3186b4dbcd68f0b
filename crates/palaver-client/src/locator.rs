//! Manager location and failover.
//!
//! On every directory cycle the locator decides which manager the client
//! should consider authoritative. Selection is sticky: as long as the
//! current manager is still advertised it is never replaced, which avoids
//! needless re-subscription churn. Only when the current manager disappears
//! from the candidate list does the locator fail over, picking uniformly at
//! random among the remaining candidates. An empty candidate list leaves
//! the previous choice untouched; "no manager" is a valid transient state
//! that the other components tolerate.

use palaver_proto::ParticipantId;

use crate::env::Environment;

/// Select the active manager given the latest directory result.
///
/// Returns the new `ActiveManager` value. The caller (the client, sole
/// writer of that field) stores it; the locator itself never talks to the
/// selected manager.
pub(crate) fn select<E: Environment>(
    env: &E,
    current: Option<ParticipantId>,
    candidates: &[ParticipantId],
) -> Option<ParticipantId> {
    if let Some(current) = &current
        && candidates.contains(current)
    {
        return Some(current.clone());
    }

    if candidates.is_empty() {
        // Leave the previous value in place until a future lookup succeeds.
        return current;
    }

    let index = (env.random_u64() % candidates.len() as u64) as usize;
    let chosen = candidates[index].clone();
    tracing::debug!(manager = %chosen, "selected active manager");
    Some(chosen)
}
