//! Ownership policy gating edit/delete affordances.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::net::types::Post;
use crate::session::SessionStore;

/// Whether the current session may edit or delete `post`.
///
/// Fails closed: an unauthenticated session can edit nothing. Otherwise
/// ownership is exact, case-sensitive equality between the current
/// username and `post.created_by`. Advisory only; the server re-checks
/// ownership on every mutation.
#[must_use]
pub fn can_edit(store: &SessionStore, post: &Post) -> bool {
    if !store.is_authenticated() {
        return false;
    }
    store.current_username() == Some(post.created_by.as_str())
}
