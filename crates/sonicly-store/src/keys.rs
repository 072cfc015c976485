//! Key encoding for the flat backends.

use sonicly_core::UserId;

use crate::schema::Collection;

/// Build the namespaced key `{collection}_{userId}`.
///
/// User IDs are validated at construction, so the key is always a safe file name.
#[must_use]
pub fn namespaced_key(collection: Collection, user_id: &UserId) -> String {
    format!("{}_{}", collection.name(), user_id)
}
