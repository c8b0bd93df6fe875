//! Identifier generation.

use crate::types::EntityId;

/// Length of generated ids. Short enough to read in logs and URLs.
pub const GENERATED_ID_LEN: usize = 12;

/// Generate a fresh opaque id.
///
/// Ids are the leading hex digits of a random v4 UUID, so collisions with
/// the short numeric seed ids (`"1"`, `"2"`, ...) are impossible.
pub fn generate_id() -> EntityId {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(GENERATED_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_have_fixed_length() {
        assert_eq!(generate_id().len(), GENERATED_ID_LEN);
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn generated_ids_never_look_like_seed_ids() {
        let id = generate_id();
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, "1");
    }
}
