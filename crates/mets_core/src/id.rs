//! Identifier generation for document sections.
//!
//! # Responsibility
//! - Hand out opaque string tokens used as XML `ID` attributes.
//!
//! # Invariants
//! - Tokens never start with a digit, so they are valid XML `ID` values.
//! - Generators keep no state that could make two calls return the same token.

use uuid::Uuid;

/// Prefix applied to every generated token.
pub const ID_PREFIX: &str = "uuid-";

/// Source of unique identifiers for one or many document assemblies.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh identifier.
    fn next_id(&self) -> String;
}

/// Random v4 UUID generator used in production.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        format!("{ID_PREFIX}{}", Uuid::new_v4())
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, UuidGenerator, ID_PREFIX};
    use std::collections::HashSet;

    #[test]
    fn uuid_generator_produces_prefixed_tokens() {
        let id = UuidGenerator.next_id();
        assert!(id.starts_with(ID_PREFIX));
        assert_eq!(id.len(), ID_PREFIX.len() + 36);
    }

    #[test]
    fn uuid_generator_does_not_repeat() {
        let generator = UuidGenerator;
        let ids: HashSet<String> = (0..1_000).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }
}
