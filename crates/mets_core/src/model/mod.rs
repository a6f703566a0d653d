//! Preservation record model consumed by document assembly.
//!
//! # Responsibility
//! - Describe intellectual entities, their representations and files.
//! - Carry descriptive, provenance and technical metadata payloads.
//!
//! # Invariants
//! - Sequence order is significant everywhere; assembly preserves it.
//! - Opaque metadata fragments are never inspected by core.

pub mod agent;
pub mod entity;
pub mod metadata;
