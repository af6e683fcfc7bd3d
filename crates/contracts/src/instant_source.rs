//! InstantSource trait - where a frame's "now" comes from
//!
//! Production code reads the system clock; tests substitute a manual source
//! so that resolved fields are deterministic.

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of absolute instants.
pub trait InstantSource: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Shared handle to an instant source
pub type SharedInstantSource = Arc<dyn InstantSource>;
