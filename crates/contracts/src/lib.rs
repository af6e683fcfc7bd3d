//! # Contracts
//!
//! Frozen interface contracts shared by every tzclock crate: the clock data
//! model, the configuration file schema and the display sink trait.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - An `Instant` is a `chrono::DateTime<Utc>` read from an [`InstantSource`]
//! - Everything a frame displays is derived from one instant and one
//!   [`ClockSettings`] snapshot; nothing is carried over between frames

mod clock;
mod config;
mod display;
mod error;
mod instant_source;
mod sink;
mod timezone_id;

pub use clock::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use instant_source::{InstantSource, SharedInstantSource};
pub use sink::*;
pub use timezone_id::TimezoneId;
