//! Deterministic test doubles for PriceCraft crates.

mod clock;
mod gateway;

pub use clock::{FixedClock, SequentialIds};
pub use gateway::{FailingGateway, FixedGateway, GatedGateway, RecordingGateway};
