//! Umbrella crate for EcoBot.
//!
//! Re-exports the engine and protocol crates so game clients and tools can depend on a
//! single crate name (`ecobot`).

pub use ecobot_engine as engine;
pub use ecobot_protocol as protocol;
