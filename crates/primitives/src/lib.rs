//! Core primitives for the ethmetrics project.
/// Known consensus clients
pub mod clients;
/// Descriptive statistics helpers
pub mod stats;

pub use clients::{ConsensusClient, UnknownClient};
