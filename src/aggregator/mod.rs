// src/aggregator/mod.rs
//! External job source: bounded fetch plus normalization of the two payload
//! shapes the source has been observed to return.

pub mod client;
pub mod normalize;

pub use client::ExternalSourceClient;
pub use normalize::EntryOutcome;
