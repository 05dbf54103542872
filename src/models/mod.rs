// src/models/mod.rs

//! Domain models for the converter.

mod bibliography;
mod config;
mod dblp;
mod publication;

// Re-export all public types
pub use bibliography::Bibliography;
pub use config::{Config, FetcherConfig, OutputConfig};
pub use dblp::{Authors, DblpEntry, DblpList, Info, Title, Venue};
pub use publication::{FetchOutcome, PublicationRef};
