//! Pipeline entry points.
//!
//! - `run_convert`: download BibTeX for every input export
//! - `run_local`: synthesize BibTeX from the exports alone

pub mod convert;

pub use convert::{ConvertSummary, run_convert, run_local};
