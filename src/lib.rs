// src/lib.rs

//! dblp2bib Library
//!
//! Converts DBLP search-result exports into BibTeX by resolving each
//! publication's landing page to its `.bib` export and downloading it at the
//! pace the server asks for.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
