//! # Core Module
//!
//! Fundamental data structures and algorithms for benchmark-set evaluation.
//!
//! The module is organized into specialized submodules:
//!
//! - **Molecular Representation** ([`models`]) - Immutable molecule values, composition
//!   constraints, and the static element table
//! - **Structure Selection** ([`selection`]) - Element-range parsing and the composition
//!   constraint filter
//! - **Reaction Files** ([`reactions`]) - Tokenizing and filtering tmer-style reaction
//!   definitions, including brace-compressed species notation
//! - **Scoring** ([`scoring`]) - The external scoring backend seam and its output parser
//! - **File I/O** ([`io`]) - Structure file formats and filesystem molecule discovery
//! - **Reporting** ([`report`], [`stats`]) - Per-reaction result records, CSV export,
//!   and summary error statistics
//! - **Progress** ([`progress`]) - Callback-based progress events for long scans

pub mod io;
pub mod models;
pub mod progress;
pub mod reactions;
pub mod report;
pub mod scoring;
pub mod selection;
pub mod stats;
