//! # bencheval Core Library
//!
//! Evaluation of composition-restricted subsets of quantum-chemistry benchmark
//! sets. Given a pool of molecular structures and a set of composition
//! constraints, the library selects the admissible structures, restricts a
//! tmer-style reaction file to reactions built entirely from selected species,
//! drives the external scoring script over the restricted file, parses its
//! output, and reduces the surviving rows to summary error statistics.
//!
//! The library is split into two layers:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Molecule`,
//!   `MoleculeConstraints`), the selection and reaction-file filters, the
//!   scoring-output parser, structure-file I/O, and the statistics reducer.
//!
//! - **[`workflows`]: The Public API.** Ties the core components into the
//!   complete evaluation pipeline, from molecule selection to the final
//!   `ErrorSummary`, with the external scoring routine behind an injectable
//!   [`core::scoring::backend::ScoringBackend`] seam.

pub mod core;
pub mod workflows;
