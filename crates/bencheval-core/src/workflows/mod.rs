//! # Workflows Module
//!
//! The highest-level, user-facing layer: complete evaluation procedures built
//! from the core components. [`evaluate`] runs the full selection → reaction
//! filtering → scoring → statistics pipeline for one method.

pub mod evaluate;
