//! # File I/O Module
//!
//! Reading and writing of molecular structure files and discovery of
//! benchmark molecules on the filesystem.
//!
//! Two formats are supported behind the [`traits::StructureFile`] seam:
//! XYZ ([`xyz`]) and Turbomole coord ([`coord`]). [`discovery`] walks a
//! benchmark directory tree and assembles [`crate::core::models::molecule::Molecule`]
//! values from structure files and their charge/spin sidecars.

pub mod coord;
pub mod discovery;
pub mod traits;
pub mod xyz;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: StructureParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum StructureParseErrorKind {
    #[error("Invalid integer format (value: '{value}')")]
    InvalidInt { value: String },
    #[error("Invalid float format (value: '{value}')")]
    InvalidFloat { value: String },
    #[error("Unknown element symbol '{symbol}'")]
    UnknownElement { symbol: String },
    #[error("Atom record has too few fields")]
    LineTooShort,
    #[error("Expected {expected} atom records, found {found}")]
    TruncatedAtomBlock { expected: usize, found: usize },
}

/// Atom data as read from a structure file, before it is validated into a
/// [`crate::core::models::molecule::Molecule`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStructure {
    /// 0-based element index per atom.
    pub element_indices: Vec<usize>,
    /// Coordinates in Ångström.
    pub positions: Vec<nalgebra::Point3<f64>>,
}
