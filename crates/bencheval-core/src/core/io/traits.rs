use super::{RawStructure, StructureError};
use crate::core::models::molecule::Molecule;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing molecular structure formats.
///
/// Implementors handle format-specific parsing and serialization; the path
/// helpers wrap buffered file access.
pub trait StructureFile {
    /// Reads the raw atom data of one structure from a buffered reader.
    fn read_from(reader: &mut impl BufRead) -> Result<RawStructure, StructureError>;

    /// Writes a molecule in this format.
    fn write_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), StructureError>;

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<RawStructure, StructureError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    fn write_to_path<P: AsRef<Path>>(
        molecule: &Molecule,
        path: P,
    ) -> Result<(), StructureError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(molecule, &mut writer)?;
        Ok(())
    }
}
