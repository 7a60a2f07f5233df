use super::traits::StructureFile;
use super::{RawStructure, StructureError, StructureParseErrorKind};
use crate::core::models::elements::{self, BOHR_TO_ANGSTROM};
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::io::{BufRead, Write};

/// The Turbomole coord format: a `$coord` header, one `x y z symbol` record
/// per atom in Bohr, terminated by the next `$` section (`$end`,
/// `$redundant`, `$user-defined`).
pub struct CoordFile;

fn is_terminator(line: &str) -> bool {
    line.starts_with("$end") || line.starts_with("$redundant") || line.starts_with("$user-defined")
}

impl StructureFile for CoordFile {
    fn read_from(reader: &mut impl BufRead) -> Result<RawStructure, StructureError> {
        let mut lines = reader.lines();

        let header = lines
            .next()
            .transpose()?
            .ok_or_else(|| StructureError::MissingRecord("$coord".into()))?;
        if !header.trim_end().starts_with("$coord") {
            return Err(StructureError::MissingRecord("$coord".into()));
        }

        let mut structure = RawStructure::default();
        for (offset, line) in lines.enumerate() {
            let line = line?;
            let line_num = offset + 2;
            if is_terminator(line.trim_start()) {
                return Ok(structure);
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(StructureError::Parse {
                    line: line_num,
                    kind: StructureParseErrorKind::LineTooShort,
                });
            }

            let mut coords = [0.0f64; 3];
            for (axis, value) in fields[..3].iter().enumerate() {
                let bohr: f64 = value.parse().map_err(|_| StructureError::Parse {
                    line: line_num,
                    kind: StructureParseErrorKind::InvalidFloat {
                        value: (*value).into(),
                    },
                })?;
                coords[axis] = bohr * BOHR_TO_ANGSTROM;
            }
            let index =
                elements::element_index(fields[3]).ok_or_else(|| StructureError::Parse {
                    line: line_num,
                    kind: StructureParseErrorKind::UnknownElement {
                        symbol: fields[3].into(),
                    },
                })?;

            structure.element_indices.push(index);
            structure
                .positions
                .push(Point3::new(coords[0], coords[1], coords[2]));
        }

        Err(StructureError::MissingRecord("$end".into()))
    }

    fn write_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), StructureError> {
        writeln!(writer, "$coord")?;
        for (index, position) in molecule
            .element_indices()
            .iter()
            .zip(molecule.positions())
        {
            writeln!(
                writer,
                "{:>20.14} {:>20.14} {:>20.14} {:>5}",
                position.x / BOHR_TO_ANGSTROM,
                position.y / BOHR_TO_ANGSTROM,
                position.z / BOHR_TO_ANGSTROM,
                elements::symbol(*index).unwrap_or("?")
            )?;
        }
        writeln!(writer, "$end")?;
        Ok(())
    }
}
