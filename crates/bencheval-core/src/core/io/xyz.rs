use super::traits::StructureFile;
use super::{RawStructure, StructureError, StructureParseErrorKind};
use crate::core::models::elements;
use crate::core::models::molecule::Molecule;
use nalgebra::Point3;
use std::io::{BufRead, Write};

/// The XYZ format: an atom-count line, a comment line, then one
/// `symbol x y z` record per atom, coordinates in Ångström.
pub struct XyzFile;

impl StructureFile for XyzFile {
    fn read_from(reader: &mut impl BufRead) -> Result<RawStructure, StructureError> {
        let mut lines = reader.lines();

        let count_line = lines
            .next()
            .transpose()?
            .ok_or_else(|| StructureError::MissingRecord("atom count line".into()))?;
        let num_atoms: usize =
            count_line
                .trim()
                .parse()
                .map_err(|_| StructureError::Parse {
                    line: 1,
                    kind: StructureParseErrorKind::InvalidInt {
                        value: count_line.trim().into(),
                    },
                })?;

        // Comment line; its content is ignored.
        lines.next().transpose()?;

        let mut structure = RawStructure::default();
        for i in 0..num_atoms {
            let line_num = i + 3;
            let line = lines.next().transpose()?.ok_or(StructureError::Parse {
                line: line_num,
                kind: StructureParseErrorKind::TruncatedAtomBlock {
                    expected: num_atoms,
                    found: i,
                },
            })?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return Err(StructureError::Parse {
                    line: line_num,
                    kind: StructureParseErrorKind::LineTooShort,
                });
            }

            let index =
                elements::element_index(fields[0]).ok_or_else(|| StructureError::Parse {
                    line: line_num,
                    kind: StructureParseErrorKind::UnknownElement {
                        symbol: fields[0].into(),
                    },
                })?;
            let mut coords = [0.0f64; 3];
            for (axis, value) in fields[1..4].iter().enumerate() {
                coords[axis] = value.parse().map_err(|_| StructureError::Parse {
                    line: line_num,
                    kind: StructureParseErrorKind::InvalidFloat {
                        value: (*value).into(),
                    },
                })?;
            }

            structure.element_indices.push(index);
            structure
                .positions
                .push(Point3::new(coords[0], coords[1], coords[2]));
        }

        Ok(structure)
    }

    fn write_to(molecule: &Molecule, writer: &mut impl Write) -> Result<(), StructureError> {
        writeln!(writer, "{}", molecule.num_atoms())?;
        writeln!(
            writer,
            "Total charge: {} ; Unpaired electrons: {} ; Generated by bencheval.",
            molecule.charge(),
            molecule.unpaired_electrons()
        )?;
        for (index, position) in molecule
            .element_indices()
            .iter()
            .zip(molecule.positions())
        {
            writeln!(
                writer,
                "{:<5} {:>20.14} {:>20.14} {:>20.14}",
                elements::symbol(*index).unwrap_or("?"),
                position.x,
                position.y,
                position.z
            )?;
        }
        Ok(())
    }
}
