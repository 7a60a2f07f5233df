use super::coord::CoordFile;
use super::traits::StructureFile;
use super::xyz::XyzFile;
use super::{RawStructure, StructureError};
use crate::core::models::molecule::{Molecule, MoleculeError};
use crate::core::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const XYZ_FILE_NAME: &str = "struc.xyz";
const COORD_FILE_NAME: &str = "coord";
const CHARGE_FILE_NAME: &str = ".CHRG";
const UHF_FILE_NAME: &str = ".UHF";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read structure '{path}': {source}", path = path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: StructureError,
    },
    #[error("value in sidecar file '{path}' is not an integer: '{value}'", path = path.display())]
    Sidecar { path: PathBuf, value: String },
    #[error("inconsistent structure in '{path}': {source}", path = path.display())]
    Molecule {
        path: PathBuf,
        #[source]
        source: MoleculeError,
    },
}

/// Collects one molecule per immediate subdirectory of `root`.
///
/// A subdirectory must contain a `struc.xyz` or `coord` file (otherwise it is
/// skipped with a log line); the molecule is named after the directory.
/// `.CHRG` and `.UHF` sidecar files supply charge and unpaired-electron
/// count, both defaulting to 0. Directories are visited in sorted order so
/// downstream position indices are reproducible.
pub fn discover_molecules(
    root: &Path,
    reporter: &ProgressReporter,
) -> Result<Vec<Molecule>, DiscoveryError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();

    reporter.report(Progress::TaskStart {
        total_steps: dirs.len() as u64,
    });

    let mut molecules = Vec::new();
    for dir in dirs {
        reporter.report(Progress::TaskIncrement);

        let xyz_path = dir.join(XYZ_FILE_NAME);
        let coord_path = dir.join(COORD_FILE_NAME);
        let (structure_path, structure) = if xyz_path.is_file() {
            (xyz_path.clone(), read_structure::<XyzFile>(&xyz_path)?)
        } else if coord_path.is_file() {
            (coord_path.clone(), read_structure::<CoordFile>(&coord_path)?)
        } else {
            tracing::info!(
                "Skipping {} as it does not contain a '{}' or '{}' file.",
                dir.display(),
                XYZ_FILE_NAME,
                COORD_FILE_NAME
            );
            continue;
        };

        let charge = read_sidecar(&dir.join(CHARGE_FILE_NAME))?.unwrap_or(0);
        let uhf_value = read_sidecar(&dir.join(UHF_FILE_NAME))?.unwrap_or(0);
        let uhf = u32::try_from(uhf_value).map_err(|_| DiscoveryError::Sidecar {
            path: dir.join(UHF_FILE_NAME),
            value: uhf_value.to_string(),
        })?;

        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let molecule = Molecule::new(
            name,
            structure.element_indices,
            structure.positions,
            charge,
            uhf,
        )
        .map_err(|source| DiscoveryError::Molecule {
            path: structure_path,
            source,
        })?;
        tracing::debug!("Read molecule {} from {}", molecule.name(), dir.display());
        molecules.push(molecule);
    }

    reporter.report(Progress::TaskFinish);
    Ok(molecules)
}

fn read_structure<F: StructureFile>(path: &Path) -> Result<RawStructure, DiscoveryError> {
    F::read_from_path(path).map_err(|source| DiscoveryError::Structure {
        path: path.to_path_buf(),
        source,
    })
}

fn read_sidecar(path: &Path) -> Result<Option<i32>, DiscoveryError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let Some(first_line) = content.lines().next() else {
        return Ok(None);
    };
    let value = first_line.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<i32>()
        .map(Some)
        .map_err(|_| DiscoveryError::Sidecar {
            path: path.to_path_buf(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_xyz(dir: &Path, body: &str) {
        fs::write(dir.join(XYZ_FILE_NAME), body).unwrap();
    }

    #[test]
    fn discovers_molecules_from_subdirectories_in_sorted_order() {
        let root = tempfile::tempdir().unwrap();
        for name in ["b_mol", "a_mol"] {
            let dir = root.path().join(name);
            fs::create_dir(&dir).unwrap();
            write_xyz(&dir, "1\n\nH 0.0 0.0 0.0\n");
        }

        let molecules = discover_molecules(root.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(molecules.len(), 2);
        assert_eq!(molecules[0].name(), "a_mol");
        assert_eq!(molecules[1].name(), "b_mol");
    }

    #[test]
    fn sidecar_files_supply_charge_and_spin() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("ion");
        fs::create_dir(&dir).unwrap();
        write_xyz(&dir, "1\n\nNa 0.0 0.0 0.0\n");
        fs::write(dir.join(CHARGE_FILE_NAME), "1\n").unwrap();
        fs::write(dir.join(UHF_FILE_NAME), "2\n").unwrap();

        let molecules = discover_molecules(root.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(molecules[0].charge(), 1);
        assert_eq!(molecules[0].unpaired_electrons(), 2);
    }

    #[test]
    fn missing_sidecars_default_to_neutral_singlet() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("plain");
        fs::create_dir(&dir).unwrap();
        write_xyz(&dir, "1\n\nHe 0.0 0.0 0.0\n");

        let molecules = discover_molecules(root.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(molecules[0].charge(), 0);
        assert_eq!(molecules[0].unpaired_electrons(), 0);
    }

    #[test]
    fn directories_without_structure_files_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("empty")).unwrap();
        let dir = root.path().join("real");
        fs::create_dir(&dir).unwrap();
        write_xyz(&dir, "1\n\nH 0.0 0.0 0.0\n");

        let molecules = discover_molecules(root.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(molecules.len(), 1);
        assert_eq!(molecules[0].name(), "real");
    }

    #[test]
    fn coord_files_are_a_fallback_for_missing_xyz() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("tm");
        fs::create_dir(&dir).unwrap();
        fs::write(
            dir.join(COORD_FILE_NAME),
            "$coord\n0.0 0.0 0.0 o\n$end\n",
        )
        .unwrap();

        let molecules = discover_molecules(root.path(), &ProgressReporter::new()).unwrap();
        assert_eq!(molecules[0].element_indices(), &[7]);
    }

    #[test]
    fn malformed_sidecar_is_an_error_naming_the_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("bad");
        fs::create_dir(&dir).unwrap();
        write_xyz(&dir, "1\n\nH 0.0 0.0 0.0\n");
        fs::write(dir.join(CHARGE_FILE_NAME), "not_a_charge\n").unwrap();

        let err = discover_molecules(root.path(), &ProgressReporter::new()).unwrap_err();
        assert!(matches!(err, DiscoveryError::Sidecar { .. }));
        assert!(err.to_string().contains(".CHRG"));
    }
}
