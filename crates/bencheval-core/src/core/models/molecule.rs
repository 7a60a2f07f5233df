use super::elements::{self, MAX_ELEMENT};
use nalgebra::Point3;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoleculeError {
    #[error("element index {index} of atom {atom} is out of range (0-{max})", max = MAX_ELEMENT - 1)]
    ElementOutOfRange { atom: usize, index: usize },
    #[error("number of coordinates ({positions}) does not match number of atoms ({atoms})")]
    LengthMismatch { atoms: usize, positions: usize },
}

/// An immutable molecular structure.
///
/// All representations of the composition (per-atom element indices and the
/// per-element count vector) are reconciled at construction; an instance can
/// never hold inconsistent data.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    name: String,
    element_indices: Vec<usize>,
    element_counts: Vec<usize>,
    positions: Vec<Point3<f64>>,
    charge: i32,
    unpaired_electrons: u32,
}

impl Molecule {
    /// Builds a molecule from per-atom 0-based element indices and coordinates.
    ///
    /// The per-element count vector is derived from `element_indices`, so the
    /// two composition representations always agree.
    pub fn new(
        name: impl Into<String>,
        element_indices: Vec<usize>,
        positions: Vec<Point3<f64>>,
        charge: i32,
        unpaired_electrons: u32,
    ) -> Result<Self, MoleculeError> {
        if element_indices.len() != positions.len() {
            return Err(MoleculeError::LengthMismatch {
                atoms: element_indices.len(),
                positions: positions.len(),
            });
        }

        let mut element_counts = vec![0usize; MAX_ELEMENT];
        for (atom, &index) in element_indices.iter().enumerate() {
            if index >= MAX_ELEMENT {
                return Err(MoleculeError::ElementOutOfRange { atom, index });
            }
            element_counts[index] += 1;
        }

        Ok(Self {
            name: name.into(),
            element_indices,
            element_counts,
            positions,
            charge,
            unpaired_electrons,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn num_atoms(&self) -> usize {
        self.element_indices.len()
    }

    /// 0-based element index of every atom, in file order.
    pub fn element_indices(&self) -> &[usize] {
        &self.element_indices
    }

    /// Per-element atom counts, one slot per element of the periodic table.
    pub fn element_counts(&self) -> &[usize] {
        &self.element_counts
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Number of unpaired electrons (UHF).
    pub fn unpaired_electrons(&self) -> u32 {
        self.unpaired_electrons
    }

    pub fn contains_element(&self, index: usize) -> bool {
        self.element_counts.get(index).is_some_and(|&count| count > 0)
    }

    /// Sum formula with C, H, N, O leading, then the remaining elements in
    /// ascending order. Counts are always written out, e.g. `H2O1`.
    pub fn sum_formula(&self) -> String {
        const LEADING: [usize; 4] = [5, 0, 6, 7];

        let mut formula = String::new();
        for index in LEADING {
            if self.element_counts[index] > 0 {
                formula.push_str(elements::symbol(index).unwrap_or("?"));
                formula.push_str(&self.element_counts[index].to_string());
            }
        }
        for (index, &count) in self.element_counts.iter().enumerate() {
            if count > 0 && !LEADING.contains(&index) {
                formula.push_str(elements::symbol(index).unwrap_or("?"));
                formula.push_str(&count.to_string());
            }
        }
        formula
    }

    /// Derives a name from the sum formula plus a short random suffix, using
    /// the caller-supplied generator.
    pub fn name_from_formula(&self, rng: &mut impl Rng) -> String {
        let mut bytes = [0u8; 3];
        rng.fill(&mut bytes[..]);
        let suffix: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        format!("{}_{}", self.sum_formula(), suffix)
    }
}
