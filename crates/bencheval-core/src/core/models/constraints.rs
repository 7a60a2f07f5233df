use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConstraintError {
    #[error("minimum charge ({min}) cannot be greater than maximum charge ({max})")]
    ChargeBounds { min: i32, max: i32 },
    #[error("minimum number of atoms ({min}) cannot be greater than maximum number of atoms ({max})")]
    AtomCountBounds { min: usize, max: usize },
}

/// Composition constraints applied when selecting molecules.
///
/// An empty allowed-element set means "no restriction". Required-element
/// groups are satisfied when at least one group is fully contained in the
/// molecule (OR across groups, AND within a group).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoleculeConstraints {
    pub allowed_elements: BTreeSet<usize>,
    pub required_elements: Vec<Vec<usize>>,
    pub min_charge: Option<i32>,
    pub max_charge: Option<i32>,
    pub max_unpaired_electrons: Option<u32>,
    pub min_num_atoms: Option<usize>,
    pub max_num_atoms: Option<usize>,
}

impl MoleculeConstraints {
    pub fn builder() -> MoleculeConstraintsBuilder {
        MoleculeConstraintsBuilder::default()
    }
}

impl fmt::Display for MoleculeConstraints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Allowed elements: {:?}", self.allowed_elements)?;
        writeln!(f, "Required elements: {:?}", self.required_elements)?;
        writeln!(f, "Minimal charge: {:?}", self.min_charge)?;
        writeln!(f, "Maximal charge: {:?}", self.max_charge)?;
        writeln!(
            f,
            "Maximal number of unpaired electrons: {:?}",
            self.max_unpaired_electrons
        )?;
        writeln!(f, "Minimal number of atoms: {:?}", self.min_num_atoms)?;
        write!(f, "Maximal number of atoms: {:?}", self.max_num_atoms)
    }
}

#[derive(Default)]
pub struct MoleculeConstraintsBuilder {
    allowed_elements: BTreeSet<usize>,
    required_elements: Vec<Vec<usize>>,
    min_charge: Option<i32>,
    max_charge: Option<i32>,
    max_unpaired_electrons: Option<u32>,
    min_num_atoms: Option<usize>,
    max_num_atoms: Option<usize>,
}

impl MoleculeConstraintsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_elements(mut self, elements: BTreeSet<usize>) -> Self {
        self.allowed_elements = elements;
        self
    }
    pub fn required_elements(mut self, groups: Vec<Vec<usize>>) -> Self {
        self.required_elements = groups;
        self
    }
    pub fn min_charge(mut self, charge: i32) -> Self {
        self.min_charge = Some(charge);
        self
    }
    pub fn max_charge(mut self, charge: i32) -> Self {
        self.max_charge = Some(charge);
        self
    }
    pub fn max_unpaired_electrons(mut self, uhf: u32) -> Self {
        self.max_unpaired_electrons = Some(uhf);
        self
    }
    pub fn min_num_atoms(mut self, count: usize) -> Self {
        self.min_num_atoms = Some(count);
        self
    }
    pub fn max_num_atoms(mut self, count: usize) -> Self {
        self.max_num_atoms = Some(count);
        self
    }

    pub fn build(self) -> Result<MoleculeConstraints, ConstraintError> {
        if let (Some(min), Some(max)) = (self.min_charge, self.max_charge) {
            if min > max {
                return Err(ConstraintError::ChargeBounds { min, max });
            }
        }
        if let (Some(min), Some(max)) = (self.min_num_atoms, self.max_num_atoms) {
            if min > max {
                return Err(ConstraintError::AtomCountBounds { min, max });
            }
        }
        Ok(MoleculeConstraints {
            allowed_elements: self.allowed_elements,
            required_elements: self.required_elements,
            min_charge: self.min_charge,
            max_charge: self.max_charge,
            max_unpaired_electrons: self.max_unpaired_electrons,
            min_num_atoms: self.min_num_atoms,
            max_num_atoms: self.max_num_atoms,
        })
    }
}
