use crate::core::models::constraints::MoleculeConstraints;
use crate::core::models::molecule::Molecule;
use crate::core::progress::{Progress, ProgressReporter};
use tracing::debug;

/// Checks whether a molecule contains at least one required-element group in
/// full (OR across groups, AND within each group).
pub fn has_required_elements(molecule: &Molecule, groups: &[Vec<usize>]) -> bool {
    groups
        .iter()
        .any(|group| group.iter().all(|&index| molecule.contains_element(index)))
}

/// Keeps every molecule that passes all composition constraints.
///
/// The predicates are independent AND conditions; their evaluation order only
/// determines which rejection diagnostic is logged first.
pub fn filter_by_composition<'a>(
    molecules: &'a [Molecule],
    constraints: &MoleculeConstraints,
    reporter: &ProgressReporter,
) -> Vec<&'a Molecule> {
    reporter.report(Progress::TaskStart {
        total_steps: molecules.len() as u64,
    });

    let mut kept = Vec::new();
    for molecule in molecules {
        reporter.report(Progress::TaskIncrement);
        if passes(molecule, constraints) {
            kept.push(molecule);
        }
    }

    reporter.report(Progress::TaskFinish);
    kept
}

fn passes(molecule: &Molecule, constraints: &MoleculeConstraints) -> bool {
    let name = molecule.name();

    if let Some(min) = constraints.min_num_atoms {
        if molecule.num_atoms() < min {
            debug!(
                "Molecule {} has only {} atoms. Minimum is {}.",
                name,
                molecule.num_atoms(),
                min
            );
            return false;
        }
    }
    if let Some(max) = constraints.max_num_atoms {
        if molecule.num_atoms() > max {
            debug!(
                "Molecule {} has {} atoms. Maximum is {}.",
                name,
                molecule.num_atoms(),
                max
            );
            return false;
        }
    }

    if !constraints.allowed_elements.is_empty() {
        let all_allowed = molecule
            .element_indices()
            .iter()
            .all(|index| constraints.allowed_elements.contains(index));
        if !all_allowed {
            debug!("Molecule {} has forbidden elements.", name);
            return false;
        }
    }

    if !constraints.required_elements.is_empty()
        && !has_required_elements(molecule, &constraints.required_elements)
    {
        debug!("Molecule {} does not have the required elements.", name);
        return false;
    }

    if let Some(min) = constraints.min_charge {
        if molecule.charge() < min {
            debug!("Molecule {} has charge {}.", name, molecule.charge());
            return false;
        }
    }
    if let Some(max) = constraints.max_charge {
        if molecule.charge() > max {
            debug!("Molecule {} has charge {}.", name, molecule.charge());
            return false;
        }
    }

    if let Some(max) = constraints.max_unpaired_electrons {
        if molecule.unpaired_electrons() > max {
            debug!(
                "Molecule {} has {} unpaired electrons.",
                name,
                molecule.unpaired_electrons()
            );
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::collections::BTreeSet;

    fn molecule(name: &str, indices: Vec<usize>, charge: i32, uhf: u32) -> Molecule {
        let positions = vec![Point3::origin(); indices.len()];
        Molecule::new(name, indices, positions, charge, uhf).unwrap()
    }

    #[test]
    fn required_groups_are_or_of_and() {
        // Groups: (A=0, B=5) together, or (C=7) alone.
        let groups = vec![vec![0, 5], vec![7]];

        let both = molecule("both", vec![0, 5], 0, 0);
        let only_c = molecule("only_c", vec![7, 7], 0, 0);
        let only_a = molecule("only_a", vec![0], 0, 0);
        let neither = molecule("neither", vec![9], 0, 0);

        assert!(has_required_elements(&both, &groups));
        assert!(has_required_elements(&only_c, &groups));
        assert!(!has_required_elements(&only_a, &groups));
        assert!(!has_required_elements(&neither, &groups));
    }

    #[test]
    fn empty_allowed_set_means_no_restriction() {
        let mols = vec![molecule("any", vec![91], 0, 0)];
        let constraints = MoleculeConstraints::default();
        let kept = filter_by_composition(&mols, &constraints, &ProgressReporter::new());
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn molecules_with_forbidden_elements_are_dropped() {
        let mols = vec![
            molecule("ok", vec![0, 5], 0, 0),
            molecule("bad", vec![0, 16], 0, 0),
        ];
        let constraints = MoleculeConstraints::builder()
            .allowed_elements(BTreeSet::from([0, 5]))
            .build()
            .unwrap();
        let kept = filter_by_composition(&mols, &constraints, &ProgressReporter::new());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name(), "ok");
    }

    #[test]
    fn charge_and_spin_bounds_are_inclusive() {
        let mols = vec![
            molecule("anion", vec![0], -1, 0),
            molecule("dication", vec![0], 2, 0),
            molecule("radical", vec![0], 0, 3),
        ];
        let constraints = MoleculeConstraints::builder()
            .min_charge(-1)
            .max_charge(1)
            .max_unpaired_electrons(2)
            .build()
            .unwrap();
        let kept = filter_by_composition(&mols, &constraints, &ProgressReporter::new());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name(), "anion");
    }

    #[test]
    fn atom_count_bounds_are_inclusive() {
        let mols = vec![
            molecule("tiny", vec![0], 0, 0),
            molecule("mid", vec![0, 0, 0], 0, 0),
            molecule("big", vec![0; 9], 0, 0),
        ];
        let constraints = MoleculeConstraints::builder()
            .min_num_atoms(2)
            .max_num_atoms(3)
            .build()
            .unwrap();
        let kept = filter_by_composition(&mols, &constraints, &ProgressReporter::new());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name(), "mid");
    }

    #[test]
    fn filtering_its_own_output_is_the_identity() {
        let mols = vec![
            molecule("a", vec![0, 5], 0, 0),
            molecule("b", vec![16], 0, 0),
            molecule("c", vec![0, 0, 0, 0], 1, 0),
        ];
        let constraints = MoleculeConstraints::builder()
            .allowed_elements(BTreeSet::from([0, 5]))
            .max_charge(0)
            .build()
            .unwrap();

        let reporter = ProgressReporter::new();
        let first: Vec<Molecule> = filter_by_composition(&mols, &constraints, &reporter)
            .into_iter()
            .cloned()
            .collect();
        let second: Vec<Molecule> = filter_by_composition(&first, &constraints, &reporter)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(first, second);
    }
}
