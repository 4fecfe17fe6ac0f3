use super::ids::ResidueId;
use nalgebra::Point3;

/// Name of the backbone alpha-carbon atom.
pub const ALPHA_CARBON_ATOM_NAME: &str = "CA";

/// Represents an atom in a molecular structure.
///
/// Atoms are owned by a [`MolecularSystem`](super::system::MolecularSystem) and
/// reference their parent residue by ID. Only the data needed for geometric
/// analysis is retained from the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "N", "C9").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Crystallographic occupancy, used to pick between alternate locations.
    pub occupancy: f64,
}

impl Atom {
    /// Creates a new `Atom` with full occupancy.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            position,
            occupancy: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.occupancy, 1.0);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let residue_id = ResidueId::default();
        let mut atom1 = Atom::new("N", residue_id, Point3::new(0.0, 0.0, 0.0));
        atom1.occupancy = 0.5;
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
