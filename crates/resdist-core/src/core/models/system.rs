use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents one model of a molecular structure: chains, residues and atoms.
///
/// This struct is the central, read-mostly data structure the analyses operate
/// on. Chains keep the order in which they first appear, residues keep file
/// order inside their chain, and atoms keep file order inside their residue.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chain IDs in order of first appearance.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding chains by their single-character identifier.
    chain_id_map: HashMap<char, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Returns the chains in order of first appearance in the source file.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Finds a chain ID by its single-character identifier.
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Iterates over the residues of a chain in file order.
    ///
    /// Yields nothing if the chain ID is unknown.
    pub fn residues_in_chain(
        &self,
        chain_id: ChainId,
    ) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.chains
            .get(chain_id)
            .map(|chain| chain.residues())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.residues.get(id).map(|residue| (id, residue)))
    }

    /// Iterates over the atoms of a residue in file order.
    ///
    /// Yields nothing if the residue ID is unknown.
    pub fn residue_atoms(&self, residue_id: ResidueId) -> impl Iterator<Item = &Atom> {
        self.residues
            .get(residue_id)
            .map(|residue| residue.atoms())
            .unwrap_or_default()
            .iter()
            .filter_map(|&id| self.atoms.get(id))
    }

    /// Looks up a named atom within a residue.
    pub fn atom_by_name(&self, residue_id: ResidueId, name: &str) -> Option<&Atom> {
        let atom_id = self.residues.get(residue_id)?.get_atom_id_by_name(name)?;
        self.atoms.get(atom_id)
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given ID already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: char) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(&id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id, chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Appends a new residue to the end of a chain.
    ///
    /// Residues are never merged here: two residues sharing a sequence number
    /// (for example a protein residue and a ligand with the same number) stay
    /// distinct as long as the reader adds them separately.
    ///
    /// # Return
    ///
    /// Returns `None` if the chain doesn't exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<&str>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let mut residue = Residue::new(residue_number, name, chain_id);
        residue.insertion_code = insertion_code.map(str::to_string);
        let residue_id = self.residues.insert(residue);
        chain.residues.push(residue_id);
        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// When the residue already holds an atom of the same name (an alternate
    /// location), the one with the higher occupancy is kept; on a tie the first
    /// one read wins.
    ///
    /// # Return
    ///
    /// Returns the ID of the atom retained under that name, or `None` if the
    /// residue doesn't exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        let mut atom = atom;
        atom.residue_id = residue_id;

        if let Some(existing_id) = residue.get_atom_id_by_name(&atom.name) {
            let existing_occupancy = self.atoms.get(existing_id).map_or(0.0, |a| a.occupancy);
            if atom.occupancy <= existing_occupancy {
                return Some(existing_id);
            }
            let name = atom.name.clone();
            let new_id = self.atoms.insert(atom);
            residue.replace_atom(&name, existing_id, new_id);
            self.atoms.remove(existing_id);
            return Some(new_id);
        }

        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        residue.add_atom(&name, atom_id);
        Some(atom_id)
    }
}
