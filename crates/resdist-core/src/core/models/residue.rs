use super::ids::{AtomId, ChainId};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The 20 canonical amino acids.
///
/// Each variant carries its three-letter and one-letter codes in a single match
/// table, so the set of recognized residue names and the one-letter mapping
/// cannot diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    // --- Aliphatic, Nonpolar ---
    Alanine,    // ALA
    Glycine,    // GLY
    Isoleucine, // ILE
    Leucine,    // LEU
    Proline,    // PRO
    Valine,     // VAL

    // --- Aromatic ---
    Phenylalanine, // PHE
    Tryptophan,    // TRP
    Tyrosine,      // TYR

    // --- Polar, Uncharged ---
    Asparagine, // ASN
    Cysteine,   // CYS
    Glutamine,  // GLN
    Serine,     // SER
    Threonine,  // THR
    Methionine, // MET

    // --- Positively Charged (Basic) ---
    Arginine,  // ARG
    Histidine, // HIS
    Lysine,    // LYS

    // --- Negatively Charged (Acidic) ---
    AsparticAcid, // ASP
    GlutamicAcid, // GLU
}

impl AminoAcid {
    pub const ALL: [AminoAcid; 20] = [
        AminoAcid::Alanine,
        AminoAcid::Glycine,
        AminoAcid::Isoleucine,
        AminoAcid::Leucine,
        AminoAcid::Proline,
        AminoAcid::Valine,
        AminoAcid::Phenylalanine,
        AminoAcid::Tryptophan,
        AminoAcid::Tyrosine,
        AminoAcid::Asparagine,
        AminoAcid::Cysteine,
        AminoAcid::Glutamine,
        AminoAcid::Serine,
        AminoAcid::Threonine,
        AminoAcid::Methionine,
        AminoAcid::Arginine,
        AminoAcid::Histidine,
        AminoAcid::Lysine,
        AminoAcid::AsparticAcid,
        AminoAcid::GlutamicAcid,
    ];

    /// Returns the `(three-letter, one-letter)` codes of this amino acid.
    const fn codes(self) -> (&'static str, char) {
        match self {
            AminoAcid::Alanine => ("ALA", 'A'),
            AminoAcid::Glycine => ("GLY", 'G'),
            AminoAcid::Isoleucine => ("ILE", 'I'),
            AminoAcid::Leucine => ("LEU", 'L'),
            AminoAcid::Proline => ("PRO", 'P'),
            AminoAcid::Valine => ("VAL", 'V'),
            AminoAcid::Phenylalanine => ("PHE", 'F'),
            AminoAcid::Tryptophan => ("TRP", 'W'),
            AminoAcid::Tyrosine => ("TYR", 'Y'),
            AminoAcid::Asparagine => ("ASN", 'N'),
            AminoAcid::Cysteine => ("CYS", 'C'),
            AminoAcid::Glutamine => ("GLN", 'Q'),
            AminoAcid::Serine => ("SER", 'S'),
            AminoAcid::Threonine => ("THR", 'T'),
            AminoAcid::Methionine => ("MET", 'M'),
            AminoAcid::Arginine => ("ARG", 'R'),
            AminoAcid::Histidine => ("HIS", 'H'),
            AminoAcid::Lysine => ("LYS", 'K'),
            AminoAcid::AsparticAcid => ("ASP", 'D'),
            AminoAcid::GlutamicAcid => ("GLU", 'E'),
        }
    }

    pub const fn three_letter_code(self) -> &'static str {
        self.codes().0
    }

    pub const fn one_letter_code(self) -> char {
        self.codes().1
    }

    /// Looks up an amino acid by its exact (upper-case) three-letter residue name.
    ///
    /// Residue names are matched verbatim, as written in the structure file;
    /// ligands, waters and modified residues yield `None`.
    pub fn from_residue_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|aa| aa.three_letter_code() == name)
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter_code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not one of the 20 canonical amino acid codes")]
pub struct ParseAminoAcidError(pub String);

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_residue_name(s).ok_or_else(|| ParseAminoAcidError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub residue_number: isize,              // Residue sequence number from source file
    pub insertion_code: Option<String>,     // Insertion code, if any
    pub name: String,                       // Categorical name (e.g., "ALA", "SIA", "HOH")
    pub amino_acid: Option<AminoAcid>,      // Set when `name` is a canonical amino acid
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Atoms belonging to this residue, in file order
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(residue_number: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            residue_number,
            insertion_code: None,
            name: name.to_string(),
            amino_acid: AminoAcid::from_residue_name(name),
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub(crate) fn replace_atom(&mut self, atom_name: &str, old_id: AtomId, new_id: AtomId) {
        if let Some(slot) = self.atoms.iter_mut().find(|id| **id == old_id) {
            *slot = new_id;
        }
        self.atom_name_map.insert(atom_name.to_string(), new_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    pub fn is_amino_acid(&self) -> bool {
        self.amino_acid.is_some()
    }

    /// Human-readable label such as `SIA 1` or `LYS 52A`.
    pub fn label(&self) -> String {
        format!(
            "{} {}{}",
            self.name,
            self.residue_number,
            self.insertion_code.as_deref().unwrap_or("")
        )
    }
}
