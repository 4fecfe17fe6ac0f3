use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::ResidueId;
use crate::core::models::system::MolecularSystem;
use nalgebra::Point3;
use pdbtbx::{Format, ReadOptions, StrictnessLevel};
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureMetadata {
    /// Identifier from the file header (e.g., "2BAT"), when present.
    pub identifier: Option<String>,
    /// Number of models in the file; only the first one is loaded.
    pub model_count: usize,
    /// Non-fatal diagnostics reported by the parser.
    pub warnings: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Structure file could not be parsed: {0}")]
    Parse(String),
    #[error("Structure file contains no models")]
    NoModels,
    #[error("Chain identifier '{0}' is not a single character")]
    UnsupportedChainId(String),
}

/// Coordinate file flavors understood by the structure reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    Pdb,
    Mmcif,
}

impl StructureFormat {
    /// Picks the format from a file extension; anything other than
    /// `.cif`/`.mmcif` is read as PDB.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("cif") | Some("mmcif") => StructureFormat::Mmcif,
            _ => StructureFormat::Pdb,
        }
    }

    fn as_pdbtbx(self) -> Format {
        match self {
            StructureFormat::Pdb => Format::Pdb,
            StructureFormat::Mmcif => Format::Mmcif,
        }
    }
}

pub struct PdbFile;

pub struct MmcifFile;

impl MolecularFile for PdbFile {
    type Metadata = StructureMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        read_structure(reader, StructureFormat::Pdb)
    }
}

impl MolecularFile for MmcifFile {
    type Metadata = StructureMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(MolecularSystem, Self::Metadata), Self::Error> {
        read_structure(reader, StructureFormat::Mmcif)
    }
}

/// Reads a structure file, choosing the format from the path's extension.
pub fn read_structure_from_path(
    path: &Path,
) -> Result<(MolecularSystem, StructureMetadata), PdbError> {
    match StructureFormat::from_path(path) {
        StructureFormat::Pdb => PdbFile::read_from_path(path),
        StructureFormat::Mmcif => MmcifFile::read_from_path(path),
    }
}

fn read_structure(
    reader: &mut impl BufRead,
    format: StructureFormat,
) -> Result<(MolecularSystem, StructureMetadata), PdbError> {
    let (pdb, diagnostics) = ReadOptions::new()
        .set_format(format.as_pdbtbx())
        .set_level(StrictnessLevel::Loose)
        .read_raw(BufReader::new(reader))
        .map_err(|errs| {
            PdbError::Parse(
                errs.iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

    let warnings: Vec<String> = diagnostics.iter().map(|e| e.to_string()).collect();
    for warning in &warnings {
        debug!("Structure reader diagnostic: {}", warning);
    }

    let model = pdb.models().next().ok_or(PdbError::NoModels)?;
    let model_count = pdb.model_count();
    if model_count > 1 {
        warn!(
            "Structure contains {} models; only the first is used.",
            model_count
        );
    }

    let mut system = MolecularSystem::new();
    for chain in model.chains() {
        let chain_char = single_char_chain_id(chain.id())?;
        let chain_id = system.add_chain(chain_char);

        for residue in chain.residues() {
            // pdbtbx files a HETATM group sharing an ATOM residue's number as
            // another conformer of that residue; each name becomes its own residue.
            let mut by_name: Vec<(&str, ResidueId)> = Vec::new();
            for conformer in residue.conformers() {
                let name = conformer.name().trim();
                let residue_id = match by_name.iter().find(|(n, _)| *n == name) {
                    Some(&(_, id)) => id,
                    None => {
                        let id = system
                            .add_residue(
                                chain_id,
                                residue.serial_number(),
                                residue.insertion_code(),
                                name,
                            )
                            .ok_or_else(|| {
                                PdbError::Parse(format!(
                                    "chain '{}' vanished during load",
                                    chain_char
                                ))
                            })?;
                        by_name.push((name, id));
                        id
                    }
                };
                for atom in conformer.atoms() {
                    add_atom(&mut system, residue_id, atom)?;
                }
            }
        }
    }

    debug!(
        "Loaded {} atoms in {} residues from first model.",
        system.atom_count(),
        system.residue_count()
    );

    let metadata = StructureMetadata {
        identifier: pdb.identifier.clone(),
        model_count,
        warnings,
    };
    Ok((system, metadata))
}

fn add_atom(
    system: &mut MolecularSystem,
    residue_id: ResidueId,
    source: &pdbtbx::Atom,
) -> Result<(), PdbError> {
    let (x, y, z) = source.pos();
    let mut atom = Atom::new(source.name().trim(), residue_id, Point3::new(x, y, z));
    atom.occupancy = source.occupancy();
    system
        .add_atom_to_residue(residue_id, atom)
        .map(|_| ())
        .ok_or_else(|| PdbError::Parse("residue vanished during load".to_string()))
}

fn single_char_chain_id(id: &str) -> Result<char, PdbError> {
    let mut chars = id.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(PdbError::UnsupportedChainId(id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::residue::AminoAcid;
    use std::fs;
    use tempfile::tempdir;

    const SMALL_PDB: &str = "\
ATOM      1  N   LYS A   1      -1.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  LYS A   1       0.000   0.000   0.000  1.00 10.00           C
ATOM      3  C   LYS A   1       1.000   0.000   0.000  1.00 10.00           C
ATOM      4  CA  GLY A   2       6.000   8.000   0.000  1.00 10.00           C
HETATM    5  C1  SIA A 901       3.000   4.000   0.000  1.00 10.00           C
HETATM    6  O   HOH A 902      20.000  20.000  20.000  1.00 10.00           O
ATOM      7  CA  ALA B   1      50.000   0.000   0.000  1.00 10.00           C
END
";

    fn read_str(content: &str) -> (MolecularSystem, StructureMetadata) {
        let mut reader = BufReader::new(content.as_bytes());
        PdbFile::read_from(&mut reader).expect("small PDB should parse")
    }

    #[test]
    fn reads_chains_residues_and_atoms_in_file_order() {
        let (system, metadata) = read_str(SMALL_PDB);
        assert_eq!(metadata.model_count, 1);

        let chains: Vec<char> = system.chains_iter().map(|(_, c)| c.id).collect();
        assert_eq!(chains, vec!['A', 'B']);

        let chain_a = system.find_chain_by_id('A').unwrap();
        let names: Vec<&str> = system
            .residues_in_chain(chain_a)
            .map(|(_, r)| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["LYS", "GLY", "SIA", "HOH"]);
    }

    #[test]
    fn classifies_amino_acids_and_keeps_coordinates() {
        let (system, _) = read_str(SMALL_PDB);
        let chain_a = system.find_chain_by_id('A').unwrap();
        let (lys_id, lys) = system.residues_in_chain(chain_a).next().unwrap();

        assert_eq!(lys.amino_acid, Some(AminoAcid::Lysine));
        assert_eq!(lys.residue_number, 1);
        assert_eq!(lys.atoms().len(), 3);
        let ca = system.atom_by_name(lys_id, "CA").unwrap();
        assert_eq!(ca.position, Point3::new(0.0, 0.0, 0.0));

        let (sia_id, sia) = system.residues_in_chain(chain_a).nth(2).unwrap();
        assert_eq!(sia.amino_acid, None);
        assert_eq!(sia.residue_number, 901);
        assert!(system.atom_by_name(sia_id, "C1").is_some());
    }

    #[test]
    fn ligand_sharing_a_residue_number_stays_a_separate_residue() {
        let (system, _) = read_str(
            "\
ATOM      1  N   LYS A   1      -1.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  LYS A   1       0.000   0.000   0.000  1.00 10.00           C
HETATM    3  C1  SIA A   1       3.000   4.000   0.000  1.00 10.00           C
HETATM    4  C2  SIA A   1       4.000   4.000   0.000  1.00 10.00           C
END
",
        );
        let chain_a = system.find_chain_by_id('A').unwrap();
        let residues: Vec<(ResidueId, &str, usize)> = system
            .residues_in_chain(chain_a)
            .map(|(id, r)| (id, r.name.as_str(), r.atoms().len()))
            .collect();

        assert_eq!(residues.len(), 2);
        assert_eq!((residues[0].1, residues[0].2), ("LYS", 2));
        assert_eq!((residues[1].1, residues[1].2), ("SIA", 2));
        assert!(system.atom_by_name(residues[0].0, "C1").is_none());
        assert_eq!(
            system.atom_by_name(residues[1].0, "C1").unwrap().position,
            Point3::new(3.0, 4.0, 0.0)
        );
    }

    #[test]
    fn alternate_locations_keep_the_higher_occupancy_atom() {
        let (system, _) = read_str(
            "\
ATOM      1  CA ALYS A   1       0.000   0.000   0.000  0.40 10.00           C
ATOM      2  CA BLYS A   1       1.000   0.000   0.000  0.60 10.00           C
END
",
        );
        let chain_a = system.find_chain_by_id('A').unwrap();
        let (lys_id, lys) = system.residues_in_chain(chain_a).next().unwrap();

        assert_eq!(system.residue_count(), 1);
        assert_eq!(lys.atoms().len(), 1);
        assert_eq!(system.atom_by_name(lys_id, "CA").unwrap().position.x, 1.0);
    }

    #[test]
    fn invalid_utf8_content_is_a_parse_error() {
        let mut reader = BufReader::new(&b"ATOM      1  CA  LYS A   1  \xff\xfe\n"[..]);
        let result = PdbFile::read_from(&mut reader);
        assert!(matches!(result, Err(PdbError::Parse(_))));
    }

    #[test]
    fn read_from_path_reports_missing_file_as_io_error() {
        let dir = tempdir().unwrap();
        let result = PdbFile::read_from_path(dir.path().join("missing.pdb"));
        assert!(matches!(result, Err(PdbError::Io(_))));
    }

    #[test]
    fn read_structure_from_path_reads_pdb_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("small.pdb");
        fs::write(&path, SMALL_PDB).unwrap();

        let (system, _) = read_structure_from_path(&path).unwrap();
        assert_eq!(system.atom_count(), 7);
    }

    #[test]
    fn format_is_chosen_from_extension() {
        assert_eq!(
            StructureFormat::from_path(Path::new("x/N2-2bat.pdb")),
            StructureFormat::Pdb
        );
        assert_eq!(
            StructureFormat::from_path(Path::new("4hmg.CIF")),
            StructureFormat::Mmcif
        );
        assert_eq!(
            StructureFormat::from_path(Path::new("model.mmcif")),
            StructureFormat::Mmcif
        );
        assert_eq!(
            StructureFormat::from_path(Path::new("no_extension")),
            StructureFormat::Pdb
        );
    }

    #[test]
    fn single_char_chain_id_rejects_multi_character_ids() {
        assert_eq!(single_char_chain_id("A").unwrap(), 'A');
        assert_eq!(single_char_chain_id(" B ").unwrap(), 'B');
        assert!(matches!(
            single_char_chain_id("AA"),
            Err(PdbError::UnsupportedChainId(_))
        ));
        assert!(matches!(
            single_char_chain_id(""),
            Err(PdbError::UnsupportedChainId(_))
        ));
    }
}
