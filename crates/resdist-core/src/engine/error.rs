use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::pdb::PdbError;
use crate::core::io::sites::SiteListError;
use crate::core::io::table::TableError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Structure file not found or unreadable: {path}")]
    StructureNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse structure file {path}: {source}")]
    StructureParse {
        path: PathBuf,
        #[source]
        source: PdbError,
    },

    #[error("Chain '{chain_id}' not found in structure")]
    ChainNotFound { chain_id: char },

    #[error("Reference residue '{name}' not found in chain '{chain_id}'")]
    ReferenceResidueNotFound { chain_id: char, name: String },

    #[error("Reference residue {label} in chain '{chain_id}' has no atoms")]
    EmptyReferenceResidue { chain_id: char, label: String },

    #[error("Residue {label} in chain '{chain_id}' has no '{atom_name}' atom")]
    MissingAtom {
        chain_id: char,
        label: String,
        atom_name: String,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Site list not found or unreadable: {path}")]
    SiteListNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid site list {path}: {source}")]
    SiteListParse {
        path: PathBuf,
        #[source]
        source: SiteListError,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Classifies a structure-reader failure: I/O errors mean the file itself
    /// could not be read, anything else is a content problem.
    pub(crate) fn from_structure(path: PathBuf, err: PdbError) -> Self {
        match err {
            PdbError::Io(source) => EngineError::StructureNotFound { path, source },
            other => EngineError::StructureParse {
                path,
                source: other,
            },
        }
    }

    pub(crate) fn from_site_list(path: PathBuf, err: SiteListError) -> Self {
        match err {
            SiteListError::Io(source) => EngineError::SiteListNotFound { path, source },
            other => EngineError::SiteListParse {
                path,
                source: other,
            },
        }
    }

    pub(crate) fn from_table(path: PathBuf, err: TableError) -> Self {
        let source = match err {
            TableError::Io(e) => e,
            TableError::Csv(e) => io::Error::from(e),
        };
        EngineError::OutputWrite { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failure_while_reading_structure_is_not_found() {
        let err = EngineError::from_structure(
            PathBuf::from("missing.pdb"),
            PdbError::Io(io::Error::new(io::ErrorKind::NotFound, "gone")),
        );
        assert!(matches!(err, EngineError::StructureNotFound { .. }));
    }

    #[test]
    fn malformed_structure_is_a_parse_error() {
        let err = EngineError::from_structure(
            PathBuf::from("bad.pdb"),
            PdbError::Parse("bad record".to_string()),
        );
        assert!(matches!(err, EngineError::StructureParse { .. }));
        assert!(err.to_string().contains("bad.pdb"));
    }

    #[test]
    fn site_list_errors_are_classified() {
        let missing = EngineError::from_site_list(
            PathBuf::from("sites.data"),
            SiteListError::Io(io::Error::new(io::ErrorKind::NotFound, "gone")),
        );
        assert!(matches!(missing, EngineError::SiteListNotFound { .. }));

        let invalid = EngineError::from_site_list(
            PathBuf::from("sites.data"),
            SiteListError::InvalidResidueNumber {
                line: 3,
                value: "x".to_string(),
            },
        );
        assert!(matches!(invalid, EngineError::SiteListParse { .. }));
    }

    #[test]
    fn missing_atom_message_names_residue_and_atom() {
        let err = EngineError::MissingAtom {
            chain_id: 'A',
            label: "GLY 52".to_string(),
            atom_name: "CA".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Residue GLY 52 in chain 'A' has no 'CA' atom"
        );
    }
}
