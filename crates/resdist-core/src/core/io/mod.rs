//! Provides input/output functionality for the analysis workflows.
//!
//! Structure files are read through the [`traits::MolecularFile`] interface,
//! backed by the `pdbtbx` parser. Site lists and distance tables are simple
//! whitespace- and tab-delimited text files.

pub mod pdb;
pub mod sites;
pub mod table;
pub mod traits;
