//! # Core Models Module
//!
//! Data structures representing one model of a parsed molecular structure.
//!
//! ## Key Components
//!
//! - [`atom`] - Named points in space owned by a residue
//! - [`residue`] - Residues and the canonical [`AminoAcid`](residue::AminoAcid) table
//! - [`chain`] - Ordered residue lists identified by a single character
//! - [`system`] - The [`MolecularSystem`](system::MolecularSystem) arena tying them together
//! - [`ids`] - Stable slot-map keys for atoms, residues and chains
//!
//! ## Usage
//!
//! ```ignore
//! use resdist::core::models::{atom::Atom, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A');
//! let residue_id = system.add_residue(chain_id, 1, None, "LYS")?;
//! system.add_atom_to_residue(residue_id, Atom::new("CA", residue_id, Point3::origin()))?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
