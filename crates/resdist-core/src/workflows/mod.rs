//! # Workflows Module
//!
//! Top-level entry points that tie file I/O and the engine together.
//!
//! - **Distance Workflow** ([`distances`]) - Load a structure, measure every amino acid
//!   against the reference residue and write the distance table.
//! - **Label Workflow** ([`label`]) - Read site lists and write one PyMOL script that
//!   renders an image per labeling job.

pub mod distances;
pub mod label;
