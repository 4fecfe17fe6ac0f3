//! # resdist Core Library
//!
//! Tabulates how far every amino-acid residue of a protein chain lies from a bound
//! ligand, and generates PyMOL scripts that highlight residue sites on a structure.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), the
//!   structure reader, the distance-table writer, the site-list reader and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Configuration builders, the distance calculation
//!   and the render command generator, each operating on already-loaded data.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that read input files,
//!   drive the engine and write results, reporting progress along the way.

pub mod core;
pub mod engine;
pub mod workflows;
