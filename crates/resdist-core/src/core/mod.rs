//! # Core Module
//!
//! Stateless building blocks shared by the analysis engine: the structure
//! model, file I/O, and small geometric and naming utilities.
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and systems
//! - **File I/O** ([`io`]) - Structure reading, site lists and distance tables
//! - **Utilities** ([`utils`]) - Geometry helpers and rendering-engine vocabularies

pub mod io;
pub mod models;
pub mod utils;
