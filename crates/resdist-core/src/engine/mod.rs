//! # Engine Module
//!
//! The computational layer: it turns a loaded [`MolecularSystem`](crate::core::models::system::MolecularSystem)
//! and a validated configuration into distance records or render command sequences.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Selections, label jobs, chain remapping and their builders
//! - **Distance Calculation** ([`distance`]) - Reference-residue lookup and per-residue minimum distances
//! - **Labeling** ([`labeling`]) - PyMOL command sequences for highlighting residue sites
//! - **Progress Monitoring** ([`progress`]) - Progress reporting callbacks
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod distance;
pub mod error;
pub mod labeling;
pub mod progress;
