pub mod geometry;
pub mod pymol;
