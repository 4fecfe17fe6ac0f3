pub mod distances;
pub mod label;
