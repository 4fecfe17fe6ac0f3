use crate::core::models::residue::AminoAcid;
use serde::{Serialize, Serializer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Column names of the distance table, in output order.
pub const DISTANCE_TABLE_HEADER: [&str; 4] = ["AANumber", "ChainAANumber", "Residue", "Distance"];

/// One row of the distance table.
///
/// `chain_id` and `residue_number` identify the source residue for
/// diagnostics and are not written to the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceRecord {
    /// Running index over all emitted rows, starting at 1.
    #[serde(rename = "AANumber")]
    pub aa_number: usize,
    /// Running index within the residue's chain, starting at 1.
    #[serde(rename = "ChainAANumber")]
    pub chain_aa_number: usize,
    #[serde(rename = "Residue", serialize_with = "serialize_one_letter")]
    pub residue: AminoAcid,
    /// Minimum reference-atom to alpha-carbon distance in Angstroms.
    #[serde(rename = "Distance", serialize_with = "serialize_fixed_point")]
    pub distance: f64,
    #[serde(skip)]
    pub chain_id: char,
    #[serde(skip)]
    pub residue_number: isize,
}

fn serialize_one_letter<S: Serializer>(aa: &AminoAcid, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_char(aa.one_letter_code())
}

fn serialize_fixed_point<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.6}", value))
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode table row: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes the header and all records as tab-separated, newline-terminated lines.
///
/// The writer is flushed before returning, so write failures surface here
/// rather than being lost on drop.
pub fn write_distance_table<W: Write>(
    records: &[DistanceRecord],
    writer: W,
) -> Result<(), TableError> {
    let mut table = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    table.write_record(DISTANCE_TABLE_HEADER)?;
    for record in records {
        table.serialize(record)?;
    }
    table.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the distance table to it.
pub fn write_distance_table_to_path(
    records: &[DistanceRecord],
    path: &Path,
) -> Result<(), TableError> {
    let file = File::create(path)?;
    write_distance_table(records, BufWriter::new(file))
}
