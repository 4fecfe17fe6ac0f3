use super::config::{DistanceSelection, MissingAtomPolicy};
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::table::DistanceRecord;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::Residue;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::min_distance_to;
use nalgebra::Point3;
use tracing::{debug, instrument, warn};

/// Finds the reference residue by categorical name within a chain.
///
/// All residues of the chain are scanned and the last match is returned. A
/// warning is logged when more than one residue carries the name.
pub fn find_reference_residue<'s>(
    system: &'s MolecularSystem,
    chain_id: char,
    name: &str,
) -> Result<(ResidueId, &'s Residue), EngineError> {
    let chain = system
        .find_chain_by_id(chain_id)
        .ok_or(EngineError::ChainNotFound { chain_id })?;

    let matches: Vec<(ResidueId, &Residue)> = system
        .residues_in_chain(chain)
        .filter(|(_, residue)| residue.name == name)
        .collect();

    if matches.len() > 1 {
        let labels: Vec<String> = matches.iter().map(|(_, r)| r.label()).collect();
        warn!(
            "Found {} residues named '{}' in chain '{}' ({}); using the last one.",
            matches.len(),
            name,
            chain_id,
            labels.join(", ")
        );
    }

    matches
        .last()
        .copied()
        .ok_or_else(|| EngineError::ReferenceResidueNotFound {
            chain_id,
            name: name.to_string(),
        })
}

/// Computes one record per amino-acid residue of the selected chains.
///
/// Every chain is resolved and the reference residue is located before any
/// distance is computed, so a selection naming an absent chain fails without
/// producing partial results.
#[instrument(skip_all, name = "distance_calculation")]
pub fn compute(
    system: &MolecularSystem,
    selection: &DistanceSelection,
    reporter: &ProgressReporter,
) -> Result<Vec<DistanceRecord>, EngineError> {
    let chains = selection
        .chains
        .iter()
        .map(|&chain_id| {
            system
                .find_chain_by_id(chain_id)
                .map(|id| (chain_id, id))
                .ok_or(EngineError::ChainNotFound { chain_id })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (reference_id, reference) = find_reference_residue(
        system,
        selection.reference_chain,
        &selection.reference_residue_name,
    )?;
    let reference_positions: Vec<Point3<f64>> = system
        .residue_atoms(reference_id)
        .map(|atom| atom.position)
        .collect();
    let Some((first_position, other_positions)) = reference_positions.split_first() else {
        return Err(EngineError::EmptyReferenceResidue {
            chain_id: selection.reference_chain,
            label: reference.label(),
        });
    };
    debug!(
        "Reference residue {} has {} atoms.",
        reference.label(),
        reference_positions.len()
    );

    let total: usize = chains
        .iter()
        .map(|&(_, id)| {
            system
                .residues_in_chain(id)
                .filter(|(_, r)| r.is_amino_acid())
                .count()
        })
        .sum();
    reporter.report(Progress::TaskStart {
        total_steps: total as u64,
    });

    let mut records = Vec::with_capacity(total);
    let mut aa_number = 0;
    for (chain_char, chain_id) in chains {
        let mut chain_aa_number = 0;
        for (residue_id, residue) in system.residues_in_chain(chain_id) {
            let Some(amino_acid) = residue.amino_acid else {
                continue;
            };
            reporter.report(Progress::TaskIncrement);

            let Some(target) = system.atom_by_name(residue_id, &selection.target_atom_name)
            else {
                match selection.missing_atom_policy {
                    MissingAtomPolicy::Fail => {
                        reporter.report(Progress::TaskFinish);
                        return Err(EngineError::MissingAtom {
                            chain_id: chain_char,
                            label: residue.label(),
                            atom_name: selection.target_atom_name.clone(),
                        });
                    }
                    MissingAtomPolicy::Skip => {
                        warn!(
                            "Skipping residue {} in chain '{}': no '{}' atom.",
                            residue.label(),
                            chain_char,
                            selection.target_atom_name
                        );
                        continue;
                    }
                }
            };

            let distance = min_distance_to(first_position, other_positions, &target.position);

            aa_number += 1;
            chain_aa_number += 1;
            records.push(DistanceRecord {
                aa_number,
                chain_aa_number,
                residue: amino_acid,
                distance,
                chain_id: chain_char,
                residue_number: residue.residue_number,
            });
        }
        debug!(
            "Chain '{}' contributed {} residues.",
            chain_char, chain_aa_number
        );
    }
    reporter.report(Progress::TaskFinish);

    Ok(records)
}
