use crate::cli::DistancesArgs;
use crate::config::build_distance_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use resdist::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: DistancesArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_distance_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Measuring distances from '{}' in {}...",
        config.selection.reference_residue_name,
        config.structure_path.display()
    );
    let report = workflows::distances::run(&config, &reporter)?;

    if let Some(id) = &report.metadata.identifier {
        info!("Structure identifier: {}", id);
    }
    if report.records.is_empty() {
        warn!("No amino-acid residues found in the selected chains; wrote header only.");
        println!("Warning: no amino-acid residues found; the table contains only its header.");
    }
    if let Some(closest) = report
        .records
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
    {
        info!(
            "Closest residue: {}{} in chain '{}' at {:.3} Å.",
            closest.residue.one_letter_code(),
            closest.residue_number,
            closest.chain_id,
            closest.distance
        );
    }

    println!(
        "✓ {} residues written to: {}",
        report.records.len(),
        report.output_path.display()
    );
    Ok(())
}
