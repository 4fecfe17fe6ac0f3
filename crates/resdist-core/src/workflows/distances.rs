use crate::core::io::pdb::{StructureMetadata, read_structure_from_path};
use crate::core::io::table::{DistanceRecord, write_distance_table_to_path};
use crate::engine::config::DistanceConfig;
use crate::engine::distance;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct DistanceReport {
    pub records: Vec<DistanceRecord>,
    pub metadata: StructureMetadata,
    pub output_path: PathBuf,
}

/// Loads the structure, computes all distances and writes the table.
///
/// The output file is created only after every distance has been computed, so
/// a failed run leaves no partial table behind.
#[instrument(skip_all, name = "distance_workflow")]
pub fn run(
    config: &DistanceConfig,
    reporter: &ProgressReporter,
) -> Result<DistanceReport, EngineError> {
    let (system, metadata) = reporter.phase("Loading structure", || {
        info!("Reading structure from {}.", config.structure_path.display());
        read_structure_from_path(&config.structure_path)
            .map_err(|e| EngineError::from_structure(config.structure_path.clone(), e))
    })?;

    let records = reporter.phase("Computing distances", || {
        info!(
            "Measuring chains {:?} against '{}' in chain '{}'.",
            config.selection.chains,
            config.selection.reference_residue_name,
            config.selection.reference_chain
        );
        distance::compute(&system, &config.selection, reporter)
    })?;

    reporter.phase("Writing table", || {
        write_distance_table_to_path(&records, &config.output_path)
            .map_err(|e| EngineError::from_table(config.output_path.clone(), e))
    })?;
    info!(
        "Wrote {} rows to {}.",
        records.len(),
        config.output_path.display()
    );
    reporter.message(format!(
        "Wrote {} rows to {}",
        records.len(),
        config.output_path.display()
    ));

    Ok(DistanceReport {
        records,
        metadata,
        output_path: config.output_path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::DistanceConfigBuilder;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const FIXTURE_PDB: &str = "\
ATOM      1  N   LYS A   1      -1.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  LYS A   1       0.000   0.000   0.000  1.00 10.00           C
ATOM      3  C   LYS A   1       1.000   0.000   0.000  1.00 10.00           C
ATOM      4  CA  GLY A   2       6.000   8.000   0.000  1.00 10.00           C
HETATM    5  C1  SIA A 901       3.000   4.000   0.000  1.00 10.00           C
HETATM    6  O   HOH A 902      20.000  20.000  20.000  1.00 10.00           O
ATOM      7  CA  ALA B   1      50.000   0.000   0.000  1.00 10.00           C
END
";

    const WATER_ONLY_PDB: &str = "\
HETATM    1  C1  SIA A 901       3.000   4.000   0.000  1.00 10.00           C
HETATM    2  O   HOH A 902      20.000  20.000  20.000  1.00 10.00           O
END
";

    fn config(structure: &Path, output: &Path, chains: Vec<char>) -> DistanceConfig {
        DistanceConfigBuilder::new()
            .structure_path(structure.to_path_buf())
            .output_path(output.to_path_buf())
            .chains(chains)
            .build()
            .unwrap()
    }

    #[test]
    fn writes_expected_table_for_single_chain() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("complex.pdb");
        let output = dir.path().join("distances.data");
        fs::write(&structure, FIXTURE_PDB).unwrap();

        let report = run(&config(&structure, &output, vec!['A']), &ProgressReporter::new()).unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.metadata.model_count, 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "AANumber\tChainAANumber\tResidue\tDistance\n\
             1\t1\tK\t5.000000\n\
             2\t2\tG\t5.000000\n"
        );
    }

    #[test]
    fn ligand_numbered_like_an_amino_acid_is_still_the_reference() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("shared_number.pdb");
        let output = dir.path().join("distances.data");
        fs::write(
            &structure,
            "\
ATOM      1  CA  LYS A   1       0.000   0.000   0.000  1.00 10.00           C
HETATM    2  C1  SIA A   1       3.000   4.000   0.000  1.00 10.00           C
END
",
        )
        .unwrap();

        let report = run(&config(&structure, &output, vec!['A']), &ProgressReporter::new()).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "AANumber\tChainAANumber\tResidue\tDistance\n1\t1\tK\t5.000000\n"
        );
    }

    #[test]
    fn second_chain_continues_global_index() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("complex.pdb");
        let output = dir.path().join("distances.data");
        fs::write(&structure, FIXTURE_PDB).unwrap();

        run(
            &config(&structure, &output, vec!['A', 'B']),
            &ProgressReporter::new(),
        )
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().last(), Some("3\t1\tA\t47.169906"));
    }

    #[test]
    fn rerun_produces_byte_identical_output() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("complex.pdb");
        let output = dir.path().join("distances.data");
        fs::write(&structure, FIXTURE_PDB).unwrap();
        let config = config(&structure, &output, vec!['A']);

        run(&config, &ProgressReporter::new()).unwrap();
        let first = fs::read(&output).unwrap();
        run(&config, &ProgressReporter::new()).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn chain_without_amino_acids_writes_header_only() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("ligand.pdb");
        let output = dir.path().join("distances.data");
        fs::write(&structure, WATER_ONLY_PDB).unwrap();

        let report = run(&config(&structure, &output, vec!['A']), &ProgressReporter::new()).unwrap();

        assert!(report.records.is_empty());
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "AANumber\tChainAANumber\tResidue\tDistance\n"
        );
    }

    #[test]
    fn missing_chain_leaves_no_output_file() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("complex.pdb");
        let output = dir.path().join("distances.data");
        fs::write(&structure, FIXTURE_PDB).unwrap();

        let err = run(&config(&structure, &output, vec!['Z']), &ProgressReporter::new()).unwrap_err();

        assert!(matches!(err, EngineError::ChainNotFound { chain_id: 'Z' }));
        assert!(!output.exists());
    }

    #[test]
    fn missing_structure_file_is_not_found() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("distances.data");

        let err = run(
            &config(&dir.path().join("absent.pdb"), &output, vec!['A']),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::StructureNotFound { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn unwritable_output_is_an_output_error() {
        let dir = tempdir().unwrap();
        let structure = dir.path().join("complex.pdb");
        fs::write(&structure, FIXTURE_PDB).unwrap();
        let output = dir.path().join("no_such_dir").join("distances.data");

        let err = run(&config(&structure, &output, vec!['A']), &ProgressReporter::new()).unwrap_err();

        assert!(matches!(err, EngineError::OutputWrite { .. }));
    }
}
