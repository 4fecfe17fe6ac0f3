use crate::error::{CliError, Result};
use resdist::engine::config as core_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub distances: Option<FileDistancesConfig>,
    pub label: Option<FileLabelConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileDistancesConfig {
    pub structure: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub chains: Option<Vec<char>>,
    pub reference_chain: Option<char>,
    pub reference_residue: Option<String>,
    pub target_atom: Option<String>,
    pub missing_atom_policy: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileLabelConfig {
    pub script: Option<PathBuf>,
    pub render: Option<FileRenderConfig>,
    #[serde(default)]
    pub jobs: Vec<FileLabelJob>,
}

/// Scene settings shared by all jobs; each job may override rotations and chains.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileRenderConfig {
    pub background_color: Option<String>,
    pub base_color: Option<String>,
    pub representation: Option<String>,
    pub width: Option<u32>,
    pub dpi: Option<u32>,
    pub ray_trace: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileLabelJob {
    pub structure: String,
    pub sites: PathBuf,
    pub color: String,
    pub image: PathBuf,
    pub segments: Option<Vec<FileChainSegment>>,
    pub displayed_chains: Option<Vec<char>>,
    #[serde(default)]
    pub rotations: Vec<FileRotation>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileChainSegment {
    pub chain: char,
    #[serde(default)]
    pub offset: isize,
}

impl From<FileChainSegment> for core_config::ChainSegment {
    fn from(p: FileChainSegment) -> Self {
        Self {
            chain_id: p.chain,
            offset: p.offset,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileRotation {
    pub axis: String,
    pub degrees: f64,
}

impl TryFrom<FileRotation> for core_config::ViewRotation {
    type Error = core_config::ConfigError;

    fn try_from(p: FileRotation) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            axis: p.axis.parse()?,
            degrees: p.degrees,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_full_configuration() {
        let toml = r#"
            [distances]
            structure = "reference/N2-2bat.pdb"
            output = "2BAT-SialicAcidDistances.data"
            chains = ["A"]
            reference-residue = "SIA"
            missing-atom-policy = "skip"

            [label]
            script = "label.pml"

            [label.render]
            base-color = "gray"
            width = 1000

            [[label.jobs]]
            structure = "2bat"
            sites = "sites/NA_NS.data"
            color = "orange"
            image = "NA_NS.png"
            rotations = [{ axis = "y", degrees = -75.0 }, { axis = "x", degrees = -35.0 }]

            [[label.jobs]]
            structure = "4hmg"
            sites = "sites/HA_NS.data"
            color = "orange"
            image = "HA_NS.png"
            segments = [{ chain = "A" }, { chain = "B", offset = 328 }]
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();

        let distances = config.distances.unwrap();
        assert_eq!(distances.chains, Some(vec!['A']));
        assert_eq!(distances.missing_atom_policy.as_deref(), Some("skip"));

        let label = config.label.unwrap();
        assert_eq!(label.jobs.len(), 2);
        assert_eq!(label.jobs[0].rotations.len(), 2);
        assert_eq!(
            label.jobs[1].segments,
            Some(vec![
                FileChainSegment {
                    chain: 'A',
                    offset: 0
                },
                FileChainSegment {
                    chain: 'B',
                    offset: 328
                },
            ])
        );
        assert_eq!(label.render.unwrap().width, Some(1000));
    }

    #[test]
    fn demo_configuration_parses() {
        let config: FileConfig =
            toml::from_str(include_str!("../../../../demos/resdist.toml")).unwrap();
        let label = config.label.unwrap();
        assert_eq!(label.jobs.len(), 6);
        assert!(
            label
                .jobs
                .iter()
                .all(|job| job.structure == "4hmg" || job.rotations.len() == 2)
        );
        assert_eq!(
            config.distances.unwrap().reference_residue.as_deref(),
            Some("SIA")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str("[distances]\nreference = \"SIA\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[distances\n").unwrap();

        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { .. }));
    }

    #[test]
    fn rotation_converts_with_axis_validation() {
        let ok = core_config::ViewRotation::try_from(FileRotation {
            axis: "y".to_string(),
            degrees: -75.0,
        })
        .unwrap();
        assert_eq!(ok.axis, core_config::Axis::Y);

        assert!(
            core_config::ViewRotation::try_from(FileRotation {
                axis: "q".to_string(),
                degrees: 1.0,
            })
            .is_err()
        );
    }
}
