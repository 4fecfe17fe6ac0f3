use crate::core::models::atom::ALPHA_CARBON_ATOM_NAME;
use crate::core::utils::pymol::{is_known_color, is_known_representation};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CHAIN_ID: char = 'A';
pub const DEFAULT_REFERENCE_RESIDUE_NAME: &str = "SIA";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// What to do with an amino-acid residue that lacks the target atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingAtomPolicy {
    /// Abort the whole run.
    #[default]
    Fail,
    /// Log a warning and leave the residue out of the table; no index is consumed.
    Skip,
}

impl FromStr for MissingAtomPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(MissingAtomPolicy::Fail),
            "skip" => Ok(MissingAtomPolicy::Skip),
            other => Err(ConfigError::InvalidValue {
                field: "missing-atom-policy",
                reason: format!("expected 'fail' or 'skip', got '{}'", other),
            }),
        }
    }
}

/// Which residues to measure and what to measure them against.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSelection {
    /// Chains to tabulate, in output order.
    pub chains: Vec<char>,
    /// Chain searched for the reference residue.
    pub reference_chain: char,
    /// Categorical name of the reference residue (e.g., "SIA").
    pub reference_residue_name: String,
    /// Atom of each amino acid the distance is measured to.
    pub target_atom_name: String,
    pub missing_atom_policy: MissingAtomPolicy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceConfig {
    pub structure_path: PathBuf,
    pub output_path: PathBuf,
    pub selection: DistanceSelection,
}

#[derive(Default)]
pub struct DistanceConfigBuilder {
    structure_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    chains: Option<Vec<char>>,
    reference_chain: Option<char>,
    reference_residue_name: Option<String>,
    target_atom_name: Option<String>,
    missing_atom_policy: Option<MissingAtomPolicy>,
}

impl DistanceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_path(mut self, path: PathBuf) -> Self {
        self.structure_path = Some(path);
        self
    }
    pub fn output_path(mut self, path: PathBuf) -> Self {
        self.output_path = Some(path);
        self
    }
    pub fn chains(mut self, chains: Vec<char>) -> Self {
        self.chains = Some(chains);
        self
    }
    pub fn reference_chain(mut self, chain: char) -> Self {
        self.reference_chain = Some(chain);
        self
    }
    pub fn reference_residue_name(mut self, name: &str) -> Self {
        self.reference_residue_name = Some(name.to_string());
        self
    }
    pub fn target_atom_name(mut self, name: &str) -> Self {
        self.target_atom_name = Some(name.to_string());
        self
    }
    pub fn missing_atom_policy(mut self, policy: MissingAtomPolicy) -> Self {
        self.missing_atom_policy = Some(policy);
        self
    }

    /// Builds the configuration.
    ///
    /// Chains default to `['A']`, the reference chain defaults to the first
    /// tabulated chain, the reference residue to `SIA` and the target atom to `CA`.
    pub fn build(self) -> Result<DistanceConfig, ConfigError> {
        let chains = self.chains.unwrap_or_else(|| vec![DEFAULT_CHAIN_ID]);
        if chains.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "chains",
                reason: "at least one chain is required".to_string(),
            });
        }
        let mut seen = HashSet::new();
        if let Some(dup) = chains.iter().find(|c| !seen.insert(**c)) {
            return Err(ConfigError::InvalidValue {
                field: "chains",
                reason: format!("chain '{}' is listed more than once", dup),
            });
        }

        let reference_chain = self.reference_chain.unwrap_or(chains[0]);
        let reference_residue_name = self
            .reference_residue_name
            .unwrap_or_else(|| DEFAULT_REFERENCE_RESIDUE_NAME.to_string());
        if reference_residue_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reference-residue",
                reason: "name must not be empty".to_string(),
            });
        }
        let target_atom_name = self
            .target_atom_name
            .unwrap_or_else(|| ALPHA_CARBON_ATOM_NAME.to_string());

        Ok(DistanceConfig {
            structure_path: self
                .structure_path
                .ok_or(ConfigError::MissingParameter("structure_path"))?,
            output_path: self
                .output_path
                .ok_or(ConfigError::MissingParameter("output_path"))?,
            selection: DistanceSelection {
                chains,
                reference_chain,
                reference_residue_name: reference_residue_name.trim().to_string(),
                target_atom_name,
                missing_atom_policy: self.missing_atom_policy.unwrap_or_default(),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl FromStr for Axis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(ConfigError::InvalidValue {
                field: "axis",
                reason: format!("expected 'x', 'y' or 'z', got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// A camera rotation applied before the image is exported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRotation {
    pub axis: Axis,
    pub degrees: f64,
}

/// Residue numbers above `offset` belong to `chain_id`, renumbered from `offset + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSegment {
    pub chain_id: char,
    pub offset: isize,
}

/// Maps site numbers from a concatenated numbering onto per-chain numbering.
///
/// Segments are kept sorted by offset. The segment with the smallest offset is
/// the base: it receives every residue not claimed by a higher segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainMap {
    segments: Vec<ChainSegment>,
}

impl ChainMap {
    pub fn new(mut segments: Vec<ChainSegment>) -> Result<Self, ConfigError> {
        if segments.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "chain-segments",
                reason: "at least one segment is required".to_string(),
            });
        }
        segments.sort_by_key(|s| s.offset);
        if let Some(pair) = segments.windows(2).find(|w| w[0].offset == w[1].offset) {
            return Err(ConfigError::InvalidValue {
                field: "chain-segments",
                reason: format!(
                    "chains '{}' and '{}' share offset {}",
                    pair[0].chain_id, pair[1].chain_id, pair[0].offset
                ),
            });
        }
        Ok(Self { segments })
    }

    /// A single chain with no renumbering.
    pub fn single(chain_id: char) -> Self {
        Self {
            segments: vec![ChainSegment {
                chain_id,
                offset: 0,
            }],
        }
    }

    /// Resolves a site number to `(chain, residue number within that chain)`.
    pub fn locate(&self, residue_number: isize) -> (char, isize) {
        let segment = self
            .segments
            .iter()
            .rev()
            .find(|s| residue_number > s.offset)
            .unwrap_or(&self.segments[0]);
        (segment.chain_id, residue_number - segment.offset)
    }

    /// Distinct chain IDs in offset order.
    pub fn chain_ids(&self) -> Vec<char> {
        let mut ids = Vec::new();
        for segment in &self.segments {
            if !ids.contains(&segment.chain_id) {
                ids.push(segment.chain_id);
            }
        }
        ids
    }
}

/// Scene settings shared by every image of a labeling job.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub background_color: String,
    pub base_color: String,
    /// Chains shown as cartoon; empty means the chains of the job's chain map.
    pub displayed_chains: Vec<char>,
    pub rotations: Vec<ViewRotation>,
    pub highlight_representation: String,
    pub image_width: u32,
    pub image_dpi: u32,
    pub ray_trace: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            base_color: "gray".to_string(),
            displayed_chains: Vec::new(),
            rotations: Vec::new(),
            highlight_representation: "spheres".to_string(),
            image_width: 1000,
            image_dpi: 200,
            ray_trace: true,
        }
    }
}

/// One image to produce: a structure with the sites of one site list highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelJob {
    pub structure_id: String,
    pub site_list_path: PathBuf,
    pub highlight_color: String,
    pub image_path: PathBuf,
    pub chain_map: ChainMap,
    pub render: RenderSettings,
}

#[derive(Default)]
pub struct LabelJobBuilder {
    structure_id: Option<String>,
    site_list_path: Option<PathBuf>,
    highlight_color: Option<String>,
    image_path: Option<PathBuf>,
    chain_map: Option<ChainMap>,
    render: Option<RenderSettings>,
}

impl LabelJobBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_id(mut self, id: &str) -> Self {
        self.structure_id = Some(id.to_string());
        self
    }
    pub fn site_list_path(mut self, path: PathBuf) -> Self {
        self.site_list_path = Some(path);
        self
    }
    pub fn highlight_color(mut self, color: &str) -> Self {
        self.highlight_color = Some(color.to_string());
        self
    }
    pub fn image_path(mut self, path: PathBuf) -> Self {
        self.image_path = Some(path);
        self
    }
    pub fn chain_map(mut self, map: ChainMap) -> Self {
        self.chain_map = Some(map);
        self
    }
    pub fn render(mut self, settings: RenderSettings) -> Self {
        self.render = Some(settings);
        self
    }

    pub fn build(self) -> Result<LabelJob, ConfigError> {
        let structure_id = self
            .structure_id
            .ok_or(ConfigError::MissingParameter("structure_id"))?;
        if structure_id.trim().is_empty() || structure_id.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "structure-id",
                reason: format!("'{}' is not a valid structure identifier", structure_id),
            });
        }
        let highlight_color = self
            .highlight_color
            .ok_or(ConfigError::MissingParameter("highlight_color"))?;
        let chain_map = self
            .chain_map
            .unwrap_or_else(|| ChainMap::single(DEFAULT_CHAIN_ID));
        let mut render = self.render.unwrap_or_default();
        if render.displayed_chains.is_empty() {
            render.displayed_chains = chain_map.chain_ids();
        }

        check_color("highlight-color", &highlight_color)?;
        check_color("background-color", &render.background_color)?;
        check_color("base-color", &render.base_color)?;
        if !is_known_representation(&render.highlight_representation) {
            return Err(ConfigError::InvalidValue {
                field: "representation",
                reason: format!("unknown representation '{}'", render.highlight_representation),
            });
        }
        if render.image_width == 0 || render.image_dpi == 0 {
            return Err(ConfigError::InvalidValue {
                field: "image",
                reason: "width and dpi must be positive".to_string(),
            });
        }

        Ok(LabelJob {
            structure_id,
            site_list_path: self
                .site_list_path
                .ok_or(ConfigError::MissingParameter("site_list_path"))?,
            highlight_color,
            image_path: self
                .image_path
                .ok_or(ConfigError::MissingParameter("image_path"))?,
            chain_map,
            render,
        })
    }
}

fn check_color(field: &'static str, color: &str) -> Result<(), ConfigError> {
    if is_known_color(color) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            reason: format!("unknown color '{}'", color),
        })
    }
}

/// A batch of labeling jobs written into one command script.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelConfig {
    pub jobs: Vec<LabelJob>,
    pub script_path: PathBuf,
}
