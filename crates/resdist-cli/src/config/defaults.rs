use resdist::core::models::atom::ALPHA_CARBON_ATOM_NAME;
use resdist::engine::config::{
    DEFAULT_CHAIN_ID, DEFAULT_REFERENCE_RESIDUE_NAME, MissingAtomPolicy, RenderSettings,
};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub chain: char,
    pub reference_residue: String,
    pub target_atom: String,
    pub missing_atom_policy: MissingAtomPolicy,
    pub render: RenderSettings,
    pub script_path: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chain: DEFAULT_CHAIN_ID,
            reference_residue: DEFAULT_REFERENCE_RESIDUE_NAME.to_string(),
            target_atom: ALPHA_CARBON_ATOM_NAME.to_string(),
            missing_atom_policy: MissingAtomPolicy::Fail,
            render: RenderSettings::default(),
            script_path: PathBuf::from("label.pml"),
        }
    }
}
