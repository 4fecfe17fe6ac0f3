use super::defaults::DefaultsConfig;
use super::file::{
    FileConfig, FileDistancesConfig, FileLabelConfig, FileLabelJob, FileRenderConfig,
};
use crate::cli::{DistancesArgs, LabelArgs};
use crate::error::{CliError, Result};
use resdist::engine::config::{self as core_config, ChainMap, RenderSettings};
use std::path::Path;

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn config_error(e: impl std::fmt::Display) -> CliError {
    CliError::Config(e.to_string())
}

/// Merges command-line arguments over the config file over built-in defaults.
pub fn build_distance_config(args: &DistancesArgs) -> Result<core_config::DistanceConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref())?;
    let file_config = apply_set_values(file_config, &args.set_values)?;
    let file = file_config.distances.unwrap_or_default();

    let structure_path = args.input.clone().or(file.structure).ok_or_else(|| {
        CliError::Config(
            "An input structure is required either via --input or `distances.structure`."
                .to_string(),
        )
    })?;
    let output_path = args.output.clone().or(file.output).ok_or_else(|| {
        CliError::Config(
            "An output path is required either via --output or `distances.output`.".to_string(),
        )
    })?;

    let chains = if args.chains.is_empty() {
        file.chains.unwrap_or_else(|| vec![defaults.chain])
    } else {
        args.chains.clone()
    };
    let missing_atom_policy: core_config::MissingAtomPolicy =
        match (args.missing_atom, file.missing_atom_policy) {
            (Some(arg), _) => arg.into(),
            (None, Some(value)) => value.parse().map_err(config_error)?,
            (None, None) => defaults.missing_atom_policy,
        };

    let mut builder = core_config::DistanceConfigBuilder::new()
        .structure_path(structure_path)
        .output_path(output_path)
        .chains(chains)
        .reference_residue_name(
            args.reference_residue
                .as_deref()
                .or(file.reference_residue.as_deref())
                .unwrap_or(&defaults.reference_residue),
        )
        .target_atom_name(
            args.target_atom
                .as_deref()
                .or(file.target_atom.as_deref())
                .unwrap_or(&defaults.target_atom),
        )
        .missing_atom_policy(missing_atom_policy);
    if let Some(chain) = args.reference_chain.or(file.reference_chain) {
        builder = builder.reference_chain(chain);
    }

    builder.build().map_err(config_error)
}

/// Builds the labeling batch from the config file, with render overrides from the command line.
pub fn build_label_config(args: &LabelArgs) -> Result<core_config::LabelConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(Some(&args.config))?;
    let file_config = apply_set_values(file_config, &args.set_values)?;
    let file = file_config.label.unwrap_or_default();

    if file.jobs.is_empty() {
        return Err(CliError::Config(format!(
            "No `[[label.jobs]]` entries found in {}.",
            args.config.display()
        )));
    }

    let shared = merge_render(&file, args, defaults.render);
    let jobs = file
        .jobs
        .iter()
        .map(|job| build_label_job(job, &shared))
        .collect::<Result<Vec<_>>>()?;

    Ok(core_config::LabelConfig {
        jobs,
        script_path: args
            .output
            .clone()
            .or(file.script)
            .unwrap_or(defaults.script_path),
    })
}

fn merge_render(
    file: &FileLabelConfig,
    args: &LabelArgs,
    defaults: RenderSettings,
) -> RenderSettings {
    let render = file.render.clone().unwrap_or_default();
    RenderSettings {
        background_color: render.background_color.unwrap_or(defaults.background_color),
        base_color: render.base_color.unwrap_or(defaults.base_color),
        displayed_chains: Vec::new(),
        rotations: Vec::new(),
        highlight_representation: render
            .representation
            .unwrap_or(defaults.highlight_representation),
        image_width: args.width.or(render.width).unwrap_or(defaults.image_width),
        image_dpi: args.dpi.or(render.dpi).unwrap_or(defaults.image_dpi),
        ray_trace: !args.no_ray && render.ray_trace.unwrap_or(defaults.ray_trace),
    }
}

fn build_label_job(job: &FileLabelJob, shared: &RenderSettings) -> Result<core_config::LabelJob> {
    let chain_map = match &job.segments {
        Some(segments) => ChainMap::new(segments.iter().cloned().map(Into::into).collect())
            .map_err(config_error)?,
        None => ChainMap::single(core_config::DEFAULT_CHAIN_ID),
    };
    let rotations = job
        .rotations
        .iter()
        .cloned()
        .map(core_config::ViewRotation::try_from)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(config_error)?;

    let render = RenderSettings {
        displayed_chains: job.displayed_chains.clone().unwrap_or_default(),
        rotations,
        ..shared.clone()
    };

    core_config::LabelJobBuilder::new()
        .structure_id(&job.structure)
        .site_list_path(job.sites.clone())
        .highlight_color(&job.color)
        .image_path(job.image.clone())
        .chain_map(chain_map)
        .render(render)
        .build()
        .map_err(|e| CliError::Config(format!("Label job for '{}': {}", job.structure, e)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let parse_char = || {
            let mut chars = value_str.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(CliError::Config(format!(
                    "Invalid chain identifier for {}: {}",
                    key, value_str
                ))),
            }
        };
        let parse_u32 = || {
            value_str.parse::<u32>().map_err(|_| {
                CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
            })
        };

        match key {
            "distances.reference-chain" => {
                distances(&mut config).reference_chain = Some(parse_char()?);
            }
            "distances.reference-residue" => {
                distances(&mut config).reference_residue = Some(value_str.to_string());
            }
            "distances.target-atom" => {
                distances(&mut config).target_atom = Some(value_str.to_string());
            }
            "distances.missing-atom-policy" => {
                distances(&mut config).missing_atom_policy = Some(value_str.to_string());
            }
            "label.render.background-color" => {
                render(&mut config).background_color = Some(value_str.to_string());
            }
            "label.render.base-color" => {
                render(&mut config).base_color = Some(value_str.to_string());
            }
            "label.render.representation" => {
                render(&mut config).representation = Some(value_str.to_string());
            }
            "label.render.width" => {
                render(&mut config).width = Some(parse_u32()?);
            }
            "label.render.dpi" => {
                render(&mut config).dpi = Some(parse_u32()?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn distances(config: &mut FileConfig) -> &mut FileDistancesConfig {
    config.distances.get_or_insert_with(Default::default)
}

fn render(config: &mut FileConfig) -> &mut FileRenderConfig {
    config
        .label
        .get_or_insert_with(Default::default)
        .render
        .get_or_insert_with(Default::default)
}
