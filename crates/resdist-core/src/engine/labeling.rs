use super::config::{Axis, LabelJob};
use crate::core::io::sites::Site;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

/// A single line of a PyMOL command script.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Comment(String),
    Fetch { structure_id: String },
    HideEverything,
    BackgroundColor(String),
    TransparentBackground,
    ShowChains { representation: String, chains: Vec<char> },
    ColorChains { color: String, chains: Vec<char> },
    Rotate { axis: Axis, degrees: f64 },
    ColorResidue { color: String, residue_number: isize, chain_id: char },
    ShowResidue { representation: String, residue_number: isize, chain_id: char },
    ExportPng { path: PathBuf, width: u32, dpi: u32, ray: bool },
    Reinitialize,
}

struct ChainSelection<'a>(&'a [char]);

impl fmt::Display for ChainSelection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("chain ")?;
        for (i, chain) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", chain)?;
        }
        Ok(())
    }
}

impl fmt::Display for RenderCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCommand::Comment(text) => write!(f, "# {}", text),
            RenderCommand::Fetch { structure_id } => write!(f, "fetch {}, async=0", structure_id),
            RenderCommand::HideEverything => f.write_str("hide everything"),
            RenderCommand::BackgroundColor(color) => write!(f, "bg_color {}", color),
            RenderCommand::TransparentBackground => f.write_str("set ray_opaque_background, 0"),
            RenderCommand::ShowChains {
                representation,
                chains,
            } => write!(f, "show {}, {}", representation, ChainSelection(chains)),
            RenderCommand::ColorChains { color, chains } => {
                write!(f, "color {}, {}", color, ChainSelection(chains))
            }
            RenderCommand::Rotate { axis, degrees } => write!(f, "rotate {}, {}", axis, degrees),
            RenderCommand::ColorResidue {
                color,
                residue_number,
                chain_id,
            } => write!(
                f,
                "color {}, resi {} and chain {}",
                color, residue_number, chain_id
            ),
            RenderCommand::ShowResidue {
                representation,
                residue_number,
                chain_id,
            } => write!(
                f,
                "show {}, resi {} and chain {}",
                representation, residue_number, chain_id
            ),
            RenderCommand::ExportPng {
                path,
                width,
                dpi,
                ray,
            } => write!(
                f,
                "png {}, width={}, dpi={}, ray={}",
                path.display(),
                width,
                dpi,
                u8::from(*ray)
            ),
            RenderCommand::Reinitialize => f.write_str("reinitialize"),
        }
    }
}

/// Builds the command sequence that renders one labeled image.
///
/// Each site is remapped through the job's chain map before being colored.
/// The sequence ends with `reinitialize`, so consecutive jobs start from an
/// empty session.
pub fn build_commands(job: &LabelJob, sites: &[Site]) -> Vec<RenderCommand> {
    let render = &job.render;
    let mut commands = vec![
        RenderCommand::Comment(format!(
            "{} <- {}",
            job.structure_id,
            job.site_list_path.display()
        )),
        RenderCommand::Fetch {
            structure_id: job.structure_id.clone(),
        },
        RenderCommand::HideEverything,
        RenderCommand::BackgroundColor(render.background_color.clone()),
        RenderCommand::TransparentBackground,
        RenderCommand::ShowChains {
            representation: "cartoon".to_string(),
            chains: render.displayed_chains.clone(),
        },
        RenderCommand::ColorChains {
            color: render.base_color.clone(),
            chains: render.displayed_chains.clone(),
        },
    ];

    commands.extend(render.rotations.iter().map(|rotation| RenderCommand::Rotate {
        axis: rotation.axis,
        degrees: rotation.degrees,
    }));

    for site in sites {
        let (chain_id, residue_number) = job.chain_map.locate(site.residue_number);
        debug!(
            "Site {} (line {}) -> residue {} of chain '{}'.",
            site.residue_number, site.line, residue_number, chain_id
        );
        commands.push(RenderCommand::ColorResidue {
            color: job.highlight_color.clone(),
            residue_number,
            chain_id,
        });
        commands.push(RenderCommand::ShowResidue {
            representation: render.highlight_representation.clone(),
            residue_number,
            chain_id,
        });
    }

    commands.push(RenderCommand::ExportPng {
        path: job.image_path.clone(),
        width: render.image_width,
        dpi: render.image_dpi,
        ray: render.ray_trace,
    });
    commands.push(RenderCommand::Reinitialize);
    commands
}

/// Writes commands one per line.
pub fn write_script<W: Write>(commands: &[RenderCommand], mut writer: W) -> io::Result<()> {
    for command in commands {
        writeln!(writer, "{}", command)?;
    }
    writer.flush()
}
