use crate::core::io::sites::read_site_list_from_path;
use crate::engine::config::{ConfigError, LabelConfig};
use crate::engine::error::EngineError;
use crate::engine::labeling::{RenderCommand, build_commands, write_script};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct LabelReport {
    pub script_path: PathBuf,
    /// Images the script renders, in job order.
    pub image_paths: Vec<PathBuf>,
    pub site_count: usize,
}

/// Reads every job's site list and writes one script rendering all images.
///
/// All site lists are parsed before the script is created, so an invalid list
/// leaves no script behind.
#[instrument(skip_all, name = "label_workflow")]
pub fn run(config: &LabelConfig, reporter: &ProgressReporter) -> Result<LabelReport, EngineError> {
    if config.jobs.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "jobs",
            reason: "at least one labeling job is required".to_string(),
        }
        .into());
    }

    let (commands, site_count) = reporter.phase("Reading site lists", || {
        reporter.report(Progress::TaskStart {
            total_steps: config.jobs.len() as u64,
        });
        let mut commands: Vec<RenderCommand> = Vec::new();
        let mut site_count = 0;
        for job in &config.jobs {
            let sites = read_site_list_from_path(&job.site_list_path)
                .map_err(|e| EngineError::from_site_list(job.site_list_path.clone(), e))?;
            debug!(
                "Read {} sites from {}.",
                sites.len(),
                job.site_list_path.display()
            );
            site_count += sites.len();
            commands.extend(build_commands(job, &sites));
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        Ok::<_, EngineError>((commands, site_count))
    })?;

    reporter.phase("Writing script", || {
        let output_error = |source: io::Error| EngineError::OutputWrite {
            path: config.script_path.clone(),
            source,
        };
        let file = File::create(&config.script_path).map_err(output_error)?;
        write_script(&commands, BufWriter::new(file)).map_err(output_error)
    })?;
    info!(
        "Wrote {} commands for {} images to {}.",
        commands.len(),
        config.jobs.len(),
        config.script_path.display()
    );
    reporter.message(format!(
        "Wrote {} ({} images, {} sites)",
        config.script_path.display(),
        config.jobs.len(),
        site_count
    ));

    Ok(LabelReport {
        script_path: config.script_path.clone(),
        image_paths: config.jobs.iter().map(|j| j.image_path.clone()).collect(),
        site_count,
    })
}
