use crate::cli::LabelArgs;
use crate::config::build_label_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use resdist::{engine::progress::ProgressReporter, workflows};
use tracing::info;

pub fn run(args: LabelArgs) -> Result<()> {
    info!("Loading labeling jobs from {:?}", &args.config);
    let config = build_label_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Generating script for {} image(s)...", config.jobs.len());
    let report = workflows::label::run(&config, &reporter)?;

    for image in &report.image_paths {
        info!("Script renders {}", image.display());
    }
    println!(
        "✓ Script written to: {} ({} sites). Render it with: pymol -cq {}",
        report.script_path.display(),
        report.site_count,
        report.script_path.display()
    );
    Ok(())
}
