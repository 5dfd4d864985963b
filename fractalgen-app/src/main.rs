mod app_dir;
mod batch;
mod cli;
mod error;
mod generate;
mod presets;
mod report;
mod xml;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use fractalgen_render::colormap_strip;

use cli::{Cli, Mode, TEST_STRIP_SIZE};
use error::AppError;
use presets::ColorMapRegistry;
use report::{write_report, BatchReport};

pub type Result<T> = std::result::Result<T, AppError>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let registry = ColorMapRegistry::load(cli.presets.as_deref(), &app_dir::preset_search_dirs())?;

    let report = match cli.mode() {
        Mode::ListPresets => {
            println!("Available preset names:");
            for name in registry.names() {
                println!("\t{name}");
            }
            return Ok(());
        }
        Mode::TestColorMap => {
            let colormap = registry.get(&cli.cmap)?;
            let strip = colormap_strip(colormap, TEST_STRIP_SIZE.width, TEST_STRIP_SIZE.height);
            generate::save_canvas(&strip, &cli.save, None)?;
            info!("Saved {} colormap strip to {}", cli.cmap, cli.save.display());
            return Ok(());
        }
        Mode::Batch(path) => batch::run_batch(path, cli.id.as_deref(), &registry)?,
        Mode::Single => {
            let job = cli.single_job(&registry)?;
            BatchReport {
                source: None,
                jobs: vec![generate::generate(&job)?],
            }
        }
    };

    println!("Total Iterations: {}", report.total_iterations());
    if let Some(path) = &cli.report {
        write_report(&report, path)?;
    }
    Ok(())
}
