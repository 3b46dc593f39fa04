use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod constants;
mod error;
mod image_loader;
mod kdenlive;
mod layout;
mod manifest;
mod slide;
mod timecode;
mod transition;

use crate::config::SlideshowConfig;
use crate::constants::TRANSITION_SECONDS;
use crate::image_loader::load_sorted_image_paths;
use crate::kdenlive::{KdenliveProject, SessionIds};
use crate::layout::Layout;
use crate::manifest::write_manifest;

/// Generate a Kdenlive slideshow project with crossfades from a folder of images.
#[derive(Parser, Debug)]
#[command(name = "kdenlive-slideshow", version)]
struct Cli {
    /// Folder containing .jpg, .jpeg or .png images
    image_folder: PathBuf,

    /// How long each image is shown, in seconds
    display_duration: String,

    /// Optional background audio file
    music_file: Option<PathBuf>,

    /// Crossfade length in seconds
    #[arg(long, default_value_t = TRANSITION_SECONDS)]
    transition: f64,

    /// Where the project and manifest are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Seed for transition styles and document ids
    #[arg(long)]
    seed: Option<u64>,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

/// Files produced by one run.
#[derive(Debug)]
struct Outputs {
    project: PathBuf,
    manifest: PathBuf,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: &Cli) -> Result<Outputs> {
    let config = SlideshowConfig::new(
        cli.image_folder.clone(),
        &cli.display_duration,
        cli.transition,
        cli.music_file.clone(),
        cli.output_dir.clone(),
        cli.seed,
    )?;

    // --- Discover images ---
    let image_paths = load_sorted_image_paths(&config.image_folder)?;
    info!(count = image_paths.len(), folder = %config.image_folder.display(), "found images");

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // --- Build the timeline ---
    let layout = Layout::compute(image_paths, config.timing, &mut rng)?;
    let session = SessionIds::generate(&mut rng);

    let mut project = KdenliveProject::new(&layout, &config.image_folder, session);
    match &config.music_file {
        Some(music) if music.exists() => {
            let music = music
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", music.display()))?;
            project = project.with_music(music);
        }
        Some(music) => warn!(music = %music.display(), "music file does not exist, skipping"),
        None => {}
    }

    // --- Write outputs ---
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let outputs = Outputs {
        project: config.project_path(&timestamp),
        manifest: config.manifest_path(&timestamp),
    };

    let file = File::create(&outputs.project)
        .with_context(|| format!("Failed to create {}", outputs.project.display()))?;
    project
        .write_to(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", outputs.project.display()))?;
    info!(path = %outputs.project.display(), "project file created");

    let file = File::create(&outputs.manifest)
        .with_context(|| format!("Failed to create {}", outputs.manifest.display()))?;
    write_manifest(BufWriter::new(file), &layout.slides, &config.display_duration)
        .with_context(|| format!("Failed to write {}", outputs.manifest.display()))?;
    info!(path = %outputs.manifest.display(), "manifest created");

    Ok(outputs)
}
