use std::path::{Path, PathBuf};

use crate::constants::FPS;
use crate::error::{Result, SlideshowError};
use crate::layout::Timing;

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct SlideshowConfig {
    pub image_folder: PathBuf,
    pub display_duration: String, // Trimmed literal as typed, reused in the manifest
    pub timing: Timing,
    pub music_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
}

impl SlideshowConfig {
    pub fn new(
        image_folder: PathBuf,
        display_duration: &str,
        transition_seconds: f64,
        music_file: Option<PathBuf>,
        output_dir: PathBuf,
        seed: Option<u64>,
    ) -> Result<Self> {
        let display_duration = display_duration.trim();
        let display_seconds: f64 = display_duration
            .parse()
            .map_err(|_| SlideshowError::InvalidDuration(display_duration.to_string()))?;
        let timing = Timing::new(display_seconds, transition_seconds, FPS)?;

        Ok(Self {
            image_folder,
            display_duration: display_duration.to_string(),
            timing,
            music_file,
            output_dir,
            seed,
        })
    }

    /// Final component of the image folder, used in output file names.
    pub fn folder_name(&self) -> String {
        folder_name(&self.image_folder)
    }

    pub fn project_path(&self, timestamp: &str) -> PathBuf {
        self.output_dir
            .join(format!("slideshow_with_music_{}_{}.kdenlive", self.folder_name(), timestamp))
    }

    pub fn manifest_path(&self, timestamp: &str) -> PathBuf {
        self.output_dir
            .join(format!("slideshow_{}_{}.csv", self.folder_name(), timestamp))
    }
}

fn folder_name(folder: &Path) -> String {
    if let Some(name) = folder.file_name() {
        return name.to_string_lossy().into_owned();
    }
    // "." or "..": fall back to the directory it points at
    folder
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default()
}
