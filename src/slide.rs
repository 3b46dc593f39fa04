use std::path::PathBuf;

/// One image placed on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub index: usize,

    pub path: PathBuf,     // As discovered, written to the manifest
    pub resource: PathBuf, // Absolute path, written to the project

    pub track: usize,
    pub start_frame: u64,
    pub end_frame: u64,
}

impl Slide {
    pub fn producer_id(&self) -> String {
        format!("producer{}", self.index)
    }

    pub fn length(&self) -> u64 {
        self.end_frame - self.start_frame
    }
}
