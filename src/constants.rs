pub const FPS: u32 = 25;                         // Frames per second of the generated project
pub const TRANSITION_SECONDS: f64 = 1.0;         // Default crossfade length (seconds)
pub const IMAGE_TTL: u32 = 25;                   // Frames each image producer holds a decoded frame

pub const RENDER_WIDTH: u32 = 1920;              // Width of the project profile
pub const RENDER_HEIGHT: u32 = 1080;             // Height of the project profile
pub const PROFILE: &str = "atsc_1080p_25";
pub const PROFILE_DESCRIPTION: &str = "HD 1080p 25 fps";

pub const MLT_VERSION: &str = "7.32.0";
pub const KDENLIVE_VERSION: &str = "25.12.2";
pub const DOCUMENT_ID: &str = "1770905335333";

pub const ZERO_TIME: &str = "00:00:00.000";
pub const COLOR_LENGTH: &str = "2147483647";     // MLT "infinite" length for the background color

pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const MANIFEST_HEADER: &str = "image_path,duration in seconds,overlapping";
