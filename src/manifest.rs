use std::borrow::Cow;
use std::io::Write;

use crate::constants::MANIFEST_HEADER;
use crate::error::Result;
use crate::slide::Slide;

/// Writes the CSV manifest: one row per slide with the duration exactly as the user typed it.
pub fn write_manifest<W: Write>(mut out: W, slides: &[Slide], display_duration: &str) -> Result<()> {
    writeln!(out, "{}", MANIFEST_HEADER)?;
    for slide in slides {
        let path = slide.path.display().to_string();
        writeln!(out, "{},{},1", csv_field(&path), csv_field(display_duration))?;
    }
    out.flush()?;
    Ok(())
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
