use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{Result, SlideshowError};

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    if !dir_path.exists() {
        return Err(SlideshowError::FolderNotFound(dir_path.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();
        // Sub-folders are never descended into
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        return Err(SlideshowError::NoImagesFound);
    }
    for path in &paths {
        debug!(image = %path.display(), "discovered image");
    }
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, name: &str) {
        fs::write(root.join(name), b"").unwrap();
    }

    #[test]
    fn test_filters_and_sorts_images() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "c.png");
        touch(dir.path(), "a.JPG");
        touch(dir.path(), "b.jpeg");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "clip.gif");
        touch(dir.path(), "noext");

        let paths = load_sorted_image_paths(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.jpeg", "c.png"]);
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "top.jpg");
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "deep.jpg");
        fs::create_dir(dir.path().join("folder.png")).unwrap();

        let paths = load_sorted_image_paths(dir.path()).unwrap();
        assert_eq!(paths, vec![dir.path().join("top.jpg")]);
    }

    #[test]
    fn test_missing_folder() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = load_sorted_image_paths(&missing).unwrap_err();
        assert!(matches!(err, SlideshowError::FolderNotFound(p) if p == missing));
    }

    #[test]
    fn test_folder_without_images() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "readme.md");
        let err = load_sorted_image_paths(dir.path()).unwrap_err();
        assert!(matches!(err, SlideshowError::NoImagesFound));
    }
}
