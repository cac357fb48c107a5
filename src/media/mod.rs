//! Video file listing and selection.
//!
//! The selection logic is pure so it can be driven either by the interactive
//! menu or programmatically in tests. "No selection" is expressed as `None`
//! rather than an error; the interactive layer reports it and returns to idle.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported video file extensions (audio will be extracted).
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Check if path has a supported video extension.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List video files directly under `dir`, sorted by filename.
///
/// Only immediate entries are considered; subdirectories are not walked.
/// Errors surface the underlying IO failure (missing directory, permission)
/// so the caller can report it as a no-selection condition.
pub fn list_video_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_video_file(p))
        .collect();

    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    debug!("Found {} video files in {}", files.len(), dir.display());
    Ok(files)
}

/// Resolve a user selection against a listed set of video files.
///
/// Accepts either a 1-based index into `files`, or a literal filename or
/// relative path resolved against `dir`. A literal path is accepted even when
/// its extension is not in the video list, as long as it exists. Returns
/// `None` on empty input, an out-of-range index, or a non-existent literal.
pub fn resolve_selection(dir: &Path, files: &[PathBuf], input: &str) -> Option<PathBuf> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(index) = input.parse::<usize>() {
        if index >= 1 && index <= files.len() {
            return Some(files[index - 1].clone());
        }
        return None;
    }

    let candidate = dir.join(input);
    if candidate.exists() {
        Some(candidate)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("session.mp4")));
        assert!(is_video_file(Path::new("session.MOV")));
        assert!(is_video_file(Path::new("/path/to/session.avi")));
        assert!(!is_video_file(Path::new("session.mkv")));
        assert!(!is_video_file(Path::new("notes.txt")));
        assert!(!is_video_file(Path::new("noextension")));
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.mp4")).unwrap();
        File::create(dir.path().join("a.MOV")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        std::fs::create_dir(dir.path().join("clips.mp4")).unwrap();

        let files = list_video_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.MOV", "b.mp4"]);
    }

    #[test]
    fn test_list_missing_directory_errors() {
        assert!(list_video_files(Path::new("/no/such/directory")).is_err());
    }

    #[test]
    fn test_list_no_matches_is_empty() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        assert!(list_video_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_by_index() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("b.mp4")).unwrap();
        let files = list_video_files(dir.path()).unwrap();

        assert_eq!(
            resolve_selection(dir.path(), &files, "1"),
            Some(files[0].clone())
        );
        assert_eq!(
            resolve_selection(dir.path(), &files, "2"),
            Some(files[1].clone())
        );
        assert_eq!(resolve_selection(dir.path(), &files, "0"), None);
        assert_eq!(resolve_selection(dir.path(), &files, "3"), None);
    }

    #[test]
    fn test_resolve_by_literal_name() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("session.mkv")).unwrap();
        let files = list_video_files(dir.path()).unwrap();

        // Literal names resolve even when the extension is not listed.
        assert_eq!(
            resolve_selection(dir.path(), &files, "session.mkv"),
            Some(dir.path().join("session.mkv"))
        );
        assert_eq!(resolve_selection(dir.path(), &files, "missing.mp4"), None);
    }

    #[test]
    fn test_resolve_empty_input() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        let files = list_video_files(dir.path()).unwrap();

        assert_eq!(resolve_selection(dir.path(), &files, ""), None);
        assert_eq!(resolve_selection(dir.path(), &files, "   "), None);
    }
}
