//! Thumbnail discovery.

use std::path::PathBuf;

use crate::descriptor::DownloadDescriptor;

/// Conventional `<stem>.<ext>` thumbnail extensions, in probe order.
pub const THUMBNAIL_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Picks the best existing thumbnail.
///
/// Declared thumbnails are listed least preferred first, so the list is
/// walked from the end and the first path present on disk wins. Without a
/// usable declared entry, `<stem>.png`, `.jpg`, `.jpeg` and `.webp` are
/// probed in that order.
pub fn find_thumbnail(descriptor: &DownloadDescriptor) -> Option<PathBuf> {
    if let Some(declared) = descriptor
        .thumbnails
        .iter()
        .rev()
        .find(|thumb| thumb.path.is_file())
    {
        return Some(declared.path.clone());
    }

    let stem = descriptor.stem_path();
    let stem = stem.as_os_str().to_string_lossy();
    THUMBNAIL_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{}.{}", stem, ext)))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ThumbnailRef;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor(dir: &TempDir) -> DownloadDescriptor {
        DownloadDescriptor::new("abc123", dir.path().join("Title [abc123].mkv"))
    }

    #[test]
    fn test_last_existing_declared_thumbnail_wins() {
        let dir = TempDir::new().unwrap();
        let low = dir.path().join("low.jpg");
        let high = dir.path().join("high.webp");
        fs::write(&low, b"jpg").unwrap();
        fs::write(&high, b"webp").unwrap();

        let mut d = descriptor(&dir);
        d.thumbnails = vec![
            ThumbnailRef::new(&low),
            ThumbnailRef::new(&high),
            ThumbnailRef::new(dir.path().join("missing.png")),
        ];

        assert_eq!(find_thumbnail(&d), Some(high));
    }

    #[test]
    fn test_falls_back_to_stem_files_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Title [abc123].webp"), b"webp").unwrap();
        fs::write(dir.path().join("Title [abc123].jpg"), b"jpg").unwrap();

        let mut d = descriptor(&dir);
        d.thumbnails = vec![ThumbnailRef::new(dir.path().join("gone.png"))];

        assert_eq!(
            find_thumbnail(&d),
            Some(dir.path().join("Title [abc123].jpg"))
        );
    }

    #[test]
    fn test_no_thumbnail() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_thumbnail(&descriptor(&dir)), None);
    }
}
