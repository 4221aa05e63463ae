use super::fakes::paths;
use convertor::core::list_convertible_files;
use std::fs;

#[test]
fn test_listing_hides_reserved_names_and_folders() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.png", "A.wav", "ffmpeg", "ffprobe.exe", "yt-dlp.exe", "convertor", "c.jpg"] {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    let paths = paths(dir.path(), true);

    let names: Vec<String> = list_convertible_files(&paths.install_dir, &paths.denylist())
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();

    // Downloads/ and tools/ are folders, never candidates
    assert_eq!(names, vec!["A.wav", "b.png", "c.jpg"]);
}

#[test]
fn test_entries_carry_sizes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("clip.mp3"), vec![0u8; 2048]).unwrap();
    let paths = paths(dir.path(), false);

    let entries = list_convertible_files(&paths.install_dir, &paths.denylist()).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].size, 2048);
    assert_eq!(entries[0].path, dir.path().join("clip.mp3"));
}

#[test]
fn test_unreadable_folder_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone");

    assert!(list_convertible_files(&missing, &[]).is_err());
}
