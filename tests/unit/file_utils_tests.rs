/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use scrollcast::file_utils::FileManager;
use std::path::Path;

use crate::common;

/// Test output path generation
#[test]
fn test_generate_output_path_withStemAndExtension_shouldJoinOutputDir() {
    let path = FileManager::generate_output_path("/texts/poem.txt", "/out", "ass");
    assert_eq!(path, Path::new("/out/poem.ass"));

    let path = FileManager::generate_output_path("poem.txt", "out", ".timeline.json");
    assert_eq!(path, Path::new("out/poem.timeline.json"));
}

/// Test finding files by extension, recursively and case-insensitively
#[test]
fn test_find_files_withNestedDirs_shouldReturnSortedMatches() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_file(root, "b.txt", "b")?;
    common::create_test_file(root, "a.TXT", "a")?;
    common::create_test_file(root, "nested/c.txt", "c")?;
    common::create_test_file(root, "skip.ass", "x")?;

    let files = FileManager::find_files(root, "txt")?;

    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.TXT", "b.txt", "nested/c.txt"]);
    Ok(())
}

/// Test writing creates parent directories and reading returns the content
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("deep/er/file.ass");

    FileManager::write_to_file(&path, "content")?;

    assert!(FileManager::file_exists(&path));
    assert!(FileManager::dir_exists(temp_dir.path().join("deep/er")));
    assert_eq!(FileManager::read_to_string(&path)?, "content");
    Ok(())
}

/// Test reading a missing file reports the path
#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    let result = FileManager::read_to_string("/definitely/not/here.txt");

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("here.txt"));
}
