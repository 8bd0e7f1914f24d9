//! Tests for the RealFileSystem directory walks

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use flowkit::infrastructure::traits::{FileSystem, RealFileSystem};

#[test]
fn given_nested_tree_when_walk_files_then_relative_sorted_files_only() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("b/inner")).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();
    fs::write(root.join("z.md"), "z").unwrap();
    fs::write(root.join("a.md"), "a").unwrap();
    fs::write(root.join("b/inner/c.md"), "c").unwrap();

    // Act
    let files = RealFileSystem.walk_files(root).unwrap();

    // Assert
    assert_eq!(
        files,
        vec![
            PathBuf::from("a.md"),
            PathBuf::from("b/inner/c.md"),
            PathBuf::from("z.md"),
        ]
    );
}

#[test]
fn given_missing_root_when_walk_files_then_error() {
    let temp = TempDir::new().unwrap();

    let result = RealFileSystem.walk_files(&temp.path().join("absent"));

    assert!(result.is_err());
}

#[test]
fn given_dir_with_subdirs_when_file_names_then_only_direct_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("_partials")).unwrap();
    fs::write(root.join("_partials/x.md"), "x").unwrap();
    fs::write(root.join("plan.prompt.md"), "p").unwrap();
    fs::write(root.join("analyze.prompt.md"), "a").unwrap();

    // Act
    let names = RealFileSystem.file_names(root).unwrap();

    // Assert
    assert_eq!(names, vec!["analyze.prompt.md", "plan.prompt.md"]);
}

#[test]
fn given_existing_destination_when_copy_then_replaced() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src.md");
    let dst = temp.path().join("dst.md");
    fs::write(&src, "new").unwrap();
    fs::write(&dst, "old content").unwrap();

    // Act
    RealFileSystem.copy(&src, &dst).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    assert!(src.exists());
}

#[cfg(unix)]
#[test]
fn given_symlinked_file_when_file_names_then_listed_like_walk_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let outside = temp.path().join("shared");
    let dir = temp.path().join("prompts");
    fs::create_dir_all(&outside).unwrap();
    fs::create_dir_all(&dir).unwrap();
    fs::write(outside.join("review.prompt.md"), "r").unwrap();
    fs::write(dir.join("plan.prompt.md"), "p").unwrap();
    std::os::unix::fs::symlink(outside.join("review.prompt.md"), dir.join("review.prompt.md"))
        .unwrap();

    // Act
    let names = RealFileSystem.file_names(&dir).unwrap();
    let walked = RealFileSystem.walk_files(&dir).unwrap();

    // Assert
    assert_eq!(names, vec!["plan.prompt.md", "review.prompt.md"]);
    assert_eq!(
        walked,
        vec![PathBuf::from("plan.prompt.md"), PathBuf::from("review.prompt.md")]
    );
}
