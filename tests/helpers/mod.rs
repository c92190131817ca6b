#![allow(dead_code)]

use gitkit::Git;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Helper to create an empty directory that is removed with the guard
pub fn temp_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().to_path_buf();
    (temp_dir, path)
}

/// Helper to create a test git repository with an identity configured
pub async fn create_test_repo(git: &Git) -> (TempDir, PathBuf) {
    let (temp_dir, repo_path) = temp_dir();

    git.init(&repo_path).await.expect("Failed to init git repo");
    git.set_user(&repo_path, "test@example.com", "Test User")
        .await
        .expect("Failed to configure identity");

    (temp_dir, repo_path)
}

/// Helper to list the files git tracks on HEAD, bypassing gitkit
pub fn tracked_files(repo_path: &PathBuf) -> Vec<String> {
    let output = Command::new("git")
        .args(["ls-tree", "--name-only", "HEAD"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git ls-tree");

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Helper to read the subject of the HEAD commit, bypassing gitkit
pub fn head_subject(repo_path: &PathBuf) -> String {
    let output = Command::new("git")
        .args(["log", "-1", "--format=%s"])
        .current_dir(repo_path)
        .output()
        .expect("Failed to run git log");

    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
