//! Test harness for canopy integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// A temporary directory holding a minimal tsconfig.json.
    pub fn new() -> Self {
        let project = Self::bare();
        project.add_file("tsconfig.json", "{\n  \"compilerOptions\": {}\n}\n");
        project
    }

    /// A temporary directory with no project configuration.
    pub fn bare() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }
}

pub fn run_canopy(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_canopy");
    let output = Command::new(binary)
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run canopy");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let project = TestProject::new();
        assert!(project.path().exists());
        assert!(project.path().join("tsconfig.json").exists());
    }

    #[test]
    fn test_harness_bare_has_no_config() {
        let project = TestProject::bare();
        assert!(!project.path().join("tsconfig.json").exists());
    }

    #[test]
    fn test_harness_add_file() {
        let project = TestProject::new();
        let file_path = project.add_file("src/index.ts", "export const x = 1;\n");
        assert!(file_path.exists());
    }
}
