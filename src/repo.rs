//! Local git operations for sprint branches.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Runs git commands inside one working copy.
pub struct RepoManager {
    repo_path: PathBuf,
}

impl RepoManager {
    /// Creates a manager for the given working copy.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .current_dir(&self.repo_path)
            .args(args)
            .output()?;

        if !output.status.success() {
            return Err(Error::Git(format!(
                "git {} failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Creates and switches to a new branch.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.git(&["switch", "-c", name])?;
        Ok(())
    }

    /// Stages all changes.
    pub fn stage_all(&self) -> Result<()> {
        self.git(&["add", "."])?;
        Ok(())
    }

    /// Commits staged changes. Returns `None` when there was nothing to
    /// commit.
    pub fn commit(&self, message: &str) -> Result<Option<String>> {
        let status = self.git(&["status", "--porcelain"])?;
        if status.is_empty() {
            return Ok(None);
        }
        self.git(&["commit", "-m", message])?;
        Ok(Some(self.git(&["rev-parse", "HEAD"])?))
    }

    /// Pushes a branch, setting its upstream.
    pub fn push(&self, branch: &str) -> Result<()> {
        self.git(&["push", "-u", "origin", branch])?;
        Ok(())
    }

    /// Full sprint-branch sequence: new branch, stage everything, commit,
    /// push with upstream.
    pub fn prepare_sprint_branch(&self, branch: &str) -> Result<()> {
        self.create_branch(branch)?;
        self.stage_all()?;
        self.commit("test: prepare sprint")?;
        self.push(branch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        let run = |args: &[&str]| {
            Command::new("git")
                .current_dir(dir.path())
                .args(args)
                .output()
                .unwrap()
        };
        run(&["init", "-b", "main"]);
        run(&["config", "user.email", "test@test.com"]);
        run(&["config", "user.name", "Test"]);
        std::fs::write(dir.path().join("README.md"), "# Test\n").unwrap();
        run(&["add", "-A"]);
        run(&["commit", "-m", "Initial"]);
        dir
    }

    #[test]
    fn create_branch_switches_to_it() {
        let repo = init_repo();
        let manager = RepoManager::new(repo.path());
        manager.create_branch("test/add_login").unwrap();
        assert_eq!(manager.git(&["branch", "--show-current"]).unwrap(), "test/add_login");
    }

    #[test]
    fn commit_returns_hash_for_changes() {
        let repo = init_repo();
        let manager = RepoManager::new(repo.path());
        std::fs::write(repo.path().join("new.txt"), "content").unwrap();
        manager.stage_all().unwrap();
        let hash = manager.commit("test: prepare sprint").unwrap();
        assert!(hash.is_some());
    }

    #[test]
    fn commit_returns_none_when_clean() {
        let repo = init_repo();
        let manager = RepoManager::new(repo.path());
        assert!(manager.commit("noop").unwrap().is_none());
    }

    #[test]
    fn failing_command_reports_stderr() {
        let repo = init_repo();
        let manager = RepoManager::new(repo.path());
        let result = manager.git(&["switch", "does-not-exist"]);
        assert!(matches!(result, Err(Error::Git(_))));
    }
}
