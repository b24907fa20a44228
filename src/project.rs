//! Project scaffolding: directory layout for a new pilot project.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::artifact::slug;
use crate::error::Result;

/// Subdirectories every project gets, one per artifact kind.
const ARTIFACT_DIRS: &[&str] = &["sprints", "openapi", "pages/api", "components", "cypress/e2e"];

/// Details of an initialized project.
#[derive(Debug, Clone)]
pub struct ProjectData {
    /// Project name as given.
    pub project_name: String,
    /// Directory the project lives in.
    pub project_directory: PathBuf,
    /// Repository name, same as the project name.
    pub repo: String,
    /// SSH clone URL for the linked repository.
    pub git_repo: String,
}

/// Creates the project directory with the artifact tree pre-created and
/// returns its details. Existing directories are left untouched.
pub async fn initialize_project(
    projects_dir: &Path,
    name: &str,
    owner: &str,
) -> Result<ProjectData> {
    let project_directory = projects_dir.join(slug(name));
    for dir in ARTIFACT_DIRS {
        tokio::fs::create_dir_all(project_directory.join(dir)).await?;
    }
    info!(name, directory = %project_directory.display(), "initialized project");

    Ok(ProjectData {
        project_name: name.to_string(),
        project_directory,
        repo: name.to_string(),
        git_repo: format!("git@github.com:{owner}/{name}.git"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_artifact_tree() {
        let dir = TempDir::new().unwrap();
        let data = initialize_project(dir.path(), "My Shop", "octocat")
            .await
            .unwrap();

        assert_eq!(data.project_directory, dir.path().join("my_shop"));
        assert_eq!(data.repo, "My Shop");
        assert_eq!(data.git_repo, "git@github.com:octocat/My Shop.git");
        for sub in ARTIFACT_DIRS {
            assert!(data.project_directory.join(sub).is_dir(), "{sub} missing");
        }
    }

    #[tokio::test]
    async fn reinitializing_is_idempotent() {
        let dir = TempDir::new().unwrap();
        initialize_project(dir.path(), "shop", "octocat").await.unwrap();
        let again = initialize_project(dir.path(), "shop", "octocat").await;
        assert!(again.is_ok());
    }
}
