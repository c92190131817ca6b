//! Throwaway repositories for tests
//!
//! [`RepoFixtures`] composes the git facade and the file helpers into
//! ready-made working repositories and multi-branch bare repositories.

use crate::config::FixtureConfig;
use crate::error::Result;
use crate::files::{join_path, new_temp_dir_with_prefix, write_file};
use crate::git::Git;
use crate::process::ProcessRunner;
use futures::future::try_join_all;
use futures::{StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};

const REMOTE_NAME: &str = "origin";

/// Builds repositories through a borrowed [`Git`]
pub struct RepoFixtures<'a, R: ProcessRunner> {
    git: &'a Git<R>,
    config: FixtureConfig,
}

impl<'a, R: ProcessRunner> RepoFixtures<'a, R> {
    pub fn new(git: &'a Git<R>) -> Self {
        Self::with_config(git, FixtureConfig::default())
    }

    pub fn with_config(git: &'a Git<R>, config: FixtureConfig) -> Self {
        Self { git, config }
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Initialize a repository in the existing directory `path` holding
    /// `files` (name -> content) in a single commit
    ///
    /// The repository accepts pushes to its checked-out branch. All files
    /// are written before any of them is staged.
    pub async fn create_simple_repo<I, K, V>(
        &self,
        path: impl AsRef<Path>,
        files: I,
    ) -> Result<PathBuf>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = path.as_ref();
        let files: Vec<(String, String)> = files
            .into_iter()
            .map(|(name, content)| (name.as_ref().to_string(), content.as_ref().to_string()))
            .collect();

        self.git
            .init_with_branch(path, self.git.default_branch())
            .await?;
        self.git
            .set_config(path, "receive.denyCurrentBranch", "updateInstead")
            .await?;

        try_join_all(files.iter().map(|(name, content)| async move {
            write_file(join_path(path, name), content).await
        }))
        .await?;

        if !files.is_empty() {
            self.git
                .add_all(path, files.iter().map(|(name, _)| name.as_str()))
                .await?;
        }

        self.git
            .set_user(path, &self.config.user_email, &self.config.user_name)
            .await?;
        self.git
            .commit_all(path, &self.config.commit_message)
            .await?;

        tracing::debug!(path = %path.display(), files = files.len(), "created simple repository");
        Ok(path.to_path_buf())
    }

    /// Initialize a bare repository at `path` with one branch per entry of
    /// `files_by_branch` (branch -> name -> content)
    ///
    /// Every branch is built in its own fresh temp directory and pushed as
    /// the target branch. Branches are built concurrently, at most
    /// `max_concurrent_branches` at a time. The temp directories are left
    /// behind.
    pub async fn create_simple_bare_repo_with_branches<B, N, F, K, V>(
        &self,
        path: impl AsRef<Path>,
        files_by_branch: B,
    ) -> Result<PathBuf>
    where
        B: IntoIterator<Item = (N, F)>,
        N: AsRef<str>,
        F: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let path = path.as_ref();
        self.git.init_bare(path).await?;
        let url = std::path::absolute(path)?;

        let jobs = files_by_branch.into_iter().map(|(branch, files)| {
            let branch = branch.as_ref().to_string();
            let files: Vec<(String, String)> = files
                .into_iter()
                .map(|(name, content)| (name.as_ref().to_string(), content.as_ref().to_string()))
                .collect();
            let url = url.as_path();
            async move { self.build_branch(&branch, files, url).await }
        });

        futures::stream::iter(jobs)
            .buffer_unordered(self.config.max_concurrent_branches.max(1))
            .try_collect::<Vec<()>>()
            .await?;

        Ok(path.to_path_buf())
    }

    async fn build_branch(
        &self,
        branch: &str,
        files: Vec<(String, String)>,
        url: &Path,
    ) -> Result<()> {
        let work_dir = new_temp_dir_with_prefix(&self.config.temp_prefix)?;
        self.create_simple_repo(&work_dir, files).await?;
        let local_branch = self.git.default_branch();
        self.git
            .push_branch_to_new_remote(&work_dir, local_branch, branch, REMOTE_NAME, url)
            .await?;

        tracing::debug!(branch, work_dir = %work_dir.display(), "pushed fixture branch");
        Ok(())
    }
}
