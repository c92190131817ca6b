use crate::config::GitConfig;
use crate::error::Result;
use crate::git::status::{self, StatusEntry};
use crate::process::{Invocation, ProcessRunner, SystemRunner};
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Named git operations on top of a [`ProcessRunner`]
///
/// Each method builds one fixed argument vector and hands it to the runner.
/// Working directories must already exist; nothing here creates them.
/// Failures are the runner's errors, passed through unchanged.
#[derive(Debug, Clone)]
pub struct Git<R: ProcessRunner = SystemRunner> {
    runner: R,
    binary: String,
    default_branch: String,
}

impl Default for Git<SystemRunner> {
    fn default() -> Self {
        Self::with_runner(SystemRunner::new())
    }
}

impl Git<SystemRunner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: ProcessRunner> Git<R> {
    pub fn with_runner(runner: R) -> Self {
        Self::with_config(runner, &GitConfig::default())
    }

    pub fn with_config(runner: R, config: &GitConfig) -> Self {
        Self {
            runner,
            binary: config.binary.clone(),
            default_branch: config.default_branch.clone(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn default_branch(&self) -> &str {
        &self.default_branch
    }

    /// Run `git <args>` in `path`, returning stdout
    pub async fn execute<I, S>(&self, path: impl AsRef<Path>, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let invocation = Invocation::new(self.binary.as_str())
            .args(args)
            .current_dir(path);
        let output = self.runner.run(&invocation).await?;
        Ok(output.stdout)
    }

    /// `git --version`, trimmed
    pub async fn version(&self) -> Result<String> {
        let invocation = Invocation::new(self.binary.as_str()).arg("--version");
        let output = self.runner.run(&invocation).await?;
        Ok(output.stdout.trim().to_string())
    }

    pub async fn init(&self, path: impl AsRef<Path>) -> Result<String> {
        self.execute(path, ["init"]).await
    }

    /// `git init -b <branch>`
    pub async fn init_with_branch(&self, path: impl AsRef<Path>, branch: &str) -> Result<String> {
        self.execute(path, ["init", "-b", branch]).await
    }

    pub async fn init_bare(&self, path: impl AsRef<Path>) -> Result<String> {
        self.execute(path, ["init", "--bare"]).await
    }

    /// Clone `url` into `dest`, resolved relative to `cwd`
    ///
    /// Without a branch the configured default branch is checked out. Paths
    /// reach git byte for byte, UTF-8 or not.
    pub async fn clone_repo(
        &self,
        url: impl AsRef<OsStr>,
        dest: impl AsRef<Path>,
        cwd: impl AsRef<Path>,
        branch: Option<&str>,
    ) -> Result<String> {
        let branch = branch.unwrap_or(&self.default_branch);
        let args: [&OsStr; 6] = [
            "clone".as_ref(),
            "--progress".as_ref(),
            "-b".as_ref(),
            branch.as_ref(),
            url.as_ref(),
            dest.as_ref().as_os_str(),
        ];
        self.execute(cwd, args).await
    }

    pub async fn set_config(
        &self,
        path: impl AsRef<Path>,
        key: &str,
        value: &str,
    ) -> Result<String> {
        self.execute(path, ["config", "--local", key, value]).await
    }

    /// Set `user.email`, then `user.name`
    pub async fn set_user(&self, path: impl AsRef<Path>, email: &str, name: &str) -> Result<()> {
        let path = path.as_ref();
        self.set_config(path, "user.email", email).await?;
        self.set_config(path, "user.name", name).await?;
        Ok(())
    }

    pub async fn add(&self, path: impl AsRef<Path>, file: &str) -> Result<String> {
        self.execute(path, ["add", file]).await
    }

    /// Stage several files with a single `git add -- <files...>`
    pub async fn add_all<I, S>(&self, path: impl AsRef<Path>, files: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = [OsString::from("add"), OsString::from("--")]
            .into_iter()
            .chain(files.into_iter().map(|file| file.as_ref().to_os_string()));
        self.execute(path, args).await
    }

    pub async fn commit(&self, path: impl AsRef<Path>, message: &str) -> Result<String> {
        self.execute(path, ["commit", "-m", message]).await
    }

    pub async fn commit_all(&self, path: impl AsRef<Path>, message: &str) -> Result<String> {
        self.execute(path, ["commit", "-am", message]).await
    }

    /// Raw `git status --porcelain=v2 [file]` output
    pub async fn status(&self, path: impl AsRef<Path>, file: Option<&str>) -> Result<String> {
        let mut args = vec!["status", "--porcelain=v2"];
        args.extend(file);
        self.execute(path, args).await
    }

    /// [`Git::status`], parsed
    pub async fn status_entries(
        &self,
        path: impl AsRef<Path>,
        file: Option<&str>,
    ) -> Result<Vec<StatusEntry>> {
        let output = self.status(path, file).await?;
        Ok(status::parse_status_porcelain_v2(&output))
    }

    pub async fn add_remote(
        &self,
        path: impl AsRef<Path>,
        name: &str,
        url: impl AsRef<OsStr>,
    ) -> Result<String> {
        let args: [&OsStr; 4] = ["remote".as_ref(), "add".as_ref(), name.as_ref(), url.as_ref()];
        self.execute(path, args).await
    }

    /// `git push <remote>`, defaulting to `origin`
    pub async fn push(&self, path: impl AsRef<Path>, remote: Option<&str>) -> Result<String> {
        self.execute(path, ["push", remote.unwrap_or("origin")]).await
    }

    /// Register `remote_name` and push `local_branch` to `remote_branch` on it
    pub async fn push_branch_to_new_remote(
        &self,
        path: impl AsRef<Path>,
        local_branch: &str,
        remote_branch: &str,
        remote_name: &str,
        remote_url: impl AsRef<OsStr>,
    ) -> Result<String> {
        let path = path.as_ref();
        self.add_remote(path, remote_name, remote_url).await?;
        let refspec = format!("{}:{}", local_branch, remote_branch);
        self.execute(path, ["push", remote_name, refspec.as_str()]).await
    }
}
