pub mod mock;

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use mock::{ConsoleLogger, LogEntry, LogLevel, MockHostApi};

/// Logging sink supplied by the host
pub trait HostLogger: Send + Sync {
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
    /// Plain log line without a severity tag
    fn log(&self, message: &str);
}

/// Repository a host project is backed by
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

impl RepoDescriptor {
    pub fn new(kind: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            url: url.into(),
        }
    }
}

/// Integration point of the host application
#[async_trait]
pub trait HostApi: Send + Sync {
    fn logger(&self) -> &dyn HostLogger;

    async fn get_repo_for_project(&self, project: &str) -> Option<RepoDescriptor>;

    async fn register_task(&self);
}

/// Look up the repository URL of `project`, requiring its type to be
/// `expected_kind`
///
/// Unknown projects yield `Ok(None)`; a descriptor of another type is an
/// assertion failure.
pub async fn require_repo_url<H: HostApi + ?Sized>(
    host: &H,
    project: &str,
    expected_kind: &str,
) -> Result<Option<String>> {
    let Some(repo) = host.get_repo_for_project(project).await else {
        return Ok(None);
    };

    if repo.kind != expected_kind {
        return Err(Error::Assertion(format!(
            "project '{}' has repository type '{}', expected '{}'",
            project, repo.kind, expected_kind
        )));
    }

    Ok(Some(repo.url))
}
