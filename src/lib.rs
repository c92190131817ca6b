pub mod config;
pub mod error;
pub mod files;
pub mod fixture;
pub mod git;
pub mod host;
pub mod logging;
pub mod process;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use files::PathKind;
pub use fixture::RepoFixtures;
pub use git::{Git, StatusEntry};
pub use host::{HostApi, HostLogger, MockHostApi, RepoDescriptor};
pub use process::{CommandOutput, Invocation, ProcessError, ProcessRunner, SystemRunner};
