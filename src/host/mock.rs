use crate::error::Result;
use crate::host::{HostApi, HostLogger, RepoDescriptor};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Error,
    Plain,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Debug => write!(f, "[debug] {}", self.message),
            LogLevel::Error => write!(f, "[error] {}", self.message),
            LogLevel::Plain => write!(f, "{}", self.message),
        }
    }
}

/// Logger that prints to the console and keeps every entry in memory
#[derive(Debug, Default)]
pub struct ConsoleLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries recorded so far, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, level: LogLevel, message: &str) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            message: message.to_string(),
        };

        match level {
            LogLevel::Error => eprintln!("{}", entry),
            _ => println!("{}", entry),
        }

        // A panic elsewhere while holding the lock must not lose entries
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

impl HostLogger for ConsoleLogger {
    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn error(&self, message: &str) {
        self.record(LogLevel::Error, message);
    }

    fn log(&self, message: &str) {
        self.record(LogLevel::Plain, message);
    }
}

/// In-memory stand-in for the host application
///
/// The project mapping is fixed at construction.
#[derive(Debug, Default)]
pub struct MockHostApi {
    logger: ConsoleLogger,
    repos: HashMap<String, RepoDescriptor>,
}

impl MockHostApi {
    pub fn new(repos: HashMap<String, RepoDescriptor>) -> Self {
        Self {
            logger: ConsoleLogger::new(),
            repos,
        }
    }

    /// Build the mapping from a JSON object keyed by project name
    pub fn from_json(json: &str) -> Result<Self> {
        let repos: HashMap<String, RepoDescriptor> = serde_json::from_str(json)?;
        Ok(Self::new(repos))
    }

    pub fn console(&self) -> &ConsoleLogger {
        &self.logger
    }
}

#[async_trait]
impl HostApi for MockHostApi {
    fn logger(&self) -> &dyn HostLogger {
        &self.logger
    }

    async fn get_repo_for_project(&self, project: &str) -> Option<RepoDescriptor> {
        self.repos.get(project).cloned()
    }

    async fn register_task(&self) {}
}
