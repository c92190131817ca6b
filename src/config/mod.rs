pub mod settings;

pub use settings::{Config, ConfigError, FixtureConfig, GitConfig, LoggingConfig};
