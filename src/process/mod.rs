pub mod runner;

pub use runner::{CommandOutput, Invocation, ProcessError, ProcessRunner, SystemRunner};
