pub mod bootstrap;
pub mod compose;
pub mod config;
pub mod env_file;
pub mod environment;
pub mod error;
pub mod git;
pub mod logging;
pub mod preflight;
pub mod profile;
pub mod runner;

// Re-export commonly used types
pub use bootstrap::{Bootstrap, RunOptions, RunReport};
pub use config::BootstrapConfig;
pub use environment::Environment;
pub use error::BootstrapError;
pub use profile::Profile;
pub use runner::{CommandRunner, CommandStatus, DryRunRunner, Invocation, SystemRunner};
