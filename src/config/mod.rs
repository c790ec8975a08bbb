#[cfg(feature = "cli")]
pub mod cli;
pub mod local;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use local::LocalStorage;
