pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::LocalStorage;

pub use crate::core::date::normalize_display_date;
pub use crate::core::engine::ScrapeEngine;
pub use crate::core::policy::{NetworkPolicy, PolicyConfig};
pub use crate::utils::error::{Result, ScrapeError};
