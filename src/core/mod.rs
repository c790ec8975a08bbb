pub mod auth;
pub mod date;
pub mod engine;
pub mod extract;
pub mod policy;
pub mod session;
pub mod snapshot;

pub use crate::domain::model::{
    Credentials, ReservationQuery, ReservationRecord, RunOutput, ScrapeInput,
};
pub use crate::domain::ports::{ArtifactStore, ConfigProvider, DataSink};
pub use crate::utils::error::Result;
