use serde::{Deserialize, Serialize};

/// Portal login credentials, supplied by the caller and never mutated.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

/// Identifies the reservation to extract. The id is opaque to us; the
/// portal assigns it.
#[derive(Debug, Clone)]
pub struct ReservationQuery {
    pub reserve_id: String,
}

/// Everything a single run needs from the configuration layer.
#[derive(Debug, Clone)]
pub struct ScrapeInput {
    pub credentials: Credentials,
    pub query: ReservationQuery,
}

/// The extracted booking record. Field names serialize in camelCase to
/// match the portal's form-control names and the downstream contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    pub stylist_id: String,
    /// Canonical ISO date, YYYY-MM-DD.
    pub date: String,
    pub start_time: String,
    pub term: String,
}

/// Envelope pushed to the data sink; exactly one per successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub reservation: ReservationRecord,
}
