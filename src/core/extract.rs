//! Reads the four reservation fields from the edit page.

use crate::core::auth::Authenticated;
use crate::core::date::normalize_display_date;
use crate::core::session::Session;
use crate::core::snapshot::save_snapshot;
use crate::domain::model::{ReservationQuery, ReservationRecord};
use crate::domain::ports::ArtifactStore;
use crate::utils::error::Result;
use url::Url;

pub const RESERVE_CHANGE_URL: &str =
    "https://salonboard.com/CLP/bt/reserve/net/instantReserveChange/";

const RESERVE_SNAPSHOT_KEY: &str = "extReserveChange";

const STYLIST_INPUT: &str = "stylistId";
const DATE_INPUT: &str = "dispDateFrom";
const TIME_INPUT: &str = "rsvTime";
const TERM_INPUT: &str = "rsvTerm";

pub struct ReservationExtractor<'a, A: ArtifactStore> {
    session: &'a Session,
    artifacts: &'a A,
}

impl<'a, A: ArtifactStore> ReservationExtractor<'a, A> {
    pub fn new(session: &'a Session, artifacts: &'a A) -> Self {
        Self { session, artifacts }
    }

    /// Navigate to the reservation edit page and read the record. Needs
    /// an [`Authenticated`] proof from the login flow.
    pub async fn extract(
        &self,
        _auth: &Authenticated,
        query: &ReservationQuery,
    ) -> Result<ReservationRecord> {
        let url = build_reservation_url(&query.reserve_id)?;
        self.session.goto(url.as_str()).await?;

        save_snapshot(self.session, self.artifacts, RESERVE_SNAPSHOT_KEY).await;

        // The four reads are independent of each other; all depend only
        // on the completed navigation above. A missing non-date control
        // reads as "".
        let (stylist_id, display_date, start_time, term) = tokio::try_join!(
            self.session.input_value(STYLIST_INPUT),
            self.session.input_value(DATE_INPUT),
            self.session.input_value(TIME_INPUT),
            self.session.input_value(TERM_INPUT),
        )?;

        // An absent or unreadable date fails here with fewer than three
        // digit groups.
        let date = normalize_display_date(&display_date)?;

        Ok(ReservationRecord {
            stylist_id,
            date,
            start_time,
            term,
        })
    }
}

/// Build the edit-page URL with `reserveId` encoded exactly once.
pub fn build_reservation_url(reserve_id: &str) -> Result<Url> {
    let mut url = Url::parse(RESERVE_CHANGE_URL)?;
    url.query_pairs_mut().append_pair("reserveId", reserve_id);
    Ok(url)
}
