use crate::core::auth::AuthenticationFlow;
use crate::core::extract::ReservationExtractor;
use crate::core::policy::{NetworkPolicy, PolicyConfig};
use crate::core::session::{default_header_overrides, Session};
use crate::domain::model::{ReservationRecord, RunOutput, ScrapeInput};
use crate::domain::ports::{ArtifactStore, ConfigProvider, DataSink};
use crate::utils::error::Result;
use tracing::{info, warn};

/// Drives one full run: session up, policy on, login, extract, output.
/// Generic over its ports so the phases can be exercised with in-memory
/// implementations.
pub struct ScrapeEngine<C: ConfigProvider, A: ArtifactStore, D: DataSink> {
    config: C,
    artifacts: A,
    sink: D,
}

impl<C: ConfigProvider, A: ArtifactStore, D: DataSink> ScrapeEngine<C, A, D> {
    pub fn new(config: C, artifacts: A, sink: D) -> Self {
        Self {
            config,
            artifacts,
            sink,
        }
    }

    pub async fn run(&self, input: &ScrapeInput) -> Result<RunOutput> {
        info!("Starting scrape run");

        let policy = NetworkPolicy::new(
            PolicyConfig::default().with_extra_domains(self.config.extra_block_domains()),
        );

        let mut session =
            Session::launch(self.config.proxy_url(), default_header_overrides()).await?;

        // From here the session is released exactly once on every exit
        // path: the outcome of every phase, policy install included, is
        // held until close has run, then propagated.
        let outcome = match session.install_network_policy(policy).await {
            Ok(()) => self.drive(&session, input).await,
            Err(e) => Err(e),
        };
        session.close().await;
        let record = outcome?;

        let output = RunOutput {
            reservation: record,
        };
        self.sink.push(&output).await?;

        info!("Reservation record extracted");
        Ok(output)
    }

    async fn drive(&self, session: &Session, input: &ScrapeInput) -> Result<ReservationRecord> {
        let mut flow = AuthenticationFlow::new(session, &self.artifacts);
        let proof = match flow.run(&input.credentials).await {
            Ok(proof) => proof,
            Err(e) => {
                warn!(state = ?flow.state(), "login flow did not reach the authenticated state");
                return Err(e);
            }
        };
        info!("Authenticated");

        let extractor = ReservationExtractor::new(session, &self.artifacts);
        extractor.extract(&proof, &input.query).await
    }
}
