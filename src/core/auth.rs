//! The login state machine.
//!
//! Login progress is validated at each navigation boundary by checking
//! the page title exactly; the portal renders distinct titles for the
//! login form and the authenticated home. Any rejection is terminal for
//! the run — retry is a whole-run decision left to the caller.

use crate::core::session::Session;
use crate::core::snapshot::save_snapshot;
use crate::domain::model::Credentials;
use crate::domain::ports::ArtifactStore;
use crate::utils::error::{Result, ScrapeError};
use std::time::Duration;
use tracing::{debug, info};

pub const LOGIN_URL: &str = "https://salonboard.com/login/";
pub const LOGIN_PAGE_TITLE: &str = "ログイン：SALON BOARD";
pub const HOME_TITLE: &str = "SALON BOARD : TOP";

const LOGIN_NAV_TIMEOUT: Duration = Duration::from_secs(30);
const USER_ID_INPUT: &str = "[name='userId']";
const PASSWORD_INPUT: &str = "[name='password']";
const LOGIN_BUTTON: &str = ".loginBtnWrap > a";
const LOGIN_SNAPSHOT_KEY: &str = "login-result";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Init,
    LoginPageLoaded,
    CredentialsFilled,
    SubmittedWaitingNav,
    Authenticated,
    Failed,
}

/// Proof that the flow reached its success state. Only this module can
/// construct one, so an extraction attempted before authentication is
/// unrepresentable rather than a runtime hazard.
#[derive(Debug)]
pub struct Authenticated(());

pub struct AuthenticationFlow<'a, A: ArtifactStore> {
    session: &'a Session,
    artifacts: &'a A,
    state: AuthState,
}

impl<'a, A: ArtifactStore> AuthenticationFlow<'a, A> {
    pub fn new(session: &'a Session, artifacts: &'a A) -> Self {
        Self {
            session,
            artifacts,
            state: AuthState::Init,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    /// Drive the machine from `Init` to `Authenticated`.
    pub async fn run(&mut self, credentials: &Credentials) -> Result<Authenticated> {
        match self.advance(credentials).await {
            Ok(proof) => Ok(proof),
            Err(e) => {
                self.transition(AuthState::Failed);
                Err(e)
            }
        }
    }

    async fn advance(&mut self, credentials: &Credentials) -> Result<Authenticated> {
        self.open_login_page().await?;
        self.fill_credentials(credentials).await?;
        self.submit().await?;
        self.confirm_home().await?;

        // Postmortem snapshot; never gates the authenticated state.
        save_snapshot(self.session, self.artifacts, LOGIN_SNAPSHOT_KEY).await;

        Ok(Authenticated(()))
    }

    async fn open_login_page(&mut self) -> Result<()> {
        self.session
            .goto_with_timeout(LOGIN_URL, LOGIN_NAV_TIMEOUT)
            .await?;
        let title = self.session.title().await?;
        check_login_title(&title)?;
        self.transition(AuthState::LoginPageLoaded);
        Ok(())
    }

    async fn fill_credentials(&mut self, credentials: &Credentials) -> Result<()> {
        self.session.fill(USER_ID_INPUT, &credentials.user_id).await?;
        self.session
            .fill(PASSWORD_INPUT, &credentials.password)
            .await?;
        self.transition(AuthState::CredentialsFilled);
        Ok(())
    }

    async fn submit(&mut self) -> Result<()> {
        info!("submitting login form");
        self.transition(AuthState::SubmittedWaitingNav);
        self.session.click_and_wait_for_navigation(LOGIN_BUTTON).await
    }

    async fn confirm_home(&mut self) -> Result<()> {
        let title = self.session.title().await?;
        check_home_title(&title)?;
        self.transition(AuthState::Authenticated);
        Ok(())
    }

    fn transition(&mut self, next: AuthState) {
        debug!(from = ?self.state, to = ?next, "auth state transition");
        self.state = next;
    }
}

fn check_login_title(title: &str) -> Result<()> {
    if title == LOGIN_PAGE_TITLE {
        Ok(())
    } else {
        Err(ScrapeError::TitleMismatch {
            title: title.to_string(),
        })
    }
}

fn check_home_title(title: &str) -> Result<()> {
    if title == HOME_TITLE {
        Ok(())
    } else {
        Err(ScrapeError::LoginRejected {
            title: title.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_login_title_advances() {
        assert!(check_login_title("ログイン：SALON BOARD").is_ok());
    }

    #[test]
    fn test_other_login_title_is_mismatch_carrying_title() {
        let err = check_login_title("メンテナンス中").unwrap_err();
        match err {
            ScrapeError::TitleMismatch { title } => assert_eq!(title, "メンテナンス中"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_near_miss_login_title_rejected() {
        // Half-width colon is not the portal's title.
        assert!(check_login_title("ログイン:SALON BOARD").is_err());
        assert!(check_login_title("").is_err());
    }

    #[test]
    fn test_exact_home_title_authenticates() {
        assert!(check_home_title("SALON BOARD : TOP").is_ok());
    }

    #[test]
    fn test_other_home_title_is_login_rejection_carrying_title() {
        let err = check_home_title("ログイン：SALON BOARD").unwrap_err();
        match err {
            ScrapeError::LoginRejected { title } => {
                assert_eq!(title, "ログイン：SALON BOARD")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
