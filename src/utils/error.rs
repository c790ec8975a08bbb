use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Configuration error: missing required field: {field}")]
    MissingConfig { field: String },

    #[error("Configuration error: invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Browser launch failed: {reason}")]
    Launch { reason: String },

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Failed to open login page, title: {title}")]
    TitleMismatch { title: String },

    #[error("Failed to login, title: {title}")]
    LoginRejected { title: String },

    #[error("Failed to parse reservation date: {input:?}")]
    DateParse { input: String },

    #[error("Browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl ScrapeError {
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ScrapeError::MissingConfig { .. } | ScrapeError::InvalidConfigValue { .. }
        )
    }

    /// Process exit code for the CLI: config errors are distinguishable
    /// from runtime failures so callers can tell a bad invocation apart
    /// from a rejected login.
    pub fn exit_code(&self) -> i32 {
        if self.is_config() {
            2
        } else {
            1
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScrapeError::MissingConfig { .. } | ScrapeError::InvalidConfigValue { .. } => {
                "Check the command-line arguments; --user-id, --password and --reserve-id are required"
            }
            ScrapeError::Launch { .. } => {
                "Make sure Chrome or Chromium is installed and reachable on this host"
            }
            ScrapeError::Navigation { .. } => {
                "The portal may be slow or unreachable; check network/proxy settings and re-run"
            }
            ScrapeError::TitleMismatch { .. } => {
                "The login page did not look as expected; the portal may be in maintenance"
            }
            ScrapeError::LoginRejected { .. } => {
                "Verify the credentials; the portal may also be blocking automated sessions"
            }
            ScrapeError::DateParse { .. } => {
                "The reservation page layout may have changed; inspect the saved snapshots"
            }
            _ => "Re-run the session; if the problem persists, inspect the saved snapshots",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
