use crate::core::session::Session;
use crate::domain::ports::ArtifactStore;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use tracing::warn;

/// Best-effort screenshot + HTML capture for postmortem debugging.
/// Failures are logged and swallowed so broken diagnostics can never
/// mask a correct run.
pub async fn save_snapshot<A: ArtifactStore>(session: &Session, artifacts: &A, key: &str) {
    match session
        .page()
        .screenshot(
            ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Png)
                .full_page(true)
                .build(),
        )
        .await
    {
        Ok(png) => {
            if let Err(e) = artifacts.save(key, "png", &png).await {
                warn!(key, error = %e, "failed to store screenshot");
            }
        }
        Err(e) => warn!(key, error = %e, "failed to capture screenshot"),
    }

    match session.page().content().await {
        Ok(html) => {
            if let Err(e) = artifacts.save(key, "html", html.as_bytes()).await {
                warn!(key, error = %e, "failed to store page html");
            }
        }
        Err(e) => warn!(key, error = %e, "failed to capture page html"),
    }
}
