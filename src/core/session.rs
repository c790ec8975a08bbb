//! Browser session lifecycle and CDP plumbing.
//!
//! A [`Session`] owns exactly one headless Chrome process and one page.
//! It is created once per run and must be closed exactly once on every
//! exit path; the engine enforces that. Request interception is wired
//! here so the pure [`NetworkPolicy`] stays free of browser types.

use crate::core::policy::{Decision, NetworkPolicy, RequestDescriptor};
use crate::utils::error::{Result, ScrapeError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams,
};
use chromiumoxide::cdp::browser_protocol::network::{
    ErrorReason, Headers, ResourceType, SetExtraHttpHeadersParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The portal rejects sessions advertising the HeadlessChrome
/// client-hint brand, so the default override blanks `sec-ch-ua`.
pub fn default_header_overrides() -> serde_json::Value {
    serde_json::json!({ "sec-ch-ua": "" })
}

pub struct Session {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    policy_task: Option<JoinHandle<()>>,
}

impl Session {
    /// Start a headless browser and open the single page this run will
    /// use. Header overrides are applied before any navigation.
    pub async fn launch(
        proxy_url: Option<&str>,
        header_overrides: serde_json::Value,
    ) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .window_size(1280, 720);

        if let Some(proxy) = proxy_url {
            info!(proxy, "using upstream proxy");
            builder = builder.arg(format!("--proxy-server={}", proxy));
        }

        let config = builder
            .build()
            .map_err(|reason| ScrapeError::Launch { reason })?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ScrapeError::Launch {
                reason: e.to_string(),
            }
        })?;

        // The handler task pumps CDP messages for the whole session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler event loop ended");
                    break;
                }
            }
        });

        // The browser process is already running; any failure from here
        // on must release it before returning.
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                abort_launch(browser, handler_task).await;
                return Err(ScrapeError::Launch {
                    reason: e.to_string(),
                });
            }
        };

        if let Err(e) = page
            .execute(SetExtraHttpHeadersParams::new(Headers::new(
                header_overrides,
            )))
            .await
        {
            abort_launch(browser, handler_task).await;
            return Err(ScrapeError::Launch {
                reason: e.to_string(),
            });
        }

        info!("browser session started");

        Ok(Self {
            browser,
            page,
            handler_task,
            policy_task: None,
        })
    }

    /// Attach the per-request decision function. Must run before the
    /// first navigation so no request escapes the policy.
    pub async fn install_network_policy(&mut self, policy: NetworkPolicy) -> Result<()> {
        // Listener first, then enable: a request paused between the two
        // would otherwise hang unanswered.
        let mut request_events = self.page.event_listener::<EventRequestPaused>().await?;
        self.page.execute(EnableParams::default()).await?;

        let page = self.page.clone();

        let task = tokio::spawn(async move {
            while let Some(event) = request_events.next().await {
                let descriptor = descriptor_for(&event.request.url, &event.resource_type);
                let outcome = match policy.decide(&descriptor) {
                    Decision::Allow => page
                        .execute(ContinueRequestParams::new(event.request_id.clone()))
                        .await
                        .map(|_| ()),
                    Decision::Deny => {
                        debug!(
                            host = %descriptor.hostname,
                            kind = %descriptor.resource_type,
                            "blocking request"
                        );
                        page.execute(FailRequestParams::new(
                            event.request_id.clone(),
                            ErrorReason::BlockedByClient,
                        ))
                        .await
                        .map(|_| ())
                    }
                };
                if let Err(e) = outcome {
                    debug!(error = %e, "failed to answer intercepted request");
                }
            }
        });

        self.policy_task = Some(task);
        Ok(())
    }

    pub async fn goto_with_timeout(&self, url: &str, timeout: Duration) -> Result<()> {
        info!("opening {}", url);
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: format!("timed out after {}s", timeout.as_secs()),
            }),
        }
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("opening {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    pub async fn title(&self) -> Result<String> {
        Ok(self.page.get_title().await?.unwrap_or_default())
    }

    pub async fn fill(&self, selector: &str, text: &str) -> Result<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Click a control and wait for the navigation it triggers. The
    /// wait is armed together with the click; arming it after the click
    /// could miss a navigation that completes first.
    pub async fn click_and_wait_for_navigation(&self, selector: &str) -> Result<()> {
        let element = self.page.find_element(selector).await?;
        let (nav, click) = tokio::join!(self.page.wait_for_navigation(), element.click());
        nav?;
        click?;
        Ok(())
    }

    /// Read the value of a named form control. A missing control reads
    /// as the empty string; whether that is fatal is the caller's call.
    pub async fn input_value(&self, name: &str) -> Result<String> {
        let expression = format!(
            "(() => {{ const el = document.querySelector(\"[name='{}']\"); return el ? el.value : ''; }})()",
            name
        );
        let value = self.page.evaluate(expression).await?.into_value::<String>()?;
        Ok(value)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Release the page and browser process. Consumes the session so
    /// nothing can touch the page afterwards.
    pub async fn close(mut self) {
        if let Some(task) = self.policy_task.take() {
            task.abort();
        }
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "error closing browser");
        }
        self.handler_task.abort();
        info!("browser session closed");
    }
}

/// Release a half-launched browser when session setup fails partway.
async fn abort_launch(mut browser: Browser, handler_task: JoinHandle<()>) {
    if let Err(e) = browser.close().await {
        warn!(error = %e, "error closing browser after failed session setup");
    }
    handler_task.abort();
}

fn resource_type_name(resource_type: &ResourceType) -> &'static str {
    match resource_type {
        ResourceType::Document => "document",
        ResourceType::Stylesheet => "stylesheet",
        ResourceType::Image => "image",
        ResourceType::Media => "media",
        ResourceType::Font => "font",
        ResourceType::Script => "script",
        ResourceType::Xhr => "xhr",
        ResourceType::Fetch => "fetch",
        ResourceType::WebSocket => "websocket",
        _ => "other",
    }
}

fn descriptor_for(url_str: &str, resource_type: &ResourceType) -> RequestDescriptor {
    let hostname = url::Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_default();
    RequestDescriptor {
        hostname,
        resource_type: resource_type_name(resource_type).to_string(),
    }
}
