use crate::error::{CheckError, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// One headless browser process plus one open tab. Dropping the session
/// terminates the browser process, so every exit path releases it, including
/// errors propagated with `?` before the scan completes.
pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession {
    pub fn launch() -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|err| CheckError::BrowserLaunch(err.to_string()))?;
        let browser =
            Browser::new(options).map_err(|err| CheckError::BrowserLaunch(err.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|err| CheckError::BrowserLaunch(err.to_string()))?;
        tab.set_default_timeout(DEFAULT_NAVIGATION_TIMEOUT);
        Ok(Self { browser, tab })
    }

    /// Navigates and blocks until the page is considered loaded, then sleeps
    /// `settle_delay`. The delay gives late-running client-side scripts a
    /// chance to finish mutating the DOM; it is a heuristic, not a guarantee,
    /// and a known source of flaky results on script-heavy pages.
    pub fn open(&self, url: &str, settle_delay: Duration) -> Result<()> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|err| CheckError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })?;

        if !settle_delay.is_zero() {
            thread::sleep(settle_delay);
        }
        Ok(())
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }
}
