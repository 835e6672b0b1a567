use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::storefront::Storefront;

/// A listing page as served, after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: Url,
    pub html: String,
}

/// Issues the single GET a scrape needs. No retries.
pub struct Fetcher {
    client: Client,
    base_url: Option<Url>,
}

impl Fetcher {
    /// Both stores refuse the default library user agent with a 403.
    pub const USER_AGENT: &str = "Ultron v1.0.1337";

    pub fn new(base_url: Option<Url>) -> Result<Self> {
        let client = Client::builder().user_agent(Self::USER_AGENT).build()?;
        Ok(Self { client, base_url })
    }

    pub fn fetch(&self, storefront: Storefront, config: &ScrapeConfig) -> Result<FetchedPage> {
        let url = storefront.listing_url(self.base_url.as_ref(), &config.app_id, &config.locale)?;
        debug!(url = url.as_str(), "requesting listing page");

        let mut request = self.client.get(url);
        for (name, value) in storefront.request_headers(&config.locale) {
            request = request.header(name, value);
        }

        let response = request.send()?;
        let status = response.status();
        debug!(status = status.as_u16(), "listing page answered");
        if !status.is_success() {
            return Err(ScrapeError::Http(status.as_u16()));
        }

        let url = response.url().clone();
        // decoded with the charset the response declares
        let html = response.text()?;
        debug!(bytes = html.len(), "listing page read");

        Ok(FetchedPage { url, html })
    }
}
