use reqwest::header::{ACCEPT_LANGUAGE, HeaderName};
use url::Url;

use crate::error::{Result, ScrapeError};

/// Present on every real Windows Store listing; its content is the app name.
pub(crate) const WINDOWS_STORE_MARKER: &str = r#"meta[name="ms.prod"]"#;

/// The app stores a listing can be scraped from.
///
/// Everything that differs between stores lives here: where the listing
/// page is, which headers the store insists on, and how it signals an
/// unknown app. Field anchors are in [`crate::extract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storefront {
    GooglePlay,
    WindowsStore,
}

impl Storefront {
    pub fn program_name(&self) -> &'static str {
        match self {
            Storefront::GooglePlay => "googleplay_scraper",
            Storefront::WindowsStore => "windowsstore_scraper",
        }
    }

    pub fn about(&self) -> &'static str {
        match self {
            Storefront::GooglePlay => {
                "Fetches basic app information from Google Play and prints it \
                 as text or as JSON for piping into other programs"
            }
            Storefront::WindowsStore => {
                "Fetches basic app information from Windows Store and prints it \
                 as text or as JSON for piping into other programs"
            }
        }
    }

    pub fn locale_note(&self) -> &'static str {
        match self {
            Storefront::GooglePlay => "Accepted locale codes are according to ISO 639-1",
            Storefront::WindowsStore => {
                "Usable locale values: http://msdn.microsoft.com/en-us/library/ee825488.aspx"
            }
        }
    }

    pub fn default_base(&self) -> &'static str {
        match self {
            Storefront::GooglePlay => "https://play.google.com",
            Storefront::WindowsStore => "http://apps.microsoft.com",
        }
    }

    /// Builds the listing page URL for `app_id`, optionally on another host.
    pub fn listing_url(&self, base: Option<&Url>, app_id: &str, locale: &str) -> Result<Url> {
        let mut url = match base {
            Some(base) => base.clone(),
            None => Url::parse(self.default_base())
                .map_err(|err| ScrapeError::Argument(err.to_string()))?,
        };

        let locale = locale.to_lowercase();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ScrapeError::Argument("base URL cannot carry a path".to_string())
            })?;
            segments.pop_if_empty();
            match self {
                Storefront::GooglePlay => {
                    segments.extend(["store", "apps", "details"]);
                }
                Storefront::WindowsStore => {
                    segments.extend(["windows", locale.as_str(), "app", app_id]);
                }
            }
        }

        if *self == Storefront::GooglePlay {
            url.query_pairs_mut()
                .append_pair("id", app_id)
                .append_pair("hl", &locale);
        }

        Ok(url)
    }

    /// Headers sent on top of the user agent.
    pub fn request_headers(&self, locale: &str) -> Vec<(HeaderName, String)> {
        match self {
            Storefront::GooglePlay => Vec::new(),
            Storefront::WindowsStore => vec![(ACCEPT_LANGUAGE, locale.to_string())],
        }
    }

    /// Windows Store answers 200 for unknown ids, so a listing is only
    /// real when this `<meta>` element is present.
    pub fn listing_marker(&self) -> Option<&'static str> {
        match self {
            Storefront::GooglePlay => None,
            Storefront::WindowsStore => Some(WINDOWS_STORE_MARKER),
        }
    }
}
