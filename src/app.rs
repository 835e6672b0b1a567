use std::ffi::OsString;
use std::io::Write;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{self, Invocation, OutputEncoding, OutputFormat, ScrapeConfig};
use crate::error::Result;
use crate::extract::{self, AppListing};
use crate::fetch::Fetcher;
use crate::render;
use crate::storefront::Storefront;

/// Logs go to stderr so stdout stays clean for piping. `RUST_LOG` overrides
/// the default `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Fetches and extracts one listing.
pub fn scrape(storefront: Storefront, config: &ScrapeConfig) -> Result<AppListing> {
    let fetcher = Fetcher::new(config.base_url.clone())?;
    let page = fetcher.fetch(storefront, config)?;
    debug!(url = page.url.as_str(), "extracting listing");
    extract::extract(storefront, &page)
}

/// Runs one invocation against `storefront` and returns the exit code.
///
/// This is the only place that writes to `out` or picks an exit code.
pub fn run<I, T>(storefront: Storefront, args: I, out: &mut dyn Write) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let (text, encoding, code) = match config::parse(storefront, args) {
        Ok(Invocation::Help(text)) => (text, OutputEncoding::default(), 0),
        Ok(Invocation::Scrape(config)) => match scrape(storefront, &config) {
            Ok(listing) => {
                debug!(app_id = %config.app_id, "listing scraped");
                (render::render_listing(&listing, config.format), config.encoding, 0)
            }
            Err(err) => {
                warn!(app_id = %config.app_id, "{err}");
                (render::render_error(&err, config.format), config.encoding, err.exit_code())
            }
        },
        Err(failure) => {
            debug!("{}", failure.error);
            let text = match failure.format {
                OutputFormat::Json => render::render_error(&failure.error, OutputFormat::Json),
                OutputFormat::Human => failure.message,
            };
            (text, OutputEncoding::default(), failure.error.exit_code())
        }
    };

    if let Err(err) = render::emit(out, &text, encoding) {
        debug!("could not write output: {err}");
    }
    code
}

