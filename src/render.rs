use std::io::{self, Write};

use serde::Serialize;

use crate::config::{OutputEncoding, OutputFormat};
use crate::error::ScrapeError;
use crate::extract::AppListing;

#[derive(Serialize)]
struct ErrorJson<'a> {
    error: &'a str,
    code: i64,
}

pub fn render_listing(listing: &AppListing, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!(
            "Name: {}\nDescription: {}\nPublisher: {}\nPrice: {}\nIcon link: {}\n",
            listing.name, listing.description, listing.publisher, listing.raw_price, listing.icon_link
        ),
        OutputFormat::Json => json_line(listing),
    }
}

pub fn render_error(error: &ScrapeError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("Error: {}\nError code: {}\n", error.kind(), error.code()),
        OutputFormat::Json => json_line(&ErrorJson {
            error: error.kind(),
            code: error.code(),
        }),
    }
}

/// serde_json keeps non-ASCII as is and escapes control characters, so the
/// result never spans more than one line.
fn json_line<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json + "\n",
        // plain structs of strings and integers always serialize
        Err(_) => serde_json::json!({ "error": "SerializationError", "code": 1 }).to_string() + "\n",
    }
}

/// Writes `text` to `out` in the configured output encoding.
pub fn emit(out: &mut dyn Write, text: &str, encoding: OutputEncoding) -> io::Result<()> {
    out.write_all(&encoding.encode(text))?;
    out.flush()
}
