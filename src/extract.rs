use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{Field, Result, ScrapeError};
use crate::fetch::FetchedPage;
use crate::storefront::{Storefront, WINDOWS_STORE_MARKER};

/// The five fields scraped from a listing page. All of them or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppListing {
    pub name: String,
    pub description: String,
    pub publisher: String,
    /// Price after [`normalize_price`], still in the store's own formatting.
    pub raw_price: String,
    pub icon_link: String,
}

/// Stores label free apps "Install" or "Free" instead of a price. Anything
/// with a decimal separator is a real price and is kept as is.
pub fn normalize_price(raw: &str) -> String {
    if raw.contains([',', '.']) {
        raw.to_string()
    } else {
        "0".to_string()
    }
}

pub fn extract(storefront: Storefront, page: &FetchedPage) -> Result<AppListing> {
    let document = Html::parse_document(&page.html);
    let root = document.root_element();

    if let Some(marker) = storefront.listing_marker() {
        let marker = selector(marker, Field::Name)?;
        if root.select(&marker).next().is_none() {
            return Err(ScrapeError::not_found());
        }
    }

    match storefront {
        Storefront::GooglePlay => google_play(root),
        Storefront::WindowsStore => windows_store(root),
    }
}

fn google_play(root: ElementRef<'_>) -> Result<AppListing> {
    let price = text(first(root, "button.price", Field::Price)?);
    // the button reads e.g. "1,99 € Buy"
    let price = price.split_whitespace().next().unwrap_or_default();

    Ok(AppListing {
        name: text(first(root, "h1", Field::Name)?),
        description: text(first(root, "div.id-app-orig-desc", Field::Description)?),
        publisher: text(first(root, "a.document-subtitle.primary", Field::Publisher)?),
        raw_price: normalize_price(price),
        icon_link: attr(first(root, "img", Field::Icon)?, "src", Field::Icon)?,
    })
}

fn windows_store(root: ElementRef<'_>) -> Result<AppListing> {
    let details = first(root, "section.srv_detailsTable.section", Field::Publisher)?;
    let publisher = first(first(details, "dd", Field::Publisher)?, "div", Field::Publisher)?;
    let price = first(first(root, "div.price", Field::Price)?, "span", Field::Price)?;
    let icon = first(root, "img.cli_image.m-b-lg", Field::Icon)?;

    Ok(AppListing {
        name: attr(first(root, WINDOWS_STORE_MARKER, Field::Name)?, "content", Field::Name)?,
        description: text(first(root, "p", Field::Description)?),
        publisher: text(publisher),
        // the span itself reads "Free"/"Zdarma" for free apps; report those as 0 too
        raw_price: normalize_price(&text(price)),
        icon_link: with_scheme(attr(icon, "src", Field::Icon)?),
    })
}

/// Windows Store serves protocol-relative icon links.
fn with_scheme(src: String) -> String {
    if src.starts_with("//") {
        format!("http:{src}")
    } else {
        src
    }
}

fn selector(css: &str, field: Field) -> Result<Selector> {
    Selector::parse(css).map_err(|_| ScrapeError::Parse(field))
}

/// First descendant of `scope` matching `css`.
fn first<'a>(scope: ElementRef<'a>, css: &str, field: Field) -> Result<ElementRef<'a>> {
    let selector = selector(css, field)?;
    scope.select(&selector).next().ok_or(ScrapeError::Parse(field))
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn attr(element: ElementRef<'_>, name: &str, field: Field) -> Result<String> {
    element
        .value()
        .attr(name)
        .map(|value| value.trim().to_string())
        .ok_or(ScrapeError::Parse(field))
}
