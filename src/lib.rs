//! Scrapes a single app listing from an app storefront and prints it as
//! text or JSON.
//!
//! One pipeline serves every store: [`config`] reads the command line,
//! [`fetch`] issues the GET, [`extract`] pulls the fields out of the page
//! and [`render`] prints the result. [`app::run`] ties them together.

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod storefront;

pub use error::{Result, ScrapeError};
pub use extract::AppListing;
pub use storefront::Storefront;
