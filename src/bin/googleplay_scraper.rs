use std::process::ExitCode;

use storefront_scraper::{Storefront, app};

/// Fetches basic app information from Google Play
fn main() -> ExitCode {
    app::init_tracing();

    let code = app::run(
        Storefront::GooglePlay,
        std::env::args_os(),
        &mut std::io::stdout().lock(),
    );

    ExitCode::from(code)
}
