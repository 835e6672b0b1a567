use std::process::ExitCode;

use storefront_scraper::{Storefront, app};

/// Fetches basic app information from Windows Store
fn main() -> ExitCode {
    app::init_tracing();

    let code = app::run(
        Storefront::WindowsStore,
        std::env::args_os(),
        &mut std::io::stdout().lock(),
    );

    ExitCode::from(code)
}
