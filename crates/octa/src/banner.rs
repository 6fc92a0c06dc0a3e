//! Startup banner.

use std::sync::Once;
use tracing::info;

static BANNER: Once = Once::new();

const LOGO: &str = r"
                      ██████╗  ██████╗████████╗ █████╗
                     ██╔═══██╗██╔════╝╚══██╔══╝██╔══██╗
 You are powered by  ██║   ██║██║        ██║   ███████║
                     ██║   ██║██║        ██║   ██╔══██║
                     ╚██████╔╝╚██████╗   ██║   ██║  ██║
                      ╚═════╝  ╚═════╝   ╚═╝   ╚═╝  ╚═╝";

/// Banner text with the crate version appended.
pub fn banner_text() -> String {
    format!("{}  v{}\n", LOGO, env!("CARGO_PKG_VERSION"))
}

/// Log the banner. Only the first call in a process has any effect.
///
/// Returns whether this call logged it.
pub fn show_banner() -> bool {
    let mut shown = false;
    BANNER.call_once(|| {
        info!("{}", banner_text());
        shown = true;
    });
    shown
}
