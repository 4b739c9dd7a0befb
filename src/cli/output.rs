//! Terminal output helpers.
//!
//! Everything goes to stderr; stdout belongs to the wrapped command.
//!
//! Color scheme (respects NO_COLOR):
//! - Red: errors
//! - Cyan: hints

use console::style;

use crate::core::constants::BIN_NAME;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a fatal error.
///
/// Example: `[helm-vault] error: Vault path not found: secret/data/app`
pub fn error(msg: &str) {
    let prefix = format!("[{}] error:", BIN_NAME);
    if colors_enabled() {
        eprintln!("{} {}", style(prefix).red().bold().for_stderr(), msg);
    } else {
        eprintln!("{} {}", prefix, msg);
    }
}

/// Print a hint below an error.
///
/// Example: `→ supported transforms: b64enc`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan().for_stderr(), style(msg).cyan().for_stderr());
    } else {
        eprintln!("→ {}", msg);
    }
}
