//! Console presentation helpers shared by every view.

pub mod icons;
pub mod table;

pub use table::Table;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::ui::icons::{CHECK, CROSS, WARN};

/// Spinner shown while the session is still being resolved.
pub fn loading_spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let spinner_style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(spinner_style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

pub fn success(message: impl std::fmt::Display) {
    println!("{}{}", CHECK, style(message).green());
}

pub fn warning(message: impl std::fmt::Display) {
    eprintln!("{}{}", WARN, style(message).yellow());
}

/// The red inline error line every view uses.
pub fn error(message: impl std::fmt::Display) {
    eprintln!("{}{} {}", CROSS, style("Error:").red().bold(), message);
}

/// `yes`/`no` badge for boolean columns.
pub fn flag(value: bool) -> String {
    if value {
        style("yes").green().to_string()
    } else {
        style("no").dim().to_string()
    }
}

/// `active`/`inactive` badge.
pub fn active_badge(active: bool) -> String {
    if active {
        style("active").green().to_string()
    } else {
        style("inactive").red().to_string()
    }
}

/// Render release bullets, wrapping long lines under their marker.
pub fn bullet_list(bullets: &[&str], width: usize) -> String {
    let options = textwrap::Options::new(width.max(20))
        .initial_indent("  • ")
        .subsequent_indent("    ");
    bullets
        .iter()
        .map(|b| textwrap::fill(b, &options))
        .collect::<Vec<_>>()
        .join("\n")
}
