//! Shared UI icons.
//!
//! Each icon falls back to a plain-text tag on terminals without emoji
//! support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!]");

// Session indicators
pub static USER: Emoji<'_, '_> = Emoji("👤 ", "");
pub static LOCK: Emoji<'_, '_> = Emoji("🔒 ", "[locked]");

// Resource indicators
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
pub static TAG: Emoji<'_, '_> = Emoji("🏷️  ", "");
