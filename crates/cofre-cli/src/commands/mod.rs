//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config, clock, open_db) and `init`
//! - `transactions` - Transaction commands (add, list)
//! - `reports` - Period report and period comparison
//! - `classify` - Category listing and ad-hoc classification

pub mod classify;
pub mod core;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use classify::*;
pub use core::*;
pub use reports::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
