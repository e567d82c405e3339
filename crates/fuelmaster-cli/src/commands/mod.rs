//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, record loading, "today")
//! - `inspection` - Inspection (ITV) projection
//! - `refills` - Manual refill entry and deletion
//! - `reports` - Statistics and refill history
//! - `status` - Dashboard and config display

pub mod core;
pub mod inspection;
pub mod refills;
pub mod reports;
pub mod status;

// Re-export command functions for main.rs
pub use self::core::*;
pub use inspection::*;
pub use refills::*;
pub use reports::*;
pub use status::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
