//! CLI command implementations
//!
//! Commands are organized by view:
//! - `dashboard` - Spending overview cards plus the recent-receipts panel
//! - `receipts` - Receipt list, edit, and delete commands
//! - `upload` - Receipt upload with server-side extraction
//! - `analytics` - Chart panels built from the analytics snapshot
//! - `export` - Filtered export to a dated CSV/JSON file

pub mod analytics;
pub mod dashboard;
pub mod export;
pub mod receipts;
pub mod upload;

// Re-export command functions for main.rs
pub use analytics::*;
pub use dashboard::*;
pub use export::*;
pub use receipts::*;
pub use upload::*;

use std::io::Write;

use anyhow::Result;

/// Truncate a string to a maximum length, adding "..." if truncated
///
/// Counts characters rather than bytes so multi-byte vendor names never
/// split mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Ask a yes/no question on stdin, defaulting to no
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("DMart", 25), "DMart");
    }

    #[test]
    fn test_truncate_long_string_adds_ellipsis() {
        assert_eq!(truncate("A Very Long Vendor Name Indeed", 15), "A Very Long ...");
    }

    #[test]
    fn test_truncate_multibyte_vendor_names() {
        // Devanagari and emoji vendors must truncate on character
        // boundaries, not byte offsets.
        let devanagari = "श्री गणेश किराणा भांडार आणि जनरल स्टोअर्स";
        let truncated = truncate(devanagari, 25);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 25);

        assert_eq!(truncate("☕☕☕☕☕", 4), "☕...");
        assert_eq!(truncate("☕☕☕☕☕", 5), "☕☕☕☕☕");
    }
}
