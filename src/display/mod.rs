//! Display formatting for terminal output
//!
//! Every function returns a `String`; printing is left to the CLI layer.

pub mod category;
pub mod expense;
pub mod income;
pub mod user;

pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list};
pub use income::{format_income_details, format_income_list};
pub use user::format_user_list;

/// Shorten `s` to at most `max_len` characters, marking the cut with "..."
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Weekly groceries run", 10), "Weekly ...");
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
