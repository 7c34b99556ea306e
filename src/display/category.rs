//! Category display formatting

use crate::models::Category;

/// Format categories with their expense counts
pub fn format_category_list(rows: &[(Category, usize)]) -> String {
    if rows.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = format!("{:<8} {:<30} {:>8}\n", "ID", "Name", "Expenses");
    output.push_str(&"-".repeat(48));
    output.push('\n');
    for (category, count) in rows {
        output.push_str(&format!(
            "{:<8} {:<30} {:>8}\n",
            category.id.to_string(),
            super::truncate(&category.name, 30),
            count
        ));
    }
    output
}

pub fn format_category_details(category: &Category, expense_count: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("ID:       {}\n", category.id));
    output.push_str(&format!("Expenses: {}\n", expense_count));
    output.push_str(&format!(
        "Created:  {}\n",
        category.created_at.format("%Y-%m-%d %H:%M")
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, UserId};

    #[test]
    fn test_list() {
        let mut rent = Category::new("Rent", UserId::from_raw(1));
        rent.id = CategoryId::from_raw(3);
        let text = format_category_list(&[(rent, 2)]);
        assert!(text.contains("cat-3"));
        assert!(text.contains("Rent"));
        assert_eq!(format_category_list(&[]), "No categories found.\n");
    }
}
