//! Expense display formatting

use std::collections::HashMap;

use crate::models::{CategoryId, Expense, Money};

/// Format expenses as a register with a total line
///
/// `categories` maps ids to names for the category column.
pub fn format_expense_list(
    expenses: &[Expense],
    categories: &HashMap<CategoryId, String>,
    currency: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = format!(
        "{:<8} {:<10} {:<16} {:<28} {:>12}\n",
        "ID", "Date", "Category", "Description", "Amount"
    );
    output.push_str(&"-".repeat(78));
    output.push('\n');

    for expense in expenses {
        let category = categories
            .get(&expense.category_id)
            .cloned()
            .unwrap_or_else(|| expense.category_id.to_string());
        output.push_str(&format!(
            "{:<8} {:<10} {:<16} {:<28} {:>12}\n",
            expense.id.to_string(),
            expense.date.format("%Y-%m-%d").to_string(),
            super::truncate(&category, 16),
            super::truncate(&expense.description, 28),
            expense.amount.format_with_symbol(currency)
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&"-".repeat(78));
    output.push('\n');
    output.push_str(&format!(
        "{:<65} {:>12}\n",
        format!("Total ({} expenses)", expenses.len()),
        total.format_with_symbol(currency)
    ));
    output
}

pub fn format_expense_details(expense: &Expense, category_name: &str, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d")));
    output.push_str(&format!("Category:    {}\n", category_name));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Description: {}\n", expense.description));
    output
}
