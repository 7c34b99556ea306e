//! Income display formatting

use crate::models::{Income, Money};

pub fn format_income_list(income: &[Income], currency: &str) -> String {
    if income.is_empty() {
        return "No income found.\n".to_string();
    }

    let mut output = format!(
        "{:<8} {:<10} {:<10} {:<30} {:>12}\n",
        "ID", "Date", "Source", "Description", "Amount"
    );
    output.push_str(&"-".repeat(74));
    output.push('\n');

    for entry in income {
        output.push_str(&format!(
            "{:<8} {:<10} {:<10} {:<30} {:>12}\n",
            entry.id.to_string(),
            entry.date.format("%Y-%m-%d").to_string(),
            entry.source,
            super::truncate(entry.description.as_deref().unwrap_or(""), 30),
            entry.amount.format_with_symbol(currency)
        ));
    }

    let total: Money = income.iter().map(|i| i.amount).sum();
    output.push_str(&"-".repeat(74));
    output.push('\n');
    output.push_str(&format!(
        "{:<61} {:>12}\n",
        format!("Total ({} entries)", income.len()),
        total.format_with_symbol(currency)
    ));
    output
}

pub fn format_income_details(income: &Income, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Income:      {}\n", income.id));
    output.push_str(&format!("Date:        {}\n", income.date.format("%Y-%m-%d")));
    output.push_str(&format!("Source:      {}\n", income.source));
    output.push_str(&format!(
        "Amount:      {}\n",
        income.amount.format_with_symbol(currency)
    ));
    if let Some(description) = &income.description {
        output.push_str(&format!("Description: {}\n", description));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeSource, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_details_skip_missing_description() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let income = Income::new(UserId::from_raw(1), IncomeSource::Equity, Money::from_cents(5000), day);
        let text = format_income_details(&income, "$");
        assert!(text.contains("Source:      Equity"));
        assert!(text.contains("$50.00"));
        assert!(!text.contains("Description"));
    }
}
