//! Per-user aggregation over expense and income records
//!
//! All sums are restricted to one owner and an inclusive date range. An
//! empty selection sums to zero.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{
    BillingPeriod, Category, CategoryId, Expense, Income, IncomeSource, Money, UserId,
};
use crate::storage::Owned;

/// A dated, owned record carrying an amount
pub trait Amounted: Owned {
    fn amount(&self) -> Money;
    fn date(&self) -> NaiveDate;
}

impl Amounted for Expense {
    fn amount(&self) -> Money {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Amounted for Income {
    fn amount(&self) -> Money {
        self.amount
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Does `record` belong to `owner` and fall inside `range`?
pub fn selects<T: Amounted>(record: &T, owner: UserId, range: &BillingPeriod) -> bool {
    record.owner() == owner && range.contains(record.date())
}

/// Sum of amounts owned by `owner` dated within `range`
pub fn sum_amount<'r, T, I>(records: I, owner: UserId, range: &BillingPeriod) -> Money
where
    T: Amounted + 'r,
    I: IntoIterator<Item = &'r T>,
{
    records
        .into_iter()
        .filter(|r| selects(*r, owner, range))
        .map(|r| r.amount())
        .sum()
}

/// Number of records owned by `owner` dated within `range`
pub fn count_matching<'r, T, I>(records: I, owner: UserId, range: &BillingPeriod) -> usize
where
    T: Amounted + 'r,
    I: IntoIterator<Item = &'r T>,
{
    records
        .into_iter()
        .filter(|r| selects(*r, owner, range))
        .count()
}

/// Income minus expense; negative when overspent
pub fn balance(total_income: Money, total_expense: Money) -> Money {
    total_income - total_expense
}

/// Total expense per category name
///
/// `expenses` should already be filtered to one owner and range.
/// Expenses whose category is missing are grouped under their id.
pub fn group_sum_by_category(
    expenses: &[Expense],
    categories: &[Category],
) -> BTreeMap<String, Money> {
    let names: HashMap<CategoryId, &str> =
        categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut totals = BTreeMap::new();
    for expense in expenses {
        let name = names
            .get(&expense.category_id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| expense.category_id.to_string());
        *totals.entry(name).or_insert_with(Money::zero) += expense.amount;
    }
    totals
}

/// One row of the per-category spending breakdown
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CategoryTotal {
    pub category_id: CategoryId,
    pub name: String,
    pub total: Money,
    pub count: usize,
    /// Share of all spending in the selection, 0-100
    pub percentage: f64,
}

fn percentage_of(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

/// Per-category totals, counts and shares, largest first
///
/// Categories without spending in `expenses` are left out.
pub fn category_breakdown(expenses: &[Expense], categories: &[Category]) -> Vec<CategoryTotal> {
    let mut sums: HashMap<CategoryId, (Money, usize)> = HashMap::new();
    for expense in expenses {
        let entry = sums.entry(expense.category_id).or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let grand_total: Money = expenses.iter().map(|e| e.amount).sum();
    let names: HashMap<CategoryId, &str> =
        categories.iter().map(|c| (c.id, c.name.as_str())).collect();

    let mut rows: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category_id, (total, count))| CategoryTotal {
            category_id,
            name: names
                .get(&category_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| category_id.to_string()),
            total,
            count,
            percentage: percentage_of(total, grand_total),
        })
        .collect();

    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    rows
}

/// Total income per source, in source order
pub fn group_sum_by_source(income: &[Income]) -> BTreeMap<IncomeSource, Money> {
    let mut totals = BTreeMap::new();
    for entry in income {
        *totals.entry(entry.source).or_insert_with(Money::zero) += entry.amount;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: UserId = UserId::from_raw(1);
    const B: UserId = UserId::from_raw(2);

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> BillingPeriod {
        BillingPeriod::cycle(2025, 2, 27)
    }

    fn expense(owner: UserId, category: u64, cents: i64, day: NaiveDate) -> Expense {
        Expense::new(
            owner,
            CategoryId::from_raw(category),
            day,
            Money::from_cents(cents),
            "item",
        )
    }

    fn category(id: u64, name: &str) -> Category {
        let mut category = Category::new(name, A);
        category.id = CategoryId::from_raw(id);
        category
    }

    #[test]
    fn test_empty_sum_is_zero() {
        let none: Vec<Expense> = Vec::new();
        assert_eq!(sum_amount(&none, A, &march()), Money::zero());
    }

    #[test]
    fn test_sum_only_counts_owner() {
        let records = vec![
            expense(A, 1, 1000, date(2025, 3, 1)),
            expense(B, 1, 500, date(2025, 3, 1)),
        ];
        assert_eq!(sum_amount(&records, A, &march()), Money::from_cents(1000));
        assert_eq!(count_matching(&records, A, &march()), 1);
    }

    #[test]
    fn test_sum_range_is_inclusive() {
        let records = vec![
            expense(A, 1, 100, date(2025, 2, 26)),
            expense(A, 1, 200, date(2025, 2, 27)),
            expense(A, 1, 300, date(2025, 3, 26)),
            expense(A, 1, 400, date(2025, 3, 27)),
        ];
        assert_eq!(sum_amount(&records, A, &march()), Money::from_cents(500));
    }

    #[test]
    fn test_balance() {
        let income = Money::from_cents(10000);
        let spent = Money::from_cents(4000);
        assert_eq!(balance(income, spent), Money::from_cents(6000));
        assert_eq!(balance(spent, income), Money::from_cents(-6000));
    }

    #[test]
    fn test_income_sum_by_owner() {
        let day = date(2025, 3, 1);
        let records = vec![
            Income::new(A, IncomeSource::Salary, Money::from_cents(10000), day),
            Income::new(B, IncomeSource::Salary, Money::from_cents(99999), day),
        ];
        assert_eq!(sum_amount(&records, A, &march()), Money::from_cents(10000));
    }

    #[test]
    fn test_group_sum_by_category() {
        let categories = vec![category(1, "Food"), category(2, "Rent")];
        let day = date(2025, 3, 1);
        let expenses = vec![
            expense(A, 1, 1000, day),
            expense(A, 1, 250, day),
            expense(A, 2, 50000, day),
        ];

        let totals = group_sum_by_category(&expenses, &categories);
        assert_eq!(totals["Food"], Money::from_cents(1250));
        assert_eq!(totals["Rent"], Money::from_cents(50000));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_category_breakdown_sorted_with_shares() {
        let categories = vec![category(1, "Food"), category(2, "Rent"), category(3, "Idle")];
        let day = date(2025, 3, 1);
        let expenses = vec![
            expense(A, 1, 2500, day),
            expense(A, 2, 7500, day),
        ];

        let rows = category_breakdown(&expenses, &categories);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Rent");
        assert_eq!(rows[0].percentage, 75.0);
        assert_eq!(rows[1].name, "Food");
        assert_eq!(rows[1].count, 1);
        assert!(category_breakdown(&[], &categories).is_empty());
    }

    #[test]
    fn test_group_sum_by_source() {
        let day = date(2025, 3, 1);
        let income = vec![
            Income::new(A, IncomeSource::Salary, Money::from_cents(100), day),
            Income::new(A, IncomeSource::Equity, Money::from_cents(50), day),
            Income::new(A, IncomeSource::Salary, Money::from_cents(25), day),
        ];
        let totals = group_sum_by_source(&income);
        assert_eq!(totals[&IncomeSource::Salary], Money::from_cents(125));
        assert_eq!(totals[&IncomeSource::Equity], Money::from_cents(50));
        assert!(!totals.contains_key(&IncomeSource::Other));
    }
}
