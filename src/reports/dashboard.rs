//! Dashboard report
//!
//! Totals, balance and per-category spending for one user over one
//! period, plus the data a pie chart of spending by category needs.

use serde::Serialize;

use crate::config::settings::DashboardSettings;
use crate::error::TrackerResult;
use crate::models::{BillingPeriod, IncomeSource, Money};
use crate::services::aggregate::{
    balance, category_breakdown, count_matching, group_sum_by_source, selects, sum_amount,
    CategoryTotal,
};
use crate::services::Session;
use crate::storage::Storage;

/// Pie chart input: one slice per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub width: u32,
    pub height: u32,
}

/// Income total for one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceTotal {
    pub source: IncomeSource,
    pub total: Money,
}

/// Dashboard for one user and period
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub header: String,
    pub title: String,
    pub username: String,
    pub period: BillingPeriod,
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub expense_count: usize,
    pub income_count: usize,
    /// Spending per category, largest first
    pub categories: Vec<CategoryTotal>,
    pub income_by_source: Vec<SourceTotal>,
    pub chart: ChartData,
}

impl DashboardReport {
    pub fn generate(
        storage: &Storage,
        session: &Session,
        settings: &DashboardSettings,
        period: BillingPeriod,
    ) -> TrackerResult<Self> {
        let owner = session.user_id();

        let all_expenses = storage.expenses.owned_by(owner)?;
        let all_income = storage.income.owned_by(owner)?;
        let categories = storage.categories.owned_by(owner)?;

        let total_expense = sum_amount(&all_expenses, owner, &period);
        let total_income = sum_amount(&all_income, owner, &period);
        let expense_count = count_matching(&all_expenses, owner, &period);
        let income_count = count_matching(&all_income, owner, &period);

        let expenses: Vec<_> = all_expenses
            .into_iter()
            .filter(|e| selects(e, owner, &period))
            .collect();
        let income: Vec<_> = all_income
            .into_iter()
            .filter(|i| selects(i, owner, &period))
            .collect();
        let rows = category_breakdown(&expenses, &categories);

        let chart = ChartData {
            labels: rows.iter().map(|r| r.name.clone()).collect(),
            values: rows.iter().map(|r| r.total.as_f64()).collect(),
            width: settings.chart_width,
            height: settings.chart_height,
        };

        let income_by_source = group_sum_by_source(&income)
            .into_iter()
            .map(|(source, total)| SourceTotal { source, total })
            .collect();

        Ok(Self {
            header: settings.header.clone(),
            title: settings.title.clone(),
            username: session.username().to_string(),
            period,
            total_income,
            total_expense,
            balance: balance(total_income, total_expense),
            expense_count,
            income_count,
            categories: rows,
            income_by_source,
            chart,
        })
    }

    /// Chart data as a compact JSON object
    pub fn chart_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string(&self.chart)?)
    }

    /// The whole report as pretty JSON
    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&format!("{} - {}\n", self.header, self.title));
        output.push_str(&format!("User: {}   Period: {}\n", self.username, self.period));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Income:   {:>14}  ({} entries)\n",
            money(self.total_income),
            self.income_count
        ));
        output.push_str(&format!(
            "Total Spending: {:>14}  ({} expenses)\n",
            money(self.total_expense),
            self.expense_count
        ));
        output.push_str(&format!("Balance:        {:>14}\n", money(self.balance)));

        if !self.income_by_source.is_empty() {
            output.push_str("\nIncome by source\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for row in &self.income_by_source {
                output.push_str(&format!("  {:<30} {:>14}\n", row.source, money(row.total)));
            }
        }

        output.push_str("\nSpending by category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("  No expenses in this period.\n");
        } else {
            output.push_str(&format!(
                "  {:<30} {:>14} {:>5} {:>6}\n",
                "Category", "Total Spent", "Count", "%"
            ));
            for row in &self.categories {
                output.push_str(&format!(
                    "  {:<30} {:>14} {:>5} {:>5.1}%\n",
                    row.name,
                    money(row.total),
                    row.count,
                    row.percentage
                ));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::models::{CategoryId, User, UserId};
    use crate::services::{
        CategoryService, ExpenseService, IncomeService, NewExpense, NewIncome,
    };
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn session(id: u64, name: &str) -> Session {
        let mut user = User::new(name, "hash");
        user.id = UserId::from_raw(id);
        Session::for_user(user)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spend(storage: &Storage, who: &Session, category: CategoryId, cents: i64, day: NaiveDate) {
        ExpenseService::new(storage, who)
            .create(NewExpense {
                category_id: category,
                date: Some(day),
                amount: Money::from_cents(cents),
                description: "item".into(),
            })
            .unwrap();
    }

    fn earn(storage: &Storage, who: &Session, source: IncomeSource, cents: i64, day: NaiveDate) {
        IncomeService::new(storage, who)
            .create(NewIncome {
                source,
                amount: Money::from_cents(cents),
                date: Some(day),
                description: None,
            })
            .unwrap();
    }

    #[test]
    fn test_dashboard_totals_for_period() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = session(1, "asha");
        let ben = session(2, "ben");
        let categories = CategoryService::new(&storage, &asha);
        let food = categories.create("Food").unwrap();
        let rent = categories.create("Rent").unwrap();
        let bens_food = CategoryService::new(&storage, &ben).create("Takeaway").unwrap();

        let in_period = date(2025, 3, 1);
        earn(&storage, &asha, IncomeSource::Salary, 10000, in_period);
        spend(&storage, &asha, food.id, 1000, in_period);
        spend(&storage, &asha, rent.id, 3000, in_period);
        // Outside the period and another user's spending
        spend(&storage, &asha, rent.id, 99900, date(2025, 3, 27));
        spend(&storage, &ben, bens_food.id, 5000, in_period);
        earn(&storage, &asha, IncomeSource::Other, 700, date(2025, 2, 26));

        let report = DashboardReport::generate(
            &storage,
            &asha,
            &DashboardSettings::default(),
            BillingPeriod::cycle(2025, 2, 27),
        )
        .unwrap();

        assert_eq!(report.total_income, Money::from_cents(10000));
        assert_eq!(report.total_expense, Money::from_cents(4000));
        assert_eq!(report.balance, Money::from_cents(6000));
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.income_count, 1);
        assert_eq!(report.categories[0].name, "Rent");
        assert_eq!(report.chart.labels, vec!["Rent", "Food"]);
        assert_eq!(report.chart.values, vec![30.0, 10.0]);
        assert_eq!(report.income_by_source[0].source, IncomeSource::Salary);
    }

    #[test]
    fn test_empty_dashboard() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = session(1, "asha");
        let report = DashboardReport::generate(
            &storage,
            &asha,
            &DashboardSettings::default(),
            BillingPeriod::cycle(2025, 2, 27),
        )
        .unwrap();

        assert!(report.total_expense.is_zero());
        assert!(report.balance.is_zero());
        assert!(report.format_terminal("$").contains("No expenses in this period."));
    }

    #[test]
    fn test_chart_json_shape() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = session(1, "asha");
        let food = CategoryService::new(&storage, &asha).create("Food").unwrap();
        spend(&storage, &asha, food.id, 1250, date(2025, 3, 1));

        let report = DashboardReport::generate(
            &storage,
            &asha,
            &DashboardSettings::default(),
            BillingPeriod::cycle(2025, 2, 27),
        )
        .unwrap();

        assert_eq!(
            report.chart_json().unwrap(),
            r#"{"labels":["Food"],"values":[12.5],"width":400,"height":400}"#
        );
    }

    #[test]
    fn test_terminal_format() {
        let (_temp_dir, storage) = create_test_storage();
        let asha = session(1, "asha");
        let food = CategoryService::new(&storage, &asha).create("Food").unwrap();
        spend(&storage, &asha, food.id, 1250, date(2025, 3, 1));

        let report = DashboardReport::generate(
            &storage,
            &asha,
            &DashboardSettings::default(),
            BillingPeriod::cycle(2025, 2, 27),
        )
        .unwrap();
        let text = report.format_terminal("$");

        assert!(text.starts_with("Expense Tracker - Expense Dashboard"));
        assert!(text.contains("2025-02-27..2025-03-26"));
        assert!(text.contains("Balance:"));
        assert!(text.contains("-$12.50"));
        assert!(text.contains("Food"));
    }
}
