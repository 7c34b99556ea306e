//! Dashboard CLI command

use clap::Args;

use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::reports::DashboardReport;
use crate::services::{PeriodService, Session};
use crate::storage::Storage;

/// Dashboard options
#[derive(Args)]
pub struct DashboardArgs {
    /// Period: "current", "last", "2025-02" or "2025-01-01..2025-01-31"
    #[arg(short, long)]
    pub period: Option<String>,

    /// Print the whole report as JSON
    #[arg(long, conflicts_with = "chart")]
    pub json: bool,

    /// Print only the pie-chart data as JSON
    #[arg(long)]
    pub chart: bool,
}

/// Handle the dashboard command
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    args: DashboardArgs,
) -> TrackerResult<()> {
    let period = PeriodService::new(settings).parse_or_current(args.period.as_deref())?;
    let report = DashboardReport::generate(storage, session, &settings.dashboard, period)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else if args.chart {
        println!("{}", report.chart_json()?);
    } else {
        print!("{}", report.format_terminal(&settings.currency_symbol));
    }

    Ok(())
}
