use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{today, Context};
use crate::error::Result;
use crate::reports::{self, Period};

pub fn run(ctx: &Context, period: Period) -> Result<()> {
    let s = reports::dashboard(ctx.repo.ledgers(), period, today());

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![Cell::new("Courses signed"), Cell::new(s.total_courses)]);
    table.add_row(vec![
        Cell::new("Purchase amount".bold()),
        Cell::new(ctx.money(s.total_amount)),
    ]);
    table.add_row(vec![Cell::new("Settled to teachers"), Cell::new(ctx.money(s.settled_amount))]);
    let profit = ctx.money(s.profit);
    table.add_row(vec![
        Cell::new("Profit"),
        Cell::new(if s.profit < 0.0 { profit.red() } else { profit.green() }),
    ]);
    table.add_row(vec![Cell::new("Active"), Cell::new(s.active)]);
    table.add_row(vec![Cell::new("Completed"), Cell::new(s.completed)]);

    println!(
        "Dashboard: {} ({} to {})\n{table}",
        period.label(),
        s.window_start,
        s.window_end
    );
    Ok(())
}
