use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{date_or_today, today, Context, CourseQuery};
use crate::error::Result;
use crate::export::write_csv_file;
use crate::filter::{paginate, parse_date, CourseFilter, DateRange};
use crate::fmt::hours;
use crate::ledger;
use crate::models::{CourseFields, CoursePatch, CourseStatus, CourseType};
use crate::reports::{course_rows, export_rows};

fn build_filter(query: &CourseQuery) -> Result<CourseFilter> {
    Ok(CourseFilter {
        status: query.status,
        query: query.search.clone(),
        dates: DateRange::from_bounds(query.from_date.as_deref(), query.to_date.as_deref())?,
    })
}

fn status_cell(status: CourseStatus) -> Cell {
    match status {
        CourseStatus::Active => Cell::new(status.to_string().green()),
        CourseStatus::Completed => Cell::new(status.to_string().dimmed()),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn add(
    ctx: &mut Context,
    teacher: String,
    parent: String,
    contact: String,
    original_price: f64,
    current_price: f64,
    hours: f64,
    course_type: CourseType,
    status: CourseStatus,
    date: Option<String>,
    trial_fee: f64,
    matched_teacher: Option<String>,
) -> Result<()> {
    let fields = CourseFields {
        teacher_name: teacher,
        parent_name: parent,
        contact_info: contact,
        matched_teacher: matched_teacher.filter(|m| !m.trim().is_empty()),
        original_price,
        current_price,
        hours,
        course_type,
        status,
        purchase_date: date_or_today(date.as_deref())?,
        trial_fee,
    };
    let course = ctx.repo.create_ledger(fields)?;
    println!(
        "Added course {}: {} / {}",
        course.id, course.teacher_name, course.parent_name
    );
    ctx.save()
}

pub fn list(ctx: &Context, query: &CourseQuery, page: usize) -> Result<()> {
    let filter = build_filter(query)?;
    let matched = filter.apply(ctx.repo.ledgers());
    let page = paginate(course_rows(matched), page, ctx.settings.page_size);

    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Purchased",
        "Teacher",
        "Parent / Phone",
        "Bought / Settled",
        "Hours / Used",
        "Profit",
        "Type",
        "Status",
    ]);
    for row in &page.items {
        let t = &row.totals;
        let profit = ctx.money(t.profit);
        let profit = if t.profit < 0.0 { profit.red() } else { profit.normal() };
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(row.purchase_date),
            Cell::new(&row.teacher_name),
            Cell::new(format!("{}/{}", row.parent_name, row.contact_info)),
            Cell::new(format!(
                "{}/{}",
                ctx.money(t.purchased_amount),
                ctx.money(t.settled_amount)
            )),
            Cell::new(format!("{}/{}", hours(row.hours), hours(t.consumed_hours))),
            Cell::new(profit),
            Cell::new(row.course_type),
            status_cell(row.status),
        ]);
    }
    println!("Courses\n{table}");
    println!(
        "Page {} of {} ({} courses)",
        page.page, page.total_pages, page.total
    );
    Ok(())
}

pub fn show(ctx: &Context, id: i64) -> Result<()> {
    let course = ctx.repo.ledger(id)?;
    let t = ledger::totals(course);

    println!("{}", format!("Course {}", course.id).bold());
    println!("Teacher:         {}", course.teacher_name);
    println!("Parent:          {}", course.parent_name);
    println!("Contact:         {}", course.contact_info);
    println!(
        "Matched teacher: {}",
        course.matched_teacher.as_deref().unwrap_or("(none)")
    );
    println!("Type / Status:   {} / {}", course.course_type, course.status);
    println!("Purchased:       {}", course.purchase_date);
    println!(
        "Price:           {} (original {})",
        ctx.money(course.current_price),
        ctx.money(course.original_price)
    );
    println!("Hours:           {}", hours(course.hours));
    println!("Trial fee:       {}", ctx.money(course.trial_fee));
    println!();
    println!(
        "Total purchased: {} hours, {}",
        hours(t.purchased_hours),
        ctx.money(t.purchased_amount)
    );
    println!(
        "Total settled:   {} hours, {}",
        hours(t.consumed_hours),
        ctx.money(t.settled_amount)
    );
    let profit = ctx.money(t.profit);
    println!(
        "Profit:          {}",
        if t.profit < 0.0 { profit.red() } else { profit.green() }
    );

    if !course.purchases.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["ID", "Date", "Hours", "Original", "Current"]);
        for p in &course.purchases {
            table.add_row(vec![
                Cell::new(p.id),
                Cell::new(p.date),
                Cell::new(hours(p.hours)),
                Cell::new(ctx.money(p.original_price)),
                Cell::new(ctx.money(p.current_price)),
            ]);
        }
        println!("\nPurchases\n{table}");
    }

    if !course.settlements.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["ID", "Month", "Hours", "Amount"]);
        for s in &course.settlements {
            table.add_row(vec![
                Cell::new(s.id),
                Cell::new(&s.month),
                Cell::new(hours(s.hours)),
                Cell::new(ctx.money(s.amount)),
            ]);
        }
        println!("\nSettlements\n{table}");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn edit(
    ctx: &mut Context,
    id: i64,
    teacher: Option<String>,
    parent: Option<String>,
    contact: Option<String>,
    original_price: Option<f64>,
    current_price: Option<f64>,
    hours: Option<f64>,
    course_type: Option<CourseType>,
    status: Option<CourseStatus>,
    date: Option<String>,
    trial_fee: Option<f64>,
    matched_teacher: Option<String>,
) -> Result<()> {
    let patch = CoursePatch {
        teacher_name: teacher,
        parent_name: parent,
        contact_info: contact,
        matched_teacher,
        original_price,
        current_price,
        hours,
        course_type,
        status,
        purchase_date: date.as_deref().map(parse_date).transpose()?,
        trial_fee,
    };
    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }
    ctx.repo.update_ledger(id, patch)?;
    println!("Updated course {id}");
    ctx.save()
}

pub fn delete(ctx: &mut Context, id: i64) -> Result<()> {
    let removed = ctx.repo.delete_ledger(id)?;
    println!(
        "Deleted course {id} ({} / {})",
        removed.teacher_name, removed.parent_name
    );
    ctx.save()
}

pub fn export(ctx: &Context, query: &CourseQuery, output: Option<String>) -> Result<()> {
    let filter = build_filter(query)?;
    let rows = export_rows(filter.apply(ctx.repo.ledgers()));
    let path = output.map(PathBuf::from).unwrap_or_else(|| {
        PathBuf::from(&ctx.settings.data_dir)
            .join("exports")
            .join(format!("courses-{}.csv", today().format("%Y-%m-%d")))
    });
    write_csv_file(&rows, &path)?;
    println!("Wrote {} courses to {}", rows.len(), path.display());
    Ok(())
}
