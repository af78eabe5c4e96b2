use crate::cli::{date_or_today, today, Context};
use crate::error::{BookError, Result};
use crate::filter::parse_date;
use crate::models::{PurchaseEntry, RecordEntry, RecordKind, SettlementEntry};

pub fn add_purchase(
    ctx: &mut Context,
    course: i64,
    date: Option<String>,
    hours: f64,
    original_price: f64,
    current_price: f64,
) -> Result<()> {
    let entry = PurchaseEntry {
        date: date_or_today(date.as_deref())?,
        hours,
        original_price,
        current_price,
    };
    let id = ctx.repo.append_purchase(course, entry)?;
    println!("Added purchase record {id} to course {course}");
    ctx.save()
}

pub fn edit_purchase(
    ctx: &mut Context,
    course: i64,
    record: i64,
    date: Option<String>,
    hours: Option<f64>,
    original_price: Option<f64>,
    current_price: Option<f64>,
) -> Result<()> {
    let existing = ctx
        .repo
        .ledger(course)?
        .purchases
        .iter()
        .find(|p| p.id == record)
        .cloned()
        .ok_or(BookError::RecordNotFound {
            ledger: course,
            kind: RecordKind::Purchase,
            id: record,
        })?;
    let entry = PurchaseEntry {
        date: match date {
            Some(d) => parse_date(&d)?,
            None => existing.date,
        },
        hours: hours.unwrap_or(existing.hours),
        original_price: original_price.unwrap_or(existing.original_price),
        current_price: current_price.unwrap_or(existing.current_price),
    };
    ctx.repo.edit_record(course, record, RecordEntry::Purchase(entry))?;
    println!("Updated purchase record {record} on course {course}");
    ctx.save()
}

pub fn add_settlement(
    ctx: &mut Context,
    course: i64,
    month: Option<String>,
    amount: f64,
    hours: f64,
) -> Result<()> {
    let entry = SettlementEntry {
        month: month.unwrap_or_else(|| today().format("%Y-%m").to_string()),
        amount,
        hours,
    };
    let id = ctx.repo.append_settlement(course, entry)?;
    println!("Added settlement record {id} to course {course}");
    ctx.save()
}

pub fn edit_settlement(
    ctx: &mut Context,
    course: i64,
    record: i64,
    month: Option<String>,
    amount: Option<f64>,
    hours: Option<f64>,
) -> Result<()> {
    let existing = ctx
        .repo
        .ledger(course)?
        .settlements
        .iter()
        .find(|s| s.id == record)
        .cloned()
        .ok_or(BookError::RecordNotFound {
            ledger: course,
            kind: RecordKind::Settlement,
            id: record,
        })?;
    let entry = SettlementEntry {
        month: month.unwrap_or(existing.month),
        amount: amount.unwrap_or(existing.amount),
        hours: hours.unwrap_or(existing.hours),
    };
    ctx.repo.edit_record(course, record, RecordEntry::Settlement(entry))?;
    println!("Updated settlement record {record} on course {course}");
    ctx.save()
}

pub fn delete(ctx: &mut Context, course: i64, kind: RecordKind, record: i64) -> Result<()> {
    ctx.repo.delete_record(course, kind, record)?;
    println!("Deleted {kind} record {record} from course {course}");
    ctx.save()
}
