use chrono::{Datelike, Duration, NaiveDate};
use clap::ValueEnum;
use serde::Serialize;

use crate::filter::DateRange;
use crate::ledger::{self, LedgerTotals};
use crate::models::{CourseLedger, CourseStatus, CourseType};

// ---------------------------------------------------------------------------
// Course summary rows
// ---------------------------------------------------------------------------

pub struct CourseRow {
    pub id: i64,
    pub purchase_date: NaiveDate,
    pub teacher_name: String,
    pub parent_name: String,
    pub contact_info: String,
    pub hours: f64,
    pub course_type: CourseType,
    pub status: CourseStatus,
    pub totals: LedgerTotals,
}

pub fn course_rows<'a>(ledgers: impl IntoIterator<Item = &'a CourseLedger>) -> Vec<CourseRow> {
    ledgers
        .into_iter()
        .map(|l| CourseRow {
            id: l.id,
            purchase_date: l.purchase_date,
            teacher_name: l.teacher_name.clone(),
            parent_name: l.parent_name.clone(),
            contact_info: l.contact_info.clone(),
            hours: l.hours,
            course_type: l.course_type,
            status: l.status,
            totals: ledger::totals(l),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Period {
    Today,
    ThisWeek,
    #[default]
    ThisMonth,
    LastMonth,
}

impl Period {
    /// Inclusive window relative to `today`. Weeks start on Monday.
    pub fn window(self, today: NaiveDate) -> DateRange {
        let (start, end) = match self {
            Period::Today => (today, today),
            Period::ThisWeek => {
                let start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
                (start, start + Duration::days(6))
            }
            Period::ThisMonth => {
                let start = first_of_month(today);
                (start, last_of_month(start))
            }
            Period::LastMonth => {
                let end = first_of_month(today) - Duration::days(1);
                (first_of_month(end), end)
            }
        };
        DateRange { start, end }
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::Today => "Today",
            Period::ThisWeek => "This week",
            Period::ThisMonth => "This month",
            Period::LastMonth => "Last month",
        }
    }
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.day0() as i64)
}

fn last_of_month(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let next = NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(first);
    next - Duration::days(1)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub total_courses: usize,
    pub total_amount: f64,
    pub settled_amount: f64,
    pub profit: f64,
    pub active: usize,
    pub completed: usize,
}

/// Courses signed inside the period and what they brought in.
pub fn dashboard(ledgers: &[CourseLedger], period: Period, today: NaiveDate) -> DashboardSummary {
    let window = period.window(today);
    let mut summary = DashboardSummary {
        window_start: window.start,
        window_end: window.end,
        total_courses: 0,
        total_amount: 0.0,
        settled_amount: 0.0,
        profit: 0.0,
        active: 0,
        completed: 0,
    };
    for l in ledgers.iter().filter(|l| window.contains(l.purchase_date)) {
        let t = ledger::totals(l);
        summary.total_courses += 1;
        summary.total_amount += t.purchased_amount;
        summary.settled_amount += t.settled_amount;
        summary.profit += t.profit;
        match l.status {
            CourseStatus::Active => summary.active += 1,
            CourseStatus::Completed => summary.completed += 1,
        }
    }
    summary
}

// ---------------------------------------------------------------------------
// Export projection
// ---------------------------------------------------------------------------

/// Flat row for file export. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Teacher")]
    pub teacher: String,
    #[serde(rename = "Parent")]
    pub parent: String,
    #[serde(rename = "Contact")]
    pub contact: String,
    #[serde(rename = "Original Price")]
    pub original_price: f64,
    #[serde(rename = "Current Price")]
    pub current_price: f64,
    #[serde(rename = "Hours")]
    pub hours: f64,
    #[serde(rename = "Consumed Hours")]
    pub consumed_hours: f64,
    #[serde(rename = "Settled Amount")]
    pub settled_amount: f64,
    #[serde(rename = "Type")]
    pub course_type: CourseType,
    #[serde(rename = "Status")]
    pub status: CourseStatus,
    #[serde(rename = "Purchase Date")]
    pub purchase_date: NaiveDate,
}

pub fn export_rows<'a>(ledgers: impl IntoIterator<Item = &'a CourseLedger>) -> Vec<ExportRow> {
    ledgers
        .into_iter()
        .map(|l| {
            let (consumed_hours, settled_amount) = ledger::total_settled(l);
            ExportRow {
                teacher: l.teacher_name.clone(),
                parent: l.parent_name.clone(),
                contact: l.contact_info.clone(),
                original_price: l.original_price,
                current_price: l.current_price,
                hours: l.hours,
                consumed_hours,
                settled_amount,
                course_type: l.course_type,
                status: l.status,
                purchase_date: l.purchase_date,
            }
        })
        .collect()
}
