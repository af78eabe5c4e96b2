use chrono::NaiveDate;
use clap::ValueEnum;

use crate::error::{BookError, Result};
use crate::models::{CourseLedger, CourseStatus, TeacherRecord};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| BookError::Validation(format!("Invalid date '{s}', expected YYYY-MM-DD")))
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.len() != 7 {
        return Err(BookError::Validation(format!(
            "Invalid month '{s}', expected YYYY-MM"
        )));
    }
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map_err(|_| BookError::Validation(format!("Invalid month '{s}', expected YYYY-MM")))
}

/// Inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(BookError::Validation(format!(
                "Date range ends ({end}) before it starts ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// A missing bound leaves that side open. `None` when neither is given.
    pub fn from_bounds(from: Option<&str>, to: Option<&str>) -> Result<Option<Self>> {
        if from.is_none() && to.is_none() {
            return Ok(None);
        }
        let start = from.map(parse_date).transpose()?.unwrap_or(NaiveDate::MIN);
        let end = to.map(parse_date).transpose()?.unwrap_or(NaiveDate::MAX);
        Self::new(start, end).map(Some)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn matches(self, status: CourseStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == CourseStatus::Active,
            StatusFilter::Completed => status == CourseStatus::Completed,
        }
    }
}

fn normalized_query(query: &Option<String>) -> Option<String> {
    query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub status: StatusFilter,
    pub query: Option<String>,
    pub dates: Option<DateRange>,
}

impl CourseFilter {
    pub fn matches(&self, ledger: &CourseLedger) -> bool {
        if !self.status.matches(ledger.status) {
            return false;
        }
        if let Some(q) = normalized_query(&self.query) {
            let hit = [
                Some(ledger.teacher_name.as_str()),
                Some(ledger.parent_name.as_str()),
                Some(ledger.contact_info.as_str()),
                ledger.matched_teacher.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&q));
            if !hit {
                return false;
            }
        }
        self.dates.map_or(true, |r| r.contains(ledger.purchase_date))
    }

    pub fn apply<'a>(&self, ledgers: &'a [CourseLedger]) -> Vec<&'a CourseLedger> {
        let matched: Vec<&CourseLedger> = ledgers.iter().filter(|l| self.matches(l)).collect();
        tracing::debug!(total = ledgers.len(), matched = matched.len(), "filtered courses");
        matched
    }
}

#[derive(Debug, Clone, Default)]
pub struct TeacherFilter {
    pub query: Option<String>,
    pub dates: Option<DateRange>,
}

impl TeacherFilter {
    pub fn matches(&self, teacher: &TeacherRecord) -> bool {
        if let Some(q) = normalized_query(&self.query) {
            if !teacher.name.to_lowercase().contains(&q) && !teacher.phone.contains(&q) {
                return false;
            }
        }
        self.dates.map_or(true, |r| r.contains(teacher.hire_date))
    }

    pub fn apply<'a>(&self, teachers: &'a [TeacherRecord]) -> Vec<&'a TeacherRecord> {
        teachers.iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into range.
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        page,
        total_pages,
        total,
    }
}
