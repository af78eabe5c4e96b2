pub mod courses;
pub mod dashboard;
pub mod demo;
pub mod init;
pub mod records;
pub mod status;
pub mod teachers;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::filter::StatusFilter;
use crate::models::{CourseStatus, CourseType};
use crate::reports::Period;
use crate::repository::Repository;
use crate::settings::{load_settings, Settings};
use crate::workbook;

/// Settings plus the repository loaded from the workbook they point at.
pub struct Context {
    pub settings: Settings,
    pub repo: Repository,
}

impl Context {
    pub fn load() -> Result<Self> {
        let settings = load_settings();
        let repo = workbook::open(&settings.workbook_path(), settings.validators()?)?;
        Ok(Self { settings, repo })
    }

    pub fn save(&self) -> Result<()> {
        workbook::save(&self.repo, &self.settings.workbook_path())
    }

    pub fn money(&self, val: f64) -> String {
        crate::fmt::money(val, &self.settings.currency_symbol)
    }
}

#[derive(Parser)]
#[command(
    name = "tutorbook",
    about = "Course ledgers and teacher directory for a tutoring brokerage."
)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tutorbook: choose a data directory and display preferences.
    Init {
        /// Path for tutorbook data (default: ~/Documents/tutorbook)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Currency symbol used in tables
        #[arg(long)]
        currency: Option<String>,
        /// Rows per page in course listings
        #[arg(long = "page-size")]
        page_size: Option<usize>,
        /// Check teacher phone and ID number formats
        #[arg(long)]
        strict: Option<bool>,
    },
    /// Load sample courses and a teacher to explore tutorbook.
    Demo,
    /// Show settings and record counts.
    Status,
    /// Manage course contracts.
    Courses {
        #[command(subcommand)]
        command: CoursesCommands,
    },
    /// Manage top-up purchases on a course.
    Purchases {
        #[command(subcommand)]
        command: PurchasesCommands,
    },
    /// Manage monthly teacher settlements on a course.
    Settlements {
        #[command(subcommand)]
        command: SettlementsCommands,
    },
    /// Manage the teacher directory.
    Teachers {
        #[command(subcommand)]
        command: TeachersCommands,
    },
    /// Courses signed and revenue for a period.
    Dashboard {
        #[arg(long, value_enum, default_value_t = Period::ThisMonth)]
        period: Period,
    },
}

#[derive(clap::Args, Clone, Default)]
pub struct CourseQuery {
    /// Status filter
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    pub status: StatusFilter,
    /// Match teacher, parent, phone or matched teacher (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,
    /// Purchase date from: YYYY-MM-DD
    #[arg(long = "from")]
    pub from_date: Option<String>,
    /// Purchase date to: YYYY-MM-DD
    #[arg(long = "to")]
    pub to_date: Option<String>,
}

#[derive(Subcommand)]
pub enum CoursesCommands {
    /// Add a course contract.
    Add {
        /// Tutor name as shown to the family
        #[arg(long)]
        teacher: String,
        /// Parent nickname
        #[arg(long)]
        parent: String,
        /// Contact phone
        #[arg(long)]
        contact: String,
        #[arg(long = "original-price")]
        original_price: f64,
        #[arg(long = "current-price")]
        current_price: f64,
        /// Contracted hours
        #[arg(long)]
        hours: f64,
        #[arg(long = "type", value_enum, default_value_t = CourseType::Prepaid)]
        course_type: CourseType,
        #[arg(long, value_enum, default_value_t = CourseStatus::Active)]
        status: CourseStatus,
        /// Purchase date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "trial-fee", default_value = "0")]
        trial_fee: f64,
        /// Teacher matched from the directory
        #[arg(long = "matched-teacher")]
        matched_teacher: Option<String>,
    },
    /// List courses with totals.
    List {
        #[command(flatten)]
        query: CourseQuery,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Show one course with its purchase and settlement records.
    Show {
        id: i64,
    },
    /// Update course fields.
    Edit {
        id: i64,
        #[arg(long)]
        teacher: Option<String>,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long)]
        contact: Option<String>,
        #[arg(long = "original-price")]
        original_price: Option<f64>,
        #[arg(long = "current-price")]
        current_price: Option<f64>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long = "type", value_enum)]
        course_type: Option<CourseType>,
        #[arg(long, value_enum)]
        status: Option<CourseStatus>,
        /// Purchase date: YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "trial-fee")]
        trial_fee: Option<f64>,
        /// Matched teacher (empty string clears it)
        #[arg(long = "matched-teacher")]
        matched_teacher: Option<String>,
    },
    /// Delete a course and all of its records.
    Delete {
        id: i64,
    },
    /// Export courses to CSV.
    Export {
        #[command(flatten)]
        query: CourseQuery,
        /// Output file path (default: <data_dir>/exports/courses-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PurchasesCommands {
    /// Record a top-up purchase.
    Add {
        /// Course ID
        course: i64,
        /// Purchase date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        hours: f64,
        #[arg(long = "original-price")]
        original_price: f64,
        #[arg(long = "current-price")]
        current_price: f64,
    },
    /// Replace a purchase record. Omitted fields keep their value.
    Edit {
        course: i64,
        /// Record ID (shown in `tutorbook courses show`)
        record: i64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long = "original-price")]
        original_price: Option<f64>,
        #[arg(long = "current-price")]
        current_price: Option<f64>,
    },
    /// Delete a purchase record.
    Delete {
        course: i64,
        record: i64,
    },
}

#[derive(Subcommand)]
pub enum SettlementsCommands {
    /// Record hours delivered and paid out for a month.
    Add {
        /// Course ID
        course: i64,
        /// Month: YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        hours: f64,
    },
    /// Replace a settlement record. Omitted fields keep their value.
    Edit {
        course: i64,
        /// Record ID (shown in `tutorbook courses show`)
        record: i64,
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        hours: Option<f64>,
    },
    /// Delete a settlement record.
    Delete {
        course: i64,
        record: i64,
    },
}

#[derive(Subcommand)]
pub enum TeachersCommands {
    /// Add a teacher to the directory.
    Add {
        #[arg(long)]
        name: String,
        /// Government ID number
        #[arg(long = "id-number")]
        id_number: String,
        #[arg(long)]
        phone: String,
        /// Hire date: YYYY-MM-DD (default: today)
        #[arg(long = "hire-date")]
        hire_date: Option<String>,
        #[arg(long = "bank-account")]
        bank_account: String,
        #[arg(long = "bank-name")]
        bank_name: String,
        #[arg(long)]
        province: String,
    },
    /// List teachers.
    List {
        /// Match name (case-insensitive) or phone
        #[arg(long)]
        search: Option<String>,
        /// Hire date from: YYYY-MM-DD
        #[arg(long = "from")]
        from_date: Option<String>,
        /// Hire date to: YYYY-MM-DD
        #[arg(long = "to")]
        to_date: Option<String>,
    },
    /// Update a teacher. Omitted fields keep their value; all must end up non-empty.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "id-number")]
        id_number: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long = "hire-date")]
        hire_date: Option<String>,
        #[arg(long = "bank-account")]
        bank_account: Option<String>,
        #[arg(long = "bank-name")]
        bank_name: Option<String>,
        #[arg(long)]
        province: Option<String>,
    },
    /// Remove a teacher from the directory.
    Delete {
        id: i64,
    },
}

pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn date_or_today(date: Option<&str>) -> Result<chrono::NaiveDate> {
    match date {
        Some(d) => crate::filter::parse_date(d),
        None => Ok(today()),
    }
}
