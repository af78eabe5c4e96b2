use std::fmt;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Prepaid,
    Postpaid,
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseType::Prepaid => write!(f, "prepaid"),
            CourseType::Postpaid => write!(f, "postpaid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Active,
    Completed,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseStatus::Active => write!(f, "active"),
            CourseStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Purchase,
    Settlement,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Purchase => write!(f, "purchase"),
            RecordKind::Settlement => write!(f, "settlement"),
        }
    }
}

/// A top-up of hours bought after the initial signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub hours: f64,
    pub original_price: f64,
    pub current_price: f64,
}

/// Hours delivered and paid out to the teacher for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub id: i64,
    /// `YYYY-MM`
    pub month: String,
    pub amount: f64,
    pub hours: f64,
}

/// One course contract between a household and the brokerage, with its
/// purchase and settlement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLedger {
    pub id: i64,
    pub teacher_name: String,
    pub parent_name: String,
    pub contact_info: String,
    #[serde(default)]
    pub matched_teacher: Option<String>,
    pub original_price: f64,
    pub current_price: f64,
    pub hours: f64,
    pub course_type: CourseType,
    pub status: CourseStatus,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub trial_fee: f64,
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
    #[serde(default)]
    pub settlements: Vec<SettlementRecord>,
}

impl CourseLedger {
    pub(crate) fn from_fields(id: i64, fields: CourseFields) -> Self {
        Self {
            id,
            teacher_name: fields.teacher_name,
            parent_name: fields.parent_name,
            contact_info: fields.contact_info,
            matched_teacher: fields.matched_teacher,
            original_price: fields.original_price,
            current_price: fields.current_price,
            hours: fields.hours,
            course_type: fields.course_type,
            status: fields.status,
            purchase_date: fields.purchase_date,
            trial_fee: fields.trial_fee,
            purchases: Vec::new(),
            settlements: Vec::new(),
        }
    }

    pub fn fields(&self) -> CourseFields {
        CourseFields {
            teacher_name: self.teacher_name.clone(),
            parent_name: self.parent_name.clone(),
            contact_info: self.contact_info.clone(),
            matched_teacher: self.matched_teacher.clone(),
            original_price: self.original_price,
            current_price: self.current_price,
            hours: self.hours,
            course_type: self.course_type,
            status: self.status,
            purchase_date: self.purchase_date,
            trial_fee: self.trial_fee,
        }
    }

    pub(crate) fn apply_fields(&mut self, fields: CourseFields) {
        self.teacher_name = fields.teacher_name;
        self.parent_name = fields.parent_name;
        self.contact_info = fields.contact_info;
        self.matched_teacher = fields.matched_teacher;
        self.original_price = fields.original_price;
        self.current_price = fields.current_price;
        self.hours = fields.hours;
        self.course_type = fields.course_type;
        self.status = fields.status;
        self.purchase_date = fields.purchase_date;
        self.trial_fee = fields.trial_fee;
    }
}

/// Everything a course carries apart from its id and records.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    pub teacher_name: String,
    pub parent_name: String,
    pub contact_info: String,
    pub matched_teacher: Option<String>,
    pub original_price: f64,
    pub current_price: f64,
    pub hours: f64,
    pub course_type: CourseType,
    pub status: CourseStatus,
    pub purchase_date: NaiveDate,
    pub trial_fee: f64,
}

/// Partial update for a course. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub teacher_name: Option<String>,
    pub parent_name: Option<String>,
    pub contact_info: Option<String>,
    pub matched_teacher: Option<String>,
    pub original_price: Option<f64>,
    pub current_price: Option<f64>,
    pub hours: Option<f64>,
    pub course_type: Option<CourseType>,
    pub status: Option<CourseStatus>,
    pub purchase_date: Option<NaiveDate>,
    pub trial_fee: Option<f64>,
}

impl CoursePatch {
    pub fn apply_to(self, mut fields: CourseFields) -> CourseFields {
        if let Some(v) = self.teacher_name {
            fields.teacher_name = v;
        }
        if let Some(v) = self.parent_name {
            fields.parent_name = v;
        }
        if let Some(v) = self.contact_info {
            fields.contact_info = v;
        }
        if let Some(v) = self.matched_teacher {
            // An empty name clears the match.
            fields.matched_teacher = if v.trim().is_empty() { None } else { Some(v) };
        }
        if let Some(v) = self.original_price {
            fields.original_price = v;
        }
        if let Some(v) = self.current_price {
            fields.current_price = v;
        }
        if let Some(v) = self.hours {
            fields.hours = v;
        }
        if let Some(v) = self.course_type {
            fields.course_type = v;
        }
        if let Some(v) = self.status {
            fields.status = v;
        }
        if let Some(v) = self.purchase_date {
            fields.purchase_date = v;
        }
        if let Some(v) = self.trial_fee {
            fields.trial_fee = v;
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        *self == CoursePatch::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseEntry {
    pub date: NaiveDate,
    pub hours: f64,
    pub original_price: f64,
    pub current_price: f64,
}

impl PurchaseEntry {
    pub(crate) fn into_record(self, id: i64) -> PurchaseRecord {
        PurchaseRecord {
            id,
            date: self.date,
            hours: self.hours,
            original_price: self.original_price,
            current_price: self.current_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettlementEntry {
    pub month: String,
    pub amount: f64,
    pub hours: f64,
}

impl SettlementEntry {
    pub(crate) fn into_record(self, id: i64) -> SettlementRecord {
        SettlementRecord {
            id,
            month: self.month,
            amount: self.amount,
            hours: self.hours,
        }
    }
}

/// Replacement contents for an existing record; the variant picks the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordEntry {
    Purchase(PurchaseEntry),
    Settlement(SettlementEntry),
}

impl RecordEntry {
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordEntry::Purchase(_) => RecordKind::Purchase,
            RecordEntry::Settlement(_) => RecordKind::Settlement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRecord {
    pub id: i64,
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub bank_account: String,
    pub bank_name: String,
    pub province: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherFields {
    pub name: String,
    pub id_number: String,
    pub phone: String,
    pub hire_date: NaiveDate,
    pub bank_account: String,
    pub bank_name: String,
    pub province: String,
}

impl TeacherFields {
    pub(crate) fn into_record(self, id: i64) -> TeacherRecord {
        TeacherRecord {
            id,
            name: self.name,
            id_number: self.id_number,
            phone: self.phone,
            hire_date: self.hire_date,
            bank_account: self.bank_account,
            bank_name: self.bank_name,
            province: self.province,
        }
    }
}
