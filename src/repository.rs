//! In-memory store of course ledgers and the teacher directory.
//!
//! Every mutation validates first and commits second, so a rejected call
//! leaves the store exactly as it was. Ledger, teacher and record ids come
//! from counters that only move forward; a deleted id is never handed out
//! again.

use serde::{Deserialize, Serialize};

use crate::error::{BookError, Result};
use crate::models::{
    CourseFields, CourseLedger, CoursePatch, PurchaseEntry, RecordEntry, RecordKind,
    SettlementEntry, TeacherFields, TeacherRecord,
};
use crate::validation::Validators;

/// Serializable contents of a [`Repository`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub courses: Vec<CourseLedger>,
    #[serde(default)]
    pub teachers: Vec<TeacherRecord>,
    #[serde(default = "first_id")]
    pub next_course_id: i64,
    #[serde(default = "first_id")]
    pub next_record_id: i64,
    #[serde(default = "first_id")]
    pub next_teacher_id: i64,
}

fn first_id() -> i64 {
    1
}

pub struct Repository {
    book: Workbook,
    validators: Validators,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new(Validators::standard())
    }
}

impl Repository {
    pub fn new(validators: Validators) -> Self {
        Self::from_workbook(
            Workbook {
                next_course_id: 1,
                next_record_id: 1,
                next_teacher_id: 1,
                ..Default::default()
            },
            validators,
        )
    }

    pub fn from_workbook(mut book: Workbook, validators: Validators) -> Self {
        // Counters must stay ahead of every id already in the book.
        let max_course = book.courses.iter().map(|c| c.id).max().unwrap_or(0);
        let max_record = book
            .courses
            .iter()
            .flat_map(|c| {
                c.purchases
                    .iter()
                    .map(|p| p.id)
                    .chain(c.settlements.iter().map(|s| s.id))
            })
            .max()
            .unwrap_or(0);
        let max_teacher = book.teachers.iter().map(|t| t.id).max().unwrap_or(0);
        book.next_course_id = book.next_course_id.max(max_course + 1);
        book.next_record_id = book.next_record_id.max(max_record + 1);
        book.next_teacher_id = book.next_teacher_id.max(max_teacher + 1);
        Self { book, validators }
    }

    pub fn workbook(&self) -> &Workbook {
        &self.book
    }

    // -----------------------------------------------------------------------
    // Courses
    // -----------------------------------------------------------------------

    /// All courses in insertion order.
    pub fn ledgers(&self) -> &[CourseLedger] {
        &self.book.courses
    }

    pub fn ledger(&self, id: i64) -> Result<&CourseLedger> {
        self.book
            .courses
            .iter()
            .find(|c| c.id == id)
            .ok_or(BookError::LedgerNotFound(id))
    }

    fn ledger_mut(&mut self, id: i64) -> Result<&mut CourseLedger> {
        self.book
            .courses
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(BookError::LedgerNotFound(id))
    }

    pub fn create_ledger(&mut self, fields: CourseFields) -> Result<&CourseLedger> {
        self.validators.course.validate(&fields).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected new course");
        })?;
        let id = self.book.next_course_id;
        self.book.next_course_id += 1;
        self.book.courses.push(CourseLedger::from_fields(id, fields));
        tracing::info!(course = id, "created course");
        self.ledger(id)
    }

    pub fn update_ledger(&mut self, id: i64, patch: CoursePatch) -> Result<&CourseLedger> {
        let current = self.ledger(id)?.fields();
        let updated = patch.apply_to(current);
        self.validators.course.validate(&updated).inspect_err(|e| {
            tracing::warn!(course = id, error = %e, "rejected course update");
        })?;
        self.ledger_mut(id)?.apply_fields(updated);
        tracing::info!(course = id, "updated course");
        self.ledger(id)
    }

    pub fn delete_ledger(&mut self, id: i64) -> Result<CourseLedger> {
        let pos = self
            .book
            .courses
            .iter()
            .position(|c| c.id == id)
            .ok_or(BookError::LedgerNotFound(id))?;
        let removed = self.book.courses.remove(pos);
        tracing::info!(course = id, "deleted course");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    fn next_record_id(&mut self) -> i64 {
        let id = self.book.next_record_id;
        self.book.next_record_id += 1;
        id
    }

    pub fn append_purchase(&mut self, id: i64, entry: PurchaseEntry) -> Result<i64> {
        self.ledger(id)?;
        self.validators.purchase.validate(&entry).inspect_err(|e| {
            tracing::warn!(course = id, error = %e, "rejected purchase record");
        })?;
        let record_id = self.next_record_id();
        self.ledger_mut(id)?.purchases.push(entry.into_record(record_id));
        tracing::info!(course = id, record = record_id, "added purchase record");
        Ok(record_id)
    }

    pub fn append_settlement(&mut self, id: i64, entry: SettlementEntry) -> Result<i64> {
        self.ledger(id)?;
        self.validators.settlement.validate(&entry).inspect_err(|e| {
            tracing::warn!(course = id, error = %e, "rejected settlement record");
        })?;
        let record_id = self.next_record_id();
        self.ledger_mut(id)?.settlements.push(entry.into_record(record_id));
        tracing::info!(course = id, record = record_id, "added settlement record");
        Ok(record_id)
    }

    /// Replace a record in place. It keeps its id and its position.
    pub fn edit_record(&mut self, id: i64, record_id: i64, entry: RecordEntry) -> Result<()> {
        let kind = entry.kind();
        let not_found = BookError::RecordNotFound {
            ledger: id,
            kind,
            id: record_id,
        };
        match entry {
            RecordEntry::Purchase(entry) => {
                let pos = self
                    .ledger(id)?
                    .purchases
                    .iter()
                    .position(|p| p.id == record_id)
                    .ok_or(not_found)?;
                self.validators.purchase.validate(&entry).inspect_err(|e| {
                    tracing::warn!(course = id, record = record_id, error = %e, "rejected purchase edit");
                })?;
                self.ledger_mut(id)?.purchases[pos] = entry.into_record(record_id);
            }
            RecordEntry::Settlement(entry) => {
                let pos = self
                    .ledger(id)?
                    .settlements
                    .iter()
                    .position(|s| s.id == record_id)
                    .ok_or(not_found)?;
                self.validators.settlement.validate(&entry).inspect_err(|e| {
                    tracing::warn!(course = id, record = record_id, error = %e, "rejected settlement edit");
                })?;
                self.ledger_mut(id)?.settlements[pos] = entry.into_record(record_id);
            }
        }
        tracing::info!(course = id, record = record_id, %kind, "edited record");
        Ok(())
    }

    pub fn delete_record(&mut self, id: i64, kind: RecordKind, record_id: i64) -> Result<()> {
        let ledger = self.ledger_mut(id)?;
        let removed = match kind {
            RecordKind::Purchase => remove_by_id(&mut ledger.purchases, |p| p.id == record_id),
            RecordKind::Settlement => remove_by_id(&mut ledger.settlements, |s| s.id == record_id),
        };
        if !removed {
            return Err(BookError::RecordNotFound {
                ledger: id,
                kind,
                id: record_id,
            });
        }
        tracing::info!(course = id, record = record_id, %kind, "deleted record");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Teachers
    // -----------------------------------------------------------------------

    pub fn teachers(&self) -> &[TeacherRecord] {
        &self.book.teachers
    }

    pub fn teacher(&self, id: i64) -> Result<&TeacherRecord> {
        self.book
            .teachers
            .iter()
            .find(|t| t.id == id)
            .ok_or(BookError::TeacherNotFound(id))
    }

    pub fn add_teacher(&mut self, fields: TeacherFields) -> Result<&TeacherRecord> {
        self.validators.teacher.validate(&fields).inspect_err(|e| {
            tracing::warn!(error = %e, "rejected new teacher");
        })?;
        let id = self.book.next_teacher_id;
        self.book.next_teacher_id += 1;
        self.book.teachers.push(fields.into_record(id));
        tracing::info!(teacher = id, "added teacher");
        self.teacher(id)
    }

    pub fn update_teacher(&mut self, id: i64, fields: TeacherFields) -> Result<&TeacherRecord> {
        let pos = self
            .book
            .teachers
            .iter()
            .position(|t| t.id == id)
            .ok_or(BookError::TeacherNotFound(id))?;
        self.validators.teacher.validate(&fields).inspect_err(|e| {
            tracing::warn!(teacher = id, error = %e, "rejected teacher update");
        })?;
        self.book.teachers[pos] = fields.into_record(id);
        tracing::info!(teacher = id, "updated teacher");
        Ok(&self.book.teachers[pos])
    }

    pub fn delete_teacher(&mut self, id: i64) -> Result<TeacherRecord> {
        let pos = self
            .book
            .teachers
            .iter()
            .position(|t| t.id == id)
            .ok_or(BookError::TeacherNotFound(id))?;
        tracing::info!(teacher = id, "deleted teacher");
        Ok(self.book.teachers.remove(pos))
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, is_target: impl Fn(&T) -> bool) -> bool {
    match items.iter().position(is_target) {
        Some(pos) => {
            items.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::ledger;
    use crate::models::{CourseStatus, CourseType};

    pub(crate) fn fields(original: f64, current: f64, hours: f64) -> CourseFields {
        CourseFields {
            teacher_name: "Zhang San".to_string(),
            parent_name: "Li Si".to_string(),
            contact_info: "13800138000".to_string(),
            matched_teacher: None,
            original_price: original,
            current_price: current,
            hours,
            course_type: CourseType::Prepaid,
            status: CourseStatus::Active,
            purchase_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            trial_fee: 0.0,
        }
    }

    fn purchase(hours: f64, original: f64, current: f64) -> PurchaseEntry {
        PurchaseEntry {
            date: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
            hours,
            original_price: original,
            current_price: current,
        }
    }

    fn settlement(month: &str, hours: f64, amount: f64) -> SettlementEntry {
        SettlementEntry {
            month: month.to_string(),
            amount,
            hours,
        }
    }

    fn teacher(name: &str) -> TeacherFields {
        TeacherFields {
            name: name.to_string(),
            id_number: "110101199001011234".to_string(),
            phone: "13800138000".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            bank_account: "6222021234567890123".to_string(),
            bank_name: "ICBC".to_string(),
            province: "Beijing".to_string(),
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut repo = Repository::default();
        let a = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let b = repo.create_ledger(fields(1500.0, 1400.0, 30.0)).unwrap().id;
        assert!(b > a);
        assert!(repo.ledger(a).unwrap().purchases.is_empty());
        assert!(repo.ledger(a).unwrap().settlements.is_empty());
    }

    #[test]
    fn test_rejected_price_edit_leaves_state() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let before = repo.ledger(id).unwrap().clone();
        let patch = CoursePatch {
            current_price: Some(1300.0),
            ..Default::default()
        };
        let err = repo.update_ledger(id, patch.clone()).unwrap_err();
        assert!(matches!(err, BookError::PriceExceedsOriginal { .. }));
        assert_eq!(repo.ledger(id).unwrap(), &before);
        // Rejecting twice is the same as rejecting once.
        assert!(repo.update_ledger(id, patch).is_err());
        assert_eq!(repo.ledger(id).unwrap().current_price, 1000.0);
    }

    #[test]
    fn test_update_applies_patch() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let patch = CoursePatch {
            current_price: Some(1100.0),
            status: Some(CourseStatus::Completed),
            matched_teacher: Some("Teacher Zhang".to_string()),
            ..Default::default()
        };
        let updated = repo.update_ledger(id, patch).unwrap();
        assert_eq!(updated.current_price, 1100.0);
        assert_eq!(updated.status, CourseStatus::Completed);
        assert_eq!(updated.matched_teacher.as_deref(), Some("Teacher Zhang"));
        assert_eq!(updated.parent_name, "Li Si");
    }

    #[test]
    fn test_update_missing_course() {
        let mut repo = Repository::default();
        let err = repo.update_ledger(42, CoursePatch::default()).unwrap_err();
        assert!(matches!(err, BookError::LedgerNotFound(42)));
    }

    #[test]
    fn test_purchase_price_cap() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let err = repo.append_purchase(id, purchase(5.0, 200.0, 250.0)).unwrap_err();
        assert!(matches!(err, BookError::PriceExceedsOriginal { .. }));
        assert!(repo.ledger(id).unwrap().purchases.is_empty());

        repo.append_purchase(id, purchase(5.0, 300.0, 200.0)).unwrap();
        let (hours, amount) = ledger::total_purchased(repo.ledger(id).unwrap());
        assert_eq!(hours, 25.0);
        assert_eq!(amount, 1200.0);
    }

    #[test]
    fn test_settlements_drive_profit() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        repo.append_settlement(id, settlement("2023-07", 5.0, 250.0)).unwrap();
        assert_eq!(ledger::profit(repo.ledger(id).unwrap()), 0.0);
        repo.append_settlement(id, settlement("2023-08", 5.0, 200.0)).unwrap();
        let t = ledger::totals(repo.ledger(id).unwrap());
        assert_eq!(t.consumed_hours, 10.0);
        assert_eq!(t.settled_amount, 450.0);
        assert_eq!(t.profit, 50.0);
    }

    #[test]
    fn test_append_to_missing_course() {
        let mut repo = Repository::default();
        let err = repo.append_settlement(7, settlement("2023-07", 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, BookError::LedgerNotFound(7)));
    }

    #[test]
    fn test_edit_record_keeps_id_and_position() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let first = repo.append_settlement(id, settlement("2023-07", 5.0, 250.0)).unwrap();
        let second = repo.append_settlement(id, settlement("2023-08", 5.0, 200.0)).unwrap();
        repo.edit_record(id, first, RecordEntry::Settlement(settlement("2023-07", 4.0, 180.0)))
            .unwrap();
        let l = repo.ledger(id).unwrap();
        assert_eq!(l.settlements[0].id, first);
        assert_eq!(l.settlements[0].hours, 4.0);
        assert_eq!(l.settlements[1].id, second);
    }

    #[test]
    fn test_edit_record_rejects_markup() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let rec = repo.append_purchase(id, purchase(5.0, 300.0, 200.0)).unwrap();
        let err = repo
            .edit_record(id, rec, RecordEntry::Purchase(purchase(5.0, 300.0, 400.0)))
            .unwrap_err();
        assert!(matches!(err, BookError::PriceExceedsOriginal { .. }));
        assert_eq!(repo.ledger(id).unwrap().purchases[0].current_price, 200.0);
    }

    #[test]
    fn test_edit_record_wrong_kind_is_not_found() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let rec = repo.append_purchase(id, purchase(5.0, 300.0, 200.0)).unwrap();
        let err = repo
            .edit_record(id, rec, RecordEntry::Settlement(settlement("2023-07", 1.0, 1.0)))
            .unwrap_err();
        assert!(matches!(
            err,
            BookError::RecordNotFound { kind: RecordKind::Settlement, .. }
        ));
    }

    #[test]
    fn test_delete_then_readd_appends_with_new_id() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let a = repo.append_settlement(id, settlement("2023-07", 1.0, 50.0)).unwrap();
        let b = repo.append_settlement(id, settlement("2023-08", 2.0, 100.0)).unwrap();
        repo.delete_record(id, RecordKind::Settlement, a).unwrap();
        let c = repo.append_settlement(id, settlement("2023-07", 1.0, 50.0)).unwrap();
        assert!(c > b);
        let months: Vec<&str> = repo
            .ledger(id)
            .unwrap()
            .settlements
            .iter()
            .map(|s| s.month.as_str())
            .collect();
        assert_eq!(months, vec!["2023-08", "2023-07"]);
        // Surviving ids still address the same record.
        repo.delete_record(id, RecordKind::Settlement, b).unwrap();
        assert_eq!(repo.ledger(id).unwrap().settlements[0].id, c);
    }

    #[test]
    fn test_delete_missing_record() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let err = repo.delete_record(id, RecordKind::Purchase, 99).unwrap_err();
        assert_eq!(err.to_string(), format!("No purchase record with ID 99 on course {id}"));
    }

    #[test]
    fn test_delete_ledger() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        assert_eq!(repo.delete_ledger(id).unwrap().id, id);
        assert!(repo.ledgers().is_empty());
        assert!(matches!(repo.delete_ledger(id), Err(BookError::LedgerNotFound(_))));
        let next = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        assert_ne!(next, id);
    }

    #[test]
    fn test_valid_appends_keep_invariants() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        repo.append_purchase(id, purchase(0.0, 0.0, 0.0)).unwrap();
        repo.append_settlement(id, settlement("2023-07", 0.0, 0.0)).unwrap();
        assert!(repo.append_purchase(id, purchase(-3.0, 100.0, 90.0)).is_err());
        assert!(repo.append_settlement(id, settlement("2023-08", 1.0, -5.0)).is_err());
        let t = ledger::totals(repo.ledger(id).unwrap());
        assert!(t.purchased_hours >= 20.0);
        assert!(t.settled_amount >= 0.0);
    }

    #[test]
    fn test_teacher_update_requires_all_fields() {
        let mut repo = Repository::default();
        let id = repo.add_teacher(teacher("Zhang San")).unwrap().id;
        let mut blank = teacher("Zhang San");
        blank.province = String::new();
        assert!(matches!(repo.update_teacher(id, blank), Err(BookError::Validation(_))));
        assert_eq!(repo.teacher(id).unwrap().province, "Beijing");

        let updated = repo.update_teacher(id, teacher("Zhang Wei")).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Zhang Wei");
        assert!(matches!(
            repo.update_teacher(id + 1, teacher("X")),
            Err(BookError::TeacherNotFound(_))
        ));
    }

    #[test]
    fn test_strict_validators_are_injected() {
        let mut repo = Repository::new(Validators::strict().unwrap());
        let mut t = teacher("Zhang San");
        t.phone = "800-TUTORS".to_string();
        assert!(repo.add_teacher(t).is_err());
        assert!(repo.teachers().is_empty());
    }

    #[test]
    fn test_from_workbook_advances_counters() {
        let mut repo = Repository::default();
        let id = repo.create_ledger(fields(1200.0, 1000.0, 20.0)).unwrap().id;
        let rec = repo.append_settlement(id, settlement("2023-07", 1.0, 50.0)).unwrap();
        let mut book = repo.workbook().clone();
        book.next_course_id = 1;
        book.next_record_id = 1;
        let mut repo = Repository::from_workbook(book, Validators::standard());
        assert!(repo.create_ledger(fields(1.0, 1.0, 1.0)).unwrap().id > id);
        assert!(repo.append_purchase(id, purchase(1.0, 1.0, 1.0)).unwrap() > rec);
    }
}
