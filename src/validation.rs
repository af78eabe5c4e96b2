//! Field rules applied before any mutation reaches the repository.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s; the first failing rule
//! decides the error. [`Validators`] bundles one rule set per input type so
//! format checks can be added without touching the repository or the CLI.

use regex::Regex;

use crate::error::{BookError, Result};
use crate::models::{CourseFields, PurchaseEntry, SettlementEntry, TeacherFields};

pub trait Rule<T> {
    fn check(&self, value: &T) -> Result<()>;
}

pub struct RuleSet<T> {
    rules: Vec<Box<dyn Rule<T>>>,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<T> RuleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rule: impl Rule<T> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn validate(&self, value: &T) -> Result<()> {
        self.rules.iter().try_for_each(|rule| rule.check(value))
    }
}

/// Text field must be present and not blank.
pub struct Required<T> {
    field: &'static str,
    get: fn(&T) -> &str,
}

impl<T> Required<T> {
    pub fn new(field: &'static str, get: fn(&T) -> &str) -> Self {
        Self { field, get }
    }
}

impl<T> Rule<T> for Required<T> {
    fn check(&self, value: &T) -> Result<()> {
        if (self.get)(value).trim().is_empty() {
            return Err(BookError::Validation(format!("{} is required", self.field)));
        }
        Ok(())
    }
}

/// Numeric field must be a finite value of at least zero.
pub struct NonNegative<T> {
    field: &'static str,
    get: fn(&T) -> f64,
}

impl<T> NonNegative<T> {
    pub fn new(field: &'static str, get: fn(&T) -> f64) -> Self {
        Self { field, get }
    }
}

impl<T> Rule<T> for NonNegative<T> {
    fn check(&self, value: &T) -> Result<()> {
        let v = (self.get)(value);
        if !v.is_finite() || v < 0.0 {
            return Err(BookError::Validation(format!(
                "{} must be zero or more (got {v})",
                self.field
            )));
        }
        Ok(())
    }
}

/// Current price may not exceed the original price it was discounted from.
pub struct PriceCap<T> {
    get: fn(&T) -> (f64, f64),
}

impl<T> PriceCap<T> {
    /// `get` returns `(original, current)`.
    pub fn new(get: fn(&T) -> (f64, f64)) -> Self {
        Self { get }
    }
}

impl<T> Rule<T> for PriceCap<T> {
    fn check(&self, value: &T) -> Result<()> {
        let (original, current) = (self.get)(value);
        if current > original {
            return Err(BookError::PriceExceedsOriginal { current, original });
        }
        Ok(())
    }
}

/// Text field must match a regular expression.
pub struct Pattern<T> {
    field: &'static str,
    get: fn(&T) -> &str,
    re: Regex,
}

impl<T> Pattern<T> {
    pub fn new(field: &'static str, pattern: &str, get: fn(&T) -> &str) -> Result<Self> {
        let re = Regex::new(pattern)
            .map_err(|e| BookError::Other(format!("Invalid pattern for {field}: {e}")))?;
        Ok(Self { field, get, re })
    }
}

impl<T> Rule<T> for Pattern<T> {
    fn check(&self, value: &T) -> Result<()> {
        let v = (self.get)(value);
        if !self.re.is_match(v) {
            return Err(BookError::Validation(format!(
                "{} has an unexpected format: '{v}'",
                self.field
            )));
        }
        Ok(())
    }
}

/// Settlement month must be `YYYY-MM`.
pub struct MonthFormat;

impl Rule<SettlementEntry> for MonthFormat {
    fn check(&self, value: &SettlementEntry) -> Result<()> {
        crate::filter::parse_month(&value.month).map(|_| ())
    }
}

pub const PHONE_PATTERN: &str = r"^1\d{10}$";
pub const ID_NUMBER_PATTERN: &str = r"^\d{17}[\dXx]$";

pub struct Validators {
    pub course: RuleSet<CourseFields>,
    pub purchase: RuleSet<PurchaseEntry>,
    pub settlement: RuleSet<SettlementEntry>,
    pub teacher: RuleSet<TeacherFields>,
}

impl Default for Validators {
    fn default() -> Self {
        Self::standard()
    }
}

impl Validators {
    /// Presence checks on text, non-negative numbers and the price cap.
    pub fn standard() -> Self {
        let course = RuleSet::new()
            .with(Required::new("teacher name", |c: &CourseFields| c.teacher_name.as_str()))
            .with(Required::new("parent name", |c: &CourseFields| c.parent_name.as_str()))
            .with(Required::new("contact info", |c: &CourseFields| c.contact_info.as_str()))
            .with(NonNegative::new("original price", |c: &CourseFields| c.original_price))
            .with(NonNegative::new("current price", |c: &CourseFields| c.current_price))
            .with(NonNegative::new("hours", |c: &CourseFields| c.hours))
            .with(NonNegative::new("trial fee", |c: &CourseFields| c.trial_fee))
            .with(PriceCap::new(|c: &CourseFields| (c.original_price, c.current_price)));

        let purchase = RuleSet::new()
            .with(NonNegative::new("hours", |p: &PurchaseEntry| p.hours))
            .with(NonNegative::new("original price", |p: &PurchaseEntry| p.original_price))
            .with(NonNegative::new("current price", |p: &PurchaseEntry| p.current_price))
            .with(PriceCap::new(|p: &PurchaseEntry| (p.original_price, p.current_price)));

        let settlement = RuleSet::new()
            .with(MonthFormat)
            .with(NonNegative::new("amount", |s: &SettlementEntry| s.amount))
            .with(NonNegative::new("hours", |s: &SettlementEntry| s.hours));

        let teacher = RuleSet::new()
            .with(Required::new("name", |t: &TeacherFields| t.name.as_str()))
            .with(Required::new("ID number", |t: &TeacherFields| t.id_number.as_str()))
            .with(Required::new("phone", |t: &TeacherFields| t.phone.as_str()))
            .with(Required::new("bank account", |t: &TeacherFields| t.bank_account.as_str()))
            .with(Required::new("bank name", |t: &TeacherFields| t.bank_name.as_str()))
            .with(Required::new("province", |t: &TeacherFields| t.province.as_str()));

        Self {
            course,
            purchase,
            settlement,
            teacher,
        }
    }

    /// Standard rules plus phone and government ID format checks on teachers.
    pub fn strict() -> Result<Self> {
        let mut v = Self::standard();
        v.teacher = v
            .teacher
            .with(Pattern::new("phone", PHONE_PATTERN, |t: &TeacherFields| t.phone.as_str())?)
            .with(Pattern::new("ID number", ID_NUMBER_PATTERN, |t: &TeacherFields| {
                t.id_number.as_str()
            })?);
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{CourseStatus, CourseType};

    fn course() -> CourseFields {
        CourseFields {
            teacher_name: "Wang Wu".to_string(),
            parent_name: "Zhao Liu".to_string(),
            contact_info: "13900139000".to_string(),
            matched_teacher: None,
            original_price: 1500.0,
            current_price: 1400.0,
            hours: 30.0,
            course_type: CourseType::Postpaid,
            status: CourseStatus::Active,
            purchase_date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
            trial_fee: 0.0,
        }
    }

    fn teacher() -> TeacherFields {
        TeacherFields {
            name: "Zhang San".to_string(),
            id_number: "110101199001011234".to_string(),
            phone: "13800138000".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            bank_account: "6222021234567890123".to_string(),
            bank_name: "ICBC".to_string(),
            province: "Beijing".to_string(),
        }
    }

    #[test]
    fn test_standard_accepts_valid_course() {
        assert!(Validators::standard().course.validate(&course()).is_ok());
    }

    #[test]
    fn test_price_cap_rejects_markup() {
        let mut c = course();
        c.current_price = 1600.0;
        let err = Validators::standard().course.validate(&c).unwrap_err();
        assert!(matches!(
            err,
            BookError::PriceExceedsOriginal { current, original } if current == 1600.0 && original == 1500.0
        ));
    }

    #[test]
    fn test_price_cap_allows_equal_prices() {
        let mut c = course();
        c.current_price = c.original_price;
        assert!(Validators::standard().course.validate(&c).is_ok());
    }

    #[test]
    fn test_blank_teacher_field_rejected() {
        let mut t = teacher();
        t.bank_name = "   ".to_string();
        let err = Validators::standard().teacher.validate(&t).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: bank name is required");
    }

    #[test]
    fn test_standard_does_not_check_formats() {
        let mut t = teacher();
        t.phone = "call me".to_string();
        assert!(Validators::standard().teacher.validate(&t).is_ok());
    }

    #[test]
    fn test_strict_checks_phone_and_id_number() {
        let strict = Validators::strict().unwrap();
        assert!(strict.teacher.validate(&teacher()).is_ok());

        let mut t = teacher();
        t.phone = "call me".to_string();
        assert!(strict.teacher.validate(&t).is_err());

        let mut t = teacher();
        t.id_number = "11010119900101123X".to_string();
        assert!(strict.teacher.validate(&t).is_ok());
        t.id_number = "1234".to_string();
        assert!(strict.teacher.validate(&t).is_err());
    }

    #[test]
    fn test_negative_settlement_rejected() {
        let s = SettlementEntry {
            month: "2023-07".to_string(),
            amount: -10.0,
            hours: 1.0,
        };
        assert!(Validators::standard().settlement.validate(&s).is_err());
    }

    #[test]
    fn test_settlement_month_format() {
        let mut s = SettlementEntry {
            month: "2023-07".to_string(),
            amount: 10.0,
            hours: 1.0,
        };
        assert!(Validators::standard().settlement.validate(&s).is_ok());
        s.month = "July".to_string();
        assert!(Validators::standard().settlement.validate(&s).is_err());
    }

    #[test]
    fn test_custom_rule_plugs_in() {
        struct MaxHours(f64);
        impl Rule<PurchaseEntry> for MaxHours {
            fn check(&self, value: &PurchaseEntry) -> Result<()> {
                if value.hours > self.0 {
                    return Err(BookError::Validation("too many hours".to_string()));
                }
                Ok(())
            }
        }
        let rules = RuleSet::new().with(MaxHours(40.0));
        let entry = PurchaseEntry {
            date: NaiveDate::from_ymd_opt(2023, 8, 1).unwrap(),
            hours: 50.0,
            original_price: 100.0,
            current_price: 100.0,
        };
        assert!(rules.validate(&entry).is_err());
    }
}
