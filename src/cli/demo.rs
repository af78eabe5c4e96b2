use chrono::NaiveDate;

use crate::cli::Context;
use crate::error::{BookError, Result};
use crate::models::{
    CourseFields, CourseStatus, CourseType, PurchaseEntry, SettlementEntry, TeacherFields,
};
use crate::repository::Repository;

struct DemoCourse {
    teacher: &'static str,
    parent: &'static str,
    contact: &'static str,
    original_price: f64,
    current_price: f64,
    hours: f64,
    course_type: CourseType,
    status: CourseStatus,
    purchased: (i32, u32, u32),
    /// (date, hours, original, current)
    top_up: ((i32, u32, u32), f64, f64, f64),
    /// (month, amount, hours)
    settlements: &'static [(&'static str, f64, f64)],
}

const COURSES: &[DemoCourse] = &[
    DemoCourse {
        teacher: "Zhang San",
        parent: "Li Si",
        contact: "13800138000",
        original_price: 1200.0,
        current_price: 1000.0,
        hours: 20.0,
        course_type: CourseType::Prepaid,
        status: CourseStatus::Active,
        purchased: (2023, 6, 1),
        top_up: ((2023, 7, 10), 4.0, 240.0, 200.0),
        settlements: &[("2023-06", 250.0, 5.0)],
    },
    DemoCourse {
        teacher: "Wang Wu",
        parent: "Zhao Liu",
        contact: "13900139000",
        original_price: 1500.0,
        current_price: 1400.0,
        hours: 30.0,
        course_type: CourseType::Postpaid,
        status: CourseStatus::Active,
        purchased: (2023, 5, 15),
        top_up: ((2023, 6, 20), 6.0, 320.0, 300.0),
        settlements: &[("2023-05", 500.0, 10.0)],
    },
    DemoCourse {
        teacher: "Qian Qi",
        parent: "Sun Ba",
        contact: "13700137000",
        original_price: 1000.0,
        current_price: 900.0,
        hours: 15.0,
        course_type: CourseType::Prepaid,
        status: CourseStatus::Completed,
        purchased: (2023, 4, 20),
        top_up: ((2023, 5, 2), 2.0, 120.0, 100.0),
        settlements: &[("2023-04", 900.0, 15.0)],
    },
];

fn ymd((y, m, d): (i32, u32, u32)) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| BookError::Other(format!("invalid demo date {y}-{m}-{d}")))
}

fn demo_teacher() -> Result<TeacherFields> {
    Ok(TeacherFields {
        name: "Zhang San".to_string(),
        id_number: DEMO_TEACHER_ID_NUMBER.to_string(),
        phone: "13800138000".to_string(),
        hire_date: ymd((2023, 1, 1))?,
        bank_account: "6222021234567890123".to_string(),
        bank_name: "ICBC".to_string(),
        province: "Beijing".to_string(),
    })
}

const DEMO_TEACHER_ID_NUMBER: &str = "110101199001011234";

/// True once any demo course or the demo teacher is present, even after
/// some of them were deleted.
fn already_loaded(repo: &Repository) -> bool {
    let course_present = repo.ledgers().iter().any(|c| {
        COURSES
            .iter()
            .any(|d| c.teacher_name == d.teacher && c.parent_name == d.parent)
    });
    course_present
        || repo
            .teachers()
            .iter()
            .any(|t| t.id_number == DEMO_TEACHER_ID_NUMBER)
}

/// Insert the sample courses and teacher. Returns the number of courses added.
pub fn insert_demo_data(repo: &mut Repository) -> Result<usize> {
    for demo in COURSES {
        let id = repo
            .create_ledger(CourseFields {
                teacher_name: demo.teacher.to_string(),
                parent_name: demo.parent.to_string(),
                contact_info: demo.contact.to_string(),
                matched_teacher: None,
                original_price: demo.original_price,
                current_price: demo.current_price,
                hours: demo.hours,
                course_type: demo.course_type,
                status: demo.status,
                purchase_date: ymd(demo.purchased)?,
                trial_fee: 0.0,
            })?
            .id;
        let (date, hours, original_price, current_price) = demo.top_up;
        repo.append_purchase(
            id,
            PurchaseEntry {
                date: ymd(date)?,
                hours,
                original_price,
                current_price,
            },
        )?;
        for (month, amount, hours) in demo.settlements {
            repo.append_settlement(
                id,
                SettlementEntry {
                    month: month.to_string(),
                    amount: *amount,
                    hours: *hours,
                },
            )?;
        }
    }
    repo.add_teacher(demo_teacher()?)?;
    Ok(COURSES.len())
}

pub fn run(ctx: &mut Context) -> Result<()> {
    if already_loaded(&ctx.repo) {
        println!("Demo data already loaded.");
        return Ok(());
    }

    let count = insert_demo_data(&mut ctx.repo)?;
    ctx.save()?;

    println!("Demo data loaded!");
    println!("  Courses:   {count}");
    println!("  Teachers:  1");
    println!();
    println!("Try these next:");
    println!("  tutorbook courses list");
    println!("  tutorbook courses show 1");
    println!("  tutorbook courses list --status completed");
    println!("  tutorbook teachers list");

    Ok(())
}
