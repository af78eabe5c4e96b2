use comfy_table::{Cell, Table};

use crate::cli::{date_or_today, Context};
use crate::error::Result;
use crate::filter::{parse_date, DateRange, TeacherFilter};
use crate::models::TeacherFields;

#[allow(clippy::too_many_arguments)]
pub fn add(
    ctx: &mut Context,
    name: String,
    id_number: String,
    phone: String,
    hire_date: Option<String>,
    bank_account: String,
    bank_name: String,
    province: String,
) -> Result<()> {
    let fields = TeacherFields {
        name,
        id_number,
        phone,
        hire_date: date_or_today(hire_date.as_deref())?,
        bank_account,
        bank_name,
        province,
    };
    let teacher = ctx.repo.add_teacher(fields)?;
    println!("Added teacher {}: {}", teacher.id, teacher.name);
    ctx.save()
}

pub fn list(
    ctx: &Context,
    search: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
) -> Result<()> {
    let filter = TeacherFilter {
        query: search,
        dates: DateRange::from_bounds(from_date.as_deref(), to_date.as_deref())?,
    };

    let mut table = Table::new();
    table.set_header(vec![
        "ID", "Name", "ID Number", "Phone", "Hired", "Bank Account", "Bank", "Province",
    ]);
    for t in filter.apply(ctx.repo.teachers()) {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.name),
            Cell::new(&t.id_number),
            Cell::new(&t.phone),
            Cell::new(t.hire_date),
            Cell::new(&t.bank_account),
            Cell::new(&t.bank_name),
            Cell::new(&t.province),
        ]);
    }
    println!("Teachers\n{table}");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn edit(
    ctx: &mut Context,
    id: i64,
    name: Option<String>,
    id_number: Option<String>,
    phone: Option<String>,
    hire_date: Option<String>,
    bank_account: Option<String>,
    bank_name: Option<String>,
    province: Option<String>,
) -> Result<()> {
    let existing = ctx.repo.teacher(id)?.clone();
    let fields = TeacherFields {
        name: name.unwrap_or(existing.name),
        id_number: id_number.unwrap_or(existing.id_number),
        phone: phone.unwrap_or(existing.phone),
        hire_date: match hire_date {
            Some(d) => parse_date(&d)?,
            None => existing.hire_date,
        },
        bank_account: bank_account.unwrap_or(existing.bank_account),
        bank_name: bank_name.unwrap_or(existing.bank_name),
        province: province.unwrap_or(existing.province),
    };
    ctx.repo.update_teacher(id, fields)?;
    println!("Updated teacher {id}");
    ctx.save()
}

pub fn delete(ctx: &mut Context, id: i64) -> Result<()> {
    let removed = ctx.repo.delete_teacher(id)?;
    println!("Deleted teacher {id} ({})", removed.name);
    ctx.save()
}
