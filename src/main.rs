mod cli;
mod error;
mod export;
mod filter;
mod fmt;
mod ledger;
mod logging;
mod models;
mod reports;
mod repository;
mod settings;
mod validation;
mod workbook;

use clap::Parser;

use cli::{
    Cli, Commands, Context, CoursesCommands, PurchasesCommands, SettlementsCommands,
    TeachersCommands,
};
use error::Result;
use models::RecordKind;

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Init {
            data_dir,
            currency,
            page_size,
            strict,
        } => cli::init::run(data_dir, currency, page_size, strict),
        Commands::Demo => cli::demo::run(&mut Context::load()?),
        Commands::Status => cli::status::run(&Context::load()?),
        Commands::Dashboard { period } => cli::dashboard::run(&Context::load()?, period),
        Commands::Courses { command } => courses(&mut Context::load()?, command),
        Commands::Purchases { command } => purchases(&mut Context::load()?, command),
        Commands::Settlements { command } => settlements(&mut Context::load()?, command),
        Commands::Teachers { command } => teachers(&mut Context::load()?, command),
    }
}

fn courses(ctx: &mut Context, command: CoursesCommands) -> Result<()> {
    match command {
        CoursesCommands::Add {
            teacher,
            parent,
            contact,
            original_price,
            current_price,
            hours,
            course_type,
            status,
            date,
            trial_fee,
            matched_teacher,
        } => cli::courses::add(
            ctx,
            teacher,
            parent,
            contact,
            original_price,
            current_price,
            hours,
            course_type,
            status,
            date,
            trial_fee,
            matched_teacher,
        ),
        CoursesCommands::List { query, page } => cli::courses::list(ctx, &query, page),
        CoursesCommands::Show { id } => cli::courses::show(ctx, id),
        CoursesCommands::Edit {
            id,
            teacher,
            parent,
            contact,
            original_price,
            current_price,
            hours,
            course_type,
            status,
            date,
            trial_fee,
            matched_teacher,
        } => cli::courses::edit(
            ctx,
            id,
            teacher,
            parent,
            contact,
            original_price,
            current_price,
            hours,
            course_type,
            status,
            date,
            trial_fee,
            matched_teacher,
        ),
        CoursesCommands::Delete { id } => cli::courses::delete(ctx, id),
        CoursesCommands::Export { query, output } => {
            cli::courses::export(ctx, &query, output)
        }
    }
}

fn purchases(ctx: &mut Context, command: PurchasesCommands) -> Result<()> {
    match command {
        PurchasesCommands::Add {
            course,
            date,
            hours,
            original_price,
            current_price,
        } => cli::records::add_purchase(
            ctx,
            course,
            date,
            hours,
            original_price,
            current_price,
        ),
        PurchasesCommands::Edit {
            course,
            record,
            date,
            hours,
            original_price,
            current_price,
        } => cli::records::edit_purchase(
            ctx,
            course,
            record,
            date,
            hours,
            original_price,
            current_price,
        ),
        PurchasesCommands::Delete { course, record } => {
            cli::records::delete(ctx, course, RecordKind::Purchase, record)
        }
    }
}

fn settlements(ctx: &mut Context, command: SettlementsCommands) -> Result<()> {
    match command {
        SettlementsCommands::Add {
            course,
            month,
            amount,
            hours,
        } => cli::records::add_settlement(ctx, course, month, amount, hours),
        SettlementsCommands::Edit {
            course,
            record,
            month,
            amount,
            hours,
        } => cli::records::edit_settlement(ctx, course, record, month, amount, hours),
        SettlementsCommands::Delete { course, record } => {
            cli::records::delete(ctx, course, RecordKind::Settlement, record)
        }
    }
}

fn teachers(ctx: &mut Context, command: TeachersCommands) -> Result<()> {
    match command {
        TeachersCommands::Add {
            name,
            id_number,
            phone,
            hire_date,
            bank_account,
            bank_name,
            province,
        } => cli::teachers::add(
            ctx,
            name,
            id_number,
            phone,
            hire_date,
            bank_account,
            bank_name,
            province,
        ),
        TeachersCommands::List {
            search,
            from_date,
            to_date,
        } => cli::teachers::list(ctx, search, from_date, to_date),
        TeachersCommands::Edit {
            id,
            name,
            id_number,
            phone,
            hire_date,
            bank_account,
            bank_name,
            province,
        } => cli::teachers::edit(
            ctx,
            id,
            name,
            id_number,
            phone,
            hire_date,
            bank_account,
            bank_name,
            province,
        ),
        TeachersCommands::Delete { id } => cli::teachers::delete(ctx, id),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = dispatch(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
