use crate::cli::Context;
use crate::error::Result;
use crate::settings::settings_file_exists;

pub fn run(ctx: &Context) -> Result<()> {
    let settings = &ctx.settings;
    let path = settings.workbook_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Workbook:   {}", path.display());
    println!("Currency:   {}", settings.currency_symbol);
    println!("Page size:  {}", settings.page_size);
    println!(
        "Formats:    {}",
        if settings.strict_formats { "strict" } else { "presence only" }
    );

    if !settings_file_exists() {
        println!();
        println!("Settings not saved yet. Run `tutorbook init` to set up.");
    }

    let courses = ctx.repo.ledgers();
    let purchases: usize = courses.iter().map(|c| c.purchases.len()).sum();
    let settlements: usize = courses.iter().map(|c| c.settlements.len()).sum();

    println!();
    println!("Courses:      {}", courses.len());
    println!("Purchases:    {purchases}");
    println!("Settlements:  {settlements}");
    println!("Teachers:     {}", ctx.repo.teachers().len());
    Ok(())
}
