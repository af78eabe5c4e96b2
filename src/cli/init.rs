use std::path::PathBuf;

use crate::error::Result;
use crate::repository::Repository;
use crate::settings::{load_settings, save_settings, shellexpand_path};
use crate::workbook;

pub fn run(
    data_dir: Option<String>,
    currency: Option<String>,
    page_size: Option<usize>,
    strict: Option<bool>,
) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(symbol) = currency {
        settings.currency_symbol = symbol;
    }
    if let Some(size) = page_size {
        settings.page_size = size.max(1);
    }
    if let Some(strict) = strict {
        settings.strict_formats = strict;
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    let path = settings.workbook_path();
    if !path.exists() {
        workbook::save(&Repository::new(settings.validators()?), &path)?;
    }

    println!("Initialized tutorbook at {}", resolved.display());
    Ok(())
}
