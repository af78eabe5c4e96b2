use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::reports::ExportRow;

/// Write rows as CSV with a header line.
pub fn write_csv<W: Write>(rows: &[ExportRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    if rows.is_empty() {
        // serialize() only emits the header alongside the first record
        wtr.write_record(HEADER)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(rows: &[ExportRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_csv(rows, file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote course export");
    Ok(())
}

const HEADER: [&str; 11] = [
    "Teacher",
    "Parent",
    "Contact",
    "Original Price",
    "Current Price",
    "Hours",
    "Consumed Hours",
    "Settled Amount",
    "Type",
    "Status",
    "Purchase Date",
];
