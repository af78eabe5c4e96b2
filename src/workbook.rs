//! Hands the in-memory repository from one CLI invocation to the next as a
//! single JSON document.

use std::path::Path;

use crate::error::Result;
use crate::repository::{Repository, Workbook};
use crate::validation::Validators;

/// Load the repository at `path`. A missing file is an empty repository.
pub fn open(path: &Path, validators: Validators) -> Result<Repository> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no workbook yet, starting empty");
        return Ok(Repository::new(validators));
    }
    let content = std::fs::read_to_string(path)?;
    let book: Workbook = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        courses = book.courses.len(),
        teachers = book.teachers.len(),
        "loaded workbook"
    );
    Ok(Repository::from_workbook(book, validators))
}

/// Write the repository to `path`, replacing any previous file in one step.
pub fn save(repo: &Repository, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(repo.workbook())?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, format!("{json}\n"))?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "saved workbook");
    Ok(())
}
