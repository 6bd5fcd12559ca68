use std::path::Path;

use tracing::info;

use crate::errors::AppError;
use crate::models::{CriteriaList, ReviewRecord};

pub const FILE_COLUMN: &str = "Resume File";
pub const FIT_COLUMN: &str = "Fit Score";

/// Writes one row per record: file name, fit score (or `N/A`), then the
/// criterion scores in criteria order. Overwrites `path`.
pub fn write_scores_csv(
    path: &Path,
    criteria: &CriteriaList,
    records: &[ReviewRecord],
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![FILE_COLUMN.to_string(), FIT_COLUMN.to_string()];
    header.extend(criteria.iter().cloned());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![record.file_name.clone(), record.fit_score.to_string()];
        row.extend(
            criteria
                .iter()
                .map(|c| record.score(c).unwrap_or(0).to_string()),
        );
        writer.write_record(&row)?;
    }

    writer.flush().map_err(|e| AppError::io(path, e))?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Reads the header of a scores CSV back into the criteria it was written with.
pub fn read_criteria_header(path: &Path) -> Result<CriteriaList, AppError> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?;

    if header.get(0) != Some(FILE_COLUMN) || header.get(1) != Some(FIT_COLUMN) {
        return Err(AppError::Validation(format!(
            "{} is not a scores CSV: expected '{FILE_COLUMN}' and '{FIT_COLUMN}' columns first",
            path.display()
        )));
    }

    Ok(CriteriaList::from_names(header.iter().skip(2)))
}
