//! Intake row and import summary types.

use serde::{Deserialize, Serialize};
use shared_types::RollId;

/// One parsed row from the bulk import source (or the manual entry form).
///
/// Spreadsheet parsing itself is out of scope; rows arrive already shaped
/// like this from the external parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeRow {
    pub material_number: String,
    pub description: String,
    pub batch_number: String,
    pub weight_kg: f64,
    /// Original posting date, as supplied; informational only.
    pub posting_date: Option<String>,
    pub location_code: Option<String>,
    /// Owning department code, e.g. "FM".
    pub department_code: String,
}

/// A row skipped because its (material, batch) pair already exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub material_number: String,
    pub batch_number: String,
}

impl SkippedRow {
    /// Audit-log line: "material|batch".
    pub fn line(&self) -> String {
        format!("{}|{}", self.material_number, self.batch_number)
    }
}

/// What one import run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: u64,
    /// Rolls created, in row order.
    pub imported: Vec<RollId>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportSummary {
    pub fn imported_count(&self) -> u64 {
        self.imported.len() as u64
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped.len() as u64
    }

    /// One line per skipped row, for the import audit record.
    pub fn details(&self) -> String {
        self.skipped
            .iter()
            .map(SkippedRow::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_row_line_format() {
        let skipped = SkippedRow {
            material_number: "MAT-1".into(),
            batch_number: "B-42".into(),
        };
        assert_eq!(skipped.line(), "MAT-1|B-42");
    }

    #[test]
    fn test_summary_details_one_line_per_skip() {
        let summary = ImportSummary {
            total_rows: 3,
            imported: vec![],
            skipped: vec![
                SkippedRow {
                    material_number: "MAT-1".into(),
                    batch_number: "B-1".into(),
                },
                SkippedRow {
                    material_number: "MAT-2".into(),
                    batch_number: "B-2".into(),
                },
            ],
        };
        assert_eq!(summary.details(), "MAT-1|B-1\nMAT-2|B-2");
        assert_eq!(summary.skipped_count(), 2);
    }
}
