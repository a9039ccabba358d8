//! Report payload handed to the export/notification pipeline

use serde::{Deserialize, Serialize};

use super::InspectionRecord;

/// Fully assembled report for one completed entry inspection.
///
/// The pipeline (rendering, upload, e-mail) is an external collaborator;
/// this payload is the whole contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionReportPayload {
    pub consecutive_number: u32,
    /// File name of the rendered report document.
    pub document_name: String,
    /// Date code in `MMDDYYYY` form.
    pub date_code: String,
    pub branch: String,
    /// Short branch code, e.g. "SU03".
    pub branch_code: String,
    pub recipients: Vec<String>,
    /// 1-based sheet row the report was assembled from.
    pub row: u32,
    pub record: InspectionRecord,
}

impl InspectionReportPayload {
    pub fn assemble(
        record: InspectionRecord,
        row: u32,
        consecutive_number: u32,
        recipients: Vec<String>,
    ) -> InspectionReportPayload {
        let date_code = record.timestamp.format("%m%d%Y").to_string();
        let branch_code = branch_code(&record.branch);
        let document_name = format!(
            "{}-{}-{}-R06-PT-19-Revisión de Vehículos-{}.pdf",
            date_code, branch_code, record.plate, consecutive_number
        );
        InspectionReportPayload {
            consecutive_number,
            document_name,
            date_code,
            branch: record.branch.clone(),
            branch_code,
            recipients,
            row,
            record,
        }
    }
}

/// Extract the short code from a branch name like "(SU03) Chorrera".
/// Falls back to "ND" when the name carries no parenthesized code.
pub fn branch_code(branch: &str) -> String {
    branch
        .split_once('(')
        .and_then(|(_, rest)| rest.split_once(')'))
        .map(|(code, _)| code.trim().to_string())
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| "ND".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_code() {
        assert_eq!(branch_code("(SU03) Chorrera"), "SU03");
        assert_eq!(branch_code("(SU01) Casa Matriz Mañanitas"), "SU01");
        assert_eq!(branch_code("Chorrera"), "ND");
        assert_eq!(branch_code("() Vacío"), "ND");
    }
}
