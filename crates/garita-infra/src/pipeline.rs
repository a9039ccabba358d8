//! Stand-in for the external export/notification pipeline

use garita_domain::model::InspectionReportPayload;
use garita_domain::repository::ReportPipeline;
use garita_types::Result;

/// Logs the handoff instead of rendering/uploading/mailing.
///
/// The real pipeline lives outside this repository; wiring it in is a
/// matter of implementing [`ReportPipeline`] against it.
pub struct LoggingReportPipeline;

impl ReportPipeline for LoggingReportPipeline {
    fn deliver(&self, payload: &InspectionReportPayload) -> Result<()> {
        tracing::info!(
            document = %payload.document_name,
            branch = %payload.branch,
            number = payload.consecutive_number,
            recipients = payload.recipients.len(),
            "report handed to export pipeline"
        );
        Ok(())
    }
}
