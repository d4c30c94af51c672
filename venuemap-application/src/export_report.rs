use super::*;
use time::OffsetDateTime;
use venuemap_core::gateways::{document::DocumentGateway, render::RenderingSurface};

/// The default file name of a circle report.
pub fn report_file_name(circle_id: CircleId) -> String {
    format!("circle-{circle_id}-venues.txt")
}

/// Produce the member report of the selected circle.
///
/// Returns the name of the produced file.
pub fn export_report<R, S, D>(
    state: &MapState<R, S>,
    document_gateway: &D,
    layout: &usecases::ReportLayout,
    generated_at: OffsetDateTime,
) -> Result<String>
where
    R: RenderingSurface,
    S: CircleRepo,
    D: DocumentGateway,
{
    let document = state.report(layout, generated_at).map_err(|err| {
        warn!("Unable to export the report: {err}");
        err
    })?;
    // The report requires a selection
    let circle_id = state
        .selection()
        .circle_id()
        .ok_or(usecases::Error::ExportPrecondition("no circle selected"))?;
    let file_name = report_file_name(circle_id);
    document_gateway.produce(&file_name, &document)?;
    info!(
        "Exported the report of circle {circle_id} with {} page(s)",
        document.page_count()
    );
    Ok(file_name)
}
