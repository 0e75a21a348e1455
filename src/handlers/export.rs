//! Spreadsheet download handlers for the history tables

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::models::history::HistoryTable;
use crate::services::report_export::{self, ExportLayout, XLSX_CONTENT_TYPE};
use crate::AppState;

/// GET /api/export-notify-to-excel
pub async fn export_notify(State(state): State<AppState>) -> Response {
    export(&state, HistoryTable::Notify, "Error exporting notify data.").await
}

/// GET /api/export-repair-to-excel
pub async fn export_repair_completed(State(state): State<AppState>) -> Response {
    export(
        &state,
        HistoryTable::RepairCompleted,
        "Error exporting repair data.",
    )
    .await
}

async fn export(state: &AppState, table: HistoryTable, failure: &'static str) -> Response {
    let layout = ExportLayout::for_table(table);

    match report_export::export_table(&state.db, &layout).await {
        Ok(bytes) => {
            info!(table = table.table_name(), bytes = bytes.len(), "Export ready");
            (
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, layout.content_disposition()),
                ],
                bytes,
            )
                .into_response()
        }
        Err(e) => {
            error!(table = table.table_name(), error = %e, "Error exporting history");
            (StatusCode::INTERNAL_SERVER_ERROR, failure).into_response()
        }
    }
}
