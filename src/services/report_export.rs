//! Spreadsheet export of the history tables
//!
//! Reads a whole history table, maps each row onto a fixed column layout and
//! renders an xlsx workbook in memory. Nothing is returned unless the whole
//! document rendered.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::entities::{
    notify,
    prelude::{Notify, RepairCompleted},
    repair_completed,
};
use crate::models::history::HistoryTable;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// One declared spreadsheet column: header label, row key and width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub key: &'static str,
    pub width: f64,
}

const fn col(header: &'static str, key: &'static str, width: f64) -> ColumnSpec {
    ColumnSpec { header, key, width }
}

pub const NOTIFY_COLUMNS: [ColumnSpec; 24] = [
    col("Lamp Type", "lamp_type", 15.0),
    col("Direction", "dir", 10.0),
    col("Direction Number", "dir_num", 15.0),
    col("Routes", "routes", 15.0),
    col("Control", "control", 10.0),
    col("KM", "km", 15.0),
    col("Latitude", "lat", 20.0),
    col("Longitude", "long", 20.0),
    col("Field of View", "fovy", 15.0),
    col("Range", "range", 15.0),
    col("Name ID", "name_id", 25.0),
    col("Status", "status", 10.0),
    col("Lamp Type Edit", "lampType_edit", 15.0),
    col("Controller Edit", "controller_edit", 20.0),
    col("Construction Date", "constructionDate", 20.0),
    col("Contract Number", "contractNumber", 20.0),
    col("Repair Method", "repairMethod", 20.0),
    col("Complaint Channel", "complaintChannel", 20.0),
    col("Complaint Code", "complaintCode", 15.0),
    col("Complaint Topic", "complaintTopic", 20.0),
    col("Complaint Reason", "complaintReason", 25.0),
    col("Repair Items", "repairItems", 25.0),
    col("Control Type", "controlType", 20.0),
    col("Report Time", "report_time", 20.0),
];

pub const REPAIR_COLUMNS: [ColumnSpec; 10] = [
    col("Name ID", "name_id", 25.0),
    col("Lamp Type", "lampType", 15.0),
    col("Routes", "routes", 15.0),
    col("KM", "km", 15.0),
    col("Latitude", "lat", 20.0),
    col("Longitude", "long", 20.0),
    col("Repair Method", "repairMethod", 20.0),
    col("Repair Items", "repairItems", 25.0),
    col("Notes", "notes", 25.0),
    col("Last Repair Date", "lastRepairDate", 20.0),
];

/// Export settings for one history table
#[derive(Debug, Clone, Copy)]
pub struct ExportLayout {
    pub table: HistoryTable,
    pub sheet_name: &'static str,
    pub file_name: &'static str,
    pub columns: &'static [ColumnSpec],
}

impl ExportLayout {
    pub fn for_table(table: HistoryTable) -> Self {
        match table {
            HistoryTable::Notify => ExportLayout {
                table,
                sheet_name: "Notify",
                file_name: "notify_data.xlsx",
                columns: &NOTIFY_COLUMNS,
            },
            HistoryTable::RepairCompleted => ExportLayout {
                table,
                sheet_name: "Repair Completed",
                file_name: "repair_completed.xlsx",
                columns: &REPAIR_COLUMNS,
            },
        }
    }

    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }
}

#[derive(Debug)]
pub enum ExportError {
    ReadError(String),
    RenderError(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::ReadError(msg) => write!(f, "Read error: {}", msg),
            ExportError::RenderError(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<XlsxError> for ExportError {
    fn from(e: XlsxError) -> Self {
        ExportError::RenderError(e.to_string())
    }
}

/// Read the whole history table and render it with its declared layout
pub async fn export_table<C: ConnectionTrait>(
    db: &C,
    layout: &ExportLayout,
) -> Result<Vec<u8>, ExportError> {
    let rows = match layout.table {
        HistoryTable::Notify => {
            let models = Notify::find()
                .order_by_asc(notify::Column::Id)
                .all(db)
                .await
                .map_err(|e| ExportError::ReadError(e.to_string()))?;
            to_rows(&models)?
        }
        HistoryTable::RepairCompleted => {
            let models = RepairCompleted::find()
                .order_by_asc(repair_completed::Column::Id)
                .all(db)
                .await
                .map_err(|e| ExportError::ReadError(e.to_string()))?;
            to_rows(&models)?
        }
    };

    info!(
        table = layout.table.table_name(),
        rows = rows.len(),
        "Rendering history export"
    );

    render_workbook(layout.sheet_name, layout.columns, &rows)
}

fn to_rows<T: Serialize>(models: &[T]) -> Result<Vec<Map<String, Value>>, ExportError> {
    models
        .iter()
        .map(|m| match serde_json::to_value(m) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ExportError::RenderError(format!(
                "expected row object, got {}",
                other
            ))),
            Err(e) => Err(ExportError::RenderError(e.to_string())),
        })
        .collect()
}

/// Render rows keyed by column name into an xlsx byte buffer.
///
/// Keys missing from a row leave the cell blank. An empty `rows` still
/// produces the header row.
pub fn render_workbook(
    sheet_name: &str,
    columns: &[ColumnSpec],
    rows: &[Map<String, Value>],
) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (c, column) in columns.iter().enumerate() {
        let c = c as u16;
        worksheet.set_column_width(c, column.width)?;
        worksheet.write_string_with_format(0, c, column.header, &header_format)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, column) in columns.iter().enumerate() {
            let c = c as u16;
            match row.get(column.key) {
                None | Some(Value::Null) => {}
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(v) => {
                        worksheet.write_number(r, c, v)?;
                    }
                    None => {
                        worksheet.write_string(r, c, n.to_string())?;
                    }
                },
                Some(Value::String(s)) => {
                    worksheet.write_string(r, c, s.as_str())?;
                }
                Some(Value::Bool(b)) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
                Some(other) => {
                    worksheet.write_string(r, c, other.to_string())?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    #[test]
    fn test_layout_column_counts() {
        assert_eq!(ExportLayout::for_table(HistoryTable::Notify).columns.len(), 24);
        assert_eq!(
            ExportLayout::for_table(HistoryTable::RepairCompleted).columns.len(),
            10
        );
    }

    #[test]
    fn test_layout_file_names() {
        let notify = ExportLayout::for_table(HistoryTable::Notify);
        assert_eq!(
            notify.content_disposition(),
            "attachment; filename=\"notify_data.xlsx\""
        );
        let repair = ExportLayout::for_table(HistoryTable::RepairCompleted);
        assert_eq!(repair.file_name, "repair_completed.xlsx");
        assert_eq!(repair.sheet_name, "Repair Completed");
    }

    #[test]
    fn test_render_empty_table_is_valid_document() {
        let bytes = render_workbook("Notify", &NOTIFY_COLUMNS, &[]).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_writes_declared_headers() {
        use calamine::{open_workbook_from_rs, Reader, Xlsx};

        let bytes = render_workbook("Repair Completed", &REPAIR_COLUMNS, &[]).unwrap();
        let mut workbook: Xlsx<_> =
            open_workbook_from_rs(std::io::Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range("Repair Completed").unwrap();

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        let expected: Vec<String> = REPAIR_COLUMNS.iter().map(|c| c.header.to_string()).collect();
        assert_eq!(rows, vec![expected]);
    }

    #[test]
    fn test_render_mixed_values() {
        let rows = vec![
            row(json!({
                "name_id": "P-001",
                "lampType": "LED",
                "km": 12.5,
                "lat": 13.1,
                "long": 100.5,
                "repairItems": "{\"bulb\":2}",
                "notes": null
            })),
            row(json!({"name_id": "P-002", "unknown": {"nested": true}})),
        ];
        let bytes = render_workbook("Repair Completed", &REPAIR_COLUMNS, &rows).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > 100);
    }

    #[test]
    fn test_error_display() {
        let err = ExportError::ReadError("no such table".to_string());
        assert!(err.to_string().contains("Read error"));
    }
}
