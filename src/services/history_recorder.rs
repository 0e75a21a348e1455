//! History recorder
//!
//! Appends one row to `notify` or `Repair_completed`. Each append is a single
//! INSERT statement with every column bound, so a row is either fully written
//! or not written at all. Rows are never updated or deleted afterwards.

use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait};
use tracing::{debug, error};

use crate::entities::{
    notify,
    prelude::{Notify, RepairCompleted},
    repair_completed,
};
use crate::models::asset::RepairItems;
use crate::models::history::{CompletedRepairRecord, HistoryRecord, OpenComplaintRecord};

#[derive(Debug)]
pub enum HistoryError {
    PersistenceError { table: &'static str, message: String },
}

impl std::fmt::Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryError::PersistenceError { table, message } => {
                write!(f, "Failed to insert data into {}: {}", table, message)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append a completed repair. Returns the number of rows inserted.
pub async fn record_completed_repair<C: ConnectionTrait>(
    db: &C,
    record: &CompletedRepairRecord,
) -> Result<u64, HistoryError> {
    let placement = &record.placement;
    let row = repair_completed::ActiveModel {
        name_id: Set(record.name_id.clone()),
        lamp_type: Set(record.lamp_type.clone()),
        repair_method: Set(record.repair_method.clone()),
        last_repair_date: Set(record.last_repair_date.clone()),
        notes: Set(record.notes.clone()),
        repair_items: Set(record.repair_items.to_storage_text()),
        cat_id: Set(record.cat_id.clone()),
        dir: Set(placement.dir.clone()),
        dir_num: Set(placement.dir_num),
        routes: Set(placement.routes.clone()),
        control: Set(placement.control.clone()),
        km: Set(placement.km),
        lat: Set(placement.lat),
        long: Set(placement.long),
        fovy: Set(placement.fovy),
        range: Set(placement.range),
        status: Set(record.status.as_i32()),
        ..Default::default()
    };

    let rows = RepairCompleted::insert(row)
        .exec_without_returning(db)
        .await
        .map_err(|e| {
            error!(name_id = %record.name_id, error = %e, "Insert Error (Repair_completed)");
            HistoryError::PersistenceError {
                table: "Repair_completed",
                message: e.to_string(),
            }
        })?;

    debug!(name_id = %record.name_id, rows, "Data inserted into Repair_completed");
    Ok(rows)
}

/// Append an open complaint. Returns the number of rows inserted.
pub async fn record_open_complaint<C: ConnectionTrait>(
    db: &C,
    record: &OpenComplaintRecord,
) -> Result<u64, HistoryError> {
    let placement = &record.placement;
    let details = &record.details;
    let row = notify::ActiveModel {
        lamp_type: Set(record.lamp_type.clone()),
        dir: Set(placement.dir.clone()),
        dir_num: Set(placement.dir_num),
        routes: Set(placement.routes.clone()),
        control: Set(placement.control.clone()),
        km: Set(placement.km),
        lat: Set(placement.lat),
        long: Set(placement.long),
        fovy: Set(placement.fovy),
        range: Set(placement.range),
        name_id: Set(record.name_id.clone()),
        status: Set(record.status.as_i32()),
        complaint_reason: Set(record.complaint_reason.clone()),
        report_time: Set(record.report_time.clone()),
        lamp_type_edit: Set(details.lamp_type_edit.clone()),
        controller_edit: Set(details.controller_edit.clone()),
        construction_date: Set(details.construction_date.clone()),
        contract_number: Set(details.contract_number.clone()),
        repair_method: Set(record.repair_method.clone()),
        complaint_channel: Set(details.complaint_channel.clone()),
        complaint_code: Set(details.complaint_code.clone()),
        complaint_topic: Set(details.complaint_topic.clone()),
        repair_items: Set(record.repair_items.as_ref().map(RepairItems::to_storage_text)),
        control_type: Set(details.control_type.clone()),
        ..Default::default()
    };

    let rows = Notify::insert(row)
        .exec_without_returning(db)
        .await
        .map_err(|e| {
            error!(name_id = %record.name_id, error = %e, "Insert Error (notify)");
            HistoryError::PersistenceError {
                table: "notify",
                message: e.to_string(),
            }
        })?;

    debug!(name_id = %record.name_id, rows, "Data inserted into notify");
    Ok(rows)
}

/// Append whichever record the transition produced
pub async fn record<C: ConnectionTrait>(
    db: &C,
    record: &HistoryRecord,
) -> Result<u64, HistoryError> {
    match record {
        HistoryRecord::OpenComplaint(r) => record_open_complaint(db, r).await,
        HistoryRecord::CompletedRepair(r) => record_completed_repair(db, r).await,
    }
}
