//! Asset status transition engine
//!
//! Applies an operator edit to an asset, re-reads the canonical row, appends
//! exactly one history row chosen by the status just written, and pushes a
//! live event. The update and re-read share one transaction so the snapshot
//! sent to history is the row this request wrote. The history insert runs
//! after commit; a failed insert leaves the asset edit in place.

use chrono::{DateTime, Local, TimeZone, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{error, info, warn};

use crate::models::asset::{AssetEditRequest, AssetSnapshot, AssetStatus, RepairItems};
use crate::models::history::{CompletedRepairRecord, HistoryRecord, OpenComplaintRecord};
use crate::models::transition::{TransitionEvent, TransitionResult};
use crate::services::live_updates::ObserverRegistry;
use crate::services::{asset_store, history_recorder};

/// Stored when an asset is marked open without a complaint reason
pub const DEFAULT_COMPLAINT_REASON: &str = "No complaint";

/// `DD-MM-YYYY HH:MM`, 24-hour, server local clock
pub const REPORT_TIME_FORMAT: &str = "%d-%m-%Y %H:%M";

#[derive(Debug)]
pub enum TransitionError {
    /// Request is malformed (400)
    ValidationError(String),
    /// Store update failed (500)
    UpdateError(String),
    /// Store read or transaction handling failed (500)
    StoreError(String),
    /// Asset absent after the update (404)
    NotFoundError(String),
    /// History insert failed (500)
    PersistenceError(String),
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::ValidationError(msg) => write!(f, "{}", msg),
            TransitionError::UpdateError(msg) => write!(f, "Failed to update data: {}", msg),
            TransitionError::StoreError(msg) => write!(f, "Failed to fetch data: {}", msg),
            TransitionError::NotFoundError(name_id) => {
                write!(f, "No data found for name_id: {}", name_id)
            }
            TransitionError::PersistenceError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for TransitionError {}

pub fn format_report_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(REPORT_TIME_FORMAT).to_string()
}

/// Build the history record for the status that was just written
pub fn build_history_record(
    asset: AssetSnapshot,
    status: AssetStatus,
    report_time: &str,
) -> HistoryRecord {
    match status {
        AssetStatus::Resolved => HistoryRecord::CompletedRepair(CompletedRepairRecord {
            name_id: asset.name_id,
            lamp_type: asset.lamp_type,
            cat_id: asset.cat_id,
            placement: asset.placement,
            status: asset.status,
            repair_method: asset.repair_method,
            notes: asset.notes,
            last_repair_date: asset
                .last_repair_date
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| report_time.to_string()),
            repair_items: asset
                .repair_items
                .filter(|items| !items.is_blank())
                .unwrap_or_else(RepairItems::empty),
        }),
        AssetStatus::Open => HistoryRecord::OpenComplaint(OpenComplaintRecord {
            name_id: asset.name_id,
            lamp_type: asset.lamp_type,
            placement: asset.placement,
            status,
            complaint_reason: asset
                .complaint_reason
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_COMPLAINT_REASON.to_string()),
            report_time: report_time.to_string(),
            repair_method: asset.repair_method,
            repair_items: asset.repair_items.filter(|items| !items.is_blank()),
            details: asset.details,
        }),
    }
}

/// Run a transition using the server clock
pub async fn apply_transition(
    db: &DatabaseConnection,
    observers: &ObserverRegistry,
    request: &AssetEditRequest,
) -> Result<TransitionResult, TransitionError> {
    apply_transition_at(db, observers, request, Local::now()).await
}

/// Run a transition as of `now`
pub async fn apply_transition_at(
    db: &DatabaseConnection,
    observers: &ObserverRegistry,
    request: &AssetEditRequest,
    now: DateTime<Local>,
) -> Result<TransitionResult, TransitionError> {
    let name_id = request.validate().map_err(|e| {
        warn!("Rejected asset edit: {}", e);
        TransitionError::ValidationError(e)
    })?;

    let edit = request.to_edit();
    let status = edit.status;

    let txn = db.begin().await.map_err(|e| {
        error!(name_id = %name_id, error = %e, "Failed to open transaction");
        TransitionError::StoreError(e.to_string())
    })?;

    let updated = asset_store::apply_edit(&txn, name_id, &edit)
        .await
        .map_err(|e| {
            error!(name_id = %name_id, error = %e, "Update Error");
            TransitionError::UpdateError(e.to_string())
        })?;

    let snapshot = asset_store::get_snapshot(&txn, name_id)
        .await
        .map_err(|e| {
            error!(name_id = %name_id, error = %e, "Fetch Error");
            TransitionError::StoreError(e.to_string())
        })?;

    let Some(snapshot) = snapshot else {
        warn!(name_id = %name_id, updated, "Asset not found after update");
        return Err(TransitionError::NotFoundError(name_id.to_string()));
    };

    txn.commit().await.map_err(|e| {
        error!(name_id = %name_id, error = %e, "Failed to commit asset edit");
        TransitionError::UpdateError(e.to_string())
    })?;

    info!(name_id = %name_id, status = %status, "Asset updated");

    let record = build_history_record(snapshot, status, &format_report_time(&now));

    let changes = history_recorder::record(db, &record)
        .await
        .map_err(|e| TransitionError::PersistenceError(e.to_string()))?;

    let result = TransitionResult {
        name_id: name_id.to_string(),
        status,
        record,
        changes,
    };

    let event = TransitionEvent::from_result(&result, Utc::now().timestamp_millis());
    let delivered = observers.broadcast(&event);

    info!(
        name_id = %name_id,
        table = result.record.table().table_name(),
        changes,
        delivered,
        "Transition recorded"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::AssetPlacement;
    use chrono::NaiveDate;
    use serde_json::json;

    fn snapshot() -> AssetSnapshot {
        AssetSnapshot {
            name_id: "P-001".to_string(),
            cat_id: Some("1".to_string()),
            lamp_type: Some("LED".to_string()),
            placement: AssetPlacement {
                routes: Some("R1".to_string()),
                lat: Some(13.1),
                long: Some(100.5),
                ..Default::default()
            },
            status: AssetStatus::Resolved,
            complaint_reason: None,
            report_time: None,
            repair_method: Some("bulb-replace".to_string()),
            notes: None,
            last_repair_date: None,
            repair_items: None,
            details: Default::default(),
        }
    }

    #[test]
    fn test_report_time_format_zero_padded() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 4, 59)
            .unwrap()
            .and_utc();
        assert_eq!(format_report_time(&t), "05-03-2024 07:04");

        let t = NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap()
            .and_utc();
        assert_eq!(format_report_time(&t), "31-12-2024 23:59");
    }

    #[test]
    fn test_resolved_record_defaults() {
        let record = build_history_record(snapshot(), AssetStatus::Resolved, "05-03-2024 07:04");
        let HistoryRecord::CompletedRepair(r) = record else {
            panic!("expected completed repair");
        };
        assert_eq!(r.last_repair_date, "05-03-2024 07:04");
        assert_eq!(r.repair_items, RepairItems::empty());
        assert_eq!(r.lamp_type.as_deref(), Some("LED"));
        assert_eq!(r.placement.lat, Some(13.1));
        assert_eq!(r.placement.long, Some(100.5));
        assert_eq!(r.cat_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_resolved_record_keeps_asset_values() {
        let mut asset = snapshot();
        asset.last_repair_date = Some("01-01-2024 10:00".to_string());
        asset.repair_items = Some(RepairItems(json!({"bulb": 1})));

        let HistoryRecord::CompletedRepair(r) =
            build_history_record(asset, AssetStatus::Resolved, "05-03-2024 07:04")
        else {
            panic!("expected completed repair");
        };
        assert_eq!(r.last_repair_date, "01-01-2024 10:00");
        assert_eq!(r.repair_items, RepairItems(json!({"bulb": 1})));
    }

    #[test]
    fn test_resolved_record_treats_blank_repair_items_as_absent() {
        let mut asset = snapshot();
        asset.repair_items = Some(RepairItems::from_storage_text(""));

        let HistoryRecord::CompletedRepair(r) =
            build_history_record(asset, AssetStatus::Resolved, "05-03-2024 07:04")
        else {
            panic!("expected completed repair");
        };
        assert_eq!(r.repair_items, RepairItems::empty());
    }

    #[test]
    fn test_open_record_copies_asset_details() {
        let mut asset = snapshot();
        asset.details.contract_number = Some("5501".to_string());
        asset.details.complaint_channel = Some("phone".to_string());
        asset.repair_items = Some(RepairItems(json!({"bulb": 1})));

        let HistoryRecord::OpenComplaint(r) =
            build_history_record(asset, AssetStatus::Open, "05-03-2024 07:04")
        else {
            panic!("expected open complaint");
        };
        assert_eq!(r.details.contract_number.as_deref(), Some("5501"));
        assert_eq!(r.details.complaint_channel.as_deref(), Some("phone"));
        assert_eq!(r.repair_method.as_deref(), Some("bulb-replace"));
        assert_eq!(r.repair_items, Some(RepairItems(json!({"bulb": 1}))));
    }

    #[test]
    fn test_open_record_defaults_complaint_reason() {
        let mut asset = snapshot();
        asset.status = AssetStatus::Open;

        let HistoryRecord::OpenComplaint(r) =
            build_history_record(asset.clone(), AssetStatus::Open, "05-03-2024 07:04")
        else {
            panic!("expected open complaint");
        };
        assert_eq!(r.complaint_reason, "No complaint");
        assert_eq!(r.report_time, "05-03-2024 07:04");
        assert_eq!(r.status, AssetStatus::Open);

        asset.complaint_reason = Some("lamp out".to_string());
        let HistoryRecord::OpenComplaint(r) =
            build_history_record(asset, AssetStatus::Open, "05-03-2024 07:04")
        else {
            panic!("expected open complaint");
        };
        assert_eq!(r.complaint_reason, "lamp out");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TransitionError::NotFoundError("P-9".to_string()).to_string(),
            "No data found for name_id: P-9"
        );
        assert!(TransitionError::UpdateError("locked".to_string())
            .to_string()
            .starts_with("Failed to update data"));
    }
}
