//! Transition response and live event models

use serde::{Deserialize, Serialize};

use crate::models::asset::AssetStatus;
use crate::models::history::{HistoryRecord, HistoryTable};

/// Response body of POST /api/save-electric-pole
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub message: String,
    /// Rows affected by the history insert, passed through untouched
    pub changes: u64,
}

/// Result of a completed transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub name_id: String,
    pub status: AssetStatus,
    pub record: HistoryRecord,
    pub changes: u64,
}

impl TransitionResult {
    pub fn message(&self) -> String {
        format!(
            "Data saved successfully in {}.",
            self.record.table().table_name()
        )
    }
}

impl From<&TransitionResult> for TransitionResponse {
    fn from(result: &TransitionResult) -> Self {
        Self {
            message: result.message(),
            changes: result.changes,
        }
    }
}

/// Event pushed to live observers after a transition
///
/// ```json
/// {
///   "type": "transition",
///   "name_id": "P-001",
///   "status": 1,
///   "history": "repair_completed",
///   "lat": 13.1,
///   "lng": 100.5,
///   "complaintReason": null,
///   "report_time": null,
///   "timestamp": 1734000000000
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "transition")]
pub struct TransitionEvent {
    pub name_id: String,
    pub status: i32,
    pub history: HistoryTable,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(rename = "complaintReason")]
    pub complaint_reason: Option<String>,
    pub report_time: Option<String>,
    /// Timestamp in milliseconds
    pub timestamp: i64,
}

impl TransitionEvent {
    pub fn from_result(result: &TransitionResult, timestamp: i64) -> Self {
        let (placement, complaint_reason, report_time) = match &result.record {
            HistoryRecord::OpenComplaint(r) => (
                &r.placement,
                Some(r.complaint_reason.clone()),
                Some(r.report_time.clone()),
            ),
            HistoryRecord::CompletedRepair(r) => (&r.placement, None, None),
        };

        Self {
            name_id: result.name_id.clone(),
            status: result.status.as_i32(),
            history: result.record.table(),
            lat: placement.lat,
            lng: placement.long,
            complaint_reason,
            report_time,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::{AssetPlacement, RepairItems};
    use crate::models::history::{CompletedRepairRecord, OpenComplaintRecord};

    fn placement() -> AssetPlacement {
        AssetPlacement {
            lat: Some(13.1),
            long: Some(100.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_message_names_target_table() {
        let result = TransitionResult {
            name_id: "P-001".to_string(),
            status: AssetStatus::Resolved,
            record: HistoryRecord::CompletedRepair(CompletedRepairRecord {
                name_id: "P-001".to_string(),
                lamp_type: None,
                cat_id: None,
                placement: placement(),
                status: AssetStatus::Resolved,
                repair_method: None,
                notes: None,
                last_repair_date: "01-02-2024 09:05".to_string(),
                repair_items: RepairItems::empty(),
            }),
            changes: 1,
        };
        assert_eq!(result.message(), "Data saved successfully in Repair_completed.");

        let response = TransitionResponse::from(&result);
        assert_eq!(response.changes, 1);
    }

    #[test]
    fn test_event_serialization() {
        let result = TransitionResult {
            name_id: "P-002".to_string(),
            status: AssetStatus::Open,
            record: HistoryRecord::OpenComplaint(OpenComplaintRecord {
                name_id: "P-002".to_string(),
                lamp_type: None,
                placement: placement(),
                status: AssetStatus::Open,
                complaint_reason: "No complaint".to_string(),
                report_time: "01-02-2024 09:05".to_string(),
                repair_method: None,
                repair_items: None,
                details: Default::default(),
            }),
            changes: 1,
        };

        let event = TransitionEvent::from_result(&result, 42);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "transition");
        assert_eq!(json["history"], "notify");
        assert_eq!(json["status"], 0);
        assert_eq!(json["lng"], 100.5);
        assert_eq!(json["complaintReason"], "No complaint");
        assert_eq!(json["timestamp"], 42);
    }
}
