//! History record models for the `notify` and `Repair_completed` tables

use serde::{Deserialize, Serialize};

use crate::models::asset::{AssetDetails, AssetPlacement, AssetStatus, RepairItems};

/// Which append-only history table a transition lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryTable {
    Notify,
    RepairCompleted,
}

impl HistoryTable {
    pub fn table_name(&self) -> &'static str {
        match self {
            HistoryTable::Notify => "notify",
            HistoryTable::RepairCompleted => "Repair_completed",
        }
    }

    pub fn for_status(status: AssetStatus) -> Self {
        match status {
            AssetStatus::Open => HistoryTable::Notify,
            AssetStatus::Resolved => HistoryTable::RepairCompleted,
        }
    }
}

/// Snapshot appended to `notify` when an asset is marked open
#[derive(Debug, Clone, PartialEq)]
pub struct OpenComplaintRecord {
    pub name_id: String,
    pub lamp_type: Option<String>,
    pub placement: AssetPlacement,
    pub status: AssetStatus,
    pub complaint_reason: String,
    pub report_time: String,
    pub repair_method: Option<String>,
    pub repair_items: Option<RepairItems>,
    pub details: AssetDetails,
}

/// Snapshot appended to `Repair_completed` when an asset is marked resolved
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedRepairRecord {
    pub name_id: String,
    pub lamp_type: Option<String>,
    pub cat_id: Option<String>,
    pub placement: AssetPlacement,
    pub status: AssetStatus,
    pub repair_method: Option<String>,
    pub notes: Option<String>,
    pub last_repair_date: String,
    pub repair_items: RepairItems,
}

/// Outcome of a transition: the record that was built for the history table
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRecord {
    OpenComplaint(OpenComplaintRecord),
    CompletedRepair(CompletedRepairRecord),
}

impl HistoryRecord {
    pub fn table(&self) -> HistoryTable {
        match self {
            HistoryRecord::OpenComplaint(_) => HistoryTable::Notify,
            HistoryRecord::CompletedRepair(_) => HistoryTable::RepairCompleted,
        }
    }
}
