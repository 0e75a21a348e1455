//! Asset request/response models
//!
//! Models for the asset edit endpoint and the read-only listing endpoints
//! over the `routes` table.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Workflow state of an asset, stored as an integer in `routes.status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Needs attention (0)
    Open,
    /// Repaired (1)
    Resolved,
}

impl AssetStatus {
    /// Normalize a submitted status flag.
    ///
    /// Only JSON `true` and the number `1` mean resolved. Strings such as
    /// `"1"` or `"yes"`, other numbers, null and a missing flag all mean open.
    pub fn from_flag(flag: Option<&Value>) -> Self {
        match flag {
            Some(Value::Bool(true)) => AssetStatus::Resolved,
            Some(Value::Number(n)) if n.as_f64() == Some(1.0) => AssetStatus::Resolved,
            _ => AssetStatus::Open,
        }
    }

    pub fn as_i32(&self) -> i32 {
        match self {
            AssetStatus::Open => 0,
            AssetStatus::Resolved => 1,
        }
    }

    pub fn from_i32(value: i32) -> Self {
        if value == 1 {
            AssetStatus::Resolved
        } else {
            AssetStatus::Open
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetStatus::Open => write!(f, "open"),
            AssetStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Structured list of repaired parts attached to an asset.
///
/// Kept as an arbitrary JSON value because clients submit free-form
/// structures. Only the asset store converts it to and from column text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepairItems(pub Value);

impl RepairItems {
    /// `{}`, used when a resolved asset carries no repair items
    pub fn empty() -> Self {
        RepairItems(Value::Object(serde_json::Map::new()))
    }

    /// Null or empty text, both of which stand for "no repair items"
    pub fn is_blank(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn to_storage_text(&self) -> String {
        self.0.to_string()
    }

    /// Parse stored column text. Legacy rows holding non-JSON text are kept
    /// as a JSON string so nothing is lost on the way to history.
    pub fn from_storage_text(text: &str) -> Self {
        serde_json::from_str(text)
            .map(RepairItems)
            .unwrap_or_else(|_| RepairItems(Value::String(text.to_string())))
    }
}

/// Body of POST /api/save-electric-pole
///
/// Text fields accept any JSON scalar. Numbers and booleans are kept as their
/// JSON text, so a numeric `contractNumber` is stored as `"5501"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetEditRequest {
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub name_id: Option<String>,
    #[serde(
        rename = "lampType",
        alias = "lampType_edit",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub lamp_type: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub controller_edit: Option<String>,
    #[serde(rename = "constructionDate", deserialize_with = "deserialize_lenient_string")]
    pub construction_date: Option<String>,
    #[serde(rename = "contractNumber", deserialize_with = "deserialize_lenient_string")]
    pub contract_number: Option<String>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub notes: Option<String>,
    /// Raw flag; see [`AssetStatus::from_flag`]
    pub status: Option<Value>,
    #[serde(rename = "repairMethod", deserialize_with = "deserialize_lenient_string")]
    pub repair_method: Option<String>,
    #[serde(rename = "complaintChannel", deserialize_with = "deserialize_lenient_string")]
    pub complaint_channel: Option<String>,
    #[serde(rename = "complaintCode", deserialize_with = "deserialize_lenient_string")]
    pub complaint_code: Option<String>,
    #[serde(rename = "complaintTopic", deserialize_with = "deserialize_lenient_string")]
    pub complaint_topic: Option<String>,
    #[serde(rename = "complaintReason", deserialize_with = "deserialize_lenient_string")]
    pub complaint_reason: Option<String>,
    #[serde(rename = "lastRepairDate", deserialize_with = "deserialize_lenient_string")]
    pub last_repair_date: Option<String>,
    #[serde(rename = "controlType", deserialize_with = "deserialize_lenient_string")]
    pub control_type: Option<String>,
    #[serde(rename = "repairItems")]
    pub repair_items: Option<RepairItems>,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub report_time: Option<String>,
}

/// Null stays absent, strings pass through, any other value becomes its JSON text
fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl AssetEditRequest {
    /// Parse a raw request body. A body that is not a JSON object yields an
    /// empty request, which then fails validation.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Returns the non-empty `name_id` or an error message
    pub fn validate(&self) -> Result<&str, String> {
        match self.name_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err("Missing required field: name_id".to_string()),
        }
    }

    /// Build the column set written to `routes` with the status already normalized
    pub fn to_edit(&self) -> AssetEdit {
        AssetEdit {
            lamp_type_edit: self.lamp_type.clone(),
            controller_edit: self.controller_edit.clone(),
            construction_date: self.construction_date.clone(),
            contract_number: self.contract_number.clone(),
            notes: self.notes.clone(),
            status: AssetStatus::from_flag(self.status.as_ref()),
            repair_method: self.repair_method.clone(),
            complaint_channel: self.complaint_channel.clone(),
            complaint_code: self.complaint_code.clone(),
            complaint_topic: self.complaint_topic.clone(),
            complaint_reason: self.complaint_reason.clone(),
            last_repair_date: self.last_repair_date.clone(),
            control_type: self.control_type.clone(),
            repair_items: self.repair_items.clone(),
            report_time: self.report_time.clone(),
        }
    }
}

/// Every editable column of an asset. Absent values overwrite with NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEdit {
    pub lamp_type_edit: Option<String>,
    pub controller_edit: Option<String>,
    pub construction_date: Option<String>,
    pub contract_number: Option<String>,
    pub notes: Option<String>,
    pub status: AssetStatus,
    pub repair_method: Option<String>,
    pub complaint_channel: Option<String>,
    pub complaint_code: Option<String>,
    pub complaint_topic: Option<String>,
    pub complaint_reason: Option<String>,
    pub last_repair_date: Option<String>,
    pub control_type: Option<String>,
    pub repair_items: Option<RepairItems>,
    pub report_time: Option<String>,
}

/// Physical placement of an asset, copied verbatim into history rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPlacement {
    pub dir: Option<String>,
    pub dir_num: Option<i32>,
    pub routes: Option<String>,
    pub control: Option<String>,
    pub km: Option<f64>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub fovy: Option<f64>,
    pub range: Option<f64>,
}

/// Operator-entered columns of an asset, copied into `notify` rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDetails {
    pub lamp_type_edit: Option<String>,
    pub controller_edit: Option<String>,
    pub construction_date: Option<String>,
    pub contract_number: Option<String>,
    pub complaint_channel: Option<String>,
    pub complaint_code: Option<String>,
    pub complaint_topic: Option<String>,
    pub control_type: Option<String>,
}

/// Canonical asset row as read back by the store, with typed repair items
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSnapshot {
    pub name_id: String,
    pub cat_id: Option<String>,
    pub lamp_type: Option<String>,
    pub placement: AssetPlacement,
    pub status: AssetStatus,
    pub complaint_reason: Option<String>,
    pub report_time: Option<String>,
    pub repair_method: Option<String>,
    pub notes: Option<String>,
    pub last_repair_date: Option<String>,
    pub repair_items: Option<RepairItems>,
    pub details: AssetDetails,
}

/// Row of GET /api/get-routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAssetSummary {
    pub cat_id: Option<String>,
    pub lamp_type: Option<String>,
    pub dir: Option<String>,
    pub dir_num: Option<i32>,
    pub routes: Option<String>,
    pub control: Option<String>,
    pub km: Option<f64>,
    pub lat: Option<f64>,
    pub longitude: Option<f64>,
    pub fovy: Option<f64>,
    pub range: Option<f64>,
    pub name_id: String,
    pub status: i32,
    #[serde(rename = "complaintReason")]
    pub complaint_reason: Option<String>,
    pub report_time: Option<String>,
}

/// Map marker row of GET /api/routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerProjection {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub name_id: String,
    pub routes: Option<String>,
    pub category: Option<String>,
    pub status: i32,
    #[serde(rename = "complaintReason")]
    pub complaint_reason: Option<String>,
    pub report_time: Option<String>,
}

/// Query parameters for GET /api/routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkerQuery {
    pub category: Option<String>,
    pub routes: Option<String>,
}
