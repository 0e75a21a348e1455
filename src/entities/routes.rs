//! `SeaORM` Entity for routes table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub name_id: String,
    pub cat_id: Option<String>,
    pub lamp_type: Option<String>,
    pub dir: Option<String>,
    pub dir_num: Option<i32>,
    pub routes: Option<String>,
    pub control: Option<String>,
    pub km: Option<f64>,
    pub lat: Option<f64>,
    pub long: Option<f64>,
    pub fovy: Option<f64>,
    pub range: Option<f64>,
    pub status: i32,
    #[sea_orm(column_name = "complaintReason")]
    #[serde(rename = "complaintReason")]
    pub complaint_reason: Option<String>,
    pub report_time: Option<String>,
    #[sea_orm(column_name = "lampType_edit")]
    #[serde(rename = "lampType_edit")]
    pub lamp_type_edit: Option<String>,
    pub controller_edit: Option<String>,
    #[sea_orm(column_name = "constructionDate")]
    #[serde(rename = "constructionDate")]
    pub construction_date: Option<String>,
    #[sea_orm(column_name = "contractNumber")]
    #[serde(rename = "contractNumber")]
    pub contract_number: Option<String>,
    pub notes: Option<String>,
    #[sea_orm(column_name = "repairMethod")]
    #[serde(rename = "repairMethod")]
    pub repair_method: Option<String>,
    #[sea_orm(column_name = "complaintChannel")]
    #[serde(rename = "complaintChannel")]
    pub complaint_channel: Option<String>,
    #[sea_orm(column_name = "complaintCode")]
    #[serde(rename = "complaintCode")]
    pub complaint_code: Option<String>,
    #[sea_orm(column_name = "complaintTopic")]
    #[serde(rename = "complaintTopic")]
    pub complaint_topic: Option<String>,
    #[sea_orm(column_name = "lastRepairDate")]
    #[serde(rename = "lastRepairDate")]
    pub last_repair_date: Option<String>,
    #[sea_orm(column_name = "controlType")]
    #[serde(rename = "controlType")]
    pub control_type: Option<String>,
    /// JSON text; parsed into `RepairItems` by the asset store
    #[sea_orm(column_name = "repairItems", column_type = "Text", nullable)]
    #[serde(rename = "repairItems")]
    pub repair_items: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
