//! `SeaORM` Entity for Repair_completed table
//!
//! Append-only snapshot of an asset taken when it was marked resolved.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Repair_completed")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_id: String,
    #[sea_orm(column_name = "lampType")]
    #[serde(rename = "lampType")]
    pub lamp_type: Option<String>,
    #[sea_orm(column_name = "repairMethod")]
    #[serde(rename = "repairMethod")]
    pub repair_method: Option<String>,
    #[sea_orm(column_name = "lastRepairDate")]
    #[serde(rename = "lastRepairDate")]
    pub last_repair_date: String,
    pub notes: Option<String>,
    #[sea_orm(column_name = "repairItems", column_type = "Text")]
    #[serde(rename = "repairItems")]
    pub repair_items: String,
    pub cat_id: Option<String>,
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
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
