//! Asset store over the `routes` table
//!
//! Point reads and updates keyed by `name_id`, plus the two listing queries.
//! Every function is generic over `ConnectionTrait` so callers can run it on
//! a pooled connection or inside a transaction. All filter values are bound
//! through the query builder.

use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

use crate::entities::{prelude::Routes, routes};
use crate::models::asset::{
    AssetDetails, AssetEdit, AssetPlacement, AssetSnapshot, AssetStatus, MarkerProjection, MarkerQuery,
    OpenAssetSummary, RepairItems,
};

#[derive(Debug)]
pub enum StoreError {
    DatabaseError(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sea_orm::DbErr> for StoreError {
    fn from(e: sea_orm::DbErr) -> Self {
        StoreError::DatabaseError(e.to_string())
    }
}

/// Columns the marker listing may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterColumn {
    Category,
    Route,
}

impl FilterColumn {
    fn column(&self) -> routes::Column {
        match self {
            FilterColumn::Category => routes::Column::CatId,
            FilterColumn::Route => routes::Column::Routes,
        }
    }
}

/// Equality predicates for GET /api/routes, restricted to [`FilterColumn`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerFilter {
    predicates: Vec<(FilterColumn, String)>,
}

impl MarkerFilter {
    /// `all` or an empty value leaves that column unfiltered
    pub fn from_query(query: &MarkerQuery) -> Self {
        let mut filter = MarkerFilter::default();
        filter.push(FilterColumn::Category, query.category.as_deref());
        filter.push(FilterColumn::Route, query.routes.as_deref());
        filter
    }

    fn push(&mut self, column: FilterColumn, value: Option<&str>) {
        if let Some(v) = value {
            if !v.is_empty() && v != "all" {
                self.predicates.push((column, v.to_string()));
            }
        }
    }

    pub fn predicates(&self) -> &[(FilterColumn, String)] {
        &self.predicates
    }

    pub fn condition(&self) -> Condition {
        self.predicates
            .iter()
            .fold(Condition::all(), |cond, (column, value)| {
                cond.add(column.column().eq(value.clone()))
            })
    }
}

/// Fetch one asset by `name_id`
pub async fn find_by_name_id<C: ConnectionTrait>(
    db: &C,
    name_id: &str,
) -> Result<Option<routes::Model>, StoreError> {
    Ok(Routes::find_by_id(name_id.to_string()).one(db).await?)
}

/// Fetch one asset as a typed snapshot
pub async fn get_snapshot<C: ConnectionTrait>(
    db: &C,
    name_id: &str,
) -> Result<Option<AssetSnapshot>, StoreError> {
    Ok(find_by_name_id(db, name_id).await?.map(AssetSnapshot::from))
}

/// Overwrite every editable column of one asset. Returns the affected row count.
pub async fn apply_edit<C: ConnectionTrait>(
    db: &C,
    name_id: &str,
    edit: &AssetEdit,
) -> Result<u64, StoreError> {
    let active = routes::ActiveModel {
        name_id: NotSet,
        lamp_type_edit: Set(edit.lamp_type_edit.clone()),
        controller_edit: Set(edit.controller_edit.clone()),
        construction_date: Set(edit.construction_date.clone()),
        contract_number: Set(edit.contract_number.clone()),
        notes: Set(edit.notes.clone()),
        status: Set(edit.status.as_i32()),
        repair_method: Set(edit.repair_method.clone()),
        complaint_channel: Set(edit.complaint_channel.clone()),
        complaint_code: Set(edit.complaint_code.clone()),
        complaint_topic: Set(edit.complaint_topic.clone()),
        complaint_reason: Set(edit.complaint_reason.clone()),
        last_repair_date: Set(edit.last_repair_date.clone()),
        control_type: Set(edit.control_type.clone()),
        repair_items: Set(edit.repair_items.as_ref().map(RepairItems::to_storage_text)),
        report_time: Set(edit.report_time.clone()),
        ..Default::default()
    };

    let result = Routes::update_many()
        .set(active)
        .filter(routes::Column::NameId.eq(name_id))
        .exec(db)
        .await?;

    debug!(name_id = %name_id, rows = result.rows_affected, "Applied asset edit");
    Ok(result.rows_affected)
}

/// Assets that currently need attention (status = 0)
pub async fn list_open<C: ConnectionTrait>(db: &C) -> Result<Vec<OpenAssetSummary>, StoreError> {
    let rows = Routes::find()
        .filter(routes::Column::Status.eq(AssetStatus::Open.as_i32()))
        .order_by_asc(routes::Column::NameId)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(OpenAssetSummary::from).collect())
}

/// Map markers matching the filter
pub async fn list_markers<C: ConnectionTrait>(
    db: &C,
    filter: &MarkerFilter,
) -> Result<Vec<MarkerProjection>, StoreError> {
    let rows = Routes::find()
        .filter(filter.condition())
        .order_by_asc(routes::Column::NameId)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(MarkerProjection::from).collect())
}

impl From<routes::Model> for AssetSnapshot {
    fn from(row: routes::Model) -> Self {
        Self {
            placement: AssetPlacement {
                dir: row.dir,
                dir_num: row.dir_num,
                routes: row.routes,
                control: row.control,
                km: row.km,
                lat: row.lat,
                long: row.long,
                fovy: row.fovy,
                range: row.range,
            },
            name_id: row.name_id,
            cat_id: row.cat_id,
            lamp_type: row.lamp_type,
            status: AssetStatus::from_i32(row.status),
            complaint_reason: row.complaint_reason,
            report_time: row.report_time,
            repair_method: row.repair_method,
            notes: row.notes,
            last_repair_date: row.last_repair_date,
            repair_items: row
                .repair_items
                .as_deref()
                .map(RepairItems::from_storage_text),
            details: AssetDetails {
                lamp_type_edit: row.lamp_type_edit,
                controller_edit: row.controller_edit,
                construction_date: row.construction_date,
                contract_number: row.contract_number,
                complaint_channel: row.complaint_channel,
                complaint_code: row.complaint_code,
                complaint_topic: row.complaint_topic,
                control_type: row.control_type,
            },
        }
    }
}

impl From<routes::Model> for OpenAssetSummary {
    fn from(row: routes::Model) -> Self {
        Self {
            cat_id: row.cat_id,
            lamp_type: row.lamp_type,
            dir: row.dir,
            dir_num: row.dir_num,
            routes: row.routes,
            control: row.control,
            km: row.km,
            lat: row.lat,
            longitude: row.long,
            fovy: row.fovy,
            range: row.range,
            name_id: row.name_id,
            status: row.status,
            complaint_reason: row.complaint_reason,
            report_time: row.report_time,
        }
    }
}

impl From<routes::Model> for MarkerProjection {
    fn from(row: routes::Model) -> Self {
        Self {
            lat: row.lat,
            lng: row.long,
            name_id: row.name_id,
            routes: row.routes,
            category: row.cat_id,
            status: row.status,
            complaint_reason: row.complaint_reason,
            report_time: row.report_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_means_unfiltered() {
        let filter = MarkerFilter::from_query(&MarkerQuery {
            category: Some("all".to_string()),
            routes: Some("all".to_string()),
        });
        assert!(filter.predicates().is_empty());

        let filter = MarkerFilter::from_query(&MarkerQuery::default());
        assert!(filter.predicates().is_empty());

        let filter = MarkerFilter::from_query(&MarkerQuery {
            category: Some(String::new()),
            routes: None,
        });
        assert!(filter.predicates().is_empty());
    }

    #[test]
    fn test_filter_keeps_values_verbatim() {
        let filter = MarkerFilter::from_query(&MarkerQuery {
            category: Some("2".to_string()),
            routes: Some("R1' OR '1'='1".to_string()),
        });
        assert_eq!(
            filter.predicates(),
            &[
                (FilterColumn::Category, "2".to_string()),
                (FilterColumn::Route, "R1' OR '1'='1".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::DatabaseError("locked".to_string());
        assert_eq!(err.to_string(), "Database error: locked");
    }
}
