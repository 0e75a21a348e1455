use route_asset_backend::{
    entities::{
        notify,
        prelude::{Notify, RepairCompleted, Routes},
        repair_completed, routes,
    },
    AppState,
};
use sea_orm::{
    ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryOrder,
};
use sea_orm_migration::MigratorTrait;
use std::io::Cursor;

/// Set up an in-memory test database with all migrations applied.
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[allow(dead_code)]
pub async fn setup_test_state() -> AppState {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    AppState::new(db)
}

/// Insert an asset with placement data and the given status
#[allow(dead_code)]
pub async fn seed_asset(
    db: &DatabaseConnection,
    name_id: &str,
    status: i32,
    cat_id: &str,
    route: &str,
    lat: f64,
    long: f64,
) {
    let row = routes::ActiveModel {
        name_id: Set(name_id.to_string()),
        cat_id: Set(Some(cat_id.to_string())),
        lamp_type: Set(Some("LED".to_string())),
        dir: Set(Some("N".to_string())),
        dir_num: Set(Some(1)),
        routes: Set(Some(route.to_string())),
        control: Set(Some("C-01".to_string())),
        km: Set(Some(12.5)),
        lat: Set(Some(lat)),
        long: Set(Some(long)),
        fovy: Set(Some(60.0)),
        range: Set(Some(30.0)),
        status: Set(status),
        ..Default::default()
    };

    Routes::insert(row)
        .exec_without_returning(db)
        .await
        .expect("Failed to seed asset");
}

#[allow(dead_code)]
pub async fn get_asset(db: &DatabaseConnection, name_id: &str) -> routes::Model {
    Routes::find_by_id(name_id.to_string())
        .one(db)
        .await
        .expect("Failed to read asset")
        .expect("Asset should exist")
}

#[allow(dead_code)]
pub async fn notify_rows(db: &DatabaseConnection) -> Vec<notify::Model> {
    Notify::find()
        .order_by_asc(notify::Column::Id)
        .all(db)
        .await
        .expect("Failed to read notify")
}

#[allow(dead_code)]
pub async fn repair_rows(db: &DatabaseConnection) -> Vec<repair_completed::Model> {
    RepairCompleted::find()
        .order_by_asc(repair_completed::Column::Id)
        .all(db)
        .await
        .expect("Failed to read Repair_completed")
}

#[allow(dead_code)]
pub async fn history_counts(db: &DatabaseConnection) -> (u64, u64) {
    let notify = Notify::find().count(db).await.expect("count notify");
    let repair = RepairCompleted::find().count(db).await.expect("count repair");
    (notify, repair)
}

/// Read one worksheet of an xlsx document back as rows of display strings
#[allow(dead_code)]
pub fn read_sheet(bytes: &[u8], sheet: &str) -> Vec<Vec<String>> {
    use calamine::{open_workbook_from_rs, Reader, Xlsx};

    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes.to_vec())).expect("Failed to open workbook");
    let range = workbook
        .worksheet_range(sheet)
        .expect("Worksheet should exist");

    range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database setup should succeed");
    }
}
