pub use sea_orm_migration::prelude::*;

mod m20241201_000001_create_routes;
mod m20241201_000002_create_notify;
mod m20241201_000003_create_repair_completed;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241201_000001_create_routes::Migration),
            Box::new(m20241201_000002_create_notify::Migration),
            Box::new(m20241201_000003_create_repair_completed::Migration),
        ]
    }
}
