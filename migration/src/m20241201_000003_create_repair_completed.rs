//! Migration to create the Repair_completed table (closed repair history, append-only)

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RepairCompleted::Table)
                    .if_not_exists()
                    .col(pk_auto(RepairCompleted::Id))
                    .col(string(RepairCompleted::NameId))
                    .col(string_null(RepairCompleted::LampType))
                    .col(string_null(RepairCompleted::RepairMethod))
                    .col(string(RepairCompleted::LastRepairDate))
                    .col(string_null(RepairCompleted::Notes))
                    .col(text(RepairCompleted::RepairItems))
                    .col(string_null(RepairCompleted::CatId))
                    .col(string_null(RepairCompleted::Dir))
                    .col(integer_null(RepairCompleted::DirNum))
                    .col(string_null(RepairCompleted::Routes))
                    .col(string_null(RepairCompleted::Control))
                    .col(double_null(RepairCompleted::Km))
                    .col(double_null(RepairCompleted::Lat))
                    .col(double_null(RepairCompleted::Long))
                    .col(double_null(RepairCompleted::Fovy))
                    .col(double_null(RepairCompleted::Range))
                    .col(integer(RepairCompleted::Status))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_repair_completed_name_id")
                    .table(RepairCompleted::Table)
                    .col(RepairCompleted::NameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RepairCompleted::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RepairCompleted {
    #[sea_orm(iden = "Repair_completed")]
    Table,
    Id,
    NameId,
    #[sea_orm(iden = "lampType")]
    LampType,
    #[sea_orm(iden = "repairMethod")]
    RepairMethod,
    #[sea_orm(iden = "lastRepairDate")]
    LastRepairDate,
    Notes,
    #[sea_orm(iden = "repairItems")]
    RepairItems,
    CatId,
    Dir,
    DirNum,
    Routes,
    Control,
    Km,
    Lat,
    Long,
    Fovy,
    Range,
    Status,
}
