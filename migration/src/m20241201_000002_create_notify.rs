//! Migration to create the notify table (open complaint history, append-only)

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notify::Table)
                    .if_not_exists()
                    .col(pk_auto(Notify::Id))
                    .col(string_null(Notify::LampType))
                    .col(string_null(Notify::Dir))
                    .col(integer_null(Notify::DirNum))
                    .col(string_null(Notify::Routes))
                    .col(string_null(Notify::Control))
                    .col(double_null(Notify::Km))
                    .col(double_null(Notify::Lat))
                    .col(double_null(Notify::Long))
                    .col(double_null(Notify::Fovy))
                    .col(double_null(Notify::Range))
                    .col(string(Notify::NameId))
                    .col(integer(Notify::Status))
                    .col(string(Notify::ComplaintReason))
                    .col(string(Notify::ReportTime))
                    .col(string_null(Notify::LampTypeEdit))
                    .col(string_null(Notify::ControllerEdit))
                    .col(string_null(Notify::ConstructionDate))
                    .col(string_null(Notify::ContractNumber))
                    .col(string_null(Notify::RepairMethod))
                    .col(string_null(Notify::ComplaintChannel))
                    .col(string_null(Notify::ComplaintCode))
                    .col(string_null(Notify::ComplaintTopic))
                    .col(text_null(Notify::RepairItems))
                    .col(string_null(Notify::ControlType))
                    .to_owned(),
            )
            .await?;

        // Not unique: every transition to open appends a row
        manager
            .create_index(
                Index::create()
                    .name("idx_notify_name_id")
                    .table(Notify::Table)
                    .col(Notify::NameId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notify::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Notify {
    Table,
    Id,
    LampType,
    Dir,
    DirNum,
    Routes,
    Control,
    Km,
    Lat,
    Long,
    Fovy,
    Range,
    NameId,
    Status,
    #[sea_orm(iden = "complaintReason")]
    ComplaintReason,
    ReportTime,
    #[sea_orm(iden = "lampType_edit")]
    LampTypeEdit,
    ControllerEdit,
    #[sea_orm(iden = "constructionDate")]
    ConstructionDate,
    #[sea_orm(iden = "contractNumber")]
    ContractNumber,
    #[sea_orm(iden = "repairMethod")]
    RepairMethod,
    #[sea_orm(iden = "complaintChannel")]
    ComplaintChannel,
    #[sea_orm(iden = "complaintCode")]
    ComplaintCode,
    #[sea_orm(iden = "complaintTopic")]
    ComplaintTopic,
    #[sea_orm(iden = "repairItems")]
    RepairItems,
    #[sea_orm(iden = "controlType")]
    ControlType,
}
