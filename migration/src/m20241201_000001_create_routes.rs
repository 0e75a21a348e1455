//! Migration to create the routes table holding one live row per roadside asset

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .if_not_exists()
                    .col(string(Routes::NameId).primary_key())
                    .col(string_null(Routes::CatId))
                    .col(string_null(Routes::LampType))
                    .col(string_null(Routes::Dir))
                    .col(integer_null(Routes::DirNum))
                    .col(string_null(Routes::Routes))
                    .col(string_null(Routes::Control))
                    .col(double_null(Routes::Km))
                    .col(double_null(Routes::Lat))
                    .col(double_null(Routes::Long))
                    .col(double_null(Routes::Fovy))
                    .col(double_null(Routes::Range))
                    .col(integer(Routes::Status).default(0))
                    .col(string_null(Routes::ComplaintReason))
                    .col(string_null(Routes::ReportTime))
                    .col(string_null(Routes::LampTypeEdit))
                    .col(string_null(Routes::ControllerEdit))
                    .col(string_null(Routes::ConstructionDate))
                    .col(string_null(Routes::ContractNumber))
                    .col(string_null(Routes::Notes))
                    .col(string_null(Routes::RepairMethod))
                    .col(string_null(Routes::ComplaintChannel))
                    .col(string_null(Routes::ComplaintCode))
                    .col(string_null(Routes::ComplaintTopic))
                    .col(string_null(Routes::LastRepairDate))
                    .col(string_null(Routes::ControlType))
                    .col(text_null(Routes::RepairItems))
                    .to_owned(),
            )
            .await?;

        // Listing endpoints filter on status, category and route name
        manager
            .create_index(
                Index::create()
                    .name("idx_routes_status")
                    .table(Routes::Table)
                    .col(Routes::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_routes_cat_id_routes")
                    .table(Routes::Table)
                    .col(Routes::CatId)
                    .col(Routes::Routes)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Routes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Routes {
    Table,
    NameId,
    CatId,
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
    Notes,
    #[sea_orm(iden = "repairMethod")]
    RepairMethod,
    #[sea_orm(iden = "complaintChannel")]
    ComplaintChannel,
    #[sea_orm(iden = "complaintCode")]
    ComplaintCode,
    #[sea_orm(iden = "complaintTopic")]
    ComplaintTopic,
    #[sea_orm(iden = "lastRepairDate")]
    LastRepairDate,
    #[sea_orm(iden = "controlType")]
    ControlType,
    #[sea_orm(iden = "repairItems")]
    RepairItems,
}
